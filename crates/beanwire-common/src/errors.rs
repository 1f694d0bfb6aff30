//! 错误类型定义

use thiserror::Error;

/// 组件注册与解析错误类型
///
/// 所有变体都携带出错的类型名作为上下文。错误实现 [`Clone`]，
/// 解析句柄在构造期捕获的错误可以在每次调用时重新返回。
#[derive(Error, Debug, Clone)]
pub enum BeanError {
    #[error("组件实例为空: [{type_name}] 不能注册空实例")]
    NilBean { type_name: String },

    #[error("组件类型不明确: [{type_name}] 同时声明了 {first} 与 {second}")]
    AmbiguousType {
        type_name: String,
        first: String,
        second: String,
    },

    #[error("组件定义无效: {message}")]
    InvalidDefinition { message: String },

    #[error("组件未找到: [{type_name}]")]
    NotFound { type_name: String },

    #[error("组件重复注册: [{type_name}]")]
    Duplicate { type_name: String },
}

impl BeanError {
    /// 创建空实例错误
    pub fn nil_bean(type_name: impl Into<String>) -> Self {
        Self::NilBean {
            type_name: type_name.into(),
        }
    }

    /// 创建类型不明确错误
    pub fn ambiguous_type(
        type_name: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::AmbiguousType {
            type_name: type_name.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// 创建定义无效错误
    pub fn invalid_definition(message: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            message: message.into(),
        }
    }

    /// 创建未找到错误
    pub fn not_found(type_name: impl Into<String>) -> Self {
        Self::NotFound {
            type_name: type_name.into(),
        }
    }

    /// 创建重复注册错误
    pub fn duplicate(type_name: impl Into<String>) -> Self {
        Self::Duplicate {
            type_name: type_name.into(),
        }
    }
}

/// 结果类型别名
pub type BeanResult<T> = Result<T, BeanError>;
