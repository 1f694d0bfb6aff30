//! # Beanwire Abstractions
//!
//! 抽象层，定义组件注册和依赖解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`BeanRegistry`] - 组件注册表接口
//! - [`BeanSource`] - 组件扫描接口

pub mod registry;
pub mod source;

pub use registry::*;
pub use source::*;
