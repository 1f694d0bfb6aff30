//! # Beanwire Common
//!
//! 这个 crate 提供 beanwire 组件注册表的公共数据模型。
//!
//! ## 核心组件
//!
//! - [`TypeInfo`] - 契约类型的稳定标识
//! - [`BeanDefinition`] - 注册记录与查询记录的统一载体
//! - [`Descriptor`] - 限定名、通配与契约声明的描述符
//! - [`BeanError`] - 注册与解析的错误类型
//!
//! ## 设计原则
//!
//! - 类型标识在编译期通过泛型派生，不依赖运行时反射
//! - 契约符合性由注册时显式声明的契约表承载
//! - 定义插入后不可变，匹配在每次扫描时重新计算

#[macro_use]
pub mod macros;

pub mod definition;
pub mod errors;
pub mod typeinfo;

pub use definition::*;
pub use errors::*;
pub use typeinfo::*;
