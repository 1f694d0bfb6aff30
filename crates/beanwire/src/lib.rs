//! # Beanwire
//!
//! 运行时组件注册表：调用方把构造完成的实例按契约类型注册进来，
//! 其他组件通过延迟、记忆化的解析句柄获取引用，替代构造期的硬接线。
//!
//! ## 核心组件
//!
//! - [`AppContext`] - 并发安全的组件注册表
//! - [`Autowired`] / [`AutowiredAll`] - 延迟解析句柄
//! - [`name`] / [`disable_wildcard`] / [`contract!`] / [`conforms!`] - 定义描述符
//! - [`validate`] - 饿汉式校验，提前暴露缺失的依赖
//!
//! ## 快速开始
//!
//! ```rust
//! use beanwire::{name, AppContext, BeanResult};
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct English;
//!
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "hello".to_string()
//!     }
//! }
//!
//! fn main() -> BeanResult<()> {
//!     let context = AppContext::new();
//!     context.component::<dyn Greeter>(Arc::new(English), vec![name(&["en"])])?;
//!
//!     let greeter = context.autowire::<dyn Greeter>(vec![name(&["en"])]);
//!     context.validate()?;
//!     assert_eq!(greeter.get()?.greet(), "hello");
//!     Ok(())
//! }
//! ```
//!
//! ## 循环依赖
//!
//! 解析句柄在构造时不查找，组件可以互相持有对方契约的句柄；
//! 只要首次调用发生在双方都注册之后，注册顺序无关紧要。

pub mod context;
pub mod resolver;

pub use beanwire_abstractions::{BeanRegistry, BeanSource, PendingValidator, RegistryStats};
pub use beanwire_common::{
    conforms, contract, disable_wildcard, name, BeanDefinition, BeanError, BeanHandle, BeanResult,
    BeanSummary, Binding, Descriptor, TypeInfo, DEFAULT_QUALIFIER,
};
pub use context::AppContext;
pub use resolver::{Autowired, AutowiredAll};

use once_cell::sync::Lazy;
use std::sync::Arc;

/// 进程级默认注册表
///
/// 首次访问时初始化一次；独立的测试或运行边界之间必须显式调用
/// [`release`] 清空，默认实例不会自行复位。
static GLOBAL_CONTEXT: Lazy<AppContext> = Lazy::new(AppContext::new);

/// 获取进程级默认注册表
pub fn global() -> &'static AppContext {
    &GLOBAL_CONTEXT
}

/// 在默认注册表中注册组件实例并原样返回
pub fn component<T>(bean: Arc<T>, descriptors: Vec<Descriptor>) -> BeanResult<Arc<T>>
where
    T: ?Sized + Send + Sync + 'static,
{
    global().component(bean, descriptors)
}

/// 在默认注册表上创建单值解析句柄
pub fn autowire<T>(descriptors: Vec<Descriptor>) -> Autowired<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    global().autowire(descriptors)
}

/// 在默认注册表上创建多值解析句柄
pub fn autowire_all<T>(descriptors: Vec<Descriptor>) -> AutowiredAll<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    global().autowire_all(descriptors)
}

/// 强制默认注册表的全部待决解析器完成首次解析
pub fn validate() -> BeanResult<()> {
    global().validate()
}

/// 清空默认注册表的全部定义与待决校验器
pub fn release() {
    global().release()
}

/// [`release`] 的别名，用于独立运行边界之间的整体复位
pub fn reset() {
    global().reset()
}
