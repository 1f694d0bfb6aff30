//! 组件注册表抽象接口

use beanwire_common::{BeanDefinition, BeanResult, BeanSummary};
use std::sync::Arc;

/// 待决校验器：强制一个解析句柄完成首次解析
pub type PendingValidator = Arc<dyn Fn() -> BeanResult<()> + Send + Sync>;

/// 组件注册表 trait
///
/// 提供注册、释放与校验的对象安全接口
pub trait BeanRegistry: Send + Sync {
    /// 注册组件定义
    ///
    /// 依次检查实例非空、声明类型可派生、无重复注册，然后独占插入。
    fn register(&self, definition: BeanDefinition) -> BeanResult<()>;

    /// 登记待决校验器
    fn track(&self, validator: PendingValidator);

    /// 强制全部待决解析器完成首次解析，遇到首个错误即失败
    fn validate(&self) -> BeanResult<()>;

    /// 丢弃全部组件定义与待决校验器
    fn release(&self);

    /// 获取所有已注册定义的摘要
    fn definitions(&self) -> Vec<BeanSummary>;

    /// 注册表统计信息
    fn stats(&self) -> RegistryStats;
}

/// 注册表统计信息
#[derive(Debug, Clone, Default)]
pub struct RegistryStats {
    /// 已注册定义数量
    pub registered_beans: usize,
    /// 待决校验器数量
    pub pending_validators: usize,
}
