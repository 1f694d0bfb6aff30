//! 组件扫描抽象接口
//!
//! 解析句柄通过该接口访问注册表，解析逻辑与具体存储解耦，
//! 测试可以注入计数或打桩实现。

use beanwire_common::{BeanDefinition, BeanHandle};

/// 组件扫描 trait
///
/// 按查询定义扫描已注册的组件定义。实现方在共享访问下扫描，
/// 返回的句柄已按查询类型选取。
pub trait BeanSource: Send + Sync {
    /// 扫描首个匹配的定义并返回其实例句柄
    ///
    /// 按注册顺序扫描，先注册者优先。
    fn load_one(&self, query: &BeanDefinition) -> Option<BeanHandle>;

    /// 扫描全部匹配的定义并按注册顺序收集实例句柄
    fn load_all(&self, query: &BeanDefinition) -> Vec<BeanHandle>;
}
