//! 组件注册表实现
//!
//! [`AppContext`] 持有唯一的读写锁，保护定义集合与待决校验器列表。
//! 注册与释放独占加锁，扫描共享加锁；解析句柄的记忆化快路径完全
//! 不经过这把锁。定义集合按插入顺序存储，单值解析先注册者优先，
//! 结果确定。

use crate::resolver::{Autowired, AutowiredAll};
use beanwire_abstractions::{BeanRegistry, BeanSource, PendingValidator, RegistryStats};
use beanwire_common::{BeanDefinition, BeanError, BeanHandle, BeanResult, BeanSummary, Descriptor};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Default)]
struct ContextState {
    definitions: Vec<Arc<BeanDefinition>>,
    validators: Vec<PendingValidator>,
}

/// 组件注册表
///
/// 克隆共享同一内部状态，可以在线程间自由传递。
/// 进程级默认实例见 [`crate::global`]。
#[derive(Clone, Default)]
pub struct AppContext {
    state: Arc<RwLock<ContextState>>,
}

impl AppContext {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册组件实例并原样返回
    ///
    /// 以编译期类型参数 `T` 作为声明类型构建定义，应用描述符后插入。
    /// 透传返回值允许在构造处内联注册：
    /// 先构造、注册，再把同一实例交给调用方继续使用。
    pub fn component<T>(&self, bean: Arc<T>, descriptors: Vec<Descriptor>) -> BeanResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let definition = BeanDefinition::of::<T>(bean.clone()).apply(descriptors)?;
        self.register(definition)?;
        Ok(bean)
    }

    /// 创建单值解析句柄并登记校验器
    ///
    /// 构造时不做任何查找；句柄同时被加入待决校验器列表，
    /// [`validate`](Self::validate) 会强制其完成首次解析。
    pub fn autowire<T>(&self, descriptors: Vec<Descriptor>) -> Autowired<T>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let wired = Autowired::with_source(self.as_source(), descriptors);
        self.track(wired.as_validator());
        wired
    }

    /// 创建多值解析句柄并登记校验器
    pub fn autowire_all<T>(&self, descriptors: Vec<Descriptor>) -> AutowiredAll<T>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let wired = AutowiredAll::with_source(self.as_source(), descriptors);
        self.track(wired.as_validator());
        wired
    }

    fn as_source(&self) -> Arc<dyn BeanSource> {
        Arc::new(self.clone())
    }

    /// 注册组件定义（动态路径）
    ///
    /// 依次检查实例非空、声明类型可派生、无重复注册，然后独占插入。
    /// 重复检查把新定义当作精确查询，对既有定义逐一匹配。
    pub fn register(&self, mut definition: BeanDefinition) -> BeanResult<()> {
        let mut state = self.state.write();

        if definition.bean().is_none() {
            return Err(BeanError::nil_bean(definition.type_name()));
        }
        if definition.type_info().is_none() {
            return Err(BeanError::invalid_definition(
                "无法派生声明类型，动态定义需要契约声明",
            ));
        }
        if state
            .definitions
            .iter()
            .any(|candidate| candidate.matches(&definition))
        {
            warn!(bean = definition.type_name(), "组件重复注册");
            return Err(BeanError::duplicate(definition.type_name()));
        }

        definition.mark_registered();
        info!(
            bean = definition.type_name(),
            qualifiers = ?definition.qualifiers(),
            "注册组件"
        );
        state.definitions.push(Arc::new(definition));
        Ok(())
    }

    /// 登记待决校验器
    pub fn track(&self, validator: PendingValidator) {
        self.state.write().validators.push(validator);
    }

    /// 强制全部待决解析器完成首次解析
    ///
    /// 在短暂的共享访问窗口内快照校验器列表，随后在锁外逐个执行，
    /// 遇到首个错误立即返回。成功的校验不消耗校验器列表。
    pub fn validate(&self) -> BeanResult<()> {
        let snapshot: Vec<PendingValidator> = self.state.read().validators.clone();
        debug!(count = snapshot.len(), "开始校验待决解析器");
        for validator in &snapshot {
            validator()?;
        }
        Ok(())
    }

    /// 丢弃全部组件定义与待决校验器
    pub fn release(&self) {
        let mut state = self.state.write();
        info!(
            definitions = state.definitions.len(),
            validators = state.validators.len(),
            "释放组件注册表"
        );
        state.definitions.clear();
        state.validators.clear();
    }

    /// [`release`](Self::release) 的别名，用于独立运行边界之间的整体复位
    pub fn reset(&self) {
        self.release();
    }

    /// 获取所有已注册定义的摘要
    pub fn definitions(&self) -> Vec<BeanSummary> {
        self.state
            .read()
            .definitions
            .iter()
            .map(|definition| definition.summary())
            .collect()
    }

    /// 注册表统计信息
    pub fn stats(&self) -> RegistryStats {
        let state = self.state.read();
        RegistryStats {
            registered_beans: state.definitions.len(),
            pending_validators: state.validators.len(),
        }
    }
}

impl BeanRegistry for AppContext {
    fn register(&self, definition: BeanDefinition) -> BeanResult<()> {
        Self::register(self, definition)
    }

    fn track(&self, validator: PendingValidator) {
        Self::track(self, validator);
    }

    fn validate(&self) -> BeanResult<()> {
        Self::validate(self)
    }

    fn release(&self) {
        Self::release(self);
    }

    fn definitions(&self) -> Vec<BeanSummary> {
        Self::definitions(self)
    }

    fn stats(&self) -> RegistryStats {
        Self::stats(self)
    }
}

impl BeanSource for AppContext {
    fn load_one(&self, query: &BeanDefinition) -> Option<BeanHandle> {
        let state = self.state.read();
        state
            .definitions
            .iter()
            .find(|candidate| candidate.matches(query))
            .and_then(|candidate| candidate.handle_for(query))
    }

    fn load_all(&self, query: &BeanDefinition) -> Vec<BeanHandle> {
        let state = self.state.read();
        state
            .definitions
            .iter()
            .filter(|candidate| candidate.matches(query))
            .filter_map(|candidate| candidate.handle_for(query))
            .collect()
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("AppContext")
            .field("registered_beans", &stats.registered_beans)
            .field("pending_validators", &stats.pending_validators)
            .finish()
    }
}
