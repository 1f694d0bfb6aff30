//! 延迟解析句柄
//!
//! [`Autowired`] 与 [`AutowiredAll`] 在构造时只捕获查询，不做任何查找；
//! 首次调用时在共享访问下扫描注册表并记忆结果。记忆化由显式的
//! 一次性计算单元保证，未找到的失败从不缓存，后续调用会重新扫描。
//!
//! 正是这种间接引用使互相依赖的组件可以成环：双方各持有对方契约的
//! 解析句柄，只要首次调用发生在完整装配之后，注册顺序无关紧要。

use beanwire_abstractions::{BeanSource, PendingValidator};
use beanwire_common::{BeanDefinition, BeanError, BeanHandle, BeanResult, Descriptor};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::debug;

/// 单值解析句柄
///
/// 克隆开销为一次引用计数；所有克隆共享同一记忆化单元。
pub struct Autowired<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    inner: Arc<Wired<T, Arc<T>>>,
}

/// 多值解析句柄
///
/// 首次调用收集全部匹配的实例，顺序为注册顺序。
pub struct AutowiredAll<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    inner: Arc<Wired<T, Vec<Arc<T>>>>,
}

/// 解析句柄的共享内部状态
///
/// 描述符在构造期应用；查询侧的应用错误被捕获在 `query` 中，
/// 在每次调用时重新浮出，与未找到错误共用同一出口。
struct Wired<T, V>
where
    T: ?Sized + Send + Sync + 'static,
{
    source: Arc<dyn BeanSource>,
    query: BeanResult<BeanDefinition>,
    cell: OnceCell<V>,
    _marker: std::marker::PhantomData<fn() -> Arc<T>>,
}

impl<T, V> Wired<T, V>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn new(source: Arc<dyn BeanSource>, descriptors: Vec<Descriptor>) -> Self {
        Self {
            source,
            query: BeanDefinition::query::<T>().apply(descriptors),
            cell: OnceCell::new(),
            _marker: std::marker::PhantomData,
        }
    }

    fn query(&self) -> BeanResult<&BeanDefinition> {
        self.query.as_ref().map_err(Clone::clone)
    }
}

fn downcast<T>(handle: BeanHandle, type_name: &str) -> BeanResult<Arc<T>>
where
    T: ?Sized + Send + Sync + 'static,
{
    handle
        .downcast::<Arc<T>>()
        .map(|wrapped| (*wrapped).clone())
        .map_err(|_| BeanError::invalid_definition(format!("类型转换失败: [{type_name}]")))
}

impl<T> Autowired<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    /// 基于自定义扫描源构造解析句柄
    ///
    /// 该路径不登记校验器；经由注册表便捷入口构造的句柄才会被
    /// 校验流程跟踪。
    pub fn with_source(source: Arc<dyn BeanSource>, descriptors: Vec<Descriptor>) -> Self {
        Self {
            inner: Arc::new(Wired::new(source, descriptors)),
        }
    }

    /// 解析并返回匹配的实例
    ///
    /// 首次调用扫描注册表并记忆结果；此后直接返回缓存实例，
    /// 不再扫描也不再加锁。未找到时返回错误且不缓存失败。
    pub fn get(&self) -> BeanResult<Arc<T>> {
        let bean = self.inner.cell.get_or_try_init(|| {
            let query = self.inner.query()?;
            match self.inner.source.load_one(query) {
                Some(handle) => {
                    debug!(bean = query.type_name(), "解析组件");
                    downcast::<T>(handle, query.type_name())
                }
                None => Err(BeanError::not_found(query.type_name())),
            }
        })?;
        Ok(bean.clone())
    }

    pub(crate) fn as_validator(&self) -> PendingValidator {
        let wired = self.clone();
        Arc::new(move || wired.get().map(|_| ()))
    }
}

impl<T> AutowiredAll<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    /// 基于自定义扫描源构造多值解析句柄
    pub fn with_source(source: Arc<dyn BeanSource>, descriptors: Vec<Descriptor>) -> Self {
        Self {
            inner: Arc::new(Wired::new(source, descriptors)),
        }
    }

    /// 解析并返回全部匹配的实例
    ///
    /// 零匹配视为未找到错误，同样不缓存；成功后记忆整个集合。
    pub fn get(&self) -> BeanResult<Vec<Arc<T>>> {
        let beans = self.inner.cell.get_or_try_init(|| {
            let query = self.inner.query()?;
            let handles = self.inner.source.load_all(query);
            if handles.is_empty() {
                return Err(BeanError::not_found(query.type_name()));
            }
            debug!(
                bean = query.type_name(),
                count = handles.len(),
                "解析组件集合"
            );
            handles
                .into_iter()
                .map(|handle| downcast::<T>(handle, query.type_name()))
                .collect::<BeanResult<Vec<_>>>()
        })?;
        Ok(beans.clone())
    }

    pub(crate) fn as_validator(&self) -> PendingValidator {
        let wired = self.clone();
        Arc::new(move || wired.get().map(|_| ()))
    }
}

impl<T> Clone for Autowired<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Clone for AutowiredAll<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Autowired<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Autowired")
            .field("query", &self.inner.query)
            .field("resolved", &self.inner.cell.get().is_some())
            .finish()
    }
}

impl<T> std::fmt::Debug for AutowiredAll<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutowiredAll")
            .field("query", &self.inner.query)
            .field("resolved", &self.inner.cell.get().is_some())
            .finish()
    }
}
