//! 组件定义与匹配算法
//!
//! [`BeanDefinition`] 是注册记录与查询记录的统一载体：
//! 注册侧携带实例句柄与显式契约表，查询侧只携带类型与限定名。
//! 匹配算法在每次扫描时重新计算，从不缓存在定义内部。

use crate::errors::{BeanError, BeanResult};
use crate::typeinfo::TypeInfo;
use chrono::{DateTime, Utc};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 默认限定名，等价于未声明限定名的全匹配绑定
pub const DEFAULT_QUALIFIER: &str = "default";

/// 类型擦除的实例句柄
///
/// 内部包裹声明类型的 `Arc<T>`，解析时按查询类型还原。
pub type BeanHandle = Arc<dyn Any + Send + Sync>;

/// 一条类型绑定：类型信息加上按该类型预先转换好的实例句柄
///
/// 查询侧的绑定没有句柄。
#[derive(Clone)]
pub struct Binding {
    type_info: TypeInfo,
    handle: Option<BeanHandle>,
}

impl Binding {
    /// 绑定的类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 绑定的实例句柄
    pub fn handle(&self) -> Option<&BeanHandle> {
        self.handle.as_ref()
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("type_info", &self.type_info)
            .field("handle", &self.handle.as_ref().map(|_| "<bean>"))
            .finish()
    }
}

/// 组件定义
///
/// 注册记录：声明类型、限定名集合、通配标志、实例句柄与契约表。
/// 插入注册表后不可变，解析过程从不修改定义。
pub struct BeanDefinition {
    primary: Option<Binding>,
    overrides: Vec<Binding>,
    qualifiers: Vec<String>,
    wildcard: bool,
    bean: Option<BeanHandle>,
    contracts: Vec<Binding>,
    registered_at: Option<DateTime<Utc>>,
}

impl BeanDefinition {
    /// 构造注册侧定义，声明类型默认为实例自身的类型
    pub fn of<T>(bean: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let handle: BeanHandle = Arc::new(bean);
        Self {
            primary: Some(Binding {
                type_info: TypeInfo::of::<T>(),
                handle: Some(handle.clone()),
            }),
            overrides: Vec::new(),
            qualifiers: Vec::new(),
            wildcard: false,
            bean: Some(handle),
            contracts: Vec::new(),
            registered_at: None,
        }
    }

    /// 构造查询侧定义，通配匹配默认开启
    pub fn query<T>() -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Self {
            primary: Some(Binding {
                type_info: TypeInfo::of::<T>(),
                handle: None,
            }),
            overrides: Vec::new(),
            qualifiers: Vec::new(),
            wildcard: true,
            bean: None,
            contracts: Vec::new(),
            registered_at: None,
        }
    }

    /// 构造未声明类型的动态定义
    ///
    /// 必须通过 [`contract`] 描述符补全声明类型，否则注册时
    /// 以定义无效错误失败。
    pub fn untyped(bean: BeanHandle) -> Self {
        Self {
            primary: None,
            overrides: Vec::new(),
            qualifiers: Vec::new(),
            wildcard: false,
            bean: Some(bean),
            contracts: Vec::new(),
            registered_at: None,
        }
    }

    /// 依次应用描述符并收敛类型声明
    ///
    /// 同一次调用中出现多于一个 [`contract`] 覆盖时返回类型不明确错误。
    pub fn apply(mut self, descriptors: Vec<Descriptor>) -> BeanResult<Self> {
        for descriptor in descriptors {
            (descriptor.0)(&mut self)?;
        }
        match self.overrides.len() {
            0 => {}
            1 => {
                self.primary = self.overrides.pop();
            }
            _ => {
                return Err(BeanError::ambiguous_type(
                    self.type_name().to_string(),
                    self.overrides[0].type_info.name().to_string(),
                    self.overrides[1].type_info.name().to_string(),
                ));
            }
        }
        Ok(self)
    }

    /// 声明类型信息
    pub fn type_info(&self) -> Option<&TypeInfo> {
        self.primary.as_ref().map(Binding::type_info)
    }

    /// 声明类型名，未声明时返回占位串
    pub fn type_name(&self) -> &str {
        self.primary
            .as_ref()
            .map_or("<untyped>", |binding| binding.type_info.name())
    }

    /// 限定名集合
    pub fn qualifiers(&self) -> &[String] {
        &self.qualifiers
    }

    /// 查询侧通配标志
    pub fn wildcard(&self) -> bool {
        self.wildcard
    }

    /// 注册实例句柄
    pub fn bean(&self) -> Option<&BeanHandle> {
        self.bean.as_ref()
    }

    /// 注册时间，插入注册表时写入
    pub fn registered_at(&self) -> Option<DateTime<Utc>> {
        self.registered_at
    }

    /// 标记注册完成，由注册表在插入时调用
    pub fn mark_registered(&mut self) {
        self.registered_at = Some(Utc::now());
    }

    /// 是否为默认绑定（无限定名，或恰好为 `["default"]`）
    pub fn is_default_binding(&self) -> bool {
        self.qualifiers.is_empty()
            || (self.qualifiers.len() == 1 && self.qualifiers[0] == DEFAULT_QUALIFIER)
    }

    /// 契约表中是否包含指定类型
    pub fn conforms_to(&self, type_info: &TypeInfo) -> bool {
        self.contracts
            .iter()
            .any(|binding| binding.type_info == *type_info)
    }

    /// 匹配算法：判断本定义（候选）是否满足查询定义
    ///
    /// 1. 类型兼容：声明类型相等，或查询开启通配且候选契约表覆盖查询类型；
    /// 2. 候选为默认绑定时无条件匹配；
    /// 3. 双方都有限定名时，交集非空才匹配；
    /// 4. 候选有限定名而查询未限定时视为匹配。
    pub fn matches(&self, query: &Self) -> bool {
        if !self.type_compatible(query) {
            return false;
        }
        if self.is_default_binding() {
            return true;
        }
        if !query.qualifiers.is_empty() {
            return self
                .qualifiers
                .iter()
                .any(|name| query.qualifiers.iter().any(|other| name == other));
        }
        true
    }

    /// 按查询类型选取实例句柄
    ///
    /// 精确匹配取主绑定，通配匹配取契约表中预先转换好的句柄。
    pub fn handle_for(&self, query: &Self) -> Option<BeanHandle> {
        let (Some(candidate), Some(wanted)) = (self.primary.as_ref(), query.primary.as_ref())
        else {
            return None;
        };
        if candidate.type_info == wanted.type_info {
            return candidate.handle.clone();
        }
        if query.wildcard {
            return self
                .contracts
                .iter()
                .find(|binding| binding.type_info == wanted.type_info)
                .and_then(|binding| binding.handle.clone());
        }
        None
    }

    /// 生成只读摘要
    pub fn summary(&self) -> BeanSummary {
        BeanSummary {
            type_name: self.type_name().to_string(),
            qualifiers: self.qualifiers.clone(),
            contracts: self
                .contracts
                .iter()
                .map(|binding| binding.type_info.name().to_string())
                .collect(),
            registered_at: self.registered_at,
        }
    }

    fn type_compatible(&self, query: &Self) -> bool {
        let (Some(candidate), Some(wanted)) = (self.primary.as_ref(), query.primary.as_ref())
        else {
            return false;
        };
        candidate.type_info == wanted.type_info
            || (query.wildcard && self.conforms_to(&wanted.type_info))
    }

    fn bean_as<C: Send + Sync + 'static>(&self) -> BeanResult<Option<Arc<C>>> {
        let Some(handle) = self.bean.as_ref() else {
            return Ok(None);
        };
        match handle.clone().downcast::<Arc<C>>() {
            Ok(wrapped) => Ok(Some((*wrapped).clone())),
            Err(_) => Err(BeanError::invalid_definition(format!(
                "契约声明的具体类型 {} 与注册实例不符",
                std::any::type_name::<C>()
            ))),
        }
    }
}

impl fmt::Debug for BeanDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanDefinition")
            .field("primary", &self.primary)
            .field("qualifiers", &self.qualifiers)
            .field("wildcard", &self.wildcard)
            .field("bean", &self.bean.as_ref().map(|_| "<bean>"))
            .field("contracts", &self.contracts)
            .field("registered_at", &self.registered_at)
            .finish()
    }
}

/// 组件定义的只读摘要
#[derive(Debug, Clone)]
pub struct BeanSummary {
    /// 声明类型名
    pub type_name: String,
    /// 限定名集合
    pub qualifiers: Vec<String>,
    /// 契约表中的类型名
    pub contracts: Vec<String>,
    /// 注册时间
    pub registered_at: Option<DateTime<Utc>>,
}

/// 定义描述符，应用于构建中的 [`BeanDefinition`]
pub struct Descriptor(Box<dyn FnOnce(&mut BeanDefinition) -> BeanResult<()>>);

impl Descriptor {
    /// 从闭包构造描述符
    pub fn new(apply: impl FnOnce(&mut BeanDefinition) -> BeanResult<()> + 'static) -> Self {
        Self(Box::new(apply))
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Descriptor(..)")
    }
}

/// 设置限定名集合；空列表等价于单一的 `"default"` 限定名
pub fn name(aliases: &[&str]) -> Descriptor {
    let qualifiers: Vec<String> = if aliases.is_empty() {
        vec![DEFAULT_QUALIFIER.to_string()]
    } else {
        aliases.iter().map(|alias| (*alias).to_string()).collect()
    };
    Descriptor::new(move |definition| {
        definition.qualifiers = qualifiers;
        Ok(())
    })
}

/// 关闭查询侧的通配匹配，要求声明类型完全一致
pub fn disable_wildcard() -> Descriptor {
    Descriptor::new(|definition| {
        definition.wildcard = false;
        Ok(())
    })
}

/// 声明类型覆盖：以契约类型取代实例自身类型作为声明类型
///
/// 注册侧要求 `cast` 的入参类型与注册实例的具体类型一致；
/// 查询侧只替换类型信息。通常通过 [`contract!`](macro@crate::contract) 宏使用。
pub fn contract<C, T>(cast: fn(Arc<C>) -> Arc<T>) -> Descriptor
where
    C: Send + Sync + 'static,
    T: ?Sized + Send + Sync + 'static,
{
    Descriptor::new(move |definition| {
        let handle = definition
            .bean_as::<C>()?
            .map(|bean| -> BeanHandle { Arc::new(cast(bean)) });
        definition.overrides.push(Binding {
            type_info: TypeInfo::of::<T>(),
            handle,
        });
        Ok(())
    })
}

/// 契约声明：向契约表追加一条通配可见的绑定
///
/// 只对注册侧生效；查询侧应用时为空操作。
/// 通常通过 [`conforms!`](macro@crate::conforms) 宏使用。
pub fn conforms<C, T>(cast: fn(Arc<C>) -> Arc<T>) -> Descriptor
where
    C: Send + Sync + 'static,
    T: ?Sized + Send + Sync + 'static,
{
    Descriptor::new(move |definition| {
        let Some(bean) = definition.bean_as::<C>()? else {
            return Ok(());
        };
        definition.contracts.push(Binding {
            type_info: TypeInfo::of::<T>(),
            handle: Some(Arc::new(cast(bean))),
        });
        Ok(())
    })
}
