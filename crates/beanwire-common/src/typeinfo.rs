//! 类型描述符定义
//!
//! 提供契约类型的稳定标识与相等比较

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型信息
///
/// 契约类型的稳定标识，在编译期通过泛型参数派生。
/// 相等与哈希只基于 [`TypeId`]，类型名仅作为日志与错误上下文。
/// 类型参数允许 unsized，因此 trait 对象契约（如 `dyn Greeter`）同样适用。
#[derive(Debug, Clone)]
pub struct TypeInfo {
    id: TypeId,
    name: String,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>().to_string(),
        }
    }

    /// 类型ID
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// 完整类型名（包含模块路径）
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        self.name.split("::").last().unwrap_or(&self.name)
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
