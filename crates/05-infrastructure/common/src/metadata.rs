//! 元数据定义
//!
//! 提供类型的名称、模块路径等元数据信息

use std::any::TypeId;
use std::fmt;

/// 类型信息
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 类型名称（不含模块路径）
    pub name: String,
    /// 类型ID
    pub id: TypeId,
    /// 模块路径（即命名空间，不含类型名称）
    pub module_path: String,
}

impl TypeInfo {
    /// 创建新的类型信息
    pub fn new(type_id: TypeId, name: impl Into<String>, module_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: type_id,
            module_path: module_path.into(),
        }
    }

    /// 从类型获取类型信息
    ///
    /// 同时支持具体类型与 trait object（`dyn Trait`）。名称来自
    /// [`std::any::type_name`]，需要精确模块路径时用 [`TypeInfo::in_module`] 覆盖。
    pub fn of<T: ?Sized + 'static>() -> Self {
        let (module_path, name) = split_type_name(std::any::type_name::<T>());
        Self {
            name: name.to_string(),
            id: TypeId::of::<T>(),
            module_path: module_path.to_string(),
        }
    }

    /// 覆盖模块路径，通常传入 `module_path!()`
    pub fn in_module(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = module_path.into();
        self
    }

    /// 所属 crate 名称（模块路径的第一段）
    pub fn crate_name(&self) -> &str {
        self.module_path
            .split("::")
            .next()
            .unwrap_or(&self.module_path)
    }

    /// 完整路径名称
    pub fn full_name(&self) -> String {
        if self.module_path.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.module_path, self.name)
        }
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

/// 将 `type_name` 输出拆分为 (模块路径, 简短名称)
///
/// `dyn a::b::IFoo + Send + Sync` 得到 `("a::b", "IFoo")`，
/// `a::Wrapper<b::Inner>` 得到 `("a", "Wrapper")`。
pub fn split_type_name(type_name: &str) -> (&str, &str) {
    let path = type_name.trim();
    let path = path.strip_prefix("dyn ").unwrap_or(path);
    let path = path.split(" + ").next().unwrap_or(path);
    let path = path.split('<').next().unwrap_or(path).trim();

    match path.rsplit_once("::") {
        Some((module_path, name)) => (module_path, name),
        None => ("", path),
    }
}
