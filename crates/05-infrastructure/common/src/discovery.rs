//! 类型发现机制
//!
//! Rust 没有运行时反射，类型元数据在编译期生成（见 `component-macros`），
//! 程序启动时登记到 [`TypeCatalog`]，约定扫描再从目录中读取。

use crate::descriptor::TypeDescriptor;
use crate::errors::ComponentError;
use crate::metadata::TypeInfo;
use parking_lot::RwLock;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// 类型全集
///
/// 约定扫描的唯一数据来源。
pub trait TypeUniverse: Send + Sync {
    /// 所有公开导出的类型
    ///
    /// 顺序是确定的：先按模块路径，再按类型名称排序。
    fn exported_types(&self) -> Vec<Arc<TypeDescriptor>>;

    /// 按类型ID查找描述符（不论是否导出）
    fn locate(&self, id: TypeId) -> Option<Arc<TypeDescriptor>>;
}

/// 内存中的类型目录
#[derive(Default)]
pub struct TypeCatalog {
    types: RwLock<Vec<Arc<TypeDescriptor>>>,
}

impl TypeCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 从一组描述符创建目录
    pub fn with_types<I>(types: I) -> Result<Self, ComponentError>
    where
        I: IntoIterator<Item = TypeDescriptor>,
    {
        let catalog = Self::new();
        for descriptor in types {
            catalog.register(descriptor)?;
        }
        Ok(catalog)
    }

    /// 登记类型描述符
    ///
    /// 同一类型ID只能登记一次。
    pub fn register(&self, descriptor: TypeDescriptor) -> Result<(), ComponentError> {
        let mut types = self.types.write();
        if types.iter().any(|known| known.info().id == descriptor.info().id) {
            return Err(ComponentError::DuplicateType {
                type_name: descriptor.info().full_name(),
            });
        }
        if descriptor.name().is_empty() {
            return Err(ComponentError::invalid_metadata("类型名称为空"));
        }
        types.push(Arc::new(descriptor));
        Ok(())
    }

    /// 已登记的类型数量
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    /// 目录是否为空
    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}

impl TypeUniverse for TypeCatalog {
    fn exported_types(&self) -> Vec<Arc<TypeDescriptor>> {
        let mut exported: Vec<_> = self
            .types
            .read()
            .iter()
            .filter(|descriptor| descriptor.is_exported())
            .cloned()
            .collect();
        exported.sort_by(|a, b| {
            a.info()
                .module_path
                .cmp(&b.info().module_path)
                .then_with(|| a.name().cmp(b.name()))
        });
        exported
    }

    fn locate(&self, id: TypeId) -> Option<Arc<TypeDescriptor>> {
        self.types
            .read()
            .iter()
            .find(|descriptor| descriptor.info().id == id)
            .cloned()
    }
}

impl fmt::Debug for TypeCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeCatalog")
            .field("types", &self.len())
            .finish()
    }
}

/// 扫描范围
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScanScope {
    /// 与标记类型位于同一模块路径（不含子模块）
    Namespace { module_path: String },
    /// 与标记类型位于同一 crate
    Crate { crate_name: String },
}

impl ScanScope {
    /// 标记类型所在的命名空间
    pub fn namespace_of<M: ?Sized + 'static>(universe: &dyn TypeUniverse) -> Self {
        Self::Namespace {
            module_path: marker_info::<M>(universe).module_path,
        }
    }

    /// 标记类型所在的 crate
    pub fn crate_of<M: ?Sized + 'static>(universe: &dyn TypeUniverse) -> Self {
        Self::Crate {
            crate_name: marker_info::<M>(universe).crate_name().to_string(),
        }
    }

    /// 类型是否位于该范围内
    pub fn contains(&self, info: &TypeInfo) -> bool {
        match self {
            Self::Namespace { module_path } => info.module_path == *module_path,
            Self::Crate { crate_name } => info.crate_name() == crate_name,
        }
    }
}

impl fmt::Display for ScanScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Namespace { module_path } => write!(f, "namespace {}", module_path),
            Self::Crate { crate_name } => write!(f, "crate {}", crate_name),
        }
    }
}

/// 标记类型的类型信息
///
/// 优先使用目录中登记的描述符，未登记时退回到 `type_name` 推断。
pub fn marker_info<M: ?Sized + 'static>(universe: &dyn TypeUniverse) -> TypeInfo {
    universe
        .locate(TypeId::of::<M>())
        .map(|descriptor| descriptor.info().clone())
        .unwrap_or_else(TypeInfo::of::<M>)
}

/// 范围内所有公开导出的类型
pub fn scoped_types(universe: &dyn TypeUniverse, scope: &ScanScope) -> Vec<Arc<TypeDescriptor>> {
    universe
        .exported_types()
        .into_iter()
        .filter(|descriptor| scope.contains(descriptor.info()))
        .collect()
}
