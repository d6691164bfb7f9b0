//! 类型描述符
//!
//! 约定扫描所需的全部类型元数据：类型种类、是否导出、实现的契约以及激活器。

use crate::metadata::TypeInfo;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// 类型擦除后的实例
pub type AnyInstance = Arc<dyn Any + Send + Sync>;

/// 激活器产生的错误
pub type ActivationError = Box<dyn std::error::Error + Send + Sync>;

/// 激活器：无参构造一个类型擦除的实例
pub type Activator = Arc<dyn Fn() -> Result<AnyInstance, ActivationError> + Send + Sync>;

/// 上转换函数：把实现类型的实例转换为装箱的 `Arc<dyn Contract>`
type Upcaster = Arc<dyn Fn(AnyInstance) -> Option<Box<dyn Any>> + Send + Sync>;

/// 类型种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// 契约（trait object）
    Interface,
    /// 具体类型
    Concrete,
}

/// 实现类型与某个契约之间的绑定
#[derive(Clone)]
pub struct ContractBinding {
    info: TypeInfo,
    upcast: Upcaster,
}

impl ContractBinding {
    /// 契约的类型信息
    pub fn info(&self) -> &TypeInfo {
        &self.info
    }

    /// 契约名称
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// 将实现类型的实例上转换为契约 `S`
    ///
    /// 实例不是该绑定的实现类型，或 `S` 不是该契约时返回 `None`。
    pub fn upcast<S: ?Sized + 'static>(&self, instance: AnyInstance) -> Option<Arc<S>> {
        let boxed = (self.upcast)(instance)?;
        boxed.downcast::<Arc<S>>().ok().map(|service| *service)
    }
}

impl fmt::Debug for ContractBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractBinding")
            .field("info", &self.info)
            .field("upcast", &"<function>")
            .finish()
    }
}

/// 类型描述符
#[derive(Clone)]
pub struct TypeDescriptor {
    info: TypeInfo,
    kind: TypeKind,
    exported: bool,
    contracts: Vec<ContractBinding>,
    activator: Option<Activator>,
}

impl TypeDescriptor {
    /// 为契约 `dyn Trait` 创建描述符
    pub fn interface<S: ?Sized + 'static>() -> Self {
        Self {
            info: TypeInfo::of::<S>(),
            kind: TypeKind::Interface,
            exported: true,
            contracts: Vec::new(),
            activator: None,
        }
    }

    /// 开始构建具体类型的描述符
    pub fn concrete<T: Any + Send + Sync>() -> ConcreteTypeBuilder<T> {
        ConcreteTypeBuilder {
            info: TypeInfo::of::<T>(),
            exported: true,
            contracts: Vec::new(),
            activator: None,
            _marker: PhantomData,
        }
    }

    /// 覆盖模块路径
    pub fn in_module(mut self, module_path: impl Into<String>) -> Self {
        self.info = self.info.in_module(module_path);
        self
    }

    /// 设置是否导出
    pub fn exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    /// 类型信息
    pub fn info(&self) -> &TypeInfo {
        &self.info
    }

    /// 类型名称
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// 类型种类
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// 是否为契约
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// 是否为公开导出的类型
    pub fn is_exported(&self) -> bool {
        self.exported
    }

    /// 实现的契约（声明顺序）
    pub fn contracts(&self) -> &[ContractBinding] {
        &self.contracts
    }

    /// 按契约类型ID查找绑定
    pub fn contract(&self, id: std::any::TypeId) -> Option<&ContractBinding> {
        self.contracts.iter().find(|binding| binding.info.id == id)
    }

    /// 是否实现了指定契约
    pub fn implements(&self, id: std::any::TypeId) -> bool {
        self.contract(id).is_some()
    }

    /// 是否可以被激活
    pub fn is_activatable(&self) -> bool {
        self.activator.is_some()
    }

    /// 调用激活器创建实例，没有激活器时返回 `None`
    pub fn activate(&self) -> Option<Result<AnyInstance, ActivationError>> {
        self.activator.as_ref().map(|activator| activator())
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("info", &self.info)
            .field("kind", &self.kind)
            .field("exported", &self.exported)
            .field("contracts", &self.contracts)
            .field("activator", &self.activator.as_ref().map(|_| "<function>"))
            .finish()
    }
}

/// 具体类型描述符构建器
pub struct ConcreteTypeBuilder<T> {
    info: TypeInfo,
    exported: bool,
    contracts: Vec<ContractBinding>,
    activator: Option<Activator>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> ConcreteTypeBuilder<T> {
    /// 覆盖模块路径，通常传入 `module_path!()`
    pub fn in_module(mut self, module_path: impl Into<String>) -> Self {
        self.info = self.info.in_module(module_path);
        self
    }

    /// 设置是否导出
    pub fn exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    /// 声明实现的契约
    ///
    /// 调用顺序即声明顺序，多个契约同时满足命名约定时取第一个。
    ///
    /// ```rust
    /// use infrastructure_common::TypeDescriptor;
    /// use std::sync::Arc;
    ///
    /// trait IClock {}
    /// struct Clock;
    /// impl IClock for Clock {}
    ///
    /// let descriptor = TypeDescriptor::concrete::<Clock>()
    ///     .implements::<dyn IClock>(|clock| clock as Arc<dyn IClock>)
    ///     .build();
    /// assert_eq!(descriptor.contracts()[0].name(), "IClock");
    /// ```
    pub fn implements<S: ?Sized + 'static>(mut self, upcast: fn(Arc<T>) -> Arc<S>) -> Self {
        let upcaster: Upcaster = Arc::new(move |instance: AnyInstance| {
            let concrete = instance.downcast::<T>().ok()?;
            Some(Box::new(upcast(concrete)) as Box<dyn Any>)
        });
        self.contracts.push(ContractBinding {
            info: TypeInfo::of::<S>(),
            upcast: upcaster,
        });
        self
    }

    /// 设置激活器
    pub fn with_activator<F>(mut self, activator: F) -> Self
    where
        F: Fn() -> Result<T, ActivationError> + Send + Sync + 'static,
    {
        self.activator = Some(Arc::new(move || {
            activator().map(|instance| Arc::new(instance) as AnyInstance)
        }));
        self
    }

    /// 使用 `Default` 作为激活器
    pub fn with_default_activator(self) -> Self
    where
        T: Default,
    {
        self.with_activator(|| Ok(T::default()))
    }

    /// 构建描述符
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            info: self.info,
            kind: TypeKind::Concrete,
            exported: self.exported,
            contracts: self.contracts,
            activator: self.activator,
        }
    }
}
