//! 参考容器实现
//!
//! 内存中的简单容器，用于让约定注册可以端到端运行。不做依赖图解析，
//! 也不管理作用域。

use di_abstractions::Container;
use infrastructure_common::{
    AnyInstance, DependencyError, DependencyResult, Lifetime, TypeDescriptor, TypeInfo,
};
use parking_lot::Mutex;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 组件注册信息
#[derive(Debug, Clone)]
struct ComponentRegistration {
    /// 契约
    contract: TypeInfo,
    /// 实现类型
    implementation: Arc<TypeDescriptor>,
    /// 生命周期
    lifetime: Lifetime,
}

/// 具体的依赖注入容器实现
#[derive(Default)]
pub struct DiContainerImpl {
    /// 注册信息（注册顺序）
    registrations: Vec<ComponentRegistration>,
    /// 单例实例缓存，按实现类型ID索引
    singletons: Mutex<HashMap<TypeId, AnyInstance>>,
}

impl DiContainerImpl {
    /// 创建新的容器
    pub fn new() -> Self {
        Self::default()
    }

    fn registration_for_contract(&self, id: TypeId) -> Option<&ComponentRegistration> {
        self.registrations
            .iter()
            .find(|registration| registration.contract.id == id)
    }

    fn lifetime_of(&self, implementation: TypeId) -> Lifetime {
        self.registrations
            .iter()
            .find(|registration| registration.implementation.info().id == implementation)
            .map(|registration| registration.lifetime)
            .unwrap_or(Lifetime::Transient)
    }

    fn create_instance(implementation: &TypeDescriptor) -> DependencyResult<AnyInstance> {
        let type_name = implementation.info().full_name();
        match implementation.activate() {
            Some(Ok(instance)) => Ok(instance),
            Some(Err(source)) => Err(DependencyError::ComponentCreationFailed { type_name, source }),
            None => Err(DependencyError::DependencyResolutionFailed {
                type_name,
                message: "类型没有可用的激活器".to_string(),
            }),
        }
    }

    /// 按契约解析组件
    pub fn resolve<S: ?Sized + 'static>(&self) -> DependencyResult<Arc<S>> {
        let contract_id = TypeId::of::<S>();
        let registration = self.registration_for_contract(contract_id).ok_or_else(|| {
            DependencyError::ComponentNotRegistered {
                type_name: std::any::type_name::<S>().to_string(),
            }
        })?;

        let instance = self.get_instance(&registration.implementation)?;
        registration
            .implementation
            .contract(contract_id)
            .and_then(|binding| binding.upcast::<S>(instance))
            .ok_or_else(|| DependencyError::DependencyResolutionFailed {
                type_name: std::any::type_name::<S>().to_string(),
                message: format!(
                    "{} 无法转换为契约",
                    registration.implementation.info().full_name()
                ),
            })
    }

    /// 检查契约是否已注册
    pub fn is_registered<S: ?Sized + 'static>(&self) -> bool {
        self.registration_for_contract(TypeId::of::<S>()).is_some()
    }

    /// 所有注册（注册顺序）
    pub fn registrations(&self) -> Vec<(TypeInfo, TypeInfo, Lifetime)> {
        self.registrations
            .iter()
            .map(|registration| {
                (
                    registration.contract.clone(),
                    registration.implementation.info().clone(),
                    registration.lifetime,
                )
            })
            .collect()
    }

    /// 注册数量
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// 容器是否为空
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl Container for DiContainerImpl {
    type Lifestyle = Lifetime;
    type Error = DependencyError;

    fn register(
        &mut self,
        contract: &TypeInfo,
        implementation: &Arc<TypeDescriptor>,
        lifestyle: Lifetime,
    ) -> DependencyResult<()> {
        if let Some(existing) = self.registration_for_contract(contract.id) {
            return Err(DependencyError::RegistrationError {
                type_name: contract.full_name(),
                message: format!("契约已注册到 {}", existing.implementation.info().full_name()),
            });
        }
        if implementation.is_interface() {
            return Err(DependencyError::RegistrationError {
                type_name: contract.full_name(),
                message: format!("{} 是契约，不能作为实现类型", implementation.info().full_name()),
            });
        }
        if !implementation.implements(contract.id) {
            return Err(DependencyError::RegistrationError {
                type_name: contract.full_name(),
                message: format!("{} 没有实现该契约", implementation.info().full_name()),
            });
        }

        debug!(
            "注册组件: {} -> {} ({})",
            contract.full_name(),
            implementation.info().full_name(),
            lifestyle
        );
        self.registrations.push(ComponentRegistration {
            contract: contract.clone(),
            implementation: Arc::clone(implementation),
            lifetime: lifestyle,
        });
        Ok(())
    }

    fn get_instance(&self, implementation: &TypeDescriptor) -> DependencyResult<AnyInstance> {
        let type_id = implementation.info().id;
        match self.lifetime_of(type_id) {
            // 根容器上没有作用域，作用域组件按单例处理
            Lifetime::Singleton | Lifetime::Scoped => {
                if let Some(instance) = self.singletons.lock().get(&type_id) {
                    return Ok(Arc::clone(instance));
                }
                // 激活期间不持有锁，激活器可以再次向容器解析；并发创建时保留先写入的实例
                let instance = Self::create_instance(implementation)?;
                let mut singletons = self.singletons.lock();
                Ok(Arc::clone(singletons.entry(type_id).or_insert(instance)))
            }
            Lifetime::Transient => Self::create_instance(implementation),
        }
    }
}
