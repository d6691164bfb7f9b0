//! 依赖注入容器抽象接口
//!
//! 约定注册层把容器当作不透明的能力使用：只调用注册与按实现类型解析，
//! 从不读取或枚举容器中已有的注册。

use infrastructure_common::{AnyInstance, TypeDescriptor, TypeInfo};
use std::fmt::Debug;
use std::sync::Arc;

/// 依赖注入容器 trait
pub trait Container {
    /// 生命周期策略，约定注册层原样转交，不做解释
    type Lifestyle: Clone + Debug;

    /// 容器错误类型
    type Error: std::error::Error + Send + Sync + 'static;

    /// 注册 (契约, 实现类型) 绑定
    fn register(
        &mut self,
        contract: &TypeInfo,
        implementation: &Arc<TypeDescriptor>,
        lifestyle: Self::Lifestyle,
    ) -> Result<(), Self::Error>;

    /// 解析实现类型的实例
    fn get_instance(&self, implementation: &TypeDescriptor) -> Result<AnyInstance, Self::Error>;
}
