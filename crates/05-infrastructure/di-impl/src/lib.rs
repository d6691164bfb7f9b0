//! # 约定式依赖注入注册
//!
//! 根据命名约定把 crate 或模块中的实现类型注册到容器，或构建按名称索引的服务工厂表。
//!
//! 下面的自由函数使用全局类型目录；需要自定义类型全集时使用 [`ConventionRegistrar::new`]。

pub mod container;
pub mod factory;
pub mod registrar;

pub use container::DiContainerImpl;
pub use factory::ServiceFactory;
pub use registrar::ConventionRegistrar;

use di_abstractions::{Container, DeferredConstructor, ProductNameRule};
use infrastructure_common::ConventionResult;
use std::any::TypeId;
use std::sync::Arc;

/// 创建新容器并注册标记类型 `M` 命名空间中的服务
pub fn namespace_container<M, C>(
    lifestyle: C::Lifestyle,
    pattern_suffix: &str,
    service_prefix: Option<&str>,
) -> ConventionResult<C, C::Error>
where
    M: ?Sized + 'static,
    C: Container + Default,
{
    ConventionRegistrar::global().namespace_container::<M, C>(lifestyle, pattern_suffix, service_prefix)
}

/// 注册标记类型 `M` 命名空间中的服务
pub fn register_namespace<M, C>(
    container: &mut C,
    lifestyle: C::Lifestyle,
    pattern_suffix: &str,
    service_prefix: Option<&str>,
) -> ConventionResult<(), C::Error>
where
    M: ?Sized + 'static,
    C: Container,
{
    ConventionRegistrar::global().register_namespace::<M, C>(container, lifestyle, pattern_suffix, service_prefix)
}

/// 创建新容器并注册标记类型 `M` 所在 crate 中的服务
pub fn assembly_container<M, C>(
    lifestyle: C::Lifestyle,
    pattern_suffix: &str,
    service_prefix: Option<&str>,
) -> ConventionResult<C, C::Error>
where
    M: ?Sized + 'static,
    C: Container + Default,
{
    ConventionRegistrar::global().assembly_container::<M, C>(lifestyle, pattern_suffix, service_prefix)
}

/// 注册标记类型 `M` 所在 crate 中的服务，跳过 `exclusions` 中的契约
pub fn register_assembly<M, C>(
    container: &mut C,
    lifestyle: C::Lifestyle,
    pattern_suffix: &str,
    service_prefix: Option<&str>,
    exclusions: &[TypeId],
) -> ConventionResult<(), C::Error>
where
    M: ?Sized + 'static,
    C: Container,
{
    ConventionRegistrar::global().register_assembly::<M, C>(
        container,
        lifestyle,
        pattern_suffix,
        service_prefix,
        exclusions,
    )
}

/// 构建标记类型 `M` 所在 crate 中契约 `S` 的服务工厂表
pub fn build_factory<M, F, S, C>(
    container: &Arc<C>,
    lifestyle: C::Lifestyle,
    pattern_suffix: &str,
    key_rule: Option<ProductNameRule<'_>>,
) -> ConventionResult<F, C::Error>
where
    M: ?Sized + 'static,
    F: FromIterator<(String, DeferredConstructor<S, C::Error>)>,
    S: ?Sized + 'static,
    C: Container + Send + Sync + 'static,
{
    ConventionRegistrar::global().build_factory::<M, F, S, C>(container, lifestyle, pattern_suffix, key_rule)
}
