//! 约定注册器
//!
//! 按标记类型定位扫描范围，按命名约定匹配 (契约, 实现类型)，再逐个注册到容器。
//! 每次调用都是一次无状态的同步遍历，调用之间不缓存任何结果。

use di_abstractions::{default_product_name, Container, DeferredConstructor, ProductNameRule};
use infrastructure_common::{
    global_type_catalog, match_factory_products, match_registrations, scoped_types,
    ConventionError, ConventionOptions, ConventionResult, RegistrationPair, ScanMode, ScanScope, TypeUniverse,
    ZeroMatchPolicy,
};
use std::any::TypeId;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn};

/// 约定注册器
#[derive(Clone, Copy)]
pub struct ConventionRegistrar<'u> {
    universe: &'u dyn TypeUniverse,
    zero_match: ZeroMatchPolicy,
}

impl ConventionRegistrar<'static> {
    /// 基于全局类型目录的注册器
    pub fn global() -> Self {
        Self::new(global_type_catalog())
    }
}

impl<'u> ConventionRegistrar<'u> {
    /// 创建新的注册器
    pub fn new(universe: &'u dyn TypeUniverse) -> Self {
        Self {
            universe,
            zero_match: ZeroMatchPolicy::default(),
        }
    }

    /// 设置零匹配策略
    ///
    /// 只作用于不带 [`ConventionOptions`] 的入口；`register_with_options` 使用选项中的策略。
    pub fn with_zero_match(mut self, policy: ZeroMatchPolicy) -> Self {
        self.zero_match = policy;
        self
    }

    /// 扫描范围
    pub fn scope_of<M: ?Sized + 'static>(&self, scan: ScanMode) -> ScanScope {
        match scan {
            ScanMode::Namespace => ScanScope::namespace_of::<M>(self.universe),
            ScanMode::Crate => ScanScope::crate_of::<M>(self.universe),
        }
    }

    /// 计算注册对，不修改任何容器
    pub fn matches<M: ?Sized + 'static>(&self, options: &ConventionOptions) -> Vec<RegistrationPair> {
        let scope = self.scope_of::<M>(options.scan);
        match_registrations(&scoped_types(self.universe, &scope), &options.rule())
    }

    fn options(
        &self,
        scan: ScanMode,
        pattern_suffix: &str,
        service_prefix: Option<&str>,
    ) -> ConventionOptions {
        let options = ConventionOptions::new(scan, pattern_suffix).with_zero_match(self.zero_match);
        match service_prefix {
            Some(prefix) => options.with_service_prefix(prefix),
            None => options,
        }
    }

    /// 按选项扫描并注册
    ///
    /// 契约位于 `exclusions` 中的注册对会被跳过（按类型ID比较）。
    /// 容器拒绝注册时立即返回容器的原始错误，已完成的注册不会回滚。
    pub fn register_with_options<M, C>(
        &self,
        container: &mut C,
        lifestyle: C::Lifestyle,
        options: &ConventionOptions,
        exclusions: &[TypeId],
    ) -> ConventionResult<(), C::Error>
    where
        M: ?Sized + 'static,
        C: Container,
    {
        let scope = self.scope_of::<M>(options.scan);
        let _span = info_span!("convention_scan", %scope, suffix = %options.pattern_suffix).entered();

        let pairs = match_registrations(&scoped_types(self.universe, &scope), &options.rule());
        if pairs.is_empty() {
            match options.zero_match {
                ZeroMatchPolicy::Allow => debug!("约定扫描未匹配任何类型: {}", scope),
                ZeroMatchPolicy::Warn => warn!("约定扫描未匹配任何类型: {}", scope),
                ZeroMatchPolicy::Require => {
                    return Err(ConventionError::NoMatches {
                        scope: scope.to_string(),
                        pattern_suffix: options.pattern_suffix.clone(),
                    })
                }
            }
        }

        let mut registered = 0;
        for pair in &pairs {
            if exclusions.contains(&pair.contract_id()) {
                debug!("跳过排除的契约: {}", pair.contract.info());
                continue;
            }
            debug!("注册: {} -> {}", pair.contract.info(), pair.implementation.info());
            container
                .register(pair.contract.info(), &pair.implementation, lifestyle.clone())
                .map_err(ConventionError::Container)?;
            registered += 1;
        }

        info!("约定注册完成: {}, 匹配 {} 个, 注册 {} 个", scope, pairs.len(), registered);
        Ok(())
    }

    /// 创建新容器并注册标记类型命名空间中的服务
    pub fn namespace_container<M, C>(
        &self,
        lifestyle: C::Lifestyle,
        pattern_suffix: &str,
        service_prefix: Option<&str>,
    ) -> ConventionResult<C, C::Error>
    where
        M: ?Sized + 'static,
        C: Container + Default,
    {
        let mut container = C::default();
        self.register_namespace::<M, C>(&mut container, lifestyle, pattern_suffix, service_prefix)?;
        Ok(container)
    }

    /// 注册标记类型命名空间中的服务
    ///
    /// 只扫描模块路径与标记类型完全相同的类型，不含子模块。
    /// `service_prefix` 为 `None` 时使用默认前缀 `"I"`。
    pub fn register_namespace<M, C>(
        &self,
        container: &mut C,
        lifestyle: C::Lifestyle,
        pattern_suffix: &str,
        service_prefix: Option<&str>,
    ) -> ConventionResult<(), C::Error>
    where
        M: ?Sized + 'static,
        C: Container,
    {
        let options = self.options(ScanMode::Namespace, pattern_suffix, service_prefix);
        self.register_with_options::<M, C>(container, lifestyle, &options, &[])
    }

    /// 创建新容器并注册标记类型所在 crate 中的服务
    pub fn assembly_container<M, C>(
        &self,
        lifestyle: C::Lifestyle,
        pattern_suffix: &str,
        service_prefix: Option<&str>,
    ) -> ConventionResult<C, C::Error>
    where
        M: ?Sized + 'static,
        C: Container + Default,
    {
        let mut container = C::default();
        self.register_assembly::<M, C>(&mut container, lifestyle, pattern_suffix, service_prefix, &[])?;
        Ok(container)
    }

    /// 注册标记类型所在 crate 中的服务
    ///
    /// 契约位于 `exclusions` 中的注册对会被跳过。
    pub fn register_assembly<M, C>(
        &self,
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
        let options = self.options(ScanMode::Crate, pattern_suffix, service_prefix);
        self.register_with_options::<M, C>(container, lifestyle, &options, exclusions)
    }

    /// 构建服务工厂表
    ///
    /// 扫描标记类型所在 crate 中名称以 `pattern_suffix` 结尾、实现了契约 `S`
    /// 的具体类型。工厂键由 `key_rule` 推导，缺省为实现类型名称；键重复时构建失败。
    /// 条目在构建时全部生成，实例在条目被调用时才向容器解析。
    ///
    /// `lifestyle` 不参与构建，只记录在日志中，实例的生命周期由容器中的注册决定。
    pub fn build_factory<M, F, S, C>(
        &self,
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
        let scope = self.scope_of::<M>(ScanMode::Crate);
        let _span = info_span!(
            "factory_build",
            %scope,
            suffix = %pattern_suffix,
            service = std::any::type_name::<S>(),
            lifestyle = ?lifestyle
        )
        .entered();

        let products = match_factory_products(
            &scoped_types(self.universe, &scope),
            pattern_suffix,
            TypeId::of::<S>(),
        );

        let mut keys = HashSet::new();
        let mut entries: Vec<(String, DeferredConstructor<S, C::Error>)> = Vec::with_capacity(products.len());
        for product in products {
            let key = match key_rule {
                Some(rule) => rule(&product.implementation),
                None => default_product_name(&product.implementation),
            };
            if !keys.insert(key.clone()) {
                return Err(ConventionError::DuplicateFactoryKey {
                    key,
                    implementation: product.implementation.info().full_name(),
                });
            }

            debug!("工厂条目: {} -> {}", key, product.implementation.info());
            let container = Arc::clone(container);
            let constructor: DeferredConstructor<S, C::Error> = Arc::new(move || {
                container
                    .get_instance(&product.implementation)
                    .map_err(ConventionError::Container)
                    .and_then(|instance| {
                        product.service.upcast::<S>(instance).ok_or_else(|| {
                            ConventionError::InstanceTypeMismatch {
                                implementation: product.implementation.info().full_name(),
                                contract: product.service.info().full_name(),
                            }
                        })
                    })
            });
            entries.push((key, constructor));
        }

        info!("工厂构建完成: {}, 共 {} 个条目", scope, entries.len());
        Ok(entries.into_iter().collect())
    }
}
