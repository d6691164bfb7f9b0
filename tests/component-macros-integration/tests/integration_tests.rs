//! 过程宏登记的类型经全局类型目录完成约定注册

use di_impl::{DiContainerImpl, ServiceFactory};
use infrastructure_common::{
    global_type_catalog, DependencyError, Lifetime, TypeUniverse, ZeroMatchPolicy,
};
use std::any::TypeId;
use std::sync::Arc;

mod services {
    use component_macros::{component, contract};
    use infrastructure_common::ActivationError;

    #[contract]
    pub trait IUserService: Send + Sync {
        fn greet(&self, name: &str) -> String;
    }

    #[contract]
    pub trait IOrderService: Send + Sync {
        fn pending(&self) -> usize;
    }

    #[contract]
    pub trait IAuditable: Send + Sync {}

    #[contract]
    pub trait IAuditService: Send + Sync {}

    #[contract]
    pub trait IInternalService: Send + Sync {}

    #[component(implements(IUserService), activator = default)]
    #[derive(Default)]
    pub struct UserService;

    impl IUserService for UserService {
        fn greet(&self, name: &str) -> String {
            format!("hello, {}", name)
        }
    }

    #[component(implements(IOrderService), activator = "new_order_service")]
    pub struct OrderService {
        pending: usize,
    }

    impl IOrderService for OrderService {
        fn pending(&self) -> usize {
            self.pending
        }
    }

    fn new_order_service() -> Result<OrderService, ActivationError> {
        Ok(OrderService { pending: 3 })
    }

    #[component(implements(IAuditable, IAuditService), activator = default)]
    #[derive(Default)]
    pub struct AuditService;

    impl IAuditable for AuditService {}
    impl IAuditService for AuditService {}

    #[component(implements(IInternalService), activator = default)]
    #[derive(Default)]
    #[allow(dead_code)]
    struct InternalService;

    impl IInternalService for InternalService {}

    /// 标记类型
    pub struct ServicesMarker;
}

mod reports {
    use component_macros::{component, contract};

    #[contract]
    pub trait IReport: Send + Sync {
        fn title(&self) -> &'static str;
    }

    #[contract]
    pub trait IReportService: Send + Sync {}

    #[component(implements(IReport), activator = default)]
    #[derive(Default)]
    pub struct SalesReport;

    impl IReport for SalesReport {
        fn title(&self) -> &'static str {
            "sales"
        }
    }

    #[component(implements(IReport), activator = default)]
    #[derive(Default)]
    pub struct InventoryReport;

    impl IReport for InventoryReport {
        fn title(&self) -> &'static str {
            "inventory"
        }
    }

    #[component(implements(IReportService), activator = default)]
    #[derive(Default)]
    pub struct ReportService;

    impl IReportService for ReportService {}

    /// 标记类型
    pub struct ReportsMarker;
}

use reports::{IReport, IReportService, ReportsMarker};
use services::{IAuditService, IAuditable, IOrderService, IUserService, ServicesMarker};

#[test]
fn test_macros_submit_descriptors() {
    let catalog = global_type_catalog();

    let user = catalog
        .locate(TypeId::of::<services::UserService>())
        .expect("UserService 应该已登记");
    assert_eq!(user.info().module_path, "integration_tests::services");
    assert!(user.is_exported());
    assert!(user.is_activatable());
    assert_eq!(user.contracts()[0].name(), "IUserService");

    let contract = catalog
        .locate(TypeId::of::<dyn IUserService>())
        .expect("IUserService 应该已登记");
    assert!(contract.is_interface());

    let audit = catalog
        .locate(TypeId::of::<services::AuditService>())
        .expect("AuditService 应该已登记");
    let names: Vec<_> = audit.contracts().iter().map(|binding| binding.name()).collect();
    assert_eq!(names, vec!["IAuditable", "IAuditService"]);

    // 非 pub 类型已登记但不导出
    assert!(!catalog
        .exported_types()
        .iter()
        .any(|descriptor| descriptor.name() == "InternalService"));
}

#[test]
fn test_namespace_container_from_macros() -> anyhow::Result<()> {
    let container: DiContainerImpl =
        di_impl::namespace_container::<ServicesMarker, _>(Lifetime::Singleton, "Service", None)?;

    let names: Vec<_> = container
        .registrations()
        .into_iter()
        .map(|(contract, implementation, _)| (contract.name, implementation.name))
        .collect();
    assert_eq!(
        names,
        vec![
            ("IAuditService".to_string(), "AuditService".to_string()),
            ("IOrderService".to_string(), "OrderService".to_string()),
            ("IUserService".to_string(), "UserService".to_string()),
        ]
    );

    let user = container.resolve::<dyn IUserService>()?;
    assert_eq!(user.greet("bob"), "hello, bob");

    let orders = container.resolve::<dyn IOrderService>()?;
    assert_eq!(orders.pending(), 3);

    assert!(container.resolve::<dyn IAuditService>().is_ok());
    assert!(!container.is_registered::<dyn IAuditable>());
    assert!(!container.is_registered::<dyn IReportService>());
    Ok(())
}

#[test]
fn test_register_assembly_with_exclusions() -> anyhow::Result<()> {
    let mut container = DiContainerImpl::new();
    di_impl::register_assembly::<ReportsMarker, _>(
        &mut container,
        Lifetime::Transient,
        "Service",
        None,
        &[TypeId::of::<dyn IAuditService>()],
    )?;

    assert!(container.is_registered::<dyn IReportService>());
    assert!(container.is_registered::<dyn IUserService>());
    assert!(container.is_registered::<dyn IOrderService>());
    assert!(!container.is_registered::<dyn IAuditService>());
    assert_eq!(container.len(), 3);
    Ok(())
}

#[test]
fn test_require_policy_through_registrar() {
    let mut container = DiContainerImpl::new();
    let result = di_impl::ConventionRegistrar::global()
        .with_zero_match(ZeroMatchPolicy::Require)
        .register_namespace::<ServicesMarker, _>(&mut container, Lifetime::Singleton, "Repository", None);

    assert!(result.is_err());
    assert!(container.is_empty());
}

#[test]
fn test_factory_from_macros() -> anyhow::Result<()> {
    let container = Arc::new(DiContainerImpl::new());
    let factory: ServiceFactory<dyn IReport, DependencyError> =
        di_impl::build_factory::<ReportsMarker, _, dyn IReport, _>(
            &container,
            Lifetime::Transient,
            "Report",
            None,
        )?;

    assert_eq!(factory.keys(), vec!["InventoryReport", "SalesReport"]);

    let sales = factory.create("SalesReport").expect("键应该存在")?;
    assert_eq!(sales.title(), "sales");
    assert!(factory.create("MissingReport").is_none());
    Ok(())
}
