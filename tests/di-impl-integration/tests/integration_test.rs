//! 服务工厂构建的集成测试

use di_abstractions::{Container, DeferredConstructor, ProductNameRule};
use di_impl::{ConventionRegistrar, DiContainerImpl, ServiceFactory};
use infrastructure_common::{
    ActivationError, ConventionError, DependencyError, Lifetime, TypeCatalog, TypeDescriptor,
    TypeUniverse,
};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志系统（只初始化一次）
fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub trait IExporter: Send + Sync {
    fn format(&self) -> String;
}

#[derive(Default)]
pub struct CsvExporter;

impl IExporter for CsvExporter {
    fn format(&self) -> String {
        "csv".to_string()
    }
}

#[derive(Default)]
pub struct JsonExporter;

impl IExporter for JsonExporter {
    fn format(&self) -> String {
        "json".to_string()
    }
}

pub struct BrokenExporter;

impl IExporter for BrokenExporter {
    fn format(&self) -> String {
        "broken".to_string()
    }
}

#[derive(Default)]
pub struct LegacyExporter;

impl IExporter for LegacyExporter {
    fn format(&self) -> String {
        "legacy".to_string()
    }
}

#[derive(Default)]
pub struct XmlExporter;

impl IExporter for XmlExporter {
    fn format(&self) -> String {
        "xml".to_string()
    }
}

#[derive(Default)]
pub struct PdfExporter;

impl IExporter for PdfExporter {
    fn format(&self) -> String {
        "pdf".to_string()
    }
}

/// 只用于扫描，不实现 IExporter
pub struct ExportSettingsExporter;

mod v2 {
    use super::IExporter;

    #[derive(Default)]
    pub struct JsonExporter;

    impl IExporter for JsonExporter {
        fn format(&self) -> String {
            "json-v2".to_string()
        }
    }
}

/// 标记类型
pub struct ExportersMarker;

fn exporter<T>(module_path: &str) -> infrastructure_common::ConcreteTypeBuilder<T>
where
    T: IExporter + Default + 'static,
{
    TypeDescriptor::concrete::<T>()
        .in_module(module_path)
        .implements::<dyn IExporter>(|e| e as Arc<dyn IExporter>)
        .with_default_activator()
}

fn base_types() -> Vec<TypeDescriptor> {
    vec![
        TypeDescriptor::interface::<dyn IExporter>().in_module("plugins::exporters"),
        TypeDescriptor::concrete::<ExportersMarker>()
            .in_module("plugins::exporters")
            .build(),
        exporter::<CsvExporter>("plugins::exporters").build(),
        exporter::<JsonExporter>("plugins::exporters").build(),
        TypeDescriptor::concrete::<BrokenExporter>()
            .in_module("plugins::exporters")
            .implements::<dyn IExporter>(|e| e as Arc<dyn IExporter>)
            .with_activator(|| -> Result<BrokenExporter, ActivationError> { Err("连接打印服务失败".into()) })
            .build(),
        exporter::<LegacyExporter>("plugins::exporters::legacy").build(),
        exporter::<XmlExporter>("plugins::exporters").exported(false).build(),
        exporter::<PdfExporter>("vendor::exporters").build(),
        TypeDescriptor::concrete::<ExportSettingsExporter>()
            .in_module("plugins::exporters")
            .build(),
    ]
}

fn catalog() -> TypeCatalog {
    TypeCatalog::with_types(base_types()).expect("测试目录应该登记成功")
}

type ExporterFactory = ServiceFactory<dyn IExporter, DependencyError>;

fn build(
    catalog: &TypeCatalog,
    container: &Arc<DiContainerImpl>,
    key_rule: Option<ProductNameRule<'_>>,
) -> Result<ExporterFactory, ConventionError<DependencyError>> {
    ConventionRegistrar::new(catalog).build_factory::<ExportersMarker, _, dyn IExporter, _>(
        container,
        Lifetime::Transient,
        "Exporter",
        key_rule,
    )
}

#[test]
fn test_factory_keys_default_to_type_names() -> anyhow::Result<()> {
    init_test_logger();
    let catalog = catalog();
    let container = Arc::new(DiContainerImpl::new());

    let factory = build(&catalog, &container, None)?;

    // 未导出类型、其他 crate 的类型和未实现契约的类型都不在表中；子模块在表中
    assert_eq!(
        factory.keys(),
        vec!["BrokenExporter", "CsvExporter", "JsonExporter", "LegacyExporter"]
    );

    let csv = factory.create("CsvExporter").expect("键应该存在")?;
    assert_eq!(csv.format(), "csv");
    let legacy = factory.create("LegacyExporter").expect("键应该存在")?;
    assert_eq!(legacy.format(), "legacy");
    assert!(factory.create("XmlExporter").is_none());
    Ok(())
}

#[test]
fn test_custom_key_rule() -> anyhow::Result<()> {
    init_test_logger();
    let catalog = catalog();
    let container = Arc::new(DiContainerImpl::new());

    let rule: ProductNameRule<'_> = &|descriptor: &TypeDescriptor| {
        descriptor.name().trim_end_matches("Exporter").to_lowercase()
    };
    let factory = build(&catalog, &container, Some(rule))?;

    assert_eq!(factory.keys(), vec!["broken", "csv", "json", "legacy"]);
    let json = factory.create("json").expect("键应该存在")?;
    assert_eq!(json.format(), "json");
    Ok(())
}

#[test]
fn test_duplicate_keys_fail_the_build() {
    init_test_logger();
    let mut types = base_types();
    types.push(exporter::<v2::JsonExporter>("plugins::exporters::v2").build());
    let duplicated = TypeCatalog::with_types(types).unwrap();
    let container = Arc::new(DiContainerImpl::new());

    match build(&duplicated, &container, None) {
        Err(ConventionError::DuplicateFactoryKey { key, implementation }) => {
            assert_eq!(key, "JsonExporter");
            assert_eq!(implementation, "plugins::exporters::v2::JsonExporter");
        }
        other => panic!("期望工厂键重复错误, 实际: {:?}", other.map(|f| f.keys().len())),
    }

    // 自定义规则把不同类型映射到同一个键
    let catalog = catalog();
    let rule: ProductNameRule<'_> = &|_: &TypeDescriptor| "exporter".to_string();
    assert!(matches!(
        build(&catalog, &container, Some(rule)),
        Err(ConventionError::DuplicateFactoryKey { .. })
    ));
}

#[test]
fn test_resolution_failure_is_deferred() -> anyhow::Result<()> {
    init_test_logger();
    let catalog = catalog();
    let container = Arc::new(DiContainerImpl::new());

    let factory = build(&catalog, &container, None)?;
    assert!(factory.contains_key("BrokenExporter"));

    match factory.create("BrokenExporter") {
        Some(Err(ConventionError::Container(DependencyError::ComponentCreationFailed { type_name, .. }))) => {
            assert_eq!(type_name, "plugins::exporters::BrokenExporter");
        }
        other => panic!("期望组件创建失败, 实际: {:?}", other.map(|r| r.is_ok())),
    }

    // 其他条目不受影响
    assert!(factory.create("CsvExporter").expect("键应该存在").is_ok());
    Ok(())
}

#[test]
fn test_instances_are_resolved_on_invocation() -> anyhow::Result<()> {
    static ACTIVATIONS: AtomicUsize = AtomicUsize::new(0);

    struct CountedExporter;

    impl IExporter for CountedExporter {
        fn format(&self) -> String {
            "counted".to_string()
        }
    }

    struct CountingMarker;

    let catalog = TypeCatalog::with_types(vec![
        TypeDescriptor::concrete::<CountingMarker>()
            .in_module("counting")
            .build(),
        TypeDescriptor::concrete::<CountedExporter>()
            .in_module("counting")
            .implements::<dyn IExporter>(|e| e as Arc<dyn IExporter>)
            .with_activator(|| {
                ACTIVATIONS.fetch_add(1, Ordering::SeqCst);
                Ok(CountedExporter)
            })
            .build(),
    ])?;
    let container = Arc::new(DiContainerImpl::new());

    let factory: ExporterFactory = ConventionRegistrar::new(&catalog)
        .build_factory::<CountingMarker, _, dyn IExporter, _>(&container, Lifetime::Singleton, "Exporter", None)?;
    assert_eq!(ACTIVATIONS.load(Ordering::SeqCst), 0);

    factory.create("CountedExporter").expect("键应该存在")?;
    factory.create("CountedExporter").expect("键应该存在")?;
    // 容器中没有单例注册，每次调用都重新解析
    assert_eq!(ACTIVATIONS.load(Ordering::SeqCst), 2);
    Ok(())
}

#[test]
fn test_container_lifestyle_applies_to_factory_entries() -> anyhow::Result<()> {
    init_test_logger();
    let catalog = catalog();
    let csv = catalog
        .locate(TypeId::of::<CsvExporter>())
        .expect("CsvExporter 应该已登记");

    let mut container = DiContainerImpl::new();
    container.register(csv.contracts()[0].info(), &csv, Lifetime::Singleton)?;
    let container = Arc::new(container);

    let factory = build(&catalog, &container, None)?;
    let first = factory.create("CsvExporter").expect("键应该存在")?;
    let second = factory.create("CsvExporter").expect("键应该存在")?;
    assert!(Arc::ptr_eq(&first, &second));

    let first = factory.create("JsonExporter").expect("键应该存在")?;
    let second = factory.create("JsonExporter").expect("键应该存在")?;
    assert!(!Arc::ptr_eq(&first, &second));
    Ok(())
}

#[test]
fn test_hash_map_as_factory_table() -> anyhow::Result<()> {
    init_test_logger();
    let catalog = catalog();
    let container = Arc::new(DiContainerImpl::new());

    let table: HashMap<String, DeferredConstructor<dyn IExporter, DependencyError>> =
        ConventionRegistrar::new(&catalog).build_factory::<ExportersMarker, _, dyn IExporter, _>(
            &container,
            Lifetime::Transient,
            "Exporter",
            None,
        )?;

    assert_eq!(table.len(), 4);
    let json = table["JsonExporter"]()?;
    assert_eq!(json.format(), "json");
    Ok(())
}

#[test]
fn test_empty_factory_when_nothing_matches() -> anyhow::Result<()> {
    let catalog = catalog();
    let container = Arc::new(DiContainerImpl::new());

    let factory: ExporterFactory = ConventionRegistrar::new(&catalog)
        .build_factory::<ExportersMarker, _, dyn IExporter, _>(&container, Lifetime::Transient, "Importer", None)?;

    assert!(factory.is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_factory_is_shared_across_tasks() -> anyhow::Result<()> {
    init_test_logger();
    let catalog = catalog();
    let container = Arc::new(DiContainerImpl::new());
    let factory = Arc::new(build(&catalog, &container, None)?);

    let mut handles = Vec::new();
    for i in 0..16 {
        let factory = Arc::clone(&factory);
        handles.push(tokio::spawn(async move {
            let key = if i % 2 == 0 { "CsvExporter" } else { "JsonExporter" };
            factory
                .create(key)
                .expect("键应该存在")
                .map(|exporter| exporter.format())
        }));
    }

    let mut formats = Vec::new();
    for handle in handles {
        formats.push(handle.await??);
    }
    assert_eq!(formats.iter().filter(|f| *f == "csv").count(), 8);
    assert_eq!(formats.iter().filter(|f| *f == "json").count(), 8);
    Ok(())
}
