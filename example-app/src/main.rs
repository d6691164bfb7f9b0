//! # 示例应用程序
//!
//! 演示约定式服务注册：过程宏登记类型，按命名约定注册到容器，再构建按名称索引的服务工厂表。

mod notifiers;
mod services;

use clap::Parser;
use di_impl::{ConventionRegistrar, DiContainerImpl, ServiceFactory};
use infrastructure_common::{ConventionOptions, DependencyError, Lifetime, ScanMode};
use notifiers::INotifier;
use services::{IGreetingService, IOrderService, ServicesMarker};
use std::sync::Arc;
use tracing::{info, warn};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "约定式服务注册示例")]
struct Args {
    /// 扫描配置文件路径（TOML），文件不存在时使用命令行参数
    #[arg(short, long, default_value = "config/conventions.toml")]
    config: String,

    /// 实现类型名称后缀
    #[arg(long, default_value = "Service")]
    suffix: String,

    /// 扫描整个 crate 而不是标记类型所在的模块
    #[arg(long)]
    whole_crate: bool,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(parse_log_level(&args.log_level))
        .init();

    info!("启动约定式服务注册示例");

    let options = load_options(&args)?;
    let mut container = DiContainerImpl::new();
    ConventionRegistrar::global().register_with_options::<ServicesMarker, _>(
        &mut container,
        Lifetime::Singleton,
        &options,
        &[],
    )?;

    for (contract, implementation, lifetime) in container.registrations() {
        info!("已注册: {} -> {} ({})", contract, implementation, lifetime);
    }

    demonstrate_resolution(&container)?;
    demonstrate_factory(Arc::new(container))?;

    info!("示例结束");
    Ok(())
}

/// 加载扫描选项
fn load_options(args: &Args) -> anyhow::Result<ConventionOptions> {
    let path = std::path::Path::new(&args.config);
    if path.exists() {
        info!("从配置文件加载扫描选项: {}", args.config);
        let content = std::fs::read_to_string(path)?;
        return Ok(ConventionOptions::from_toml_str(&content)?);
    }

    let scan = if args.whole_crate {
        ScanMode::Crate
    } else {
        ScanMode::Namespace
    };
    Ok(ConventionOptions::new(scan, args.suffix.as_str()))
}

/// 演示按契约解析
fn demonstrate_resolution(container: &DiContainerImpl) -> anyhow::Result<()> {
    match container.resolve::<dyn IGreetingService>() {
        Ok(greeting) => info!("{}", greeting.greet("世界")),
        Err(e) => warn!("问候服务不可用: {}", e),
    }

    if container.is_registered::<dyn IOrderService>() {
        let orders = container.resolve::<dyn IOrderService>()?;
        orders.place_order("键盘");
        orders.place_order("显示器");
    }
    Ok(())
}

/// 演示服务工厂表
fn demonstrate_factory(container: Arc<DiContainerImpl>) -> anyhow::Result<()> {
    let factory: ServiceFactory<dyn INotifier, DependencyError> =
        di_impl::build_factory::<ServicesMarker, _, dyn INotifier, _>(
            &container,
            Lifetime::Transient,
            "Notifier",
            None,
        )?;

    info!("可用的通知渠道: {:?}", factory.keys());
    for key in factory.keys() {
        if let Some(notifier) = factory.create(key) {
            info!("{}", notifier?.notify("订单已发货"));
        }
    }
    Ok(())
}

/// 解析日志级别
fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
