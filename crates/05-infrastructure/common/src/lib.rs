//! # Infrastructure Common
//!
//! 约定式服务注册的公共基础：类型元数据、命名约定、扫描配置和错误类型。
//!
//! ## 核心组件
//!
//! - [`TypeDescriptor`] - 候选类型的元数据
//! - [`TypeUniverse`] / [`TypeCatalog`] - 可扫描的类型全集
//! - [`ConventionRule`] - 实现类型与契约的命名约定
//! - [`ConventionOptions`] - 一次约定扫描的配置
//!
//! ## 设计原则
//!
//! - 编译期生成类型元数据，运行期只读
//! - 约定优于配置
//! - 每次扫描都是无状态的一次性遍历

pub mod configuration;
pub mod conventions;
pub mod descriptor;
pub mod discovery;
pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use configuration::*;
pub use conventions::*;
pub use descriptor::*;
pub use discovery::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;

/// 全局类型目录
static GLOBAL_TYPE_CATALOG: once_cell::sync::Lazy<TypeCatalog> =
    once_cell::sync::Lazy::new(TypeCatalog::new);

/// 获取全局类型目录
///
/// `#[contract]` 与 `#[component]` 生成的类型描述符在程序启动时登记到这里。
pub fn global_type_catalog() -> &'static TypeCatalog {
    &GLOBAL_TYPE_CATALOG
}

/// 向全局类型目录提交类型描述符
///
/// 由过程宏生成的启动代码调用，登记失败只记录日志。
pub fn submit_type_descriptor(descriptor: TypeDescriptor) {
    let type_name = descriptor.info().full_name();
    if let Err(e) = GLOBAL_TYPE_CATALOG.register(descriptor) {
        tracing::warn!("类型登记失败: {}, 原因: {}", type_name, e);
    }
}
