//! # Dependency Injection Abstractions
//!
//! 约定注册层所依赖的外部协作者接口。
//!
//! ## 核心接口
//!
//! - [`Container`] - 接收注册并按实现类型解析实例的容器
//! - [`DeferredConstructor`] - 工厂表中的延迟构造函数
//! - [`ProductNameRule`] - 工厂键推导规则

pub mod container;
pub mod factory;

pub use container::*;
pub use factory::*;
