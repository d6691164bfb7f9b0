//! 服务工厂抽象
//!
//! 工厂表是从字符串键到延迟构造函数的映射。任何
//! `FromIterator<(String, DeferredConstructor<S, E>)>` 的类型都可以作为工厂表，
//! 例如 `HashMap<String, DeferredConstructor<S, E>>`。

use infrastructure_common::{ConventionResult, TypeDescriptor};
use std::sync::Arc;

/// 延迟构造函数
///
/// 调用时才向容器解析实例，解析失败也在调用时才返回。
pub type DeferredConstructor<S, E> = Arc<dyn Fn() -> ConventionResult<Arc<S>, E> + Send + Sync>;

/// 工厂键推导规则
pub type ProductNameRule<'a> = &'a dyn Fn(&TypeDescriptor) -> String;

/// 默认工厂键：实现类型的简短名称
pub fn default_product_name(implementation: &TypeDescriptor) -> String {
    implementation.name().to_string()
}
