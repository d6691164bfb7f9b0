//! 示例服务：按 `I{Name}` 约定注册

use component_macros::{component, contract};
use infrastructure_common::ActivationError;
use std::sync::atomic::{AtomicU64, Ordering};

#[contract]
pub trait IGreetingService: Send + Sync {
    fn greet(&self, name: &str) -> String;
}

#[contract]
pub trait IOrderService: Send + Sync {
    fn place_order(&self, item: &str) -> u64;
}

#[component(implements(IGreetingService), activator = default)]
#[derive(Default)]
pub struct GreetingService;

impl IGreetingService for GreetingService {
    fn greet(&self, name: &str) -> String {
        format!("你好, {}", name)
    }
}

#[component(implements(IOrderService), activator = "OrderService::create")]
pub struct OrderService {
    next_id: AtomicU64,
}

impl OrderService {
    fn create() -> Result<Self, ActivationError> {
        Ok(Self {
            next_id: AtomicU64::new(1000),
        })
    }
}

impl IOrderService for OrderService {
    fn place_order(&self, item: &str) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        tracing::info!("下单: {} (订单号 {})", item, id);
        id
    }
}

/// 标记类型
pub struct ServicesMarker;
