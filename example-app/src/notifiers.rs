//! 示例通知渠道：通过服务工厂表按名称选择

use component_macros::{component, contract};

#[contract]
pub trait INotifier: Send + Sync {
    fn notify(&self, message: &str) -> String;
}

#[component(implements(INotifier), activator = default)]
#[derive(Default)]
pub struct EmailNotifier;

impl INotifier for EmailNotifier {
    fn notify(&self, message: &str) -> String {
        format!("[email] {}", message)
    }
}

#[component(implements(INotifier), activator = default)]
#[derive(Default)]
pub struct SmsNotifier;

impl INotifier for SmsNotifier {
    fn notify(&self, message: &str) -> String {
        format!("[sms] {}", message)
    }
}
