//! 约定规范定义
//!
//! 按命名约定把实现类型与契约配对：实现类型名称以给定后缀结尾，
//! 且它实现的某个契约名称等于 `服务前缀 + 实现类型名称`。

use crate::descriptor::{ContractBinding, TypeDescriptor};
use std::any::TypeId;
use std::sync::Arc;

/// 默认契约前缀
pub const DEFAULT_SERVICE_PREFIX: &str = "I";

/// 约定规则
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionRule {
    /// 实现类型名称后缀
    pub pattern_suffix: String,
    /// 契约名称前缀
    pub service_prefix: String,
}

impl ConventionRule {
    /// 创建新的约定规则，契约前缀默认为 `"I"`
    pub fn new(pattern_suffix: impl Into<String>) -> Self {
        Self {
            pattern_suffix: pattern_suffix.into(),
            service_prefix: DEFAULT_SERVICE_PREFIX.to_string(),
        }
    }

    /// 设置契约前缀
    ///
    /// 仅含空白的前缀视为空前缀，此时契约名称必须与实现类型名称完全相同。
    pub fn with_service_prefix(mut self, service_prefix: impl Into<String>) -> Self {
        let service_prefix = service_prefix.into();
        self.service_prefix = if service_prefix.trim().is_empty() {
            String::new()
        } else {
            service_prefix
        };
        self
    }

    /// 名称是否以后缀结尾（区分大小写）
    pub fn matches_name(&self, name: &str) -> bool {
        name.ends_with(&self.pattern_suffix)
    }

    /// 实现类型对应的契约名称
    pub fn contract_name_for(&self, implementation_name: &str) -> String {
        format!("{}{}", self.service_prefix, implementation_name)
    }

    /// 类型是否是候选实现：名称匹配且不是契约
    pub fn is_candidate(&self, descriptor: &TypeDescriptor) -> bool {
        self.matches_name(descriptor.name()) && !descriptor.is_interface()
    }

    /// 选出实现类型对应的契约
    ///
    /// 多个契约同名时取声明顺序中的第一个。
    pub fn select_contract<'a>(&self, descriptor: &'a TypeDescriptor) -> Option<&'a ContractBinding> {
        let expected = self.contract_name_for(descriptor.name());
        descriptor
            .contracts()
            .iter()
            .find(|binding| binding.name() == expected)
    }
}

/// 注册对：(契约, 实现类型)
#[derive(Debug, Clone)]
pub struct RegistrationPair {
    /// 契约
    pub contract: ContractBinding,
    /// 实现类型
    pub implementation: Arc<TypeDescriptor>,
}

impl RegistrationPair {
    /// 契约类型ID
    pub fn contract_id(&self) -> TypeId {
        self.contract.info().id
    }
}

/// 按约定匹配注册对
///
/// 结果顺序与 `types` 的顺序一致，不满足约定的类型直接跳过。
pub fn match_registrations(
    types: &[Arc<TypeDescriptor>],
    rule: &ConventionRule,
) -> Vec<RegistrationPair> {
    types
        .iter()
        .filter(|descriptor| rule.is_candidate(descriptor))
        .filter_map(|descriptor| {
            rule.select_contract(descriptor).map(|contract| RegistrationPair {
                contract: contract.clone(),
                implementation: Arc::clone(descriptor),
            })
        })
        .collect()
}

/// 工厂产品：实现了目标服务契约的实现类型
#[derive(Debug, Clone)]
pub struct FactoryProduct {
    /// 目标服务契约的绑定
    pub service: ContractBinding,
    /// 实现类型
    pub implementation: Arc<TypeDescriptor>,
}

/// 匹配实现了 `service` 契约的实现类型
///
/// 条件：名称以后缀结尾、不是契约、至少实现一个契约、实现了 `service`。
pub fn match_factory_products(
    types: &[Arc<TypeDescriptor>],
    pattern_suffix: &str,
    service: TypeId,
) -> Vec<FactoryProduct> {
    types
        .iter()
        .filter(|descriptor| descriptor.name().ends_with(pattern_suffix))
        .filter(|descriptor| !descriptor.is_interface())
        .filter(|descriptor| !descriptor.contracts().is_empty())
        .filter_map(|descriptor| {
            descriptor.contract(service).map(|binding| FactoryProduct {
                service: binding.clone(),
                implementation: Arc::clone(descriptor),
            })
        })
        .collect()
}
