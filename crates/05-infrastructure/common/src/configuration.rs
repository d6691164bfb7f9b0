//! 约定扫描配置
//!
//! 一次约定扫描的全部参数，可以直接在代码中构建，也可以从 TOML / JSON 配置节绑定。

use crate::conventions::{ConventionRule, DEFAULT_SERVICE_PREFIX};
use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// 扫描方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// 只扫描标记类型所在的模块路径
    Namespace,
    /// 扫描标记类型所在的整个 crate
    #[serde(alias = "assembly")]
    Crate,
}

/// 零匹配策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroMatchPolicy {
    /// 静默接受
    #[default]
    Allow,
    /// 记录警告日志
    Warn,
    /// 视为错误
    Require,
}

fn default_service_prefix() -> String {
    DEFAULT_SERVICE_PREFIX.to_string()
}

/// 约定扫描选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionOptions {
    /// 扫描方式
    pub scan: ScanMode,
    /// 实现类型名称后缀
    pub pattern_suffix: String,
    /// 契约名称前缀
    #[serde(default = "default_service_prefix")]
    pub service_prefix: String,
    /// 零匹配策略
    #[serde(default)]
    pub zero_match: ZeroMatchPolicy,
}

impl ConventionOptions {
    /// 创建新的扫描选项
    pub fn new(scan: ScanMode, pattern_suffix: impl Into<String>) -> Self {
        Self {
            scan,
            pattern_suffix: pattern_suffix.into(),
            service_prefix: default_service_prefix(),
            zero_match: ZeroMatchPolicy::default(),
        }
    }

    /// 命名空间扫描
    pub fn namespace(pattern_suffix: impl Into<String>) -> Self {
        Self::new(ScanMode::Namespace, pattern_suffix)
    }

    /// crate 扫描
    pub fn crate_wide(pattern_suffix: impl Into<String>) -> Self {
        Self::new(ScanMode::Crate, pattern_suffix)
    }

    /// 设置契约前缀
    pub fn with_service_prefix(mut self, service_prefix: impl Into<String>) -> Self {
        self.service_prefix = service_prefix.into();
        self
    }

    /// 设置零匹配策略
    pub fn with_zero_match(mut self, policy: ZeroMatchPolicy) -> Self {
        self.zero_match = policy;
        self
    }

    /// 对应的约定规则
    pub fn rule(&self) -> ConventionRule {
        ConventionRule::new(self.pattern_suffix.clone()).with_service_prefix(self.service_prefix.clone())
    }

    /// 从 TOML 文本绑定
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            source: Box::new(e),
        })
    }

    /// 从 JSON 值绑定
    pub fn from_json(value: serde_json::Value) -> ConfigResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}
