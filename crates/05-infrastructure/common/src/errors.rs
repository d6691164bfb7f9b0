//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置序列化失败: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },
}

/// 依赖注入错误类型
///
/// 由参考容器实现返回，约定注册层只负责原样传递。
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件未注册: {type_name}")]
    ComponentNotRegistered { type_name: String },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ComponentCreationFailed {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("依赖解析失败: {type_name}, 原因: {message}")]
    DependencyResolutionFailed { type_name: String, message: String },

    #[error("组件注册失败: {type_name}, 原因: {message}")]
    RegistrationError { type_name: String, message: String },
}

/// 组件错误类型
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("类型重复登记: {type_name}")]
    DuplicateType { type_name: String },

    #[error("组件元数据无效: {message}")]
    InvalidMetadata { message: String },
}

impl ComponentError {
    /// 创建元数据无效错误
    pub fn invalid_metadata(message: impl Into<String>) -> Self {
        Self::InvalidMetadata {
            message: message.into(),
        }
    }
}

/// 约定注册错误类型
///
/// `E` 是容器自身的错误类型。容器拒绝注册或解析失败时，错误通过
/// [`ConventionError::Container`] 原样透传，不做任何包装信息的修改。
#[derive(Error, Debug)]
pub enum ConventionError<E> {
    #[error(transparent)]
    Container(E),

    #[error("约定扫描未匹配任何类型: 范围 {scope}, 后缀 \"{pattern_suffix}\"")]
    NoMatches {
        scope: String,
        pattern_suffix: String,
    },

    #[error("工厂键重复: {key} (实现类型 {implementation})")]
    DuplicateFactoryKey { key: String, implementation: String },

    #[error("实例类型不匹配: {implementation} 无法转换为 {contract}")]
    InstanceTypeMismatch {
        implementation: String,
        contract: String,
    },
}

impl<E> ConventionError<E> {
    /// 取出容器原始错误
    pub fn into_container_error(self) -> Option<E> {
        match self {
            Self::Container(error) => Some(error),
            _ => None,
        }
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type ConventionResult<T, E> = Result<T, ConventionError<E>>;
