//! 错误处理模块
//!
//! 定义配置解析、翻译管道以及两个持久化存储中使用的错误类型。

use thiserror::Error;

/// 配置解析错误
///
/// 由 [`ConfigResolver`](crate::ConfigResolver) 在发起任何网络请求之前返回。
/// `MissingApiKey` 与 `MissingEndpointConfig` 需要分开，界面据此给出不同的提示。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 凭据库中没有保存API密钥
    #[error("no API key configured")]
    MissingApiKey,
    /// hostname 或 model 为空
    #[error("endpoint not configured: missing {}", .missing.join(", "))]
    MissingEndpointConfig {
        /// 缺失的设置键
        missing: Vec<&'static str>,
    },
    /// 凭据库本身不可用（不同于"没有条目"）
    #[error("secret store error: {0}")]
    SecretStore(String),
}

/// 翻译管道错误
///
/// # 变体说明
///
/// * `EmptyText` - 待翻译文本为空
/// * `NetworkError` - 传输层错误（DNS、TLS、连接重置等）
/// * `MalformedResponse` - 响应体不是合法的JSON
/// * `InvalidResponse` - 响应是JSON，但缺少 `choices[0].message`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("nothing to translate")]
    EmptyText,
    #[error("network error: {0}")]
    NetworkError(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for PipelineError {
    fn from(error: reqwest::Error) -> Self {
        // reqwest 的错误信息只包含URL，不包含请求头，因此不会泄露密钥
        PipelineError::NetworkError(error.to_string())
    }
}

/// 设置存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("could not determine a configuration directory")]
    NoConfigDir,
}

/// 凭据库错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    #[error("credential backend error: {0}")]
    Backend(String),
}

impl From<keyring::Error> for SecretError {
    fn from(error: keyring::Error) -> Self {
        SecretError::Backend(error.to_string())
    }
}

impl From<SecretError> for ConfigError {
    fn from(error: SecretError) -> Self {
        ConfigError::SecretStore(error.to_string())
    }
}

/// 失败分类
///
/// [`TranslationResult::Failure`](crate::TranslationResult::Failure) 中携带的扁平分类，
/// 每个 `ConfigError` / `PipelineError` 变体对应一个值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingApiKey,
    MissingEndpointConfig,
    SecretStore,
    EmptyText,
    NetworkError,
    MalformedResponse,
    InvalidResponse,
}

impl ErrorKind {
    /// 面向用户的提示文本
    pub fn user_message(self) -> &'static str {
        match self {
            ErrorKind::MissingApiKey => "No API key found. Please set up your API key in settings.",
            ErrorKind::MissingEndpointConfig => {
                "The API hostname or model is not configured. Please check your settings."
            }
            ErrorKind::SecretStore => "Could not access the system credential store.",
            ErrorKind::EmptyText => "There is no text to translate.",
            ErrorKind::NetworkError => "Could not reach the translation service.",
            ErrorKind::MalformedResponse => "The translation service returned an unreadable response.",
            ErrorKind::InvalidResponse => "The translation service returned no translation.",
        }
    }
}

impl From<&ConfigError> for ErrorKind {
    fn from(error: &ConfigError) -> Self {
        match error {
            ConfigError::MissingApiKey => ErrorKind::MissingApiKey,
            ConfigError::MissingEndpointConfig { .. } => ErrorKind::MissingEndpointConfig,
            ConfigError::SecretStore(_) => ErrorKind::SecretStore,
        }
    }
}

impl From<&PipelineError> for ErrorKind {
    fn from(error: &PipelineError) -> Self {
        match error {
            PipelineError::EmptyText => ErrorKind::EmptyText,
            PipelineError::NetworkError(_) => ErrorKind::NetworkError,
            PipelineError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            PipelineError::InvalidResponse(_) => ErrorKind::InvalidResponse,
        }
    }
}

/// 翻译结果类型别名
///
/// 简化返回类型，默认使用 `PipelineError` 作为错误类型。
///
/// # 示例
///
/// ```rust
/// use llm_translator::{Result, PipelineError};
///
/// fn example_function() -> Result<String> {
///     Err(PipelineError::EmptyText)
/// }
///
/// assert!(example_function().is_err());
/// ```
pub type Result<T, E = PipelineError> = std::result::Result<T, E>;
