//! 类型定义模块
//!
//! 定义翻译库中使用的所有数据结构：翻译配置、请求、结果以及聊天补全接口的报文类型。

use crate::error::{ConfigError, ErrorKind, PipelineError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 固定的采样温度，不开放给用户配置
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// 源语言为自动检测时使用的语言代码
pub const AUTO_LANGUAGE: &str = "auto";

/// 翻译配置
///
/// 由 [`ConfigResolver`](crate::ConfigResolver) 在每次翻译时组装，之后不再修改。
/// 本身不持久化：hostname/model 存在设置文件里，apiKey 存在系统凭据库里。
///
/// # 字段说明
///
/// * `hostname` - API主机名，例如 `api.mistral.ai`
/// * `model` - 模型名称
/// * `api_key` - Bearer 令牌
/// * `temperature` - 固定为 0.3
#[derive(Clone, PartialEq)]
pub struct TranslationConfig {
    hostname: String,
    model: String,
    api_key: String,
    temperature: f32,
}

impl TranslationConfig {
    /// 校验并创建配置
    ///
    /// 三个字段都必须非空。密钥缺失优先报告为 `MissingApiKey`。
    pub fn new(
        hostname: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let hostname = hostname.into().trim().to_string();
        let model = model.into().trim().to_string();
        let api_key = api_key.into();

        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let mut missing = Vec::new();
        if hostname.is_empty() {
            missing.push(crate::config::HOSTNAME_KEY);
        }
        if model.is_empty() {
            missing.push(crate::config::MODEL_KEY);
        }
        if !missing.is_empty() {
            return Err(ConfigError::MissingEndpointConfig { missing });
        }

        Ok(Self {
            hostname,
            model,
            api_key,
            temperature: DEFAULT_TEMPERATURE,
        })
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// 聊天补全接口地址
    pub fn endpoint_url(&self) -> String {
        format!("https://{}:443/v1/chat/completions", self.hostname)
    }
}

// 手写 Debug，避免密钥出现在日志里
impl fmt::Debug for TranslationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationConfig")
            .field("hostname", &self.hostname)
            .field("model", &self.model)
            .field("api_key", &"********")
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// 翻译请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    /// "auto" 或语言代码
    pub source_lang: String,
    pub target_lang: String,
}

impl TranslationRequest {
    /// 创建翻译请求，空白文本返回 `PipelineError::EmptyText`
    pub fn new(
        text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Result<Self, PipelineError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(PipelineError::EmptyText);
        }
        Ok(Self {
            text,
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        })
    }

    pub fn is_auto_detect(&self) -> bool {
        self.source_lang.trim().eq_ignore_ascii_case(AUTO_LANGUAGE)
    }
}

/// 翻译结果
///
/// 给界面层使用的值类型，错误不会以 panic 或 `Err` 的形式越过异步边界。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationResult {
    Success { translated_text: String },
    Failure { kind: ErrorKind, message: String },
}

impl TranslationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, TranslationResult::Success { .. })
    }

    pub fn translated_text(&self) -> Option<&str> {
        match self {
            TranslationResult::Success { translated_text } => Some(translated_text),
            TranslationResult::Failure { .. } => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            TranslationResult::Success { .. } => None,
            TranslationResult::Failure { kind, .. } => Some(*kind),
        }
    }

    /// 成功时为译文，失败时为错误信息
    pub fn display_text(&self) -> &str {
        match self {
            TranslationResult::Success { translated_text } => translated_text,
            TranslationResult::Failure { message, .. } => message,
        }
    }
}

impl From<Result<String, PipelineError>> for TranslationResult {
    fn from(result: Result<String, PipelineError>) -> Self {
        match result {
            Ok(translated_text) => TranslationResult::Success { translated_text },
            Err(e) => TranslationResult::Failure {
                kind: ErrorKind::from(&e),
                message: e.to_string(),
            },
        }
    }
}

impl From<ConfigError> for TranslationResult {
    fn from(error: ConfigError) -> Self {
        let kind = ErrorKind::from(&error);
        TranslationResult::Failure {
            kind,
            message: format!("{} ({})", kind.user_message(), error),
        }
    }
}

/// 弹窗位置与尺寸，以 TOML 表的形式保存在 `popupBounds` 键下
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// 聊天补全请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// 聊天补全响应体，只解析需要的字段
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}
