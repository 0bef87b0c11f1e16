//! # LLM Translator
//!
//! 通过 OpenAI 兼容的聊天补全接口翻译文本的Rust库，适合作为桌面翻译工具的核心。
//!
//! ## 主要特性
//!
//! - **单次请求**: 每次翻译只发送一次 `POST /v1/chat/completions`
//! - **配置分离**: hostname/model 等设置保存在TOML文件中，API密钥保存在系统凭据库中
//! - **错误分类**: 缺少密钥、缺少接口配置、网络错误、响应格式错误各自独立
//! - **快捷键流程**: 剪贴板文本 + 默认语言对，复用同一条翻译管道
//!
//! ## 快速开始
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use llm_translator::{
//!     save_api_key, KeyringSecretStore, Settings, TomlSettingsStore, TranslatorClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Arc::new(TomlSettingsStore::open_default()?);
//!     let secrets = Arc::new(KeyringSecretStore::new());
//!
//!     Settings::new(settings.as_ref()).set_endpoint("api.mistral.ai", "mistral-small-latest")?;
//!     save_api_key(secrets.as_ref(), "your-api-key")?;
//!
//!     let client = TranslatorClient::new(settings, secrets);
//!     let result = client.translate_text("Hello, world!", Some("auto"), Some("zh")).await;
//!     println!("Translation: {}", result.display_text());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## 设置文件
//!
//! ```toml
//! hostname = "api.mistral.ai"
//! model = "mistral-small-latest"
//! hotkey = "CommandOrControl+Shift+T"
//! defaultSourceLanguage = "auto"
//! defaultTargetLanguage = "zh"
//!
//! [popupBounds]
//! x = 100
//! y = 100
//! width = 400
//! height = 240
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod hotkey;
pub mod resolver;
pub mod secrets;
pub mod translator;
pub mod types;

pub use client::TranslatorClient;
pub use config::{MemorySettingsStore, Settings, SettingsStore, TomlSettingsStore};
pub use error::{ConfigError, ErrorKind, PipelineError, Result, SecretError, StoreError};
pub use hotkey::{HotkeyTranslator, PopupContent};
pub use resolver::ConfigResolver;
pub use secrets::{
    load_api_key, save_api_key, KeyringSecretStore, MemorySecretStore, SecretStore,
    API_KEY_ACCOUNT, API_KEY_SERVICE,
};
pub use translator::{
    build_payload, build_prompt, parse_response, ChatTransport, HttpTransport, TranslationService,
    TransportResponse,
};
pub use types::{
    ChatCompletionRequest, ChatMessage, PopupBounds, TranslationConfig, TranslationRequest,
    TranslationResult,
};
