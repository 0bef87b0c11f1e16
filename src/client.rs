//! 面向界面层的入口
//!
//! [`TranslatorClient`] 把配置解析和翻译管道组合在一起，返回值类型的 [`TranslationResult`]，
//! 可以直接在界面事件处理函数中调用。

use crate::config::SettingsStore;
use crate::error::ConfigError;
use crate::resolver::ConfigResolver;
use crate::secrets::SecretStore;
use crate::translator::TranslationService;
use crate::types::{TranslationConfig, TranslationRequest, TranslationResult};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// 翻译客户端
///
/// 克隆开销很小，内部只共享只读的存储句柄和传输层。
///
/// # 示例
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use llm_translator::{KeyringSecretStore, TomlSettingsStore, TranslatorClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = TranslatorClient::new(
///         Arc::new(TomlSettingsStore::open_default()?),
///         Arc::new(KeyringSecretStore::new()),
///     );
///
///     let result = client.translate_text("Hello", None, None).await;
///     println!("{}", result.display_text());
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct TranslatorClient {
    resolver: ConfigResolver,
    service: TranslationService,
}

impl TranslatorClient {
    /// 使用默认的HTTPS传输
    pub fn new(settings: Arc<dyn SettingsStore>, secrets: Arc<dyn SecretStore>) -> Self {
        Self::with_service(ConfigResolver::new(settings, secrets), TranslationService::new())
    }

    pub fn with_service(resolver: ConfigResolver, service: TranslationService) -> Self {
        Self { resolver, service }
    }

    pub fn resolver(&self) -> &ConfigResolver {
        &self.resolver
    }

    pub fn resolve_config(&self) -> Result<TranslationConfig, ConfigError> {
        self.resolver.resolve()
    }

    /// 解析配置并翻译
    ///
    /// 配置不完整时直接返回失败，不会发出网络请求。
    pub async fn translate(&self, request: &TranslationRequest) -> TranslationResult {
        let config = match self.resolver.resolve() {
            Ok(config) => config,
            Err(e) => return TranslationResult::from(e),
        };
        TranslationResult::from(self.service.translate(request, &config).await)
    }

    /// 翻译文本，未指定的语言使用已保存的默认语言
    pub async fn translate_text(
        &self,
        text: &str,
        source_lang: Option<&str>,
        target_lang: Option<&str>,
    ) -> TranslationResult {
        match self.resolver.resolve_request(text, source_lang, target_lang) {
            Ok(request) => self.translate(&request).await,
            Err(e) => TranslationResult::from(Err(e)),
        }
    }

    /// 在 tokio 运行时中执行翻译，调用方无需等待
    ///
    /// 必须在运行时上下文中调用。
    pub fn spawn_translate(&self, request: TranslationRequest) -> JoinHandle<TranslationResult> {
        let client = self.clone();
        tokio::spawn(async move { client.translate(&request).await })
    }
}
