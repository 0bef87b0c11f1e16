//! 全局快捷键触发的翻译
//!
//! 快捷键监听由界面层负责，这里只处理"拿到剪贴板文本之后"的流程：
//! 使用默认语言对，复用同一个 [`TranslatorClient`]，并生成弹窗要显示的内容。

use crate::client::TranslatorClient;
use crate::error::ErrorKind;
use crate::types::TranslationResult;

/// 弹窗内容
///
/// `original` 始终是输入文本，失败时用户的输入也不会丢失。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    pub original: String,
    /// 译文，或者面向用户的错误信息
    pub body: String,
    pub outcome: TranslationResult,
}

impl PopupContent {
    fn new(original: &str, outcome: TranslationResult) -> Self {
        Self {
            original: original.to_string(),
            body: outcome.display_text().to_string(),
            outcome,
        }
    }
}

/// 快捷键翻译
#[derive(Clone)]
pub struct HotkeyTranslator {
    client: TranslatorClient,
}

impl HotkeyTranslator {
    pub fn new(client: TranslatorClient) -> Self {
        Self { client }
    }

    /// 已保存的快捷键，供界面层注册
    pub fn registered_hotkey(&self) -> Option<String> {
        self.client.resolver().settings().hotkey()
    }

    /// 快捷键触发时调用
    pub async fn on_hotkey(&self, clipboard_text: &str) -> PopupContent {
        if clipboard_text.trim().is_empty() {
            log::debug!("Hotkey fired with empty clipboard");
            let outcome = TranslationResult::Failure {
                kind: ErrorKind::EmptyText,
                message: ErrorKind::EmptyText.user_message().to_string(),
            };
            return PopupContent::new(clipboard_text, outcome);
        }

        // 配置不完整时 translate_text 不会发请求，错误信息按缺失项区分
        let outcome = self.client.translate_text(clipboard_text, None, None).await;
        if let TranslationResult::Failure { kind, .. } = &outcome {
            log::warn!("Hotkey translation failed: {:?}", kind);
        }
        PopupContent::new(clipboard_text, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MemorySettingsStore, Settings};
    use crate::resolver::ConfigResolver;
    use crate::secrets::{save_api_key, MemorySecretStore};
    use crate::translator::mock::MockTransport;
    use crate::translator::TranslationService;
    use std::sync::Arc;

    struct Fixture {
        settings: Arc<MemorySettingsStore>,
        secrets: Arc<MemorySecretStore>,
        transport: Arc<MockTransport>,
        hotkey: HotkeyTranslator,
    }

    fn fixture(transport: MockTransport) -> Fixture {
        let settings = Arc::new(MemorySettingsStore::new());
        let secrets = Arc::new(MemorySecretStore::new());
        let transport = Arc::new(transport);
        let client = TranslatorClient::with_service(
            ConfigResolver::new(settings.clone(), secrets.clone()),
            TranslationService::with_transport(transport.clone()),
        );
        Fixture {
            settings,
            secrets,
            transport,
            hotkey: HotkeyTranslator::new(client),
        }
    }

    fn configure(f: &Fixture) {
        Settings::new(f.settings.as_ref())
            .set_endpoint("api.mistral.ai", "mistral-small-latest")
            .unwrap();
        save_api_key(f.secrets.as_ref(), "sk-test").unwrap();
    }

    #[tokio::test]
    async fn missing_key_message_is_specific() {
        let f = fixture(MockTransport::with_content("unused"));
        Settings::new(f.settings.as_ref())
            .set_endpoint("api.mistral.ai", "mistral-small-latest")
            .unwrap();

        let popup = f.hotkey.on_hotkey("Hello").await;
        assert_eq!(popup.original, "Hello");
        assert_eq!(popup.outcome.error_kind(), Some(ErrorKind::MissingApiKey));
        assert!(popup.body.starts_with(ErrorKind::MissingApiKey.user_message()));
        assert_eq!(f.transport.calls(), 0);
    }

    #[tokio::test]
    async fn missing_endpoint_message_differs_from_missing_key() {
        let f = fixture(MockTransport::with_content("unused"));
        save_api_key(f.secrets.as_ref(), "sk-test").unwrap();

        let popup = f.hotkey.on_hotkey("Hello").await;
        assert_eq!(popup.outcome.error_kind(), Some(ErrorKind::MissingEndpointConfig));
        assert!(!popup.body.starts_with(ErrorKind::MissingApiKey.user_message()));
        assert!(popup.body.contains("hostname"));
        assert_eq!(f.transport.calls(), 0);
    }

    #[tokio::test]
    async fn uses_default_languages() {
        let f = fixture(MockTransport::with_content("Hallo"));
        configure(&f);
        Settings::new(f.settings.as_ref())
            .set_default_languages("en", "de")
            .unwrap();

        let popup = f.hotkey.on_hotkey("Hello").await;
        assert_eq!(popup.body, "Hallo");
        assert!(f.transport.last_prompt().unwrap().contains("from en to de"));
    }

    #[tokio::test]
    async fn pipeline_failure_shows_actual_message() {
        let f = fixture(MockTransport::failing("dns error: no such host"));
        configure(&f);

        let popup = f.hotkey.on_hotkey("Hello").await;
        assert_eq!(popup.original, "Hello");
        assert_eq!(popup.outcome.error_kind(), Some(ErrorKind::NetworkError));
        assert!(popup.body.contains("no such host"));
    }

    #[tokio::test]
    async fn empty_clipboard_does_nothing() {
        let f = fixture(MockTransport::with_content("unused"));
        configure(&f);

        let popup = f.hotkey.on_hotkey("").await;
        assert_eq!(popup.outcome.error_kind(), Some(ErrorKind::EmptyText));
        assert_eq!(f.transport.calls(), 0);
    }

    #[test]
    fn reads_registered_hotkey() {
        let f = fixture(MockTransport::with_content("unused"));
        assert_eq!(f.hotkey.registered_hotkey(), None);
        Settings::new(f.settings.as_ref())
            .set_hotkey("Alt+T")
            .unwrap();
        assert_eq!(f.hotkey.registered_hotkey().as_deref(), Some("Alt+T"));
    }
}
