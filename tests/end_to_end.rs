//! 端到端测试
//!
//! 只通过公开API完成翻译流程，传输层替换为进程内实现。

use async_trait::async_trait;
use llm_translator::{
    save_api_key, ChatCompletionRequest, ChatTransport, ConfigResolver, ErrorKind,
    MemorySecretStore, MemorySettingsStore, Result, Settings, TranslationConfig,
    TranslationRequest, TranslationResult, TranslationService, TranslatorClient,
    TransportResponse,
};
use std::sync::{Arc, Mutex};

/// 记录发出的请求并返回固定译文的传输
struct AssertingTransport {
    content: String,
    seen: Mutex<Vec<(String, ChatCompletionRequest)>>,
}

#[async_trait]
impl ChatTransport for AssertingTransport {
    async fn send(
        &self,
        config: &TranslationConfig,
        payload: &ChatCompletionRequest,
    ) -> Result<TransportResponse> {
        self.seen
            .lock()
            .unwrap()
            .push((config.endpoint_url(), payload.clone()));
        let body = serde_json::json!({
            "id": "cmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": self.content },
                "finish_reason": "stop"
            }]
        });
        Ok(TransportResponse {
            status: 200,
            body: body.to_string(),
        })
    }
}

fn setup(content: &str) -> (TranslatorClient, Arc<MemorySecretStore>, Arc<AssertingTransport>) {
    let settings = Arc::new(MemorySettingsStore::new());
    let secrets = Arc::new(MemorySecretStore::new());
    let transport = Arc::new(AssertingTransport {
        content: content.to_string(),
        seen: Mutex::new(Vec::new()),
    });

    Settings::new(settings.as_ref())
        .set_endpoint("api.mistral.ai", "mistral-small-latest")
        .unwrap();
    save_api_key(secrets.as_ref(), "sk-live-secret").unwrap();

    let client = TranslatorClient::with_service(
        ConfigResolver::new(settings, secrets.clone()),
        TranslationService::with_transport(transport.clone()),
    );
    (client, secrets, transport)
}

#[tokio::test]
async fn translates_hello_to_chinese() {
    let (client, _, transport) = setup("你好");
    let request = TranslationRequest::new("Hello", "auto", "zh").unwrap();

    let result = client.translate(&request).await;
    assert_eq!(
        result,
        TranslationResult::Success {
            translated_text: "你好".to_string()
        }
    );

    let seen = transport.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (url, payload) = &seen[0];
    assert_eq!(url, "https://api.mistral.ai:443/v1/chat/completions");
    assert_eq!(payload.model, "mistral-small-latest");
    let prompt = &payload.messages[0].content;
    assert!(prompt.contains("Hello"));
    assert!(prompt.contains("auto-detected"));
    assert!(!prompt.contains("sk-live-secret"));
}

#[tokio::test]
async fn clearing_api_key_blocks_translation() {
    let (client, secrets, transport) = setup("你好");
    save_api_key(secrets.as_ref(), "").unwrap();

    assert_eq!(
        client.resolve_config().unwrap_err(),
        llm_translator::ConfigError::MissingApiKey
    );

    let request = TranslationRequest::new("Hello", "auto", "zh").unwrap();
    let result = client.translate(&request).await;
    assert_eq!(result.error_kind(), Some(ErrorKind::MissingApiKey));
    assert!(transport.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn hotkey_path_shares_the_pipeline() {
    let (client, _, transport) = setup(" Hola ");
    let hotkey = llm_translator::HotkeyTranslator::new(client);

    let popup = hotkey.on_hotkey("Hello").await;
    assert_eq!(popup.original, "Hello");
    assert_eq!(popup.body, "Hola");
    assert_eq!(transport.seen.lock().unwrap().len(), 1);
}
