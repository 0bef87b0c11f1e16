//! 翻译服务核心模块
//!
//! 翻译管道：构造提示词 -> 序列化请求 -> 发送HTTPS请求 -> 解析响应。
//! 每一步都是独立的函数，传输层通过 [`ChatTransport`] 注入，便于测试时替换。
//!
//! 每次调用只发送一次请求，不重试，也不设置额外的超时。

use crate::error::{ErrorKind, PipelineError, Result};
use crate::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, TranslationConfig,
    TranslationRequest,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

/// 源语言为 "auto" 时写进提示词的文字
const AUTO_DETECTED_LABEL: &str = "auto-detected";

/// 构造翻译提示词
///
/// 原文放在双引号中，不做任何转义。
pub fn build_prompt(request: &TranslationRequest) -> String {
    let source = if request.is_auto_detect() {
        AUTO_DETECTED_LABEL
    } else {
        request.source_lang.as_str()
    };
    format!(
        "Translate the following text from {} to {}. \
         Reply with the translation only, without quotes or explanations.\n\n\"{}\"",
        source, request.target_lang, request.text
    )
}

/// 构造聊天补全请求体
pub fn build_payload(request: &TranslationRequest, config: &TranslationConfig) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: config.model().to_string(),
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: build_prompt(request),
        }],
        temperature: config.temperature(),
    }
}

/// 从响应体中取出 `choices[0].message.content` 并去掉首尾空白
///
/// 只有不是JSON的响应体才算 `MalformedResponse`，结构不符一律是 `InvalidResponse`。
pub fn parse_response(body: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| PipelineError::MalformedResponse(e.to_string()))?;
    let response = ChatCompletionResponse::deserialize(value)
        .map_err(|_| PipelineError::InvalidResponse(body.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| PipelineError::InvalidResponse(body.to_string()))
}

/// 传输层返回的原始响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// 聊天补全传输接口
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// 发送一次请求并返回响应体，只有传输层失败才返回错误
    async fn send(
        &self,
        config: &TranslationConfig,
        payload: &ChatCompletionRequest,
    ) -> Result<TransportResponse>;
}

/// 基于 reqwest 的HTTPS传输
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(concat!("llm-translator/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Failed to create configured HTTP client: {}, using default", e);
                Client::new()
            });
        Self { client }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(
        &self,
        config: &TranslationConfig,
        payload: &ChatCompletionRequest,
    ) -> Result<TransportResponse> {
        let response = self
            .client
            .post(config.endpoint_url())
            .bearer_auth(config.api_key())
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

/// 翻译服务
///
/// 不持有可变状态，可以被克隆后在多个任务中并发使用。
///
/// # 示例
///
/// ```rust,no_run
/// use llm_translator::{TranslationConfig, TranslationRequest, TranslationService};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = TranslationConfig::new("api.mistral.ai", "mistral-small-latest", "sk-...")?;
///     let request = TranslationRequest::new("Hello, world!", "auto", "zh")?;
///
///     let service = TranslationService::new();
///     let translated = service.translate(&request, &config).await?;
///     println!("Translation: {}", translated);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct TranslationService {
    transport: Arc<dyn ChatTransport>,
}

impl TranslationService {
    /// 使用默认的HTTPS传输
    pub fn new() -> Self {
        Self::with_transport(Arc::new(HttpTransport::new()))
    }

    pub fn with_transport(transport: Arc<dyn ChatTransport>) -> Self {
        Self { transport }
    }

    /// 翻译文本
    ///
    /// # 参数
    ///
    /// * `request` - 原文与语言对
    /// * `config` - 已解析的接口配置
    ///
    /// # 返回
    ///
    /// * `Ok(String)` - 去掉首尾空白的译文
    /// * `Err(PipelineError)` - 传输失败或响应无法解析
    pub async fn translate(
        &self,
        request: &TranslationRequest,
        config: &TranslationConfig,
    ) -> Result<String> {
        if request.text.trim().is_empty() {
            return Err(PipelineError::EmptyText);
        }

        log::info!(
            "Translating {} chars ({} -> {}) via {} using {}",
            request.text.chars().count(),
            request.source_lang,
            request.target_lang,
            config.hostname(),
            config.model()
        );

        let payload = build_payload(request, config);
        let response = self.transport.send(config, &payload).await.inspect_err(|e| {
            log::warn!("Translation request failed: {}", e);
        })?;

        log::debug!("Chat completion response status: {}", response.status);
        if !(200..300).contains(&response.status) {
            log::warn!("Chat completion returned HTTP {}", response.status);
        }

        match parse_response(&response.body) {
            Ok(translated) => {
                log::info!("Translation finished, {} chars", translated.chars().count());
                Ok(translated)
            }
            Err(e) => {
                log::warn!(
                    "Could not extract translation (HTTP {}): {:?}",
                    response.status,
                    ErrorKind::from(&e)
                );
                Err(e)
            }
        }
    }
}

impl Default for TranslationService {
    fn default() -> Self {
        Self::new()
    }
}
