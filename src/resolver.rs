//! 配置解析
//!
//! 把设置存储和凭据库合并成一份 [`TranslationConfig`]。不做缓存，每次都重新读取。

use crate::config::{Settings, SettingsStore};
use crate::error::{ConfigError, PipelineError};
use crate::secrets::{load_api_key, SecretStore};
use crate::types::{TranslationConfig, TranslationRequest};
use std::sync::Arc;

/// 配置解析器
#[derive(Clone)]
pub struct ConfigResolver {
    settings: Arc<dyn SettingsStore>,
    secrets: Arc<dyn SecretStore>,
}

impl ConfigResolver {
    pub fn new(settings: Arc<dyn SettingsStore>, secrets: Arc<dyn SecretStore>) -> Self {
        Self { settings, secrets }
    }

    pub fn settings(&self) -> Settings<'_> {
        Settings::new(self.settings.as_ref())
    }

    pub fn secrets(&self) -> &dyn SecretStore {
        self.secrets.as_ref()
    }

    /// 解析翻译配置
    ///
    /// hostname/model 缺失时不会替换成默认值。
    ///
    /// # 返回
    ///
    /// * `Ok(TranslationConfig)` - 三个字段都非空
    /// * `Err(ConfigError::MissingApiKey)` - 凭据库中没有密钥
    /// * `Err(ConfigError::MissingEndpointConfig)` - hostname 或 model 为空
    pub fn resolve(&self) -> Result<TranslationConfig, ConfigError> {
        let api_key = match load_api_key(self.secrets.as_ref()) {
            Ok(Some(key)) => key,
            Ok(None) => {
                log::warn!("No API key stored, translation unavailable");
                return Err(ConfigError::MissingApiKey);
            }
            Err(e) => {
                log::error!("Failed to read API key: {}", e);
                return Err(e.into());
            }
        };

        let settings = self.settings();
        let hostname = settings.hostname().unwrap_or_default();
        let model = settings.model().unwrap_or_default();

        TranslationConfig::new(hostname, model, api_key).inspect_err(|e| {
            log::warn!("Translation config incomplete: {}", e);
        })
    }

    /// 组装翻译请求，未指定的语言用已保存的默认值
    pub fn resolve_request(
        &self,
        text: &str,
        source_lang: Option<&str>,
        target_lang: Option<&str>,
    ) -> Result<TranslationRequest, PipelineError> {
        let (source, target) = match (source_lang, target_lang) {
            (Some(source), Some(target)) => (source.to_string(), target.to_string()),
            _ => {
                let (default_source, default_target) = self.settings().default_languages();
                (
                    source_lang.map(str::to_string).unwrap_or(default_source),
                    target_lang.map(str::to_string).unwrap_or(default_target),
                )
            }
        };
        TranslationRequest::new(text, source, target)
    }
}
