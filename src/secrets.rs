//! API密钥存储
//!
//! 密钥保存在系统凭据库（macOS 钥匙串、Windows 凭据管理器、Secret Service）中，
//! 以 `(service, account)` 作为键。

use crate::error::SecretError;
use keyring::Entry;
use std::collections::HashMap;
use std::sync::Mutex;

pub const API_KEY_SERVICE: &str = "llm-translator";
pub const API_KEY_ACCOUNT: &str = "default-api-key";

/// 凭据库接口
pub trait SecretStore: Send + Sync {
    fn get(&self, service: &str, account: &str) -> Result<Option<String>, SecretError>;
    fn set(&self, service: &str, account: &str, secret: &str) -> Result<(), SecretError>;
    /// 删除不存在的条目视为成功
    fn delete(&self, service: &str, account: &str) -> Result<(), SecretError>;
}

/// 基于 `keyring` 的系统凭据库
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyringSecretStore;

impl KeyringSecretStore {
    pub fn new() -> Self {
        Self
    }
}

impl SecretStore for KeyringSecretStore {
    fn get(&self, service: &str, account: &str) -> Result<Option<String>, SecretError> {
        let entry = Entry::new(service, account)?;
        match entry.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, service: &str, account: &str, secret: &str) -> Result<(), SecretError> {
        let entry = Entry::new(service, account)?;
        entry.set_password(secret)?;
        Ok(())
    }

    fn delete(&self, service: &str, account: &str) -> Result<(), SecretError> {
        let entry = Entry::new(service, account)?;
        match entry.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// 内存中的凭据库
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: Mutex<HashMap<(String, String), String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), String>> {
        self.secrets.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self, service: &str, account: &str) -> Result<Option<String>, SecretError> {
        Ok(self
            .lock()
            .get(&(service.to_string(), account.to_string()))
            .cloned())
    }

    fn set(&self, service: &str, account: &str, secret: &str) -> Result<(), SecretError> {
        self.lock()
            .insert((service.to_string(), account.to_string()), secret.to_string());
        Ok(())
    }

    fn delete(&self, service: &str, account: &str) -> Result<(), SecretError> {
        self.lock().remove(&(service.to_string(), account.to_string()));
        Ok(())
    }
}

/// 保存API密钥
///
/// 空白密钥会删除已保存的条目，而不是存一个空字符串。
pub fn save_api_key(store: &dyn SecretStore, api_key: &str) -> Result<(), SecretError> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        log::info!("Empty API key submitted, removing stored key");
        return store.delete(API_KEY_SERVICE, API_KEY_ACCOUNT);
    }
    store.set(API_KEY_SERVICE, API_KEY_ACCOUNT, api_key)?;
    log::info!("API key saved to credential store");
    Ok(())
}

/// 读取API密钥，空字符串按不存在处理
pub fn load_api_key(store: &dyn SecretStore) -> Result<Option<String>, SecretError> {
    Ok(store
        .get(API_KEY_SERVICE, API_KEY_ACCOUNT)?
        .filter(|key| !key.trim().is_empty()))
}
