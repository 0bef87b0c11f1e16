//! 配置管理模块
//!
//! 提供非敏感设置（hostname、model、快捷键、默认语言、弹窗位置）的持久化存储。
//! 设置以TOML文件保存，API密钥不在这里，见 [`secrets`](crate::secrets)。

use crate::error::StoreError;
use crate::types::{PopupBounds, AUTO_LANGUAGE};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};
use toml::{Table, Value};

pub const HOSTNAME_KEY: &str = "hostname";
pub const MODEL_KEY: &str = "model";
pub const HOTKEY_KEY: &str = "hotkey";
pub const DEFAULT_SOURCE_LANGUAGE_KEY: &str = "defaultSourceLanguage";
pub const DEFAULT_TARGET_LANGUAGE_KEY: &str = "defaultTargetLanguage";
pub const POPUP_BOUNDS_KEY: &str = "popupBounds";

/// 编辑设置时预填的主机名，解析配置时不会使用
pub const SUGGESTED_HOSTNAME: &str = "api.mistral.ai";
/// 编辑设置时预填的模型名，解析配置时不会使用
pub const SUGGESTED_MODEL: &str = "mistral-small-latest";

pub const DEFAULT_TARGET_LANGUAGE: &str = "zh";

/// 持久化键值存储
///
/// 值使用 `toml::Value`，既能放字符串，也能放弹窗位置这样的表。
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// 基于TOML文件的设置存储
///
/// 每次 `get` 都重新读取文件，所以修改设置后下一次翻译立即生效。
/// 文件在第一次 `set` 时才创建。
///
/// # 示例
///
/// ```rust,no_run
/// use llm_translator::{Settings, TomlSettingsStore};
///
/// let store = TomlSettingsStore::open_default().unwrap();
/// let settings = Settings::new(&store);
/// settings.set_default_languages("auto", "ja").unwrap();
/// ```
#[derive(Debug)]
pub struct TomlSettingsStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TomlSettingsStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// 使用平台配置目录下的 `settings.toml`
    pub fn open_default() -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from("com", "llm-translator", "llm-translator")
            .ok_or(StoreError::NoConfigDir)?;
        Ok(Self::open(dirs.config_dir().join("settings.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<Table, StoreError> {
        if !self.path.exists() {
            return Ok(Table::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(content.parse::<Table>()?)
    }

    /// 写入前读取现有设置；文件损坏时移到 `.bak` 并从空表开始，避免设置永久无法保存
    fn read_table_for_update(&self) -> Result<Table, StoreError> {
        match self.read_table() {
            Err(StoreError::Parse(e)) => {
                let backup = self.path.with_extension("toml.bak");
                log::warn!(
                    "Settings file {} is corrupt ({}), moving it to {}",
                    self.path.display(),
                    e,
                    backup.display()
                );
                fs::rename(&self.path, &backup)?;
                Ok(Table::new())
            }
            other => other,
        }
    }

    // 先写临时文件再 rename，读取方不会看到写了一半的文件
    fn write_table(&self, table: &Table) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(table)?;
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SettingsStore for TomlSettingsStore {
    fn get(&self, key: &str) -> Option<Value> {
        match self.read_table() {
            Ok(mut table) => table.remove(key),
            Err(e) => {
                log::warn!("Failed to read settings from {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut table = self.read_table_for_update()?;
        table.insert(key.to_string(), value);
        self.write_table(&table)?;
        log::debug!("Saved setting '{}' to {}", key, self.path.display());
        Ok(())
    }
}

/// 内存中的设置存储
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value);
        Ok(())
    }
}

/// 设置存储的类型化访问层
pub struct Settings<'a> {
    store: &'a dyn SettingsStore,
}

impl<'a> Settings<'a> {
    pub fn new(store: &'a dyn SettingsStore) -> Self {
        Self { store }
    }

    /// 读取字符串设置，缺失、为空或类型不符时返回 `None`
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.store
            .get(key)
            .and_then(|v| v.as_str().map(|s| s.trim().to_string()))
            .filter(|s| !s.is_empty())
    }

    pub fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|| default.to_string())
    }

    pub fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.store.set(key, Value::String(value.trim().to_string()))
    }

    pub fn hostname(&self) -> Option<String> {
        self.get_string(HOSTNAME_KEY)
    }

    pub fn model(&self) -> Option<String> {
        self.get_string(MODEL_KEY)
    }

    pub fn hotkey(&self) -> Option<String> {
        self.get_string(HOTKEY_KEY)
    }

    /// 默认语言对，缺省为 `("auto", "zh")`
    pub fn default_languages(&self) -> (String, String) {
        (
            self.get_string_or(DEFAULT_SOURCE_LANGUAGE_KEY, AUTO_LANGUAGE),
            self.get_string_or(DEFAULT_TARGET_LANGUAGE_KEY, DEFAULT_TARGET_LANGUAGE),
        )
    }

    pub fn popup_bounds(&self) -> Option<PopupBounds> {
        let value = self.store.get(POPUP_BOUNDS_KEY)?;
        match PopupBounds::deserialize(value) {
            Ok(bounds) => Some(bounds),
            Err(e) => {
                log::warn!("Ignoring invalid {} setting: {}", POPUP_BOUNDS_KEY, e);
                None
            }
        }
    }

    /// 编辑设置时显示的 hostname/model，空值用建议值填充
    pub fn endpoint_for_edit(&self) -> (String, String) {
        (
            self.get_string_or(HOSTNAME_KEY, SUGGESTED_HOSTNAME),
            self.get_string_or(MODEL_KEY, SUGGESTED_MODEL),
        )
    }

    pub fn set_endpoint(&self, hostname: &str, model: &str) -> Result<(), StoreError> {
        self.set_string(HOSTNAME_KEY, hostname)?;
        self.set_string(MODEL_KEY, model)
    }

    pub fn set_default_languages(&self, source: &str, target: &str) -> Result<(), StoreError> {
        self.set_string(DEFAULT_SOURCE_LANGUAGE_KEY, source)?;
        self.set_string(DEFAULT_TARGET_LANGUAGE_KEY, target)
    }

    pub fn set_hotkey(&self, hotkey: &str) -> Result<(), StoreError> {
        self.set_string(HOTKEY_KEY, hotkey)
    }

    pub fn set_popup_bounds(&self, bounds: PopupBounds) -> Result<(), StoreError> {
        let value = Value::try_from(bounds)?;
        self.store.set(POPUP_BOUNDS_KEY, value)
    }
}
