use crate::store::DEFAULT_STORAGE_KEY;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_SCHEMA_VERSION: i64 = 1;
const DEFAULT_CURRENCY_SYMBOL: &str = "₦";
pub const DATA_DIR: &str = ".debtwise";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    File,
    Memory,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Contents of `.debtwise/settings.json`. Missing or malformed fields fall
/// back to their defaults one by one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    #[serde(rename = "schema_version", deserialize_with = "or_default")]
    pub schema_version: i64,
    #[serde(deserialize_with = "or_default")]
    pub storage_backend: StorageBackend,
    #[serde(deserialize_with = "or_default")]
    pub storage_key: String,
    #[serde(deserialize_with = "or_default")]
    pub currency_symbol: String,
    #[serde(deserialize_with = "or_default")]
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: SETTINGS_SCHEMA_VERSION,
            storage_backend: StorageBackend::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            log_level: LogLevel::default(),
        }
    }
}

impl Settings {
    fn sanitize(&mut self) {
        self.schema_version = SETTINGS_SCHEMA_VERSION;
        if crate::storage::validate_key(&self.storage_key).is_err() {
            self.storage_key = DEFAULT_STORAGE_KEY.to_string();
        }
        if self.currency_symbol.trim().is_empty() {
            self.currency_symbol = DEFAULT_CURRENCY_SYMBOL.to_string();
        }
    }
}

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

pub fn data_dir(workspace_path: &str) -> PathBuf {
    Path::new(workspace_path).join(DATA_DIR)
}

fn settings_path(workspace_path: &str) -> PathBuf {
    data_dir(workspace_path).join("settings.json")
}

pub fn get_settings(workspace_path: String) -> Result<Settings, String> {
    load_settings(&workspace_path)
}

/// Overlay the top-level keys of `patch` onto the stored settings.
pub fn save_settings(workspace_path: String, patch: Value) -> Result<Settings, String> {
    let current = load_settings(&workspace_path)?;
    let mut merged = serde_json::to_value(&current)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    if let (Some(target), Value::Object(incoming)) = (merged.as_object_mut(), patch) {
        target.extend(incoming);
    }

    let mut settings: Settings = serde_json::from_value(merged)
        .map_err(|e| format!("Invalid settings: {e}"))?;
    settings.sanitize();
    write_settings(&workspace_path, &settings)?;
    Ok(settings)
}

/// Read settings, normalizing the file on disk when it is missing or differs
/// from the sanitized form.
pub fn load_settings(workspace_path: &str) -> Result<Settings, String> {
    let path = settings_path(workspace_path);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => Some(raw),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(format!("Failed to read settings.json: {e}")),
    };

    let mut settings = raw
        .as_deref()
        .and_then(|raw| serde_json::from_str::<Settings>(raw).ok())
        .unwrap_or_default();
    settings.sanitize();

    let normalized = render(&settings)?;
    if raw.as_deref() != Some(normalized.as_str()) {
        write_raw(workspace_path, &normalized)?;
    }

    Ok(settings)
}

fn render(settings: &Settings) -> Result<String, String> {
    serde_json::to_string_pretty(settings).map_err(|e| format!("Failed to serialize settings: {e}"))
}

fn write_settings(workspace_path: &str, settings: &Settings) -> Result<(), String> {
    write_raw(workspace_path, &render(settings)?)
}

fn write_raw(workspace_path: &str, raw: &str) -> Result<(), String> {
    fs::create_dir_all(data_dir(workspace_path))
        .map_err(|e| format!("Failed to create {DATA_DIR} directory: {e}"))?;
    fs::write(settings_path(workspace_path), raw)
        .map_err(|e| format!("Failed to write settings.json: {e}"))
}
