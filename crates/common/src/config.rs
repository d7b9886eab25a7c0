use crate::Result;
use anyhow::anyhow;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

// TOML configuration structure
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub monthly: MonthlyConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    #[serde(default = "default_size")]
    pub size: String,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct MonthlyConfig {
    #[serde(default = "default_layout")]
    pub layout: String,
}

/// config.local.toml の上書き用。書かれた項目だけが Some になる
#[derive(Debug, Deserialize, Default, PartialEq)]
struct LocalConfig {
    #[serde(default)]
    output: LocalOutputConfig,
    #[serde(default)]
    monthly: LocalMonthlyConfig,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
struct LocalOutputConfig {
    dir: Option<String>,
    size: Option<String>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
struct LocalMonthlyConfig {
    layout: Option<String>,
}

// Default values
fn default_output_dir() -> String {
    "plots".to_string()
}
fn default_size() -> String {
    "1500x700".to_string()
}
fn default_layout() -> String {
    "observed".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            size: default_size(),
        }
    }
}

impl Default for MonthlyConfig {
    fn default() -> Self {
        Self {
            layout: default_layout(),
        }
    }
}

static CONFIG: Lazy<Config> = Lazy::new(|| {
    load_config(&config_dir()).unwrap_or_else(|e| {
        eprintln!(
            "Warning: Failed to load config files: {}. Using defaults.",
            e
        );
        Config::default()
    })
});

static CONFIG_STORE: Lazy<Arc<Mutex<HashMap<String, String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(HashMap::new())));

/// Looks up a setting.
///
/// Priority: runtime overrides, environment variables, TOML files.
pub fn get(name: &str) -> Result<String> {
    if let Some(value) = get_from_store(name) {
        if value.is_empty() {
            return Err(anyhow!("{} is empty", name));
        }
        return Ok(value);
    }

    if let Ok(val) = std::env::var(name)
        && !val.is_empty()
    {
        return Ok(val);
    }

    let toml_value = match name {
        "PLOT_OUTPUT_DIR" => Some(CONFIG.output.dir.clone()),
        "PLOT_SIZE" => Some(CONFIG.output.size.clone()),
        "MONTH_LAYOUT" => Some(CONFIG.monthly.layout.clone()),
        _ => None,
    };

    if let Some(value) = toml_value
        && !value.is_empty()
    {
        return Ok(value);
    }

    Err(anyhow!("Configuration key not found: {}", name))
}

/// テスト用: 設定値を上書きする
#[doc(hidden)]
pub fn set(name: &str, value: &str) {
    if let Ok(mut store) = CONFIG_STORE.lock() {
        store.insert(name.to_string(), value.to_string());
    }
}

/// テスト用: 設定値を CONFIG_STORE から削除する
#[doc(hidden)]
pub fn remove(name: &str) {
    if let Ok(mut store) = CONFIG_STORE.lock() {
        store.remove(name);
    }
}

/// テスト用: CONFIG_STORE に値をセットし、Drop 時に自動で元に戻す RAII ガード。
#[doc(hidden)]
pub struct ConfigGuard {
    key: String,
    previous: Option<String>,
}

impl ConfigGuard {
    pub fn new(key: &str, value: &str) -> Self {
        let previous = get_from_store(key);
        set(key, value);
        Self {
            key: key.to_string(),
            previous,
        }
    }
}

impl Drop for ConfigGuard {
    fn drop(&mut self) {
        match &self.previous {
            Some(prev) => set(&self.key, prev),
            None => remove(&self.key),
        }
    }
}

fn get_from_store(name: &str) -> Option<String> {
    if let Ok(store) = CONFIG_STORE.lock() {
        store.get(name).cloned()
    } else {
        None
    }
}

fn config_dir() -> PathBuf {
    std::env::var("SUEWS_PLOT_CONFIG_DIR")
        .ok()
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config"))
}

/// Load configuration from TOML files with priority:
/// 1. <dir>/config.local.toml (git-ignored, for local overrides)
/// 2. <dir>/config.toml (git-managed template)
/// 3. Default values
pub fn load_config(dir: &Path) -> Result<Config> {
    let mut config = Config::default();

    let base_path = dir.join("config.toml");
    if base_path.exists() {
        let content = fs::read_to_string(&base_path)?;
        config = toml::from_str(&content)?;
    }

    let local_path = dir.join("config.local.toml");
    if local_path.exists() {
        let content = fs::read_to_string(&local_path)?;
        let local_config: LocalConfig = toml::from_str(&content)?;
        merge_config(&mut config, local_config);
    }

    Ok(config)
}

/// Merge local config into base config (local values override base values)
fn merge_config(base: &mut Config, local: LocalConfig) {
    if let Some(dir) = local.output.dir {
        base.output.dir = dir;
    }
    if let Some(size) = local.output.size {
        base.output.size = size;
    }
    if let Some(layout) = local.monthly.layout {
        base.monthly.layout = layout;
    }
}
