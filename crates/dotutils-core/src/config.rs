use crate::check::check_html_hex;
use crate::error::Result;
use crate::network::{Network, DEFAULT_PACKAGE_INDEX, DEFAULT_TIMEOUT};
use crate::registry::DefaultRegistry;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ConsoleConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_true")]
    pub colors: bool,
    /// Send errors and warnings to stderr.
    #[serde(default = "default_true")]
    pub stderr: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            colors: true,
            stderr: true,
        }
    }
}

// ---------------------------------------------------------------------------
// NetworkConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_package_index")]
    pub package_index: String,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_package_index() -> String {
    DEFAULT_PACKAGE_INDEX.to_string()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            package_index: default_package_index(),
        }
    }
}

// ---------------------------------------------------------------------------
// BadgeConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeConfig {
    /// Template svg with `L_RECT` and `R_RECT` rectangles. Built-in when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
    /// Icon used by the package index badge. Built-in when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python_icon: Option<PathBuf>,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_text_align")]
    pub text_align: f64,
}

fn default_scale() -> f64 {
    0.8
}

fn default_font_size() -> f64 {
    19.0
}

fn default_text_align() -> f64 {
    1.75
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            template: None,
            python_icon: None,
            scale: default_scale(),
            font_size: default_font_size(),
            text_align: default_text_align(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    /// Fallback values for `(Optional)` slots, by slot name.
    #[serde(default = "default_slot_defaults")]
    pub defaults: HashMap<String, Value>,
    #[serde(default)]
    pub badge: BadgeConfig,
}

fn default_slot_defaults() -> HashMap<String, Value> {
    let mut m = HashMap::new();
    m.insert("left_color".to_string(), Value::Null);
    m
}

impl Default for Config {
    fn default() -> Self {
        Self {
            console: ConsoleConfig::default(),
            network: NetworkConfig::default(),
            defaults: default_slot_defaults(),
            badge: BadgeConfig::default(),
        }
    }
}

impl Config {
    /// Load from `path`; a missing file yields the built-in defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = std::fs::read_to_string(path)?;
        if data.trim().is_empty() {
            return Ok(Config::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn default_registry(&self) -> DefaultRegistry {
        DefaultRegistry::from(self.defaults.clone())
    }

    pub fn network(&self) -> Result<Network> {
        Network::new(
            Duration::from_secs(self.network.timeout_secs),
            self.network.package_index.as_str(),
        )
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.network.timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "network.timeout_secs is 0; requests will fail immediately".to_string(),
            });
        }

        if !self.network.package_index.starts_with("http://")
            && !self.network.package_index.starts_with("https://")
        {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "network.package_index '{}' is not an http(s) url",
                    self.network.package_index
                ),
            });
        }

        for (key, value) in [
            ("badge.scale", self.badge.scale),
            ("badge.font_size", self.badge.font_size),
            ("badge.text_align", self.badge.text_align),
        ] {
            if !(value.is_finite() && value > 0.0) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("{key} must be a positive number, got {value}"),
                });
            }
        }

        if let Some(color) = self.defaults.get("left_color").filter(|v| !v.is_null()) {
            if let Err(repeat) = check_html_hex(color) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("defaults.left_color: {repeat}"),
                });
            }
        }

        for (key, path) in [
            ("badge.template", &self.badge.template),
            ("badge.python_icon", &self.badge.python_icon),
        ] {
            if let Some(p) = path {
                if !p.is_file() {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!("{key} '{}' does not exist", p.display()),
                    });
                }
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
