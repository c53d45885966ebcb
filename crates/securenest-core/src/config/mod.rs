//! Configuration management with file persistence

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::breach::{
    BreachClient, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};
use crate::generator::{DEFAULT_LENGTH, GeneratorOptions};
use crate::vault::store::{ACTIVE_FILE, TRASH_FILE};
use crate::vault::VaultStore;

/// SecureNest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub vault: VaultConfig,
    pub breach: BreachConfig,
    pub generator: GeneratorConfig,
    pub theme: ThemeMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Explicit data directory; falls back to the platform data dir.
    pub data_dir: Option<PathBuf>,
    pub active_file: String,
    pub trash_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreachConfig {
    pub base_url: String,
    pub user_agent: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub length: usize,
    pub letters: bool,
    pub numbers: bool,
    pub symbols: bool,
}

/// UI theme preference, carried as explicit configuration rather than
/// ambient global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            "system" => Some(ThemeMode::System),
            _ => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault: VaultConfig {
                data_dir: None,
                active_file: ACTIVE_FILE.to_string(),
                trash_file: TRASH_FILE.to_string(),
            },
            breach: BreachConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                user_agent: DEFAULT_USER_AGENT.to_string(),
                connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
                request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            },
            generator: GeneratorConfig {
                length: DEFAULT_LENGTH,
                letters: true,
                numbers: true,
                symbols: true,
            },
            theme: ThemeMode::System,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var("SECURENEST_CONFIG_DIR") {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("securenest")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolve the vault data directory: `SECURENEST_DATA_DIR`, then the
    /// configured directory, then the platform data dir.
    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        if let Ok(custom_dir) = env::var("SECURENEST_DATA_DIR") {
            return Ok(PathBuf::from(custom_dir));
        }
        if let Some(dir) = &self.vault.data_dir {
            return Ok(dir.clone());
        }
        Ok(dirs::data_dir()
            .ok_or_else(|| anyhow!("Could not determine data directory"))?
            .join("securenest"))
    }

    /// Build a vault store from this configuration.
    pub fn store(&self) -> anyhow::Result<VaultStore> {
        Ok(VaultStore::new(self.data_dir()?)
            .with_files(self.vault.active_file.clone(), self.vault.trash_file.clone()))
    }

    /// Build a breach client from this configuration.
    pub fn breach_client(&self) -> anyhow::Result<BreachClient> {
        BreachClient::builder()
            .base_url(self.breach.base_url.clone())
            .user_agent(self.breach.user_agent.clone())
            .connect_timeout_secs(self.breach.connect_timeout_secs)
            .request_timeout_secs(self.breach.request_timeout_secs)
            .build()
            .context("Failed to build breach client")
    }

    /// Generator options from this configuration.
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            length: self.generator.length,
            letters: self.generator.letters,
            numbers: self.generator.numbers,
            symbols: self.generator.symbols,
        }
    }

    /// Load configuration from file, or return defaults if it doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        self.validate()?;

        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.breach.connect_timeout_secs == 0 || self.breach.request_timeout_secs == 0 {
            return Err(anyhow!("Breach lookup timeouts must be non-zero"));
        }
        if self.vault.active_file.is_empty() || self.vault.trash_file.is_empty() {
            return Err(anyhow!("Vault file names must not be empty"));
        }
        Ok(())
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "vault.data_dir" => Ok(self
                .vault
                .data_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(platform default)".to_string())),
            "vault.active_file" => Ok(self.vault.active_file.clone()),
            "vault.trash_file" => Ok(self.vault.trash_file.clone()),

            "breach.base_url" => Ok(self.breach.base_url.clone()),
            "breach.user_agent" => Ok(self.breach.user_agent.clone()),
            "breach.connect_timeout_secs" => Ok(self.breach.connect_timeout_secs.to_string()),
            "breach.request_timeout_secs" => Ok(self.breach.request_timeout_secs.to_string()),

            "generator.length" => Ok(self.generator.length.to_string()),
            "generator.letters" => Ok(self.generator.letters.to_string()),
            "generator.numbers" => Ok(self.generator.numbers.to_string()),
            "generator.symbols" => Ok(self.generator.symbols.to_string()),

            "theme" => Ok(self.theme.as_str().to_string()),

            _ => Err(anyhow!(
                "Unknown configuration key: {}. Use `securenest config list` to see available keys.",
                key
            )),
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "vault.data_dir" => {
                self.vault.data_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "vault.active_file" => {
                self.vault.active_file = value.to_string();
            }
            "vault.trash_file" => {
                self.vault.trash_file = value.to_string();
            }

            "breach.base_url" => {
                self.breach.base_url = value.trim_end_matches('/').to_string();
            }
            "breach.user_agent" => {
                self.breach.user_agent = value.to_string();
            }
            "breach.connect_timeout_secs" => {
                self.breach.connect_timeout_secs = value
                    .parse()
                    .with_context(|| format!("Invalid connect_timeout_secs value: {}", value))?;
            }
            "breach.request_timeout_secs" => {
                self.breach.request_timeout_secs = value
                    .parse()
                    .with_context(|| format!("Invalid request_timeout_secs value: {}", value))?;
            }

            "generator.length" => {
                self.generator.length = value
                    .parse()
                    .with_context(|| format!("Invalid length value: {}", value))?;
            }
            "generator.letters" => {
                self.generator.letters = parse_bool(key, value)?;
            }
            "generator.numbers" => {
                self.generator.numbers = parse_bool(key, value)?;
            }
            "generator.symbols" => {
                self.generator.symbols = parse_bool(key, value)?;
            }

            "theme" => {
                self.theme = ThemeMode::parse(value).ok_or_else(|| {
                    anyhow!("Invalid theme: {}. Valid options: light, dark, system", value)
                })?;
            }

            _ => {
                return Err(anyhow!(
                    "Unknown configuration key: {}. Use `securenest config list` to see available keys.",
                    key
                ));
            }
        }
        Ok(())
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        let keys = vec![
            "vault.data_dir",
            "vault.active_file",
            "vault.trash_file",
            "breach.base_url",
            "breach.user_agent",
            "breach.connect_timeout_secs",
            "breach.request_timeout_secs",
            "generator.length",
            "generator.letters",
            "generator.numbers",
            "generator.symbols",
            "theme",
        ];

        keys.into_iter()
            .map(|key| {
                let value = self.get(key)?;
                Ok((key.to_string(), value))
            })
            .collect()
    }

    /// Reset configuration to defaults
    pub fn reset() -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove config file: {}", path.display()))?;
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(anyhow!("Invalid boolean for {}: {}", key, value)),
    }
}
