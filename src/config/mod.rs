use crate::core::options::{OptionSpec, OptionSpecEntry, OptionValue};
use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub prompt: PromptConfig,
    pub colors: ColorConfig,
    pub history: HistoryConfig,
    pub commands: BTreeMap<String, CommandConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_entries: usize,
}

/// A user-defined command: typed arguments are expanded into `template`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub template: String,
    pub options: OptionSpec,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            format: "> ".to_string(),
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_entries: 1000 }
    }
}

impl AppConfig {
    /// Built-in configuration with a small set of example commands.
    pub fn with_sample_commands() -> Self {
        let mut commands = BTreeMap::new();

        let mut search_options = OptionSpec::new();
        search_options.insert(
            "site".to_string(),
            OptionSpecEntry::value()
                .with_aliases(["s"])
                .with_default(OptionValue::Text(Some("duckduckgo.com".to_string()))),
        );
        commands.insert(
            "search".to_string(),
            CommandConfig {
                description: "Build a web search URL".to_string(),
                aliases: vec!["g".to_string()],
                template: "https://{opt:site}/search?q={args}".to_string(),
                options: search_options,
            },
        );

        Self {
            commands,
            ..Self::default()
        }
    }

    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            let config_path = expand_tilde(&config_path);
            debug!("Loading config from explicit path: {:?}", config_path);
            return Self::load_file(&config_path);
        }

        let default_config_paths = [
            dirs::config_dir().map(|d| d.join("omnicmd").join("config.toml")),
            Some(PathBuf::from("omnicmd.toml")),
        ];

        for config_path in default_config_paths.iter().flatten() {
            debug!("Checking config path: {:?}", config_path);
            if config_path.exists() {
                return Self::load_file(config_path);
            }
        }

        debug!("No config file found, using built-in defaults");
        Ok(Self::with_sample_commands())
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(relative) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(relative);
        }
    }
    path.to_path_buf()
}
