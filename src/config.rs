use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use directories::ProjectDirs;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const APP_NAME: &str = "suggestion-search";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchOptions,
    #[serde(default)]
    pub appearance: AppearanceConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// What happens when a term that is already in the history gets submitted again
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedupePolicy {
    /// History stays as it is
    #[default]
    KeepPosition,
    /// The term moves to the front of the history
    MoveToFront,
}

/// Where the prompt glyph sits on the input line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPosition {
    #[default]
    Start,
    End,
}

/// Widget options.
///
/// Every field has a default, so a partial `[search]` table is enough.
/// Call [`SearchOptions::validate`] (the widget constructor does) before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Seed history, most recent first. Default: empty
    pub recent_searches: Vec<String>,
    /// Minimum term length (in chars) before suggestions appear. Default: 1
    pub min_length: usize,
    /// Cap on the suggestion list. Default: 5
    pub max_suggestions: usize,
    /// Mirror the history to the key-value store. Default: false
    pub persistent: bool,
    /// Submit as soon as the typed text equals a suggestion. Default: false
    pub autocomplete_on_match: bool,
    /// Keep the list open with an empty-state line when nothing matches. Default: false
    pub always_show_list: bool,
    /// Default: keep-position
    pub dedupe_policy: DedupePolicy,
    /// Move the placeholder into the border title once typing starts. Default: false
    pub floating_label: bool,
    /// Default: "Search..."
    pub placeholder: String,
    /// Color name for the input border. Default: "cyan"
    pub input_style: String,
    /// Default: start
    pub input_position: InputPosition,
    /// Color name for the suggestion list border. Default: "darkgray"
    pub suggestion_list_style: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            recent_searches: Vec::new(),
            min_length: 1,
            max_suggestions: 5,
            persistent: false,
            autocomplete_on_match: false,
            always_show_list: false,
            dedupe_policy: DedupePolicy::default(),
            floating_label: false,
            placeholder: "Search...".to_string(),
            input_style: "cyan".to_string(),
            input_position: InputPosition::default(),
            suggestion_list_style: "darkgray".to_string(),
        }
    }
}

impl SearchOptions {
    /// Rejects option combinations the widget cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.max_suggestions == 0 {
            return Err(eyre!("max_suggestions must be at least 1"));
        }
        if self.placeholder.trim().is_empty() {
            return Err(eyre!("placeholder must not be blank"));
        }
        parse_color(&self.input_style).wrap_err("invalid input_style")?;
        parse_color(&self.suggestion_list_style).wrap_err("invalid suggestion_list_style")?;
        Ok(())
    }
}

/// Parses a color name such as `cyan`, `dark-gray` or `#00ffaa`
pub fn parse_color(name: &str) -> Result<Color> {
    Color::from_str(name).map_err(|_| eyre!("unknown color '{}'", name))
}

/// Layout tweaks for the demo screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Suggestion rows visible before the list scrolls
    pub visible_rows: u16,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self { visible_rows: 5 }
    }
}

/// Where persisted history lives
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from disk or creates default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from `path`, writing the defaults there first if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .wrap_err_with(|| format!("failed to parse {}", path.display()))?;
        config.search.validate()?;
        Ok(config)
    }

    /// Saves configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Returns the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Returns the file backing the history store
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.storage.path {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("store.json")),
        }
    }
}

/// Per-user data directory for the store and the log file
pub fn data_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
        .ok_or_else(|| eyre!("Could not determine config directory"))
}
