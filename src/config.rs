//! Configuration management for barcart
//!
//! Handles loading, saving, and default configuration values.
//! Config file location: ~/.config/barcart/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeName,
    pub layout: LayoutMode,
    pub display: DisplayOptions,
    pub paths: DataPaths,
}

impl Config {
    /// Get the config file path
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("barcart");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load config from file, or create default if not exists
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save config to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }
}

/// Available theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Lounge,
    Gruvbox,
    Nord,
    Transparent,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Lounge => "Lounge",
            ThemeName::Gruvbox => "Gruvbox",
            ThemeName::Nord => "Nord",
            ThemeName::Transparent => "Transparent",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ThemeName::Lounge => ThemeName::Gruvbox,
            ThemeName::Gruvbox => ThemeName::Nord,
            ThemeName::Nord => ThemeName::Transparent,
            ThemeName::Transparent => ThemeName::Lounge,
        }
    }
}

/// Layout of the list and detail panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Auto,
    SideBySide,
    Stacked,
}

impl LayoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Auto => "Auto (responsive)",
            LayoutMode::SideBySide => "Side-by-side",
            LayoutMode::Stacked => "Stacked",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            LayoutMode::Auto => LayoutMode::SideBySide,
            LayoutMode::SideBySide => LayoutMode::Stacked,
            LayoutMode::Stacked => LayoutMode::Auto,
        }
    }
}

/// What the detail panel shows
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub show_images: bool,
    pub show_description: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_images: true,
            show_description: true,
        }
    }
}

/// Catalog and stock file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub catalog: PathBuf,
    /// Defaults to `stock.json` next to the catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<PathBuf>,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("Reference").join("drinks.json"),
            stock: None,
        }
    }
}

impl DataPaths {
    /// Resolved stock file path
    pub fn stock_path(&self) -> PathBuf {
        self.stock
            .clone()
            .unwrap_or_else(|| self.catalog.with_file_name("stock.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeName::Lounge);
        assert_eq!(config.layout, LayoutMode::Auto);
        assert!(config.display.show_images);
        assert_eq!(config.paths.catalog, PathBuf::from("Reference/drinks.json"));
    }

    #[test]
    fn test_stock_path_defaults_next_to_catalog() {
        let mut paths = DataPaths::default();
        assert_eq!(paths.stock_path(), PathBuf::from("Reference/stock.json"));

        paths.stock = Some(PathBuf::from("/tmp/bar/stock.json"));
        assert_eq!(paths.stock_path(), PathBuf::from("/tmp/bar/stock.json"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            theme = "nord"

            [display]
            show_images = false
            "#,
        )
        .unwrap();
        assert_eq!(config.theme, ThemeName::Nord);
        assert!(!config.display.show_images);
        assert!(config.display.show_description);
        assert!(config.paths.stock.is_none());
    }

    #[test]
    fn test_config_roundtrip_through_toml() {
        let mut config = Config::default();
        config.layout = LayoutMode::Stacked;
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.layout, LayoutMode::Stacked);
        assert_eq!(parsed.paths.catalog, config.paths.catalog);
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = std::env::temp_dir().join(format!("barcart-config-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.theme, ThemeName::Lounge);
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_theme_cycle() {
        let theme = ThemeName::Lounge;
        assert_eq!(theme.next(), ThemeName::Gruvbox);
        assert_eq!(theme.next().next().next().next(), ThemeName::Lounge);
    }
}
