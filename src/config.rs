use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Page-language strings used by the renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Locale {
    /// Suffix after play time, e.g. "хв".
    pub minutes: String,
    /// Alt text for gallery photos that have none.
    pub gallery_alt: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            minutes: "хв".to_string(),
            gallery_alt: "Фото клубу".to_string(),
        }
    }
}

/// A catalog listing shown as a random sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub source: String,
    pub mount: String,
    /// Positive: show that many random items. Absent or non-positive: show all.
    #[serde(default)]
    pub count: Option<i64>,
    /// Heading for the terminal browser; defaults to the mount id.
    #[serde(default)]
    pub label: Option<String>,
}

impl CatalogConfig {
    fn new(source: &str, mount: &str, label: &str) -> Self {
        Self {
            source: source.to_string(),
            mount: mount.to_string(),
            count: Some(3),
            label: Some(label.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.mount)
    }
}

/// A listing paged through a fixed-size window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub source: String,
    pub mount: String,
    pub visible: usize,
    /// Prefix of the arrow controls: `<controls>-arrows`, `<controls>-prev`, `<controls>-next`.
    pub controls: String,
}

/// Everything the showcase renders, and where from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory or base URL that relative sources resolve against.
    pub root: String,
    pub catalogs: Vec<CatalogConfig>,
    pub masters: WindowConfig,
    pub gallery: WindowConfig,
    pub locale: Locale,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            catalogs: vec![
                CatalogConfig::new("data/boardgames.json", "boardgames-list", "Board games"),
                CatalogConfig::new("data/rpg.json", "rpg-list", "RPG"),
                CatalogConfig::new("data/wargames.json", "wargames-list", "Wargames"),
            ],
            masters: WindowConfig {
                source: "data/masters.json".to_string(),
                mount: "masters-list".to_string(),
                visible: 3,
                controls: "masters".to_string(),
            },
            gallery: WindowConfig {
                source: "data/gallery.json".to_string(),
                mount: "gallery-list".to_string(),
                visible: 5,
                controls: "gallery".to_string(),
            },
            locale: Locale::default(),
        }
    }
}

impl SiteConfig {
    /// Read and validate a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SiteConfig = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Explicit path first, then the user config dir, then built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for window in [&self.masters, &self.gallery] {
            if window.visible == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{}: visible must be at least 1",
                    window.mount
                )));
            }
        }
        let mut mounts = HashSet::new();
        let all = self
            .catalogs
            .iter()
            .map(|c| &c.mount)
            .chain([&self.masters.mount, &self.gallery.mount]);
        for mount in all {
            if !mounts.insert(mount.as_str()) {
                return Err(ConfigError::Invalid(format!("mount {} is used twice", mount)));
            }
        }
        Ok(())
    }
}

pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "tabletop-club", "tabletop-showcase")
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(project_dirs()?.config_dir().join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mirrors_page_bootstrap() {
        let config = SiteConfig::default();
        assert_eq!(config.catalogs.len(), 3);
        assert!(config.catalogs.iter().all(|c| c.count == Some(3)));
        assert_eq!(config.masters.visible, 3);
        assert_eq!(config.gallery.visible, 5);
        assert_eq!(config.masters.source, "data/masters.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"root":"https://club.example","locale":{"minutes":"min"}}"#).unwrap();
        let config = SiteConfig::from_file(&path).unwrap();
        assert_eq!(config.root, "https://club.example");
        assert_eq!(config.locale.minutes, "min");
        assert_eq!(config.locale.gallery_alt, "Фото клубу");
        assert_eq!(config.gallery.mount, "gallery-list");
    }

    #[test]
    fn test_zero_visible_is_rejected() {
        let mut config = SiteConfig::default();
        config.gallery.visible = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_duplicate_mount_is_rejected() {
        let mut config = SiteConfig::default();
        config.catalogs[1].mount = "boardgames-list".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(SiteConfig::from_file(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_explicit_missing_file() {
        let result = SiteConfig::load(Some(Path::new("/nonexistent/showcase.json")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_catalog_label_falls_back_to_mount() {
        let catalog = CatalogConfig {
            source: "x.json".to_string(),
            mount: "x-list".to_string(),
            count: None,
            label: None,
        };
        assert_eq!(catalog.label(), "x-list");
    }
}
