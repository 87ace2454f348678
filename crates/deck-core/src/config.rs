//! Configuration for the content service.
//!
//! Configuration is a TOML file. Without one, defaults apply and no courses
//! are registered.
//!
//! ## Resolution Order
//!
//! 1. An explicit path passed to [`Config::load_from`]
//! 2. `DECK_CONFIG` environment variable
//! 3. Platform config directory (`~/.config/deck/config.toml` on Linux)
//!
//! `DECK_CONTENT_ORIGIN` overrides `content.origin` after loading.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [content]
//! origin = "https://learn.example.com/content"
//! metadata_file = "course.json"
//! slide_pattern = "slide-{n}.md"
//! slide_extension = "md"
//! max_concurrent_fetches = 4
//! request_timeout_secs = 30
//!
//! [[courses]]
//! id = "cs101"
//!
//! [[courses]]
//! id = "demo"
//! source = "static"
//! file = "demo-course.json"
//! ```

use crate::loader::{DEFAULT_CONCURRENCY, INDEX_PLACEHOLDER};
use crate::meta::DEFAULT_METADATA_FILE;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "DECK_CONFIG";
/// Environment variable overriding `content.origin`.
pub const ORIGIN_ENV: &str = "DECK_CONTENT_ORIGIN";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where content lives and how it is fetched.
    pub content: ContentConfig,
    /// Courses registered at startup.
    pub courses: Vec<CourseEntry>,
}

/// Content origin and loading settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Base URL (`http://`, `https://`) or local directory holding course content.
    pub origin: String,
    /// Metadata filename inside each course directory.
    pub metadata_file: String,
    /// Default slide filename pattern; `{n}` is the 1-based slide index.
    pub slide_pattern: String,
    /// Extension of slide files for directory discovery.
    pub slide_extension: String,
    /// Maximum slide fetches in flight per topic.
    pub max_concurrent_fetches: usize,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            origin: "content".to_string(),
            metadata_file: DEFAULT_METADATA_FILE.to_string(),
            slide_pattern: "slide-{n}.md".to_string(),
            slide_extension: "md".to_string(),
            max_concurrent_fetches: DEFAULT_CONCURRENCY,
            request_timeout_secs: 30,
        }
    }
}

impl ContentConfig {
    /// Whether the origin is served over HTTP rather than read from disk.
    pub fn is_remote(&self) -> bool {
        let origin = self.origin.trim();
        origin.starts_with("http://") || origin.starts_with("https://")
    }
}

/// Kind of source registered for a course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Assembled from `course.json` and per-slide markdown files.
    #[default]
    Dynamic,
    /// Read whole from a JSON course document.
    Static,
}

/// One `[[courses]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEntry {
    /// Course id used as the registry key.
    pub id: String,
    /// How the course content is produced.
    #[serde(default)]
    pub source: SourceKind,
    /// JSON course document for static sources. Relative paths resolve
    /// against the config file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `DECK_CONFIG` or the platform config directory.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => Self::default_path()?,
        };
        Self::load_from(&path)
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
            let mut config: Self = toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
            if let Some(dir) = path.parent() {
                config.resolve_relative_files(dir);
            }
            config
        } else {
            tracing::debug!("no config at {}, using defaults", path.display());
            Self::default()
        };

        if let Ok(origin) = std::env::var(ORIGIN_ENV) {
            if !origin.trim().is_empty() {
                config.content.origin = origin;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Write the configuration to `path` as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config: {e}")))?;
        Ok(())
    }

    /// Platform location of the config file.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("dev", "deck", "deck")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Reject settings the loaders cannot work with.
    pub fn validate(&self) -> Result<()> {
        let content = &self.content;
        if content.origin.trim().is_empty() {
            return Err(Error::Config("content.origin must not be empty".into()));
        }
        if content.max_concurrent_fetches == 0 {
            return Err(Error::Config(
                "content.max_concurrent_fetches must be at least 1".into(),
            ));
        }
        if content.slide_extension.trim_start_matches('.').is_empty() {
            return Err(Error::Config("content.slide_extension must not be empty".into()));
        }
        if !content.slide_pattern.contains(INDEX_PLACEHOLDER) {
            return Err(Error::Config(format!(
                "content.slide_pattern '{}' must contain {INDEX_PLACEHOLDER}",
                content.slide_pattern
            )));
        }

        for entry in &self.courses {
            if entry.id.trim().is_empty() {
                return Err(Error::Config("course id must not be empty".into()));
            }
            if entry.source == SourceKind::Static && entry.file.is_none() {
                return Err(Error::Config(format!(
                    "static course '{}' needs a `file`",
                    entry.id
                )));
            }
        }
        Ok(())
    }

    fn resolve_relative_files(&mut self, base: &Path) {
        for entry in &mut self.courses {
            if let Some(file) = entry.file.as_mut() {
                if file.is_relative() {
                    *file = base.join(&*file);
                }
            }
        }
    }
}
