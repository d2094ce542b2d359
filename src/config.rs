//! Startup settings: built-in defaults, an optional TOML file, then
//! command-line overrides.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::session::DEFAULT_CATEGORY;

/// Categories offered when the settings file does not list any.
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "单选题",
    "多选题",
    "填空题",
    "判断题",
    "简答题10分",
    "简答题20分",
    "简答题30分",
];

pub const DEFAULT_LOG_FILE: &str = "quiz-presenter.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("the category list is empty")]
    EmptyCategories,
}

/// Contents of the optional settings file.
///
/// ```toml
/// initial_category = "判断题"
/// categories = ["单选题", "判断题"]
/// log_file = "logs/presenter.log"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub initial_category: Option<String>,
    pub categories: Option<Vec<String>>,
    pub log_file: Option<PathBuf>,
}

impl FileSettings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, path)
    }

    fn parse(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Values given on the command line; these win over the settings file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub category: Option<String>,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub questions: PathBuf,
    pub categories: Vec<String>,
    pub initial_category: String,
    pub seed: Option<u64>,
    pub log_file: PathBuf,
}

impl Settings {
    /// Defaults only.
    pub fn new(questions: impl Into<PathBuf>) -> Self {
        Self {
            questions: questions.into(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            initial_category: DEFAULT_CATEGORY.to_string(),
            seed: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }

    /// Layer the settings file and command-line overrides over the defaults.
    pub fn resolve(
        questions: impl Into<PathBuf>,
        file: Option<FileSettings>,
        overrides: Overrides,
    ) -> Result<Self, ConfigError> {
        let mut settings = Self::new(questions);

        if let Some(file) = file {
            if let Some(categories) = file.categories {
                settings.categories = categories;
            }
            if let Some(category) = file.initial_category {
                settings.initial_category = category;
            }
            if let Some(log_file) = file.log_file {
                settings.log_file = log_file;
            }
        }

        if let Some(category) = overrides.category {
            settings.initial_category = category;
        }
        if overrides.seed.is_some() {
            settings.seed = overrides.seed;
        }
        if let Some(log_file) = overrides.log_file {
            settings.log_file = log_file;
        }

        settings.normalize_categories()?;
        Ok(settings)
    }

    /// Drop blank and repeated entries, keep the first-seen order, and make
    /// sure the initial category can be selected.
    fn normalize_categories(&mut self) -> Result<(), ConfigError> {
        let mut seen: Vec<String> = Vec::with_capacity(self.categories.len());
        for category in self.categories.drain(..) {
            if !category.trim().is_empty() && !seen.contains(&category) {
                seen.push(category);
            }
        }
        self.categories = seen;

        if self.categories.is_empty() {
            return Err(ConfigError::EmptyCategories);
        }
        if !self.categories.contains(&self.initial_category) {
            self.categories.push(self.initial_category.clone());
        }
        Ok(())
    }
}
