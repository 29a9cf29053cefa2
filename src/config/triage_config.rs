use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::categories::{CategoryId, CategoryTable};
use crate::constants::{
    DEFAULT_TEXT_THRESHOLD, EXCLUDED_HOST_PREFIX, FREE_TEXT_TRIGGERS, HASH_ARTIFACTS_DIR,
    SKIP_FOLDERS,
};
use crate::error::ConfigError;

/// Tunables of the walk and parse phases
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TriageOptions {
    /// Minimum fraction of printable-ish bytes for a file to be parsed
    #[serde(default = "default_text_threshold")]
    pub text_threshold: f64,

    /// Host subdirectory whose files go straight to the hash category
    #[serde(default = "default_hash_dir")]
    pub hash_artifacts_dir: String,

    /// Host subdirectories never walked as user directories
    #[serde(default = "default_skip_folders")]
    pub skip_folders: Vec<String>,

    /// Host directories starting with this prefix are ignored
    #[serde(default = "default_excluded_prefix")]
    pub excluded_host_prefix: String,

    /// Name fragments that select line-by-line extraction
    #[serde(default = "default_free_text_triggers")]
    pub free_text_triggers: Vec<String>,
}

impl Default for TriageOptions {
    fn default() -> Self {
        TriageOptions {
            text_threshold: default_text_threshold(),
            hash_artifacts_dir: default_hash_dir(),
            skip_folders: default_skip_folders(),
            excluded_host_prefix: default_excluded_prefix(),
            free_text_triggers: default_free_text_triggers(),
        }
    }
}

fn default_text_threshold() -> f64 {
    DEFAULT_TEXT_THRESHOLD
}

fn default_hash_dir() -> String {
    HASH_ARTIFACTS_DIR.to_string()
}

fn default_skip_folders() -> Vec<String> {
    SKIP_FOLDERS.iter().map(|s| s.to_string()).collect()
}

fn default_excluded_prefix() -> String {
    EXCLUDED_HOST_PREFIX.to_string()
}

fn default_free_text_triggers() -> Vec<String> {
    FREE_TEXT_TRIGGERS.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TriageConfig {
    pub version: String,
    pub description: String,
    pub categories: CategoryTable,
    #[serde(default)]
    pub options: TriageOptions,
}

impl Default for TriageConfig {
    fn default() -> Self {
        TriageConfig {
            version: "1.0".to_string(),
            description: "Default UAC triage categories".to_string(),
            categories: CategoryTable::default(),
            options: TriageOptions::default(),
        }
    }
}

impl TriageConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: TriageConfig = serde_yaml::from_str(&content)?;
        config.normalize_and_validate()?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_yaml_file(&self, path: &Path) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;

        fs::write(path, yaml).map_err(|source| ConfigError::WriteFile {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Create a default configuration YAML file
    pub fn create_default_config_file(path: &Path) -> Result<(), ConfigError> {
        TriageConfig::default().save_to_yaml_file(path)
    }

    /// Lower-case keywords and triggers, then check the table is usable.
    pub fn normalize_and_validate(&mut self) -> Result<(), ConfigError> {
        for category in self.categories.categories_mut() {
            for keyword in &mut category.keywords {
                *keyword = keyword.to_lowercase();
            }
        }
        for trigger in &mut self.options.free_text_triggers {
            *trigger = trigger.to_lowercase();
        }

        let mut seen = HashSet::new();
        for category in self.categories.iter() {
            if !seen.insert(category.id) {
                return Err(invalid(format!("category '{}' is defined twice", category.id)));
            }
            if category.keywords.iter().any(|k| k.is_empty()) {
                return Err(invalid(format!("category '{}' has an empty keyword", category.id)));
            }
        }

        for id in CategoryId::ALL {
            if !seen.contains(&id) {
                return Err(invalid(format!("category '{}' is missing", id)));
            }
        }

        if self
            .categories
            .get(CategoryId::Hashes)
            .map_or(false, |hashes| !hashes.is_sentinel())
        {
            return Err(invalid("category 'hashes' must not have keywords".to_string()));
        }

        let threshold = self.options.text_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(invalid(format!(
                "text_threshold must be in (0, 1], got {}",
                threshold
            )));
        }

        if self.options.hash_artifacts_dir.is_empty() {
            return Err(invalid("hash_artifacts_dir must not be empty".to_string()));
        }

        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Validation { message }
}

/// Load the configuration at `path`, or the built-in defaults when no
/// path is given.
pub fn load_or_default(path: Option<&Path>) -> Result<TriageConfig, ConfigError> {
    match path {
        Some(path) => {
            let config = TriageConfig::from_yaml_file(path)?;
            info!("Using configuration from {}", path.display());
            Ok(config)
        }
        None => {
            debug!("No configuration file given, using built-in categories");
            Ok(TriageConfig::default())
        }
    }
}
