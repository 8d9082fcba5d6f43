//! Configuration handling for infragraph
//!
//! Configuration is read from `infragraph.toml` (project, found in the
//! current directory or a parent) and `~/.config/infragraph/config.toml`
//! (global). Project values override global ones.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{CategoryRegistry, GraphOptions, DEFAULT_DEPENDS_ON_FIELD};
use crate::render::RendererKind;

/// File name searched for in the project tree
pub const PROJECT_CONFIG_FILE: &str = "infragraph.toml";

/// Title used when neither the command line nor the config sets one
pub const DEFAULT_TITLE: &str = "Terraform Diagram";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Contents of a single configuration file
///
/// Every field is optional so files can be layered.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Diagram title
    pub title: Option<String>,

    /// Attribute holding dependency references
    pub depends_on_field: Option<String>,

    /// Renderer used when `--renderer` is not given
    pub default_renderer: Option<RendererKind>,

    /// Extra `type = "Category"` entries layered over the built-in table
    pub categories: BTreeMap<String, String>,
}

impl ConfigFile {
    /// Parses configuration text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        file.validate()?;
        Ok(file)
    }

    /// Reads and parses a configuration file
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to load config: {}", path.display()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(field) = &self.depends_on_field {
            if field.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "depends_on_field must not be empty".to_string(),
                ));
            }
        }

        for (resource_type, category) in &self.categories {
            if category.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "category for '{}' must not be empty",
                    resource_type
                )));
            }
        }

        Ok(())
    }

    /// Layers `other` on top of `self`
    fn merge(mut self, other: ConfigFile) -> Self {
        if other.title.is_some() {
            self.title = other.title;
        }
        if other.depends_on_field.is_some() {
            self.depends_on_field = other.depends_on_field;
        }
        if other.default_renderer.is_some() {
            self.default_renderer = other.default_renderer;
        }
        self.categories.extend(other.categories);
        self
    }
}

/// Effective configuration (global + project)
#[derive(Debug, Clone)]
pub struct Config {
    pub title: String,
    pub depends_on_field: String,
    pub default_renderer: RendererKind,
    pub categories: BTreeMap<String, String>,

    /// Files that contributed, in load order
    pub sources: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file(ConfigFile::default(), vec![])
    }
}

impl Config {
    /// Loads configuration from default locations
    ///
    /// An explicit path replaces the project lookup and must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut merged = ConfigFile::default();
        let mut sources = Vec::new();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.is_file() {
                merged = merged.merge(ConfigFile::read(&global_path)?);
                sources.push(global_path);
            }
        }

        let project_path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::find_project_config(&cwd)),
        };

        if let Some(path) = project_path {
            merged = merged.merge(ConfigFile::read(&path)?);
            sources.push(path);
        }

        Ok(Self::from_file(merged, sources))
    }

    fn from_file(file: ConfigFile, sources: Vec<PathBuf>) -> Self {
        Self {
            title: file.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            depends_on_field: file
                .depends_on_field
                .unwrap_or_else(|| DEFAULT_DEPENDS_ON_FIELD.to_string()),
            default_renderer: file.default_renderer.unwrap_or_default(),
            categories: file.categories,
            sources,
        }
    }

    /// Returns the global config file location
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "infragraph", "infragraph")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Finds `infragraph.toml` in `start` or the nearest parent
    pub fn find_project_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(PROJECT_CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// The built-in category table with configured entries layered on top
    pub fn registry(&self) -> CategoryRegistry {
        CategoryRegistry::builtin().with_overrides(
            self.categories
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }

    pub fn graph_options(&self) -> GraphOptions {
        GraphOptions {
            depends_on_field: self.depends_on_field.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.title, DEFAULT_TITLE);
        assert_eq!(config.depends_on_field, "depends_on");
        assert_eq!(config.default_renderer, RendererKind::Dot);
        assert!(config.sources.is_empty());
        assert_eq!(config.registry(), CategoryRegistry::builtin());
    }

    #[test]
    fn parse_config_file() {
        let toml = r#"
title = "Production"
depends_on_field = "after"
default_renderer = "mermaid"

[categories]
google_compute_instance = "Compute"
"#;

        let file = ConfigFile::parse(toml).unwrap();
        assert_eq!(file.title.as_deref(), Some("Production"));
        assert_eq!(file.default_renderer, Some(RendererKind::Mermaid));

        let config = Config::from_file(file, vec![]);
        assert_eq!(config.graph_options().depends_on_field, "after");
        assert_eq!(
            config.registry().lookup("google_compute_instance"),
            Some("Compute")
        );
        assert_eq!(config.registry().lookup("aws_instance"), Some("Compute"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = ConfigFile::parse("colour = \"red\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn empty_values_are_invalid() {
        let result = ConfigFile::parse("depends_on_field = \" \"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = ConfigFile::parse("[categories]\naws_instance = \"\"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn project_values_override_global() {
        let global = ConfigFile {
            title: Some("Global".to_string()),
            depends_on_field: Some("after".to_string()),
            categories: BTreeMap::from([("a".to_string(), "One".to_string())]),
            ..Default::default()
        };
        let project = ConfigFile {
            title: Some("Project".to_string()),
            categories: BTreeMap::from([("b".to_string(), "Two".to_string())]),
            ..Default::default()
        };

        let merged = global.merge(project);
        assert_eq!(merged.title.as_deref(), Some("Project"));
        assert_eq!(merged.depends_on_field.as_deref(), Some("after"));
        assert_eq!(merged.categories.len(), 2);
    }

    #[test]
    fn find_project_config_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "title = \"x\"\n").unwrap();

        let sub_dir = dir.path().join("sub").join("dir");
        fs::create_dir_all(&sub_dir).unwrap();

        let found = Config::find_project_config(&sub_dir);
        assert_eq!(found, Some(dir.path().join(PROJECT_CONFIG_FILE)));
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "title = \"Explicit\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.title, "Explicit");
        assert_eq!(config.sources.last(), Some(&path));
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
