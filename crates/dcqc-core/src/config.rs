//! Configuration types and parsing for dcqc.yml

use crate::error::{CoreError, CoreResult};
use crate::file_type::FileType;
use crate::staging;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file names, in lookup order.
pub const CONFIG_FILE_NAMES: &[&str] = &["dcqc.yml", "dcqc.yaml"];

/// Run configuration from dcqc.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Extra file types registered after the built-in catalog
    #[serde(default)]
    pub file_types: Vec<FileTypeConfig>,

    /// Default required tests (None means every tier 1-2 test)
    #[serde(default)]
    pub required_tests: Option<Vec<String>>,

    /// Default skipped tests
    #[serde(default)]
    pub skipped_tests: Vec<String>,

    /// Root directory for staging remote files
    #[serde(default)]
    pub staging_dir: Option<PathBuf>,

    /// Resource defaults for generated processes
    #[serde(default)]
    pub process: ProcessConfig,

    /// Default directory that report paths are written relative to
    #[serde(default)]
    pub paths_relative_to: Option<PathBuf>,
}

/// A file type declared in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileTypeConfig {
    pub name: String,

    #[serde(default)]
    pub file_extensions: Vec<String>,

    #[serde(default)]
    pub edam_iri: Option<String>,
}

/// Resource hints for external-test processes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessConfig {
    #[serde(default = "default_cpus")]
    pub cpus: u32,

    /// Memory in GB
    #[serde(default = "default_memory")]
    pub memory: u32,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            cpus: default_cpus(),
            memory: default_memory(),
        }
    }
}

fn default_cpus() -> u32 {
    1
}

fn default_memory() -> u32 {
    2
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::io_at(path, e))?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory containing dcqc.yml or dcqc.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        match Self::find_in_dir(dir) {
            Some(path) => Self::load(&path),
            None => Err(CoreError::ConfigNotFound {
                path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
            }),
        }
    }

    /// Load the directory's config if it has one, else the defaults
    pub fn discover(dir: &Path) -> CoreResult<Self> {
        match Self::find_in_dir(dir) {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    fn find_in_dir(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    fn validate(&self) -> CoreResult<()> {
        if let Some(ft) = self.file_types.iter().find(|ft| ft.name.trim().is_empty()) {
            return Err(CoreError::ConfigInvalid {
                message: format!("file type name cannot be empty (extensions: {:?})", ft.file_extensions),
            });
        }
        if self.process.cpus == 0 || self.process.memory == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "process cpus and memory must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Register the declared file types and set the staging root.
    ///
    /// Intended to run once at startup; re-registering a type fails.
    pub fn apply(&self) -> CoreResult<()> {
        for ft in &self.file_types {
            let extensions: Vec<&str> = ft.file_extensions.iter().map(String::as_str).collect();
            FileType::register(&ft.name, &extensions, ft.edam_iri.as_deref())?;
        }
        if let Some(dir) = &self.staging_dir {
            staging::set_default_staging_dir(dir);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
