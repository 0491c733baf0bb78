//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Locbook has two configuration scopes:
//! - **Global**: User-level defaults
//! - **Project**: Overrides for documents in one directory tree
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$LOCBOOK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/locbook/config.toml`
//! 3. `~/.locbook/config.toml` (canonical write location)
//!
//! # Project Config Location
//!
//! `<project>/.locbook/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use locbook::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/project"))).unwrap();
//! let config = result.config;
//!
//! println!("Overwrite on merge: {}", config.merge_overwrite());
//! println!("Export prefix: {}", config.export_prefix());
//! ```

pub mod schema;

pub use schema::{ConfigFile, ExportDefaults, ImportDefaults, MergeDefaults};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::model::{join_language_list, parse_language_list};
use crate::core::store;
use crate::engine::ImportOptions;

/// Default prefix for per-language export files.
pub const DEFAULT_EXPORT_PREFIX: &str = "localization";

/// Keys accepted by [`Config::get`] and [`Config::set_value`].
pub const KEYS: &[&str] = &[
    "merge.overwrite",
    "import.pages",
    "import.about",
    "import.keys",
    "import.original_values",
    "import.variants",
    "import.overwrite",
    "import.languages",
    "export.file_prefix",
];

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {message}")]
    WriteError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown config key '{0}'")]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence automatically: project config
/// overrides global config, which overrides built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: ConfigFile,
    /// Project configuration (if found)
    pub project: Option<ConfigFile>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the project config file (if loaded)
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `project_dir` is provided, also loads its project config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(project_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let global_path = Self::find_global();
        Self::load_from(global_path.as_deref(), project_dir)
    }

    /// Load configuration from an explicit global file and project directory.
    pub fn load_from(
        global_path: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let global = match global_path {
            Some(path) if path.exists() => Some((Self::read_config(path)?, path.to_path_buf())),
            _ => None,
        };

        let project = match project_dir.map(Self::project_config_path) {
            Some(path) if path.exists() => Some((Self::read_config(&path)?, path)),
            _ => None,
        };

        let (global, global_path) = match global {
            Some((config, path)) => (config, Some(path)),
            None => (ConfigFile::default(), None),
        };
        let (project, project_path) = match project {
            Some((config, path)) => (Some(config), Some(path)),
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref p) = project {
            p.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                project,
                global_path,
                project_path,
            },
        })
    }

    /// Locate the global config file, if any exists.
    fn find_global() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("LOCBOOK_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("locbook/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".locbook/config.toml"))
            .filter(|path| path.exists())
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical path for global config.
    ///
    /// Returns `~/.locbook/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".locbook/config.toml"))
    }

    /// Where `config set` writes global values.
    ///
    /// `$LOCBOOK_CONFIG` when set, even if the file does not exist yet;
    /// otherwise [`Config::global_config_path`].
    pub fn global_write_path() -> Result<PathBuf, ConfigError> {
        match std::env::var_os("LOCBOOK_CONFIG") {
            Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => Self::global_config_path(),
        }
    }

    /// Get the path for a project's config.
    pub fn project_config_path(project_dir: &Path) -> PathBuf {
        project_dir.join(".locbook/config.toml")
    }

    /// Write a config file atomically.
    ///
    /// The file is validated first so an invalid value is never persisted.
    pub fn write(path: &Path, config: &ConfigFile) -> Result<(), ConfigError> {
        config.validate()?;

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        store::write_atomic(path, contents.as_bytes()).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read a config file for editing, or start from an empty one.
    pub fn read_or_default(path: &Path) -> Result<ConfigFile, ConfigError> {
        if path.exists() {
            Self::read_config(path)
        } else {
            Ok(ConfigFile::default())
        }
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Resolve one value: project first, then global.
    fn resolve<T, F>(&self, pick: F) -> Option<T>
    where
        F: Fn(&ConfigFile) -> Option<T>,
    {
        self.project.as_ref().and_then(&pick).or_else(|| pick(&self.global))
    }

    /// Whether merge overwrites non-empty values by default.
    ///
    /// Defaults to `false` (additive).
    pub fn merge_overwrite(&self) -> bool {
        self.resolve(|c| c.merge.as_ref().and_then(|m| m.overwrite))
            .unwrap_or(false)
    }

    /// Resolve one `[import]` flag.
    fn import_flag(&self, pick: fn(&ImportDefaults) -> Option<bool>) -> Option<bool> {
        self.resolve(|c| c.import.as_ref().and_then(pick))
    }

    /// Import options with configured defaults applied.
    ///
    /// Unconfigured values keep [`ImportOptions::default`].
    pub fn import_options(&self) -> ImportOptions {
        let defaults = ImportOptions::default();

        ImportOptions {
            import_pages: self
                .import_flag(|i| i.pages)
                .unwrap_or(defaults.import_pages),
            import_about: self
                .import_flag(|i| i.about)
                .unwrap_or(defaults.import_about),
            import_keys: self
                .import_flag(|i| i.keys)
                .unwrap_or(defaults.import_keys),
            import_original_values: self
                .import_flag(|i| i.original_values)
                .unwrap_or(defaults.import_original_values),
            import_variants: self
                .import_flag(|i| i.variants)
                .unwrap_or(defaults.import_variants),
            overwrite_existing: self
                .import_flag(|i| i.overwrite)
                .unwrap_or(defaults.overwrite_existing),
            selected_language_codes: self
                .resolve(|c| c.import.as_ref().and_then(|i| i.languages.clone()))
                .unwrap_or(defaults.selected_language_codes),
        }
    }

    /// Prefix for per-language export files.
    ///
    /// Defaults to `"localization"`.
    pub fn export_prefix(&self) -> String {
        self.resolve(|c| c.export.as_ref().and_then(|e| e.file_prefix.clone()))
            .unwrap_or_else(|| DEFAULT_EXPORT_PREFIX.to_string())
    }

    /// Effective value of a key, formatted for display.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let options = self.import_options();
        let value = match key {
            "merge.overwrite" => self.merge_overwrite().to_string(),
            "import.pages" => options.import_pages.to_string(),
            "import.about" => options.import_about.to_string(),
            "import.keys" => options.import_keys.to_string(),
            "import.original_values" => options.import_original_values.to_string(),
            "import.variants" => options.import_variants.to_string(),
            "import.overwrite" => options.overwrite_existing.to_string(),
            "import.languages" => join_language_list(&options.selected_language_codes),
            "export.file_prefix" => self.export_prefix(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        Ok(value)
    }

    /// Set a key in a config file from its string form.
    ///
    /// Booleans accept `true`/`false`; `import.languages` takes a
    /// comma-separated list.
    pub fn set_value(file: &mut ConfigFile, key: &str, value: &str) -> Result<(), ConfigError> {
        let parse_bool = |value: &str| {
            value.trim().parse::<bool>().map_err(|_| {
                ConfigError::InvalidValue(format!("{} expects true or false, got '{}'", key, value))
            })
        };

        match key {
            "merge.overwrite" => {
                file.merge.get_or_insert_with(Default::default).overwrite = Some(parse_bool(value)?)
            }
            "import.pages" => {
                file.import.get_or_insert_with(Default::default).pages = Some(parse_bool(value)?)
            }
            "import.about" => {
                file.import.get_or_insert_with(Default::default).about = Some(parse_bool(value)?)
            }
            "import.keys" => {
                file.import.get_or_insert_with(Default::default).keys = Some(parse_bool(value)?)
            }
            "import.original_values" => {
                file.import.get_or_insert_with(Default::default).original_values =
                    Some(parse_bool(value)?)
            }
            "import.variants" => {
                file.import.get_or_insert_with(Default::default).variants =
                    Some(parse_bool(value)?)
            }
            "import.overwrite" => {
                file.import.get_or_insert_with(Default::default).overwrite =
                    Some(parse_bool(value)?)
            }
            "import.languages" => {
                let codes = parse_language_list(value)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                file.import.get_or_insert_with(Default::default).languages = Some(codes)
            }
            "export.file_prefix" => {
                file.export.get_or_insert_with(Default::default).file_prefix =
                    Some(value.to_string())
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }

        file.validate()
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded project config file.
    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}
