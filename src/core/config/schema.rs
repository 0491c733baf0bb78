//! core::config::schema
//!
//! Configuration schema types.
//!
//! The same schema is used for the global file and the project file. Every
//! value is optional; accessors on [`super::Config`] apply defaults.
//!
//! # Validation
//!
//! Values are validated after parsing: language codes must be non-blank and
//! the export prefix must be usable as a file name prefix.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// A configuration file (global or project scope).
///
/// # Example
///
/// ```toml
/// [merge]
/// overwrite = false
///
/// [import]
/// pages = true
/// about = false
/// keys = false
/// original_values = false
/// variants = true
/// overwrite = false
/// languages = ["fr", "de"]
///
/// [export]
/// file_prefix = "localization"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Merge defaults
    pub merge: Option<MergeDefaults>,

    /// Import defaults
    pub import: Option<ImportDefaults>,

    /// Export defaults
    pub export: Option<ExportDefaults>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(import) = &self.import {
            import.validate()?;
        }
        if let Some(export) = &self.export {
            export.validate()?;
        }
        Ok(())
    }
}

/// Merge command defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MergeDefaults {
    /// Replace non-empty target values with source values
    pub overwrite: Option<bool>,
}

/// Import command defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ImportDefaults {
    /// Create pages missing from the target
    pub pages: Option<bool>,

    /// Copy page descriptions
    pub about: Option<bool>,

    /// Copy field keys
    pub keys: Option<bool>,

    /// Copy original values
    pub original_values: Option<bool>,

    /// Copy variants for the selected languages
    pub variants: Option<bool>,

    /// Replace non-empty target values
    pub overwrite: Option<bool>,

    /// Languages to import variants for
    pub languages: Option<Vec<String>>,
}

impl ImportDefaults {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(languages) = &self.languages {
            if languages.iter().any(|l| l.trim().is_empty()) {
                return Err(ConfigError::InvalidValue(
                    "import.languages cannot contain blank codes".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Export command defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExportDefaults {
    /// Prefix for per-language export files (`<prefix>_<lang>.json`)
    pub file_prefix: Option<String>,
}

impl ExportDefaults {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(prefix) = &self.file_prefix {
            if prefix.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "export.file_prefix cannot be empty".to_string(),
                ));
            }
            if prefix.contains(['/', '\\']) {
                return Err(ConfigError::InvalidValue(format!(
                    "export.file_prefix '{}' cannot contain path separators",
                    prefix
                )));
            }
        }
        Ok(())
    }
}
