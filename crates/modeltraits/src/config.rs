//! Configuration types for reading model traits.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field has a default.
//!
//! # Overview
//!
//! - [`ReaderConfig`] - Top-level configuration combining the sections below.
//! - [`CaseConfig`] - Which root cases are converted.
//! - [`ValueConfig`] - How attribute values are converted.
//!
//! # Example
//!
//! ```
//! # use modeltraits::config::ReaderConfig;
//! let config = ReaderConfig::default();
//! assert_eq!(config.cases().reserved(), ["Meshing".to_string()]);
//! assert!(config.values().literal_matrix_with_function());
//! ```

use serde::Deserialize;

use modeltraits_reader::ReadOptions;

/// Top-level reader configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReaderConfig {
    /// Root case selection.
    #[serde(default)]
    cases: CaseConfig,

    /// Value conversion.
    #[serde(default)]
    values: ValueConfig,
}

impl ReaderConfig {
    pub fn new(cases: CaseConfig, values: ValueConfig) -> Self {
        Self { cases, values }
    }

    pub fn cases(&self) -> &CaseConfig {
        &self.cases
    }

    pub fn values(&self) -> &ValueConfig {
        &self.values
    }

    /// The conversion options this configuration describes.
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions::new()
            .with_reserved_case_names(self.cases.reserved.iter().cloned())
            .with_literal_matrix_with_function(self.values.literal_matrix_with_function)
    }
}

/// Root case selection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseConfig {
    /// Info types of root cases that are never converted.
    #[serde(default = "default_reserved")]
    reserved: Vec<String>,
}

impl CaseConfig {
    pub fn new(reserved: Vec<String>) -> Self {
        Self { reserved }
    }

    pub fn reserved(&self) -> &[String] {
        &self.reserved
    }
}

impl Default for CaseConfig {
    fn default() -> Self {
        Self {
            reserved: default_reserved(),
        }
    }
}

/// Value conversion settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValueConfig {
    /// Also emit the literal matrix of a matrix attribute that has symbolic
    /// components, after its function value.
    #[serde(default = "default_true")]
    literal_matrix_with_function: bool,
}

impl ValueConfig {
    pub fn new(literal_matrix_with_function: bool) -> Self {
        Self {
            literal_matrix_with_function,
        }
    }

    pub fn literal_matrix_with_function(&self) -> bool {
        self.literal_matrix_with_function
    }
}

impl Default for ValueConfig {
    fn default() -> Self {
        Self {
            literal_matrix_with_function: true,
        }
    }
}

fn default_reserved() -> Vec<String> {
    vec!["Meshing".to_string()]
}

fn default_true() -> bool {
    true
}
