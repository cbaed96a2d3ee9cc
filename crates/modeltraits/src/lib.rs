//! Model Traits - boundary conditions from CAD attribute trees.
//!
//! Reads the attribute tree of a geometry modeling system and converts it
//! into model traits: named cases holding categories and boundary conditions
//! attached to geometric entities. Attribute trees are read through the
//! [`AttributeTree`] trait or loaded from TOML attribute documents.

pub mod config;

mod error;

pub use modeltraits_core::{geometry, traits, value};
pub use modeltraits_reader::{
    AttributeTree, Diagnostic, ErrorCode, Harvest, ReadError, Severity, SourceError, memory,
};

pub use error::ModelTraitsError;

use std::{fs, path::Path};

use log::{debug, error, info, trace, warn};

use modeltraits_core::traits::ModelTraits;
use modeltraits_reader::{
    memory::{Document, MemoryTree},
    read_model_traits,
};

use config::ReaderConfig;

/// Reader for model traits.
///
/// This provides an API for converting attribute trees, either supplied
/// directly or loaded from attribute documents.
///
/// # Examples
///
/// ```
/// use modeltraits::{TraitsReader, config::ReaderConfig};
///
/// let document = r#"
///     [[nodes]]
///     kind = "case"
///     info_type = "case1"
///     image_class = "fluids"
///
///     [[nodes.children]]
///     kind = "double"
///     info_type = "pressure"
///     value = 101325.0
/// "#;
///
/// let reader = TraitsReader::new(ReaderConfig::default());
/// let harvest = reader.read_str(document).expect("Failed to read");
/// assert_eq!(harvest.traits().image_class(), "fluids");
/// ```
#[derive(Debug, Default)]
pub struct TraitsReader {
    config: ReaderConfig,
}

impl TraitsReader {
    /// Create a new reader with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Reader configuration including reserved case names
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Convert an attribute tree into model traits.
    ///
    /// # Errors
    ///
    /// Returns `ModelTraitsError::Read` with the fatal diagnostic and the
    /// warnings reported before it.
    pub fn read<T: AttributeTree>(&self, tree: &T) -> Result<Harvest, ModelTraitsError> {
        info!("Reading model traits");
        let harvest = read_model_traits(tree, &self.config.read_options())?;
        for warning in harvest.warnings() {
            trace!(warning:%; "Conversion warning");
        }
        debug!(warnings = harvest.warnings().len(); "Model traits read successfully");
        Ok(harvest)
    }

    /// Convert a TOML attribute document.
    ///
    /// # Errors
    ///
    /// Returns `ModelTraitsError::Document` if the text is not a valid
    /// attribute document, or `ModelTraitsError::Read` if the conversion fails.
    pub fn read_str(&self, document: &str) -> Result<Harvest, ModelTraitsError> {
        let document: Document = toml::from_str(document)?;
        debug!(nodes = document.nodes.len(); "Attribute document parsed");
        self.read(&MemoryTree::from_document(&document))
    }

    /// Convert the TOML attribute document at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ModelTraitsError::Io` if the file cannot be read, and the
    /// errors of [`TraitsReader::read_str`] otherwise.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<Harvest, ModelTraitsError> {
        let path = path.as_ref();
        info!(path:? = path; "Loading attribute document");
        let document = fs::read_to_string(path)?;
        self.read_str(&document)
    }

    /// Load the model traits of the attribute document at `path`.
    ///
    /// All or nothing: any failure is logged and gives `None`; warnings are
    /// logged and otherwise dropped.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Option<ModelTraits> {
        let path = path.as_ref();
        match self.read_file(path) {
            Ok(harvest) => {
                if !harvest.warnings().is_empty() {
                    warn!(path:? = path, warnings = harvest.warnings().len(); "Model traits loaded with warnings");
                }
                Some(harvest.into_traits())
            }
            Err(err) => {
                error!(path:? = path, err:%; "Failed to load model traits");
                None
            }
        }
    }
}
