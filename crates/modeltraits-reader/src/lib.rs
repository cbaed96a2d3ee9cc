//! # Model Traits Reader
//!
//! Converts the attribute tree of a CAD modeling system into
//! boundary-condition model traits. The tree is reached through the
//! [`source::AttributeTree`] trait; the result is a
//! [`modeltraits_core::traits::ModelTraits`] value.
//!
//! ## Usage
//!
//! ```
//! # use modeltraits_reader::{read_model_traits, ReadOptions, ReadError};
//! # use modeltraits_reader::memory::{Document, ItemSpec, MemoryTree, NodeSpec};
//!
//! fn main() -> Result<(), ReadError> {
//!     let doc = Document::new(vec![NodeSpec::case("case1", "fluids").with_child(
//!         NodeSpec::category("Outlet")
//!             .with_association(vec![ItemSpec::face(3)])
//!             .with_child(NodeSpec::double("pressure", 101325.0)),
//!     )]);
//!     let tree = MemoryTree::from_document(&doc);
//!
//!     let harvest = read_model_traits(&tree, &ReadOptions::default())?;
//!     assert_eq!(harvest.traits().cases().len(), 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. **Check** - The source's entity type codes must match the dimension codes
//! 2. **Harvest** - Select the root cases and fix the image class
//! 3. **Walk** - Visit each case's subtree depth-first, inheriting associations
//! 4. **Extract** - Turn attribute values into boundary values, classifying expressions

pub mod classify;
pub mod error;
mod extract;
mod geometry;
mod harvest;
pub mod memory;
pub mod source;
mod walk;

pub use error::{Diagnostic, ErrorCode, ReadError, Severity};
pub use harvest::{Harvest, ReadOptions, read_model_traits};
pub use source::{AttributeTree, SourceError};
