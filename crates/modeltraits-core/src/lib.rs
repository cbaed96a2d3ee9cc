//! Model Traits Core Types
//!
//! This crate provides the output model of the model-traits reader:
//!
//! - **Geometry**: Entity references and entity sets ([`geometry`] module)
//! - **Values**: Literal and symbolic boundary-condition values ([`value`] module)
//! - **Traits**: The case / category / boundary-condition tree ([`traits`] module)

pub mod geometry;
pub mod traits;
pub mod value;
