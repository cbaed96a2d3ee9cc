//! Read-only interface to an external attribute tree.
//!
//! The modeling system that owns the attribute tree is reached only through
//! the [`AttributeTree`] trait. Nodes, models and model associations are
//! opaque handles chosen by the implementation; the reader never mutates the
//! tree and never holds on to a handle beyond one conversion.
//!
//! Attribute values cross the boundary as a closed [`RawValue`] variant, so
//! every representation kind the reader understands is handled by an
//! exhaustive `match` rather than by probing the node with casts.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::error::{Diagnostic, ErrorCode};

/// An error reported by the attribute source itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("attribute source error {code}: {message}")]
pub struct SourceError {
    code: i32,
    message: String,
}

impl SourceError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The source's own error code.
    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<SourceError> for Diagnostic {
    fn from(err: SourceError) -> Self {
        Diagnostic::error(format!(
            "attribute source failed with code {}: {}",
            err.code, err.message
        ))
        .with_code(ErrorCode::E001)
    }
}

/// Representation kind of an attribute node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RepKind {
    /// A plain grouping node.
    Void,
    /// A case: a grouping node that carries its own model associations.
    Case,
    Int,
    String,
    Double,
    Tensor0,
    Tensor1,
    Tensor2,
    /// Any kind the reader does not model, named as the source reports it.
    Other(String),
}

impl RepKind {
    /// Returns `true` for kinds converted into boundary conditions.
    pub fn is_boundary_condition(&self) -> bool {
        matches!(
            self,
            RepKind::Int
                | RepKind::String
                | RepKind::Double
                | RepKind::Tensor0
                | RepKind::Tensor1
                | RepKind::Tensor2
        )
    }

    /// Returns `true` for kinds converted into categories.
    pub fn is_category(&self) -> bool {
        matches!(self, RepKind::Void | RepKind::Case)
    }

    pub fn as_str(&self) -> &str {
        match self {
            RepKind::Void => "void",
            RepKind::Case => "case",
            RepKind::Int => "int",
            RepKind::String => "string",
            RepKind::Double => "double",
            RepKind::Tensor0 => "tensor0",
            RepKind::Tensor1 => "tensor1",
            RepKind::Tensor2 => "tensor2",
            RepKind::Other(name) => name,
        }
    }
}

impl From<&str> for RepKind {
    /// Maps a kind name to a [`RepKind`]; unknown names become [`RepKind::Other`].
    fn from(name: &str) -> Self {
        match name {
            "void" => RepKind::Void,
            "case" => RepKind::Case,
            "int" => RepKind::Int,
            "string" => RepKind::String,
            "double" => RepKind::Double,
            "tensor0" => RepKind::Tensor0,
            "tensor1" => RepKind::Tensor1,
            "tensor2" => RepKind::Tensor2,
            other => RepKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One scalar component of an attribute value.
///
/// `value` is what the source reports as the component's current value;
/// `expression` is set when the component is defined by a formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Component<T> {
    pub value: T,
    pub expression: Option<String>,
}

impl<T> Component<T> {
    pub fn literal(value: T) -> Self {
        Self {
            value,
            expression: None,
        }
    }

    pub fn expression(value: T, expression: impl Into<String>) -> Self {
        Self {
            value,
            expression: Some(expression.into()),
        }
    }

    pub fn is_expression(&self) -> bool {
        self.expression.is_some()
    }
}

/// The value of an attribute node, one variant per supported kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Int(Component<i64>),
    String(Component<String>),
    Double(Component<f64>),
    Tensor0(Component<f64>),
    /// Vector components in index order.
    Tensor1(Vec<Component<f64>>),
    /// Square matrix components, row-major.
    Tensor2(Vec<Vec<Component<f64>>>),
}

impl RawValue {
    /// The representation kind this value belongs to.
    pub fn kind(&self) -> RepKind {
        match self {
            RawValue::Int(_) => RepKind::Int,
            RawValue::String(_) => RepKind::String,
            RawValue::Double(_) => RepKind::Double,
            RawValue::Tensor0(_) => RepKind::Tensor0,
            RawValue::Tensor1(_) => RepKind::Tensor1,
            RawValue::Tensor2(_) => RepKind::Tensor2,
        }
    }
}

/// An item of a model association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelItem {
    /// A geometric entity with the source's raw entity type code.
    Entity { type_code: i32, tag: i64 },
    /// Anything else the source can associate (e.g. a named selection).
    Other { description: String },
}

/// Entity type codes used by the source for each topological dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EntityTypeCodes {
    pub vertex: i32,
    pub edge: i32,
    pub face: i32,
    pub region: i32,
    pub model: i32,
}

impl EntityTypeCodes {
    /// The codes the dimension mapping of the output format assumes.
    pub const EXPECTED: EntityTypeCodes = EntityTypeCodes {
        vertex: 0,
        edge: 1,
        face: 2,
        region: 3,
        model: 9,
    };
}

impl Default for EntityTypeCodes {
    fn default() -> Self {
        Self::EXPECTED
    }
}

/// Read-only access to an external attribute tree.
pub trait AttributeTree {
    /// Handle to an attribute node.
    type Node: Copy + fmt::Debug;
    /// Handle to the geometric model the attributes refer to.
    type Model: Clone + fmt::Debug;
    /// Handle to a model association.
    type Association: Clone + fmt::Debug;

    /// The geometric model loaded with this tree.
    fn model(&self) -> Self::Model;

    /// Entity type codes used in [`ModelItem::Entity`].
    fn entity_type_codes(&self) -> EntityTypeCodes;

    /// Every case node known to the tree, root or nested, in source order.
    fn cases(&self) -> Result<Vec<Self::Node>, SourceError>;

    fn parent_count(&self, node: Self::Node) -> usize;

    /// The node's type name; used for category and boundary-condition names.
    fn info_type(&self, node: Self::Node) -> String;

    /// The node's display name; used for case entries.
    fn name(&self, node: Self::Node) -> String;

    /// The image class of a case node.
    fn image_class(&self, node: Self::Node) -> String;

    fn kind(&self, node: Self::Node) -> RepKind;

    fn children(&self, node: Self::Node) -> Result<Vec<Self::Node>, SourceError>;

    /// Model associations attached to `node` within `case`.
    ///
    /// `model` must be the model the case is bound to; the per-entity
    /// queries of the source are undefined for an unbound case.
    fn find_associations(
        &self,
        case: Self::Node,
        model: &Self::Model,
        node: Self::Node,
    ) -> Result<Vec<Self::Association>, SourceError>;

    fn model_items(&self, association: &Self::Association)
    -> Result<Vec<ModelItem>, SourceError>;

    /// The value of an attribute node, `None` for grouping nodes.
    fn value(&self, node: Self::Node) -> Result<Option<RawValue>, SourceError>;
}
