//! An in-memory attribute tree.
//!
//! [`MemoryTree`] implements [`AttributeTree`] over a [`Document`]: a plain,
//! deserializable description of cases, categories and attributes. It stands
//! in for the external modeling system in tests and lets attribute trees be
//! written down as TOML files:
//!
//! ```toml
//! [[nodes]]
//! kind = "case"
//! info_type = "flow"
//! name = "case1"
//! image_class = "fluids"
//!
//! [[nodes.children]]
//! kind = "void"
//! info_type = "Inlet"
//! associations = [[{ type = "face", tag = 7 }]]
//!
//! [[nodes.children.children]]
//! kind = "double"
//! info_type = "velocity"
//! expression = "$x + $t"
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Deserialize;

use crate::source::{
    AttributeTree, Component, EntityTypeCodes, ModelItem, RawValue, RepKind, SourceError,
};

/// Source error code for a node whose value does not fit its kind.
const INVALID_VALUE: i32 = 2;
/// Source error code for a query with a case or model that does not belong together.
const UNBOUND_CASE: i32 = 3;

static NEXT_MODEL_ID: AtomicU64 = AtomicU64::new(1);

/// Description of a whole attribute tree.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    /// Entity type codes reported by the tree; the expected codes if absent.
    #[serde(default)]
    pub entity_type_codes: Option<EntityTypeCodes>,
    /// Top-level nodes, in source order.
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
}

impl Document {
    pub fn new(nodes: Vec<NodeSpec>) -> Self {
        Self {
            entity_type_codes: None,
            nodes,
        }
    }

    pub fn with_entity_type_codes(mut self, codes: EntityTypeCodes) -> Self {
        self.entity_type_codes = Some(codes);
        self
    }
}

/// A literal attribute value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LiteralSpec {
    Int(i64),
    Float(f64),
    Text(String),
}

/// One component of a tensor value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ComponentSpec {
    /// A literal number.
    Literal(f64),
    /// A formula whose current value is unknown.
    Expression(String),
    /// A formula together with its current value.
    Evaluated { value: f64, expression: String },
}

impl From<f64> for ComponentSpec {
    fn from(value: f64) -> Self {
        ComponentSpec::Literal(value)
    }
}

impl From<&str> for ComponentSpec {
    fn from(expression: &str) -> Self {
        ComponentSpec::Expression(expression.to_string())
    }
}

impl ComponentSpec {
    fn to_component(&self) -> Component<f64> {
        match self {
            ComponentSpec::Literal(value) => Component::literal(*value),
            ComponentSpec::Expression(expression) => Component::expression(0.0, expression),
            ComponentSpec::Evaluated { value, expression } => {
                Component::expression(*value, expression)
            }
        }
    }
}

/// An item of a model association.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum ItemSpec {
    Vertex { tag: i64 },
    Edge { tag: i64 },
    Face { tag: i64 },
    Region { tag: i64 },
    Model { tag: i64 },
    /// An entity with an explicit raw type code.
    Entity { type_code: i32, tag: i64 },
    /// A non-geometric item such as a named selection.
    Other { description: String },
}

impl ItemSpec {
    pub fn vertex(tag: i64) -> Self {
        ItemSpec::Vertex { tag }
    }

    pub fn edge(tag: i64) -> Self {
        ItemSpec::Edge { tag }
    }

    pub fn face(tag: i64) -> Self {
        ItemSpec::Face { tag }
    }

    pub fn region(tag: i64) -> Self {
        ItemSpec::Region { tag }
    }

    pub fn model(tag: i64) -> Self {
        ItemSpec::Model { tag }
    }

    pub fn other(description: impl Into<String>) -> Self {
        ItemSpec::Other {
            description: description.into(),
        }
    }

    fn to_model_item(&self, codes: EntityTypeCodes) -> ModelItem {
        let entity = |type_code, tag: &i64| ModelItem::Entity {
            type_code,
            tag: *tag,
        };
        match self {
            ItemSpec::Vertex { tag } => entity(codes.vertex, tag),
            ItemSpec::Edge { tag } => entity(codes.edge, tag),
            ItemSpec::Face { tag } => entity(codes.face, tag),
            ItemSpec::Region { tag } => entity(codes.region, tag),
            ItemSpec::Model { tag } => entity(codes.model, tag),
            ItemSpec::Entity { type_code, tag } => entity(*type_code, tag),
            ItemSpec::Other { description } => ModelItem::Other {
                description: description.clone(),
            },
        }
    }
}

/// Description of one attribute node and its subtree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    /// Representation kind name, e.g. `"case"`, `"void"` or `"tensor1"`.
    pub kind: String,
    pub info_type: String,
    /// Display name; defaults to the info type.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_class: Option<String>,
    /// Literal value of a scalar attribute.
    #[serde(default)]
    pub value: Option<LiteralSpec>,
    /// Formula of a scalar attribute.
    #[serde(default)]
    pub expression: Option<String>,
    /// Components of a `tensor1` attribute.
    #[serde(default)]
    pub components: Option<Vec<ComponentSpec>>,
    /// Rows of a `tensor2` attribute.
    #[serde(default)]
    pub rows: Option<Vec<Vec<ComponentSpec>>>,
    /// Model associations, each a list of items.
    #[serde(default)]
    pub associations: Vec<Vec<ItemSpec>>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn new(kind: &str, info_type: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            info_type: info_type.into(),
            name: None,
            image_class: None,
            value: None,
            expression: None,
            components: None,
            rows: None,
            associations: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A case whose name is also its info type.
    pub fn case(name: impl Into<String>, image_class: impl Into<String>) -> Self {
        let mut node = Self::new("case", name);
        node.image_class = Some(image_class.into());
        node
    }

    pub fn category(info_type: impl Into<String>) -> Self {
        Self::new("void", info_type)
    }

    pub fn int(info_type: impl Into<String>, value: i64) -> Self {
        Self::new("int", info_type).with_value(LiteralSpec::Int(value))
    }

    pub fn string(info_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new("string", info_type).with_value(LiteralSpec::Text(value.into()))
    }

    pub fn double(info_type: impl Into<String>, value: f64) -> Self {
        Self::new("double", info_type).with_value(LiteralSpec::Float(value))
    }

    pub fn tensor0(info_type: impl Into<String>, value: f64) -> Self {
        Self::new("tensor0", info_type).with_value(LiteralSpec::Float(value))
    }

    pub fn tensor1(info_type: impl Into<String>, components: Vec<ComponentSpec>) -> Self {
        let mut node = Self::new("tensor1", info_type);
        node.components = Some(components);
        node
    }

    pub fn tensor2(info_type: impl Into<String>, rows: Vec<Vec<ComponentSpec>>) -> Self {
        let mut node = Self::new("tensor2", info_type);
        node.rows = Some(rows);
        node
    }

    /// A scalar attribute of `kind` defined by a formula.
    pub fn expression(
        kind: &str,
        info_type: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        Self::new(kind, info_type).with_expression(expression)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_image_class(mut self, image_class: impl Into<String>) -> Self {
        self.image_class = Some(image_class.into());
        self
    }

    pub fn with_value(mut self, value: LiteralSpec) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    pub fn with_association(mut self, items: Vec<ItemSpec>) -> Self {
        self.associations.push(items);
        self
    }

    pub fn with_child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.children.extend(children);
        self
    }

    fn raw_value(&self, kind: &RepKind) -> Result<Option<RawValue>, SourceError> {
        let invalid = |what: &str| {
            SourceError::new(
                INVALID_VALUE,
                format!("{} attribute `{}` has {what}", kind, self.info_type),
            )
        };

        let value = match kind {
            RepKind::Int => match (&self.value, &self.expression) {
                (_, Some(expr)) => {
                    let current = match self.value {
                        Some(LiteralSpec::Int(v)) => v,
                        _ => 0,
                    };
                    Some(RawValue::Int(Component::expression(current, expr)))
                }
                (Some(LiteralSpec::Int(v)), None) => Some(RawValue::Int(Component::literal(*v))),
                (Some(_), None) => return Err(invalid("a non-integer value")),
                (None, None) => None,
            },
            RepKind::String => match (&self.value, &self.expression) {
                (_, Some(expr)) => Some(RawValue::String(Component::expression(
                    String::new(),
                    expr,
                ))),
                (Some(LiteralSpec::Text(v)), None) => {
                    Some(RawValue::String(Component::literal(v.clone())))
                }
                (Some(_), None) => return Err(invalid("a non-text value")),
                (None, None) => None,
            },
            RepKind::Double | RepKind::Tensor0 => {
                let component = self.scalar_component().map_err(invalid)?;
                component.map(|c| match kind {
                    RepKind::Double => RawValue::Double(c),
                    _ => RawValue::Tensor0(c),
                })
            }
            RepKind::Tensor1 => self.components.as_ref().map(|components| {
                RawValue::Tensor1(components.iter().map(ComponentSpec::to_component).collect())
            }),
            RepKind::Tensor2 => match &self.rows {
                Some(rows) => {
                    if rows.iter().any(|row| row.len() != rows.len()) {
                        return Err(invalid("a non-square matrix"));
                    }
                    Some(RawValue::Tensor2(
                        rows.iter()
                            .map(|row| row.iter().map(ComponentSpec::to_component).collect())
                            .collect(),
                    ))
                }
                None => None,
            },
            RepKind::Void | RepKind::Case | RepKind::Other(_) => None,
        };
        Ok(value)
    }

    fn scalar_component(&self) -> Result<Option<Component<f64>>, &'static str> {
        let current = match &self.value {
            Some(LiteralSpec::Float(v)) => Some(*v),
            Some(LiteralSpec::Int(v)) => {
                Some(exact_float(*v).ok_or("an integer value with no exact double form")?)
            }
            Some(LiteralSpec::Text(_)) => return Err("a non-numeric value"),
            None => None,
        };
        Ok(match (&self.expression, current) {
            (Some(expr), current) => Some(Component::expression(current.unwrap_or(0.0), expr)),
            (None, Some(v)) => Some(Component::literal(v)),
            (None, None) => None,
        })
    }
}

/// `value` as a double, if no precision is lost.
fn exact_float(value: i64) -> Option<f64> {
    const EXACT_LIMIT: u64 = 1 << f64::MANTISSA_DIGITS;
    (value.unsigned_abs() <= EXACT_LIMIT).then_some(value as f64)
}

/// Handle to a node of a [`MemoryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Handle to the model of a [`MemoryTree`]; unique per tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelId(u64);

/// Handle to a model association of a [`MemoryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssociationId(usize);

#[derive(Debug)]
struct NodeData {
    kind: RepKind,
    info_type: String,
    name: String,
    image_class: String,
    value: Result<Option<RawValue>, SourceError>,
    associations: Vec<usize>,
    children: Vec<usize>,
    parent_count: usize,
}

/// An [`AttributeTree`] held entirely in memory.
#[derive(Debug)]
pub struct MemoryTree {
    model: ModelId,
    codes: EntityTypeCodes,
    nodes: Vec<NodeData>,
    associations: Vec<Vec<ItemSpec>>,
    cases: Vec<usize>,
}

impl MemoryTree {
    /// Build a tree from a document.
    ///
    /// Values that do not fit their node's kind are not rejected here; the
    /// tree reports them as source errors when the value is queried.
    pub fn from_document(document: &Document) -> Self {
        let mut tree = Self {
            model: ModelId(NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed)),
            codes: document.entity_type_codes.unwrap_or_default(),
            nodes: Vec::new(),
            associations: Vec::new(),
            cases: Vec::new(),
        };
        for spec in &document.nodes {
            tree.insert(spec, 0);
        }
        tree
    }

    /// Override the entity type codes reported by the tree.
    pub fn with_entity_type_codes(mut self, codes: EntityTypeCodes) -> Self {
        self.codes = codes;
        self
    }

    /// Top-level nodes, in source order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent_count == 0)
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    fn insert(&mut self, spec: &NodeSpec, parent_count: usize) -> usize {
        let kind = RepKind::from(spec.kind.as_str());
        let index = self.nodes.len();
        let associations = spec
            .associations
            .iter()
            .map(|items| {
                self.associations.push(items.clone());
                self.associations.len() - 1
            })
            .collect();

        self.nodes.push(NodeData {
            value: spec.raw_value(&kind),
            kind: kind.clone(),
            info_type: spec.info_type.clone(),
            name: spec.name.clone().unwrap_or_else(|| spec.info_type.clone()),
            image_class: spec.image_class.clone().unwrap_or_default(),
            associations,
            children: Vec::new(),
            parent_count,
        });
        if kind == RepKind::Case {
            self.cases.push(index);
        }

        let children = spec
            .children
            .iter()
            .map(|child| self.insert(child, 1))
            .collect();
        self.nodes[index].children = children;
        index
    }

    fn node(&self, node: NodeId) -> &NodeData {
        &self.nodes[node.0]
    }
}

impl AttributeTree for MemoryTree {
    type Node = NodeId;
    type Model = ModelId;
    type Association = AssociationId;

    fn model(&self) -> ModelId {
        self.model
    }

    fn entity_type_codes(&self) -> EntityTypeCodes {
        self.codes
    }

    fn cases(&self) -> Result<Vec<NodeId>, SourceError> {
        Ok(self.cases.iter().copied().map(NodeId).collect())
    }

    fn parent_count(&self, node: NodeId) -> usize {
        self.node(node).parent_count
    }

    fn info_type(&self, node: NodeId) -> String {
        self.node(node).info_type.clone()
    }

    fn name(&self, node: NodeId) -> String {
        self.node(node).name.clone()
    }

    fn image_class(&self, node: NodeId) -> String {
        self.node(node).image_class.clone()
    }

    fn kind(&self, node: NodeId) -> RepKind {
        self.node(node).kind.clone()
    }

    fn children(&self, node: NodeId) -> Result<Vec<NodeId>, SourceError> {
        Ok(self.node(node).children.iter().copied().map(NodeId).collect())
    }

    fn find_associations(
        &self,
        case: NodeId,
        model: &ModelId,
        node: NodeId,
    ) -> Result<Vec<AssociationId>, SourceError> {
        if *model != self.model {
            return Err(SourceError::new(
                UNBOUND_CASE,
                format!("case `{}` is not bound to model {}", self.node(case).name, model.0),
            ));
        }
        if self.node(case).kind != RepKind::Case {
            return Err(SourceError::new(
                UNBOUND_CASE,
                format!("node `{}` is not a case", self.node(case).info_type),
            ));
        }
        Ok(self
            .node(node)
            .associations
            .iter()
            .copied()
            .map(AssociationId)
            .collect())
    }

    fn model_items(&self, association: &AssociationId) -> Result<Vec<ModelItem>, SourceError> {
        let items = self.associations.get(association.0).ok_or_else(|| {
            SourceError::new(
                UNBOUND_CASE,
                format!("unknown model association {}", association.0),
            )
        })?;
        Ok(items
            .iter()
            .map(|item| item.to_model_item(self.codes))
            .collect())
    }

    fn value(&self, node: NodeId) -> Result<Option<RawValue>, SourceError> {
        self.node(node).value.clone()
    }
}
