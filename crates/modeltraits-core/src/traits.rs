//! The model-traits tree.
//!
//! [`ModelTraits`] owns an ordered list of cases. Each case is a root
//! [`CategoryNode`]; categories nest by name and carry the
//! [`BoundaryCondition`]s attached to them.
//!
//! # Example
//!
//! ```
//! use modeltraits_core::{
//!     geometry::{Dimension, GeometryEntity, GeometrySet},
//!     traits::ModelTraits,
//!     value::BoundaryValue,
//! };
//!
//! let mut traits = ModelTraits::new("fluids");
//! let case = traits.add_case("case1");
//! let inlet = case.add_category("Inlet");
//! inlet.add_boundary_condition(
//!     "pressure",
//!     [GeometryEntity::new(Dimension::Face, 7)].into_iter().collect::<GeometrySet>(),
//!     BoundaryValue::Scalar(101.3),
//! );
//!
//! let found = traits.case("case1").and_then(|c| c.find(&["Inlet"])).unwrap();
//! assert_eq!(found.boundary_conditions().len(), 1);
//! ```

use std::fmt;

use indexmap::IndexMap;

use crate::{geometry::GeometrySet, value::BoundaryValue};

/// A value attached to a set of geometric entities.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryCondition {
    name: String,
    geometry: GeometrySet,
    value: BoundaryValue,
}

impl BoundaryCondition {
    pub fn new(name: impl Into<String>, geometry: GeometrySet, value: BoundaryValue) -> Self {
        Self {
            name: name.into(),
            geometry,
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &GeometrySet {
        &self.geometry
    }

    pub fn value(&self) -> &BoundaryValue {
        &self.value
    }
}

/// A named grouping of categories and boundary conditions.
///
/// Child categories are unique by name and keep insertion order. Boundary
/// conditions keep insertion order and may share a name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryNode {
    name: String,
    categories: IndexMap<String, CategoryNode>,
    boundary_conditions: Vec<BoundaryCondition>,
}

impl CategoryNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the child category `name`, creating it if it does not exist.
    pub fn add_category(&mut self, name: impl Into<String>) -> &mut CategoryNode {
        let name = name.into();
        self.categories
            .entry(name)
            .or_insert_with_key(|name| CategoryNode::new(name.clone()))
    }

    /// Appends a boundary condition. Names are not required to be unique.
    pub fn add_boundary_condition(
        &mut self,
        name: impl Into<String>,
        geometry: GeometrySet,
        value: BoundaryValue,
    ) {
        self.boundary_conditions
            .push(BoundaryCondition::new(name, geometry, value));
    }

    /// Child categories in creation order.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryNode> {
        self.categories.values()
    }

    pub fn category(&self, name: &str) -> Option<&CategoryNode> {
        self.categories.get(name)
    }

    /// Follows a path of category names starting at this node.
    ///
    /// An empty path returns `self`.
    pub fn find(&self, path: &[&str]) -> Option<&CategoryNode> {
        path.iter()
            .try_fold(self, |node, name| node.category(name))
    }

    /// Boundary conditions attached directly to this node, in source order.
    pub fn boundary_conditions(&self) -> &[BoundaryCondition] {
        &self.boundary_conditions
    }

    /// All boundary conditions named `name`, in source order.
    pub fn boundary_conditions_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a BoundaryCondition> + 'a {
        self.boundary_conditions
            .iter()
            .filter(move |bc| bc.name() == name)
    }

    /// Total number of boundary conditions in this subtree.
    pub fn boundary_condition_count(&self) -> usize {
        self.boundary_conditions.len()
            + self
                .categories
                .values()
                .map(CategoryNode::boundary_condition_count)
                .sum::<usize>()
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        for bc in &self.boundary_conditions {
            writeln!(
                f,
                "{pad}bc {:?} on {} = {}",
                bc.name(),
                bc.geometry(),
                bc.value()
            )?;
        }
        for category in self.categories.values() {
            writeln!(f, "{pad}category {:?}", category.name())?;
            category.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Root of the converted tree: an image class and its cases.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelTraits {
    image_class: String,
    cases: Vec<CategoryNode>,
}

impl ModelTraits {
    /// Creates an empty model-traits tree for the given image class.
    pub fn new(image_class: impl Into<String>) -> Self {
        Self {
            image_class: image_class.into(),
            cases: Vec::new(),
        }
    }

    pub fn image_class(&self) -> &str {
        &self.image_class
    }

    /// Appends a new case and returns it. Cases are never merged by name.
    pub fn add_case(&mut self, name: impl Into<String>) -> &mut CategoryNode {
        self.cases.push(CategoryNode::new(name));
        let last = self.cases.len() - 1;
        &mut self.cases[last]
    }

    pub fn cases(&self) -> &[CategoryNode] {
        &self.cases
    }

    /// Returns the first case named `name`.
    pub fn case(&self, name: &str) -> Option<&CategoryNode> {
        self.cases.iter().find(|case| case.name() == name)
    }
}

impl fmt::Display for ModelTraits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "model traits (image class {:?})", self.image_class)?;
        for case in &self.cases {
            writeln!(f, "case {:?}", case.name())?;
            case.write_indented(f, 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Dimension, GeometryEntity};

    fn face(tag: i64) -> GeometrySet {
        [GeometryEntity::new(Dimension::Face, tag)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_add_category_reuses_existing() {
        let mut node = CategoryNode::new("root");
        node.add_category("Inlet")
            .add_boundary_condition("a", GeometrySet::new(), BoundaryValue::Int(1));
        node.add_category("Outlet");
        node.add_category("Inlet")
            .add_boundary_condition("b", GeometrySet::new(), BoundaryValue::Int(2));

        let names: Vec<_> = node.categories().map(CategoryNode::name).collect();
        assert_eq!(names, ["Inlet", "Outlet"]);
        assert_eq!(node.category("Inlet").unwrap().boundary_conditions().len(), 2);
    }

    #[test]
    fn test_duplicate_boundary_condition_names_keep_order() {
        let mut node = CategoryNode::new("root");
        node.add_boundary_condition("v", face(1), BoundaryValue::Scalar(1.0));
        node.add_boundary_condition("v", face(2), BoundaryValue::Scalar(2.0));

        let values: Vec<_> = node
            .boundary_conditions_named("v")
            .map(|bc| bc.value().clone())
            .collect();
        assert_eq!(
            values,
            [BoundaryValue::Scalar(1.0), BoundaryValue::Scalar(2.0)]
        );
    }

    #[test]
    fn test_find_path() {
        let mut node = CategoryNode::new("root");
        node.add_category("a").add_category("b");

        assert_eq!(node.find(&[]).map(CategoryNode::name), Some("root"));
        assert_eq!(node.find(&["a", "b"]).map(CategoryNode::name), Some("b"));
        assert!(node.find(&["a", "c"]).is_none());
    }

    #[test]
    fn test_add_case_never_merges() {
        let mut traits = ModelTraits::new("img");
        traits.add_case("c");
        traits.add_case("c");

        assert_eq!(traits.cases().len(), 2);
        assert_eq!(traits.image_class(), "img");
    }

    #[test]
    fn test_boundary_condition_count() {
        let mut traits = ModelTraits::new("img");
        let case = traits.add_case("c");
        case.add_boundary_condition("top", face(1), BoundaryValue::Int(0));
        case.add_category("x")
            .add_boundary_condition("inner", face(2), BoundaryValue::Int(0));

        assert_eq!(traits.cases()[0].boundary_condition_count(), 2);
    }

    #[test]
    fn test_display_tree() {
        let mut traits = ModelTraits::new("img");
        traits
            .add_case("c")
            .add_category("Inlet")
            .add_boundary_condition("p", face(7), BoundaryValue::Scalar(1.5));

        let expected = "model traits (image class \"img\")\n\
                        case \"c\"\n\
                        \x20 category \"Inlet\"\n\
                        \x20   bc \"p\" on {(2, 7)} = scalar 1.5\n";
        assert_eq!(traits.to_string(), expected);
    }
}
