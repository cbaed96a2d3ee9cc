//! Geometric entity references.
//!
//! Boundary conditions are attached to sets of geometric entities of the
//! source model. An entity is identified by its topological [`Dimension`]
//! and the integer tag the modeling system assigned to it.
//!
//! # Example
//!
//! ```
//! use modeltraits_core::geometry::{Dimension, GeometryEntity, GeometrySet};
//!
//! let set: GeometrySet = [
//!     GeometryEntity::new(Dimension::Face, 7),
//!     GeometryEntity::new(Dimension::Vertex, 1),
//!     GeometryEntity::new(Dimension::Face, 7),
//! ]
//! .into_iter()
//! .collect();
//!
//! assert_eq!(set.len(), 2);
//! assert!(set.contains(&GeometryEntity::new(Dimension::Face, 7)));
//! ```

use std::{collections::BTreeSet, fmt};

use thiserror::Error;

/// Topological dimension of a geometric entity.
///
/// The discriminants are the dimension codes written into model traits.
/// A whole-model reference uses the code `9` rather than `4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum Dimension {
    Vertex = 0,
    Edge = 1,
    Face = 2,
    Region = 3,
    Model = 9,
}

// Dimension codes are part of the output format; changing them breaks
// every consumer of previously converted traits.
const _: () = assert!(
    Dimension::Vertex as i32 == 0
        && Dimension::Edge as i32 == 1
        && Dimension::Face as i32 == 2
        && Dimension::Region as i32 == 3
        && Dimension::Model as i32 == 9
);

impl Dimension {
    /// All dimensions in ascending code order.
    pub const ALL: [Dimension; 5] = [
        Dimension::Vertex,
        Dimension::Edge,
        Dimension::Face,
        Dimension::Region,
        Dimension::Model,
    ];

    /// Returns the numeric dimension code.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Returns a lowercase name for the dimension.
    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Vertex => "vertex",
            Dimension::Edge => "edge",
            Dimension::Face => "face",
            Dimension::Region => "region",
            Dimension::Model => "model",
        }
    }
}

/// Error returned when a numeric code does not name a [`Dimension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown dimension code {0}")]
pub struct UnknownDimension(pub i32);

impl TryFrom<i32> for Dimension {
    type Error = UnknownDimension;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Dimension::ALL
            .into_iter()
            .find(|dim| dim.code() == code)
            .ok_or(UnknownDimension(code))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single geometric entity: `(dimension, tag)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeometryEntity {
    dimension: Dimension,
    tag: i64,
}

impl GeometryEntity {
    /// Creates a new entity reference.
    pub fn new(dimension: Dimension, tag: i64) -> Self {
        Self { dimension, tag }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn tag(&self) -> i64 {
        self.tag
    }
}

impl fmt::Display for GeometryEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dimension.code(), self.tag)
    }
}

/// An unordered, duplicate-free collection of geometric entities.
///
/// Equality ignores the order in which entities were inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeometrySet {
    entities: BTreeSet<GeometryEntity>,
}

impl GeometrySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entity, returning `false` if it was already present.
    pub fn insert(&mut self, entity: GeometryEntity) -> bool {
        self.entities.insert(entity)
    }

    pub fn contains(&self, entity: &GeometryEntity) -> bool {
        self.entities.contains(entity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates the entities ordered by dimension, then tag.
    pub fn iter(&self) -> impl Iterator<Item = &GeometryEntity> {
        self.entities.iter()
    }
}

impl FromIterator<GeometryEntity> for GeometrySet {
    fn from_iter<I: IntoIterator<Item = GeometryEntity>>(iter: I) -> Self {
        Self {
            entities: iter.into_iter().collect(),
        }
    }
}

impl Extend<GeometryEntity> for GeometrySet {
    fn extend<I: IntoIterator<Item = GeometryEntity>>(&mut self, iter: I) {
        self.entities.extend(iter);
    }
}

impl<'a> IntoIterator for &'a GeometrySet {
    type Item = &'a GeometryEntity;
    type IntoIter = std::collections::btree_set::Iter<'a, GeometryEntity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

impl fmt::Display for GeometrySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (idx, entity) in self.entities.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{entity}")?;
        }
        write!(f, "}}")
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn dimension_strategy() -> impl Strategy<Value = Dimension> {
        prop::sample::select(Dimension::ALL.to_vec())
    }

    fn entity_strategy() -> impl Strategy<Value = GeometryEntity> {
        (dimension_strategy(), 0i64..20).prop_map(|(dim, tag)| GeometryEntity::new(dim, tag))
    }

    fn entities_strategy() -> impl Strategy<Value = Vec<GeometryEntity>> {
        prop::collection::vec(entity_strategy(), 0..12)
    }

    // ===================
    // Property Test Functions
    // ===================

    fn check_insertion_order_is_irrelevant(
        entities: &[GeometryEntity],
    ) -> Result<(), TestCaseError> {
        let forward: GeometrySet = entities.iter().copied().collect();
        let backward: GeometrySet = entities.iter().rev().copied().collect();
        prop_assert_eq!(forward, backward);
        Ok(())
    }

    fn check_duplicates_collapse(entities: &[GeometryEntity]) -> Result<(), TestCaseError> {
        let once: GeometrySet = entities.iter().copied().collect();
        let mut twice = once.clone();
        twice.extend(entities.iter().copied());

        prop_assert!(once.len() <= entities.len());
        prop_assert_eq!(once, twice);
        Ok(())
    }

    fn check_iteration_is_sorted(entities: &[GeometryEntity]) -> Result<(), TestCaseError> {
        let set: GeometrySet = entities.iter().copied().collect();
        let items: Vec<_> = set.iter().copied().collect();
        prop_assert!(items.windows(2).all(|pair| pair[0] < pair[1]));
        for entity in entities {
            prop_assert!(set.contains(entity));
        }
        Ok(())
    }

    fn check_dimension_code_round_trip(dim: Dimension) -> Result<(), TestCaseError> {
        prop_assert_eq!(Dimension::try_from(dim.code()), Ok(dim));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn insertion_order_is_irrelevant(entities in entities_strategy()) {
            check_insertion_order_is_irrelevant(&entities)?;
        }

        #[test]
        fn duplicates_collapse(entities in entities_strategy()) {
            check_duplicates_collapse(&entities)?;
        }

        #[test]
        fn iteration_is_sorted(entities in entities_strategy()) {
            check_iteration_is_sorted(&entities)?;
        }

        #[test]
        fn dimension_code_round_trip(dim in dimension_strategy()) {
            check_dimension_code_round_trip(dim)?;
        }
    }
}
