//! Geometry sets from model associations.
//!
//! The source reports geometric entities with its own entity type codes.
//! These are written to the output as dimension codes, so the two must agree;
//! [`check_dimension_mapping`] verifies that once per conversion.

use log::debug;

use modeltraits_core::geometry::{Dimension, GeometryEntity, GeometrySet};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, Result},
    source::{AttributeTree, EntityTypeCodes, ModelItem},
};

/// Verify that the source's entity type codes equal the dimension codes.
///
/// A mismatch means every geometry set would silently carry wrong
/// dimensions, so it is reported as a fatal configuration error.
pub(crate) fn check_dimension_mapping(codes: EntityTypeCodes) -> Result<()> {
    let expected = EntityTypeCodes::EXPECTED;
    if codes == expected {
        return Ok(());
    }

    let pairs = [
        (Dimension::Vertex, codes.vertex),
        (Dimension::Edge, codes.edge),
        (Dimension::Face, codes.face),
        (Dimension::Region, codes.region),
        (Dimension::Model, codes.model),
    ];
    let mismatched: Vec<String> = pairs
        .iter()
        .filter(|(dim, code)| dim.code() != *code)
        .map(|(dim, code)| format!("{dim} is {code}, expected {}", dim.code()))
        .collect();

    Err(Diagnostic::error(format!(
        "entity type codes do not match the dimension mapping: {}",
        mismatched.join("; ")
    ))
    .with_code(ErrorCode::E300)
    .with_help("the attribute source changed its entity type codes; geometry sets would be wrong"))
}

/// Build the geometry set of a model association.
///
/// No association gives an empty set. Items that are not geometric
/// entities are skipped with a [`ErrorCode::W001`] warning.
pub(crate) fn build_geometry_set<T: AttributeTree>(
    tree: &T,
    association: Option<&T::Association>,
    collector: &mut DiagnosticCollector,
) -> Result<GeometrySet> {
    let Some(association) = association else {
        return Ok(GeometrySet::new());
    };

    let items = tree.model_items(association)?;
    let mut set = GeometrySet::new();
    for item in items {
        match item {
            ModelItem::Entity { type_code, tag } => {
                let dimension = Dimension::try_from(type_code).map_err(|err| {
                    Diagnostic::error(format!("model item with tag {tag}: {err}"))
                        .with_code(ErrorCode::E301)
                })?;
                set.insert(GeometryEntity::new(dimension, tag));
            }
            ModelItem::Other { description } => {
                collector.emit(
                    Diagnostic::warning(format!(
                        "model item `{description}` is not a geometric entity; skipping it"
                    ))
                    .with_code(ErrorCode::W001),
                );
            }
        }
    }

    debug!(entities = set.len(); "Built geometry set");
    Ok(set)
}
