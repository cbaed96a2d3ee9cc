//! Boundary-condition values from attribute nodes.

use log::{debug, trace};

use modeltraits_core::{
    geometry::GeometrySet,
    traits::CategoryNode,
    value::{BoundaryValue, EquationType, Expression, FunctionValue, ValueKind},
};

use crate::{
    classify::{classify, classify_all},
    error::{Diagnostic, DiagnosticCollector, ErrorCode, Result},
    source::{AttributeTree, Component, RawValue},
};

/// Convert an attribute node into boundary conditions attached to `parent`.
///
/// Every boundary condition is named after the node's info type and applies
/// to `geometry`. A node normally yields one boundary condition; a matrix with
/// symbolic components yields its function value followed by its literal
/// matrix when `literal_matrix_with_function` is set. Nodes of a kind with
/// no boundary-condition form are skipped with a [`ErrorCode::W002`] warning.
pub(crate) fn attach_boundary_conditions<T: AttributeTree>(
    tree: &T,
    parent: &mut CategoryNode,
    node: T::Node,
    geometry: GeometrySet,
    literal_matrix_with_function: bool,
    collector: &mut DiagnosticCollector,
) -> Result<()> {
    let kind = tree.kind(node);
    let name = tree.info_type(node);

    if !kind.is_boundary_condition() {
        collector.emit(
            Diagnostic::warning(format!(
                "attribute kind `{kind}` has no boundary-condition form; skipping it"
            ))
            .with_code(ErrorCode::W002),
        );
        return Ok(());
    }

    let raw = tree.value(node)?.ok_or_else(|| {
        Diagnostic::error(format!("{kind} attribute `{name}` has no value"))
            .with_code(ErrorCode::E203)
    })?;
    if raw.kind() != kind {
        return Err(Diagnostic::error(format!(
            "{kind} attribute `{name}` reported a {} value",
            raw.kind()
        ))
        .with_code(ErrorCode::E203));
    }

    let values = boundary_values(raw, literal_matrix_with_function)?;
    debug!(name = name.as_str(), kind:%, values = values.len(); "Extracted boundary condition");
    for value in values {
        trace!(name = name.as_str(), value = value.kind_name(); "Adding boundary condition");
        parent.add_boundary_condition(name.clone(), geometry.clone(), value);
    }
    Ok(())
}

/// The boundary values of a raw attribute value.
pub(crate) fn boundary_values(
    raw: RawValue,
    literal_matrix_with_function: bool,
) -> Result<Vec<BoundaryValue>> {
    let value = match raw {
        RawValue::Int(component) => match component.expression {
            Some(expression) => scalar_function(ValueKind::Int, expression)?
                .unwrap_or(BoundaryValue::Int(component.value)),
            None => BoundaryValue::Int(component.value),
        },
        RawValue::String(component) => match component.expression {
            Some(expression) => {
                return Err(Diagnostic::error(format!(
                    "string attribute is defined by the expression `{expression}`"
                ))
                .with_code(ErrorCode::E101)
                .with_help("string attributes must hold literal text"));
            }
            None => BoundaryValue::String(component.value),
        },
        RawValue::Double(component) | RawValue::Tensor0(component) => {
            match component.expression {
                Some(expression) => scalar_function(ValueKind::Scalar, expression)?
                    .unwrap_or(BoundaryValue::Scalar(component.value)),
                None => BoundaryValue::Scalar(component.value),
            }
        }
        RawValue::Tensor1(components) => {
            let expressions: Vec<String> = components.iter().map(component_text).collect();
            let equation_type = if components.iter().any(Component::is_expression) {
                classify_all(&expressions)?
            } else {
                EquationType::None
            };
            if equation_type == EquationType::None {
                BoundaryValue::Vector(components.into_iter().map(|c| c.value).collect())
            } else {
                BoundaryValue::Function(FunctionValue::new(
                    ValueKind::Scalar,
                    1,
                    equation_type,
                    expressions.into_iter().map(Expression::new).collect(),
                ))
            }
        }
        RawValue::Tensor2(rows) => return matrix_values(rows, literal_matrix_with_function),
    };
    Ok(vec![value])
}

/// A scalar function, or `None` when the expression has no independent
/// variable and the current value stands for it.
fn scalar_function(value_kind: ValueKind, expression: String) -> Result<Option<BoundaryValue>> {
    let equation_type = classify(&expression)?;
    if equation_type == EquationType::None {
        trace!(expression = expression.as_str(); "Constant expression, keeping its value");
        return Ok(None);
    }
    Ok(Some(BoundaryValue::Function(FunctionValue::scalar(
        value_kind,
        equation_type,
        Expression::new(expression),
    ))))
}

/// A matrix attribute.
///
/// Only the symbolic components decide the equation type. The function value
/// lists every component row-major, literal ones as their decimal text. When
/// no symbolic component uses a variable the literal matrix is the only value.
fn matrix_values(
    rows: Vec<Vec<Component<f64>>>,
    literal_matrix_with_function: bool,
) -> Result<Vec<BoundaryValue>> {
    let symbolic: Vec<&str> = rows
        .iter()
        .flatten()
        .filter_map(|c| c.expression.as_deref())
        .collect();

    let equation_type = if symbolic.is_empty() {
        EquationType::None
    } else {
        classify_all(&symbolic)?
    };
    trace!(symbolic = symbolic.len(), equation_type:%; "Classified matrix");

    let mut values = Vec::with_capacity(2);
    if equation_type != EquationType::None {
        let expressions = rows
            .iter()
            .flatten()
            .map(|c| Expression::new(component_text(c)))
            .collect();
        values.push(BoundaryValue::Function(FunctionValue::new(
            ValueKind::Scalar,
            2,
            equation_type,
            expressions,
        )));
        if !literal_matrix_with_function {
            return Ok(values);
        }
    }

    values.push(BoundaryValue::Matrix(
        rows.into_iter()
            .map(|row| row.into_iter().map(|c| c.value).collect())
            .collect(),
    ));
    Ok(values)
}

fn component_text(component: &Component<f64>) -> String {
    match &component.expression {
        Some(expression) => expression.clone(),
        None => format!("{}", component.value),
    }
}
