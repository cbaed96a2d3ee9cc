//! Independent-variable classification of expression text.
//!
//! Expressions reference their independent variables as `$x`, `$y`, `$z`
//! (space) and `$t` (time). Classification only scans for these tokens; the
//! rest of the formula is never parsed.

use log::trace;

use modeltraits_core::value::EquationType;

use crate::error::{Diagnostic, ErrorCode, Result};

/// Classify a single expression.
///
/// # Errors
///
/// Returns an [`ErrorCode::E100`] diagnostic if a `$` is followed by
/// anything other than `x`, `y`, `z` or `t`, including the end of the text.
///
/// # Examples
///
/// ```
/// use modeltraits_core::value::EquationType;
/// use modeltraits_reader::classify::classify;
///
/// assert_eq!(classify("2 * $x + $y").unwrap(), EquationType::Space);
/// assert_eq!(classify("sin($t) * $z").unwrap(), EquationType::SpaceTime);
/// assert_eq!(classify("42").unwrap(), EquationType::None);
/// assert!(classify("$q").is_err());
/// ```
pub fn classify(expression: &str) -> Result<EquationType> {
    let mut spatial = false;
    let mut temporal = false;

    let mut chars = expression.chars();
    while chars.by_ref().any(|c| c == '$') {
        match chars.next() {
            Some('x' | 'y' | 'z') => spatial = true,
            Some('t') => temporal = true,
            Some(other) => return Err(unexpected_variable(expression, &format!("${other}"))),
            None => return Err(unexpected_variable(expression, "$")),
        }
    }

    let equation_type = EquationType::from_flags(spatial, temporal);
    trace!(expression, equation_type:%; "Classified expression");
    Ok(equation_type)
}

/// Classify a set of expressions, e.g. the components of a tensor.
///
/// The result is `SpaceTime` as soon as one expression is `SpaceTime` or
/// the expressions seen so far include both a spatial and a temporal one;
/// remaining expressions are then not examined. Otherwise the result is
/// `Space` if any expression is spatial, `Time` if any is temporal, and
/// `None` if none reference a variable.
///
/// # Examples
///
/// ```
/// use modeltraits_core::value::EquationType;
/// use modeltraits_reader::classify::classify_all;
///
/// assert_eq!(classify_all(["$x", "$t"]).unwrap(), EquationType::SpaceTime);
/// assert_eq!(classify_all(["$x", "5"]).unwrap(), EquationType::Space);
/// assert_eq!(classify_all(["3", "4"]).unwrap(), EquationType::None);
/// ```
pub fn classify_all<I, S>(expressions: I) -> Result<EquationType>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut combined = EquationType::None;
    for expression in expressions {
        combined = combined.merge(classify(expression.as_ref())?);
        if combined == EquationType::SpaceTime {
            break;
        }
    }
    Ok(combined)
}

fn unexpected_variable(expression: &str, token: &str) -> Diagnostic {
    Diagnostic::error(format!(
        "unexpected variable `{token}` in expression `{expression}`"
    ))
    .with_code(ErrorCode::E100)
    .with_help("expressions may only reference $x, $y, $z and $t")
}
