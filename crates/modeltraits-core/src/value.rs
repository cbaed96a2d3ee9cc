//! Typed boundary-condition values.
//!
//! A boundary condition holds exactly one [`BoundaryValue`]: either a literal
//! of one of the supported shapes, or a [`FunctionValue`] wrapping one or
//! more symbolic [`Expression`]s together with the independent variables the
//! expressions depend on.

use std::{convert::Infallible, fmt, str::FromStr};

/// Independent-variable dependence of a symbolic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EquationType {
    /// No independent variables: the expression is a constant formula.
    #[default]
    None,
    /// Depends on one or more of `x`, `y`, `z`.
    Space,
    /// Depends on `t` only.
    Time,
    /// Depends on both space and time.
    SpaceTime,
}

impl EquationType {
    /// Number of independent variables a function of this type is
    /// evaluated with: `(x, y, z)`, `(t)`, `(x, y, z, t)` or none.
    pub fn variable_count(self) -> usize {
        match self {
            EquationType::None => 0,
            EquationType::Space => 3,
            EquationType::Time => 1,
            EquationType::SpaceTime => 4,
        }
    }

    /// Combines two classifications; space and time together give `SpaceTime`.
    ///
    /// # Examples
    ///
    /// ```
    /// use modeltraits_core::value::EquationType;
    ///
    /// assert_eq!(EquationType::Space.merge(EquationType::Time), EquationType::SpaceTime);
    /// assert_eq!(EquationType::None.merge(EquationType::Space), EquationType::Space);
    /// ```
    pub fn merge(self, other: EquationType) -> EquationType {
        let spatial = self.is_spatial() || other.is_spatial();
        let temporal = self.is_temporal() || other.is_temporal();
        EquationType::from_flags(spatial, temporal)
    }

    /// Builds a classification from "has space" / "has time" flags.
    pub fn from_flags(spatial: bool, temporal: bool) -> EquationType {
        match (spatial, temporal) {
            (true, true) => EquationType::SpaceTime,
            (true, false) => EquationType::Space,
            (false, true) => EquationType::Time,
            (false, false) => EquationType::None,
        }
    }

    pub fn is_spatial(self) -> bool {
        matches!(self, EquationType::Space | EquationType::SpaceTime)
    }

    pub fn is_temporal(self) -> bool {
        matches!(self, EquationType::Time | EquationType::SpaceTime)
    }
}

impl fmt::Display for EquationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EquationType::None => "none",
            EquationType::Space => "space",
            EquationType::Time => "time",
            EquationType::SpaceTime => "space-time",
        };
        write!(f, "{s}")
    }
}

/// Element type produced by a function value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Scalar,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Int => write!(f, "int"),
            ValueKind::Scalar => write!(f, "scalar"),
        }
    }
}

/// An opaque symbolic formula.
///
/// The text is stored as given; no parsing or evaluation happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression(String);

impl Expression {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the formula text.
    pub fn text(&self) -> &str {
        &self.0
    }
}

impl FromStr for Expression {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Expression {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Expression {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A symbolic boundary-condition value.
///
/// `rank` is the tensor rank of the value: 0 for scalars, 1 for vectors and
/// 2 for matrices. Vector functions hold one expression per component and
/// matrix functions hold `n * n` expressions in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionValue {
    value_kind: ValueKind,
    rank: usize,
    equation_type: EquationType,
    expressions: Vec<Expression>,
}

impl FunctionValue {
    /// Creates a function value.
    ///
    /// # Arguments
    ///
    /// * `value_kind` - Element type of the function result.
    /// * `rank` - Tensor rank of the result (0, 1 or 2).
    /// * `equation_type` - Independent variables the expressions depend on.
    /// * `expressions` - Component expressions.
    pub fn new(
        value_kind: ValueKind,
        rank: usize,
        equation_type: EquationType,
        expressions: Vec<Expression>,
    ) -> Self {
        Self {
            value_kind,
            rank,
            equation_type,
            expressions,
        }
    }

    /// Creates a rank-0 function from a single expression.
    pub fn scalar(value_kind: ValueKind, equation_type: EquationType, expr: Expression) -> Self {
        Self::new(value_kind, 0, equation_type, vec![expr])
    }

    pub fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn equation_type(&self) -> EquationType {
        self.equation_type
    }

    /// Number of independent variables the function takes.
    pub fn variable_count(&self) -> usize {
        self.equation_type.variable_count()
    }

    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }
}

impl fmt::Display for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "function<{}, rank {}, {}>(",
            self.value_kind, self.rank, self.equation_type
        )?;
        for (idx, expr) in self.expressions.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{expr:?}", expr = expr.text())?;
        }
        write!(f, ")")
    }
}

/// The value held by a boundary condition.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryValue {
    Int(i64),
    String(String),
    Scalar(f64),
    Vector(Vec<f64>),
    Matrix(Vec<Vec<f64>>),
    Function(FunctionValue),
}

impl BoundaryValue {
    /// Returns `true` for symbolic values.
    pub fn is_function(&self) -> bool {
        matches!(self, BoundaryValue::Function(_))
    }

    /// Returns the function value, if this is one.
    pub fn as_function(&self) -> Option<&FunctionValue> {
        match self {
            BoundaryValue::Function(func) => Some(func),
            _ => None,
        }
    }

    /// Short name of the variant, used in logs and summaries.
    pub fn kind_name(&self) -> &'static str {
        match self {
            BoundaryValue::Int(_) => "int",
            BoundaryValue::String(_) => "string",
            BoundaryValue::Scalar(_) => "scalar",
            BoundaryValue::Vector(_) => "vector",
            BoundaryValue::Matrix(_) => "matrix",
            BoundaryValue::Function(_) => "function",
        }
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &[f64]) -> fmt::Result {
    write!(f, "[")?;
    for (idx, value) in row.iter().enumerate() {
        if idx > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{value}")?;
    }
    write!(f, "]")
}

impl fmt::Display for BoundaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryValue::Int(value) => write!(f, "int {value}"),
            BoundaryValue::String(value) => write!(f, "string {value:?}"),
            BoundaryValue::Scalar(value) => write!(f, "scalar {value}"),
            BoundaryValue::Vector(values) => {
                write!(f, "vector ")?;
                write_row(f, values)
            }
            BoundaryValue::Matrix(rows) => {
                write!(f, "matrix [")?;
                for (idx, row) in rows.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write_row(f, row)?;
                }
                write!(f, "]")
            }
            BoundaryValue::Function(func) => write!(f, "{func}"),
        }
    }
}
