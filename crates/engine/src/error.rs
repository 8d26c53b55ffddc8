use std::fmt;

use crate::grid::{Dimensions, Operation};

/// Validation failure from decoding or arithmetic.
///
/// Row numbers are 1-indexed, matching what the user typed.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// Input text is empty after trimming (or has no non-empty rows).
    EmptyInput,
    /// Parsed row count differs from the expected row count.
    RowCountMismatch { expected: usize, found: usize },
    /// A row's value count differs from the expected column count.
    ColCountMismatch { row: usize, expected: usize, found: usize },
    /// A token in the row is not a numeric literal.
    InvalidNumber { row: usize, token: String },
    /// No column count was expected, but a row's length differs from row 1.
    RaggedRow { row: usize, expected: usize, found: usize },
    /// Operand shapes are incompatible for the operation.
    DimensionMismatch { op: Operation, left: Dimensions, right: Dimensions },
}

impl MatrixError {
    /// Stable machine-readable code.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::RowCountMismatch { .. } => "row_count_mismatch",
            Self::ColCountMismatch { .. } => "col_count_mismatch",
            Self::InvalidNumber { .. } => "invalid_number",
            Self::RaggedRow { .. } => "ragged_row",
            Self::DimensionMismatch { .. } => "dimension_mismatch",
        }
    }

    /// True for errors raised while decoding operand text.
    pub fn is_decode_error(&self) -> bool {
        !matches!(self, Self::DimensionMismatch { .. })
    }
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Matrix is empty"),
            Self::RowCountMismatch { expected, found } => {
                write!(f, "Expected {expected} rows, got {found}")
            }
            Self::ColCountMismatch { row, expected, found } => {
                write!(f, "Row {row}: expected {expected} cols, got {found}")
            }
            Self::InvalidNumber { row, .. } => write!(f, "Invalid number at row {row}"),
            Self::RaggedRow { row, expected, found } => {
                write!(f, "Row {row}: expected {expected} cols to match row 1, got {found}")
            }
            Self::DimensionMismatch { op: Operation::Multiply, .. } => {
                write!(f, "A.cols must equal B.rows for multiplication")
            }
            Self::DimensionMismatch { op, .. } => {
                write!(f, "A and B must have same dimensions for {}", op.verb())
            }
        }
    }
}

impl std::error::Error for MatrixError {}

/// Which operand of a calculation an error concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    A,
    B,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Error from a full calculation: a decode error tagged with its operand,
/// or an arithmetic error (no operand).
#[derive(Debug, Clone, PartialEq)]
pub struct CalcError {
    pub operand: Option<Operand>,
    pub source: MatrixError,
}

impl CalcError {
    pub fn decode(operand: Operand, source: MatrixError) -> Self {
        Self { operand: Some(operand), source }
    }

    pub fn arithmetic(source: MatrixError) -> Self {
        Self { operand: None, source }
    }

    pub fn kind(&self) -> &'static str {
        self.source.kind()
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operand {
            Some(operand) => write!(f, "Matrix {operand}: {}", self.source),
            None => write!(f, "{}", self.source),
        }
    }
}

impl std::error::Error for CalcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
