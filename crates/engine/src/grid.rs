// Grid model: rectangular f64 matrices, shapes, and operations

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// Dimensions
// =============================================================================

/// Shape of a grid as (rows, cols).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

// =============================================================================
// Grid
// =============================================================================

/// Row-major rectangular matrix of f64 values.
///
/// Every row has the same length. A grid with zero rows has zero cols and is
/// only used as the empty result; decoded operands always have at least one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Empty 0x0 grid.
    pub fn empty() -> Self {
        Self { data: Vec::new(), rows: 0, cols: 0 }
    }

    /// Grid of the given shape filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        if rows == 0 || cols == 0 {
            return Self::empty();
        }
        Self { data: vec![0.0; rows * cols], rows, cols }
    }

    /// Build from nested rows. Returns `None` if the rows are not all the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        if rows.is_empty() {
            return Some(Self::empty());
        }
        let row_count = rows.len();
        let cols = rows[0].len();
        if rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        if cols == 0 {
            return Some(Self::empty());
        }
        let mut flat = Vec::with_capacity(row_count * cols);
        for row in rows {
            flat.extend(row);
        }
        Some(Self { data: flat, rows: row_count, cols })
    }

    /// Build from a flat row-major buffer. Returns `None` if the length doesn't match the shape.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != rows * cols {
            return None;
        }
        if data.is_empty() {
            return Some(Self::empty());
        }
        Some(Self { data, rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dims(&self) -> Dimensions {
        Dimensions::new(self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact(0) panics; the empty grid has no data, so any chunk size yields nothing
        let cols = self.cols.max(1);
        self.data.chunks_exact(cols).take(self.rows)
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(|r| r.to_vec()).collect()
    }

    pub(crate) fn as_flat(&self) -> &[f64] {
        &self.data
    }
}

// =============================================================================
// Operation
// =============================================================================

/// Binary matrix operation selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
}

impl Operation {
    /// Noun used in user-facing messages ("... for addition").
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Add => "addition",
            Self::Subtract => "subtraction",
            Self::Multiply => "multiplication",
        }
    }

    /// Short name used on the command line and in self-test reports.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "sub",
            Self::Multiply => "mul",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "addition" | "+" => Ok(Self::Add),
            "sub" | "subtract" | "subtraction" | "-" => Ok(Self::Subtract),
            "mul" | "multiply" | "multiplication" | "*" => Ok(Self::Multiply),
            other => Err(format!("unknown operation '{other}' (expected add, sub, or mul)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rectangular() {
        let g = Grid::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(g.dims(), Dimensions::new(2, 2));
        assert_eq!(g.iter_rows().nth(1), Some(&[3.0, 4.0][..]));
    }

    #[test]
    fn from_rows_rejects_ragged() {
        assert!(Grid::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_none());
    }

    #[test]
    fn empty_grid_has_no_rows() {
        let g = Grid::from_rows(vec![]).unwrap();
        assert!(g.is_empty());
        assert_eq!(g.dims(), Dimensions::new(0, 0));
        assert_eq!(g.iter_rows().count(), 0);
        assert_eq!(g.to_rows(), Vec::<Vec<f64>>::new());
    }

    #[test]
    fn from_flat_checks_length() {
        assert!(Grid::from_flat(2, 2, vec![1.0, 2.0, 3.0]).is_none());
        let g = Grid::from_flat(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(g.to_rows(), vec![vec![1.0, 2.0, 3.0]]);
    }

    #[test]
    fn operation_parse() {
        assert_eq!("add".parse::<Operation>().unwrap(), Operation::Add);
        assert_eq!("SUB".parse::<Operation>().unwrap(), Operation::Subtract);
        assert_eq!("multiply".parse::<Operation>().unwrap(), Operation::Multiply);
        assert_eq!("subtraction".parse::<Operation>().unwrap(), Operation::Subtract);
        assert_eq!(" * ".parse::<Operation>().unwrap(), Operation::Multiply);
        assert!("div".parse::<Operation>().is_err());
    }

    #[test]
    fn operation_names() {
        assert_eq!(Operation::Multiply.verb(), "multiplication");
        assert_eq!(Operation::Subtract.to_string(), "sub");
        assert_eq!(Operation::Add.short_name(), "add");
    }
}
