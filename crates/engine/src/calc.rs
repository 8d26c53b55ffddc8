//! End-to-end calculation: decode both operands, compute, render.
//!
//! This is the contract any shell (CLI, GUI, test harness) follows. Operand
//! B's expected shape is derived from operand A:
//!
//! - add / subtract: B must have A's shape
//! - multiply: B must have `A.cols` rows; its column count is free

use crate::arith;
use crate::codec;
use crate::error::{CalcError, Operand};
use crate::grid::{Grid, Operation};

/// Expected shape of an operand. `None` leaves that axis unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shape {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
}

impl Shape {
    pub const ANY: Shape = Shape { rows: None, cols: None };

    pub fn new(rows: Option<usize>, cols: Option<usize>) -> Self {
        Self { rows, cols }
    }

    pub fn exact(rows: usize, cols: usize) -> Self {
        Self { rows: Some(rows), cols: Some(cols) }
    }
}

/// Expected shape of operand B given the operation and decoded operand A.
pub fn operand_b_shape(op: Operation, a: &Grid) -> Shape {
    match op {
        Operation::Add | Operation::Subtract => Shape::exact(a.rows(), a.cols()),
        Operation::Multiply => Shape::new(Some(a.cols()), None),
    }
}

/// Decode `a` against `shape`, decode `b` against the derived shape, and apply `op`.
pub fn evaluate(a: &str, b: &str, shape: Shape, op: Operation) -> Result<Grid, CalcError> {
    let lhs = codec::decode(a, shape.rows, shape.cols)
        .map_err(|e| CalcError::decode(Operand::A, e))?;

    let b_shape = operand_b_shape(op, &lhs);
    log::debug!("operand A is {}, decoding B against {:?}", lhs.dims(), b_shape);

    let rhs = codec::decode(b, b_shape.rows, b_shape.cols)
        .map_err(|e| CalcError::decode(Operand::B, e))?;

    let result = arith::apply(op, &lhs, &rhs).map_err(CalcError::arithmetic)?;
    log::debug!("{} {} x {} -> {}", op, lhs.dims(), rhs.dims(), result.dims());
    Ok(result)
}

/// `evaluate`, then render the result as text.
pub fn run(a: &str, b: &str, shape: Shape, op: Operation) -> Result<String, CalcError> {
    evaluate(a, b, shape, op).map(|grid| codec::encode(&grid))
}
