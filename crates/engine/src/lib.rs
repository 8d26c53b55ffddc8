//! `matcalc-engine` — matrix text codec and arithmetic.
//!
//! Pure engine crate: takes operand text and expected dimensions, returns a
//! rendered result or a validation error. No CLI or IO dependencies.

pub mod arith;
pub mod calc;
pub mod codec;
pub mod error;
pub mod grid;
pub mod selftest;

pub use calc::{evaluate, run, Shape};
pub use codec::{decode, encode};
pub use error::{CalcError, MatrixError, Operand};
pub use grid::{Dimensions, Grid, Operation};
