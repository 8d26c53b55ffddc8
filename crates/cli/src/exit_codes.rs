//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain    | Description                              |
//! |---------|-----------|------------------------------------------|
//! | 0       | Universal | Success                                  |
//! | 1       | Universal | General error (unspecified)              |
//! | 2       | Universal | CLI usage error (bad args)               |
//! | 3       | Universal | I/O error (stdin, settings file)         |
//! | 10-19   | calc      | Matrix validation and self-test codes    |

use matcalc_engine::CalcError;

// =============================================================================
// Universal (0-3)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// I/O error - reading stdin or writing output failed.
pub const EXIT_IO: u8 = 3;

// =============================================================================
// Calc (10-19)
// =============================================================================

/// An operand's text could not be decoded (empty, bad number, wrong shape).
pub const EXIT_CALC_PARSE: u8 = 10;

/// Operands decoded but their shapes don't fit the operation.
pub const EXIT_CALC_DIMENSION: u8 = 11;

/// One or more built-in self-test checks failed.
pub const EXIT_SELF_TEST_FAILED: u8 = 12;

/// Map a calculation error to its exit code.
pub fn calc_exit_code(err: &CalcError) -> u8 {
    if err.source.is_decode_error() {
        EXIT_CALC_PARSE
    } else {
        EXIT_CALC_DIMENSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matcalc_engine::{Dimensions, MatrixError, Operand, Operation};

    #[test]
    fn decode_errors_are_parse_codes() {
        let err = CalcError::decode(Operand::A, MatrixError::EmptyInput);
        assert_eq!(calc_exit_code(&err), EXIT_CALC_PARSE);
        let err = CalcError::decode(
            Operand::B,
            MatrixError::RaggedRow { row: 2, expected: 2, found: 1 },
        );
        assert_eq!(calc_exit_code(&err), EXIT_CALC_PARSE);
    }

    #[test]
    fn arithmetic_errors_are_dimension_codes() {
        let err = CalcError::arithmetic(MatrixError::DimensionMismatch {
            op: Operation::Add,
            left: Dimensions::new(1, 2),
            right: Dimensions::new(2, 1),
        });
        assert_eq!(calc_exit_code(&err), EXIT_CALC_DIMENSION);
    }
}
