// Built-in sanity checks and sample operands

use serde::Serialize;

use crate::arith;
use crate::grid::{Grid, Operation};

/// Sample inputs for trying the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Samples {
    pub rows: usize,
    pub cols: usize,
    pub a: &'static str,
    pub b: &'static str,
}

pub const SAMPLES: Samples = Samples { rows: 2, cols: 2, a: "1,2; 3,4", b: "5,6; 7,8" };

/// Outcome of one self-test check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub operation: Operation,
    pub passed: bool,
}

impl std::fmt::Display for CheckResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.passed { "PASS" } else { "FAIL" };
        write!(f, "{} {}", status, self.operation.short_name())
    }
}

fn fixed(rows: &[&[f64]]) -> Grid {
    let rows = rows.iter().map(|r| r.to_vec()).collect();
    Grid::from_rows(rows).unwrap_or_else(Grid::empty)
}

fn check(op: Operation, a: Grid, b: Grid, expected: Grid) -> CheckResult {
    let passed = matches!(arith::apply(op, &a, &b), Ok(ref r) if *r == expected);
    if !passed {
        log::warn!("self test failed for {}", op.verb());
    }
    CheckResult { operation: op, passed }
}

/// Run the fixed add, sub and mul checks.
pub fn run() -> Vec<CheckResult> {
    vec![
        check(
            Operation::Add,
            fixed(&[&[1.0, 2.0], &[3.0, 4.0]]),
            fixed(&[&[5.0, 6.0], &[7.0, 8.0]]),
            fixed(&[&[6.0, 8.0], &[10.0, 12.0]]),
        ),
        check(
            Operation::Subtract,
            fixed(&[&[5.0, 5.0], &[5.0, 5.0]]),
            fixed(&[&[2.0, 3.0], &[4.0, 1.0]]),
            fixed(&[&[3.0, 2.0], &[1.0, 4.0]]),
        ),
        check(
            Operation::Multiply,
            fixed(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]),
            fixed(&[&[7.0, 8.0], &[9.0, 10.0], &[11.0, 12.0]]),
            fixed(&[&[58.0, 64.0], &[139.0, 154.0]]),
        ),
    ]
}

/// One-line report, e.g. `PASS add | PASS sub | PASS mul`.
pub fn report(results: &[CheckResult]) -> String {
    results.iter().map(|r| r.to_string()).collect::<Vec<_>>().join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::{self, Shape};

    #[test]
    fn all_checks_pass() {
        let results = run();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.passed));
        assert_eq!(report(&results), "PASS add | PASS sub | PASS mul");
    }

    #[test]
    fn failed_check_renders_fail() {
        let r = CheckResult { operation: Operation::Multiply, passed: false };
        assert_eq!(r.to_string(), "FAIL mul");
    }

    #[test]
    fn samples_add_cleanly() {
        let shape = Shape::exact(SAMPLES.rows, SAMPLES.cols);
        let out = calc::run(SAMPLES.a, SAMPLES.b, shape, Operation::Add).unwrap();
        assert_eq!(out, "6\t8\n10\t12");
    }
}
