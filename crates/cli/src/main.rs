// matcalc CLI - headless matrix calculator
// Feeds operand text into matcalc-engine and prints the result or the error.

mod exit_codes;

use std::io::{self, Read, Write};
use std::num::NonZeroUsize;
use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use serde::Serialize;

use matcalc_config::Settings;
use matcalc_engine::{calc, codec, selftest, CalcError, Grid, Operation, Shape};

use exit_codes::{
    calc_exit_code, EXIT_ERROR, EXIT_IO, EXIT_SELF_TEST_FAILED, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "matcalc")]
#[command(about = "Add, subtract and multiply matrices given as delimited text")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Debug logging (same as MATCALC_LOG=debug)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute A op B and print the result as tab-separated rows
    #[command(after_help = "\
Rows are separated by ';' and values by ','. Matrix B's expected shape follows A:
the same shape for add/sub, A.cols rows for mul.

Examples:
  matcalc calc add '1,2; 3,4' '5,6; 7,8' --rows 2 --cols 2
  matcalc calc mul '1,2,3; 4,5,6' '7,8; 9,10; 11,12'
  echo '5,6; 7,8' | matcalc calc sub '1,2; 3,4' -
  matcalc calc add '1,2' '3,4' --json")]
    Calc {
        /// Operation: add, sub or mul (also addition, subtract, +, -, *)
        #[arg(value_parser = Operation::from_str)]
        op: Operation,

        /// Matrix A (or - to read it from stdin)
        #[arg(allow_hyphen_values = true)]
        a: String,

        /// Matrix B (or - to read it from stdin)
        #[arg(allow_hyphen_values = true)]
        b: String,

        /// Expected row count of A (default: settings, else any)
        #[arg(long, short = 'r')]
        rows: Option<NonZeroUsize>,

        /// Expected column count of A (default: settings, else any)
        #[arg(long, short = 'c')]
        cols: Option<NonZeroUsize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print sample operands
    Samples {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the built-in add/sub/mul checks
    SelfTest {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Settings file location and contents
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the settings file path
    Path,
    /// Print the effective settings as JSON
    Show,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  matcalc-engine ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("MATCALC_LOG", default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut json_errors = false;
    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: matcalc <command> [options]");
            eprintln!("       matcalc --help for more information");
            Ok(())
        }
        Some(Commands::Calc { op, a, b, rows, cols, json }) => {
            let settings = Settings::load();
            json_errors = json || settings.json;
            cmd_calc(op, a, b, rows, cols, json_errors, &settings)
        }
        Some(Commands::Samples { json }) => cmd_samples(json),
        Some(Commands::SelfTest { json }) => {
            json_errors = json;
            cmd_self_test(json)
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => cmd_config_path(),
            ConfigCommands::Show => cmd_config_show(),
        },
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            err.print(json_errors);
            ExitCode::from(err.code)
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub kind: &'static str,
    pub message: String,
    pub hint: Option<String>,
    pub operand: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, "usage", msg)
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(EXIT_IO, "io_error", msg)
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, "error", msg)
    }

    fn new(code: u8, kind: &'static str, msg: impl Into<String>) -> Self {
        Self { code, kind, message: msg.into(), hint: None, operand: None }
    }

    /// Create error from a failed calculation with proper exit code.
    pub fn calc(err: &CalcError) -> Self {
        let hint = match err.kind() {
            "row_count_mismatch" | "col_count_mismatch" => {
                Some("check --rows/--cols (or matrix.rows/matrix.cols in settings)".to_string())
            }
            "invalid_number" => Some("separate rows with ';' and values with ','".to_string()),
            _ => None,
        };
        Self {
            code: calc_exit_code(err),
            kind: err.kind(),
            message: err.to_string(),
            hint,
            operand: err.operand.map(|o| o.to_string().to_ascii_lowercase()),
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Print error to stderr (human-readable by default).
    fn print(&self, json: bool) {
        if json {
            let output = ErrorOutput {
                error: self.kind,
                message: &self.message,
                operand: self.operand.as_deref(),
                exit_code: self.code,
            };
            if let Ok(line) = serde_json::to_string(&output) {
                eprintln!("{}", line);
            }
        } else {
            if !self.message.is_empty() {
                eprintln!("error: {}", self.message);
            }
            if let Some(hint) = &self.hint {
                eprintln!("hint:  {}", hint);
            }
        }
    }
}

/// Structured error output, written to stderr with --json.
#[derive(Serialize)]
struct ErrorOutput<'a> {
    error: &'a str,
    message: &'a str,
    operand: Option<&'a str>,
    exit_code: u8,
}

fn write_stdout(text: &str) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", text).map_err(|e| CliError::io(e.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string(value).map_err(|e| CliError::other(format!("JSON error: {e}")))
}

// ============================================================================
// calc
// ============================================================================

/// Successful calculation, as printed with --json.
#[derive(Serialize)]
struct CalcOutput {
    operation: Operation,
    rows: usize,
    cols: usize,
    values: Vec<Vec<JsonCell>>,
}

/// JSON has no non-finite numbers; those cells are written as "inf", "-inf", "NaN".
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum JsonCell {
    Number(f64),
    Text(String),
}

impl From<f64> for JsonCell {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            JsonCell::Number(value)
        } else {
            JsonCell::Text(value.to_string())
        }
    }
}

impl CalcOutput {
    fn new(operation: Operation, grid: &Grid) -> Self {
        Self {
            operation,
            rows: grid.rows(),
            cols: grid.cols(),
            values: grid
                .iter_rows()
                .map(|row| row.iter().map(|&v| JsonCell::from(v)).collect())
                .collect(),
        }
    }
}

fn cmd_calc(
    op: Operation,
    a: String,
    b: String,
    rows: Option<NonZeroUsize>,
    cols: Option<NonZeroUsize>,
    json: bool,
    settings: &Settings,
) -> Result<(), CliError> {
    let (a, b) = resolve_operands(a, b, read_stdin)?;

    let shape = Shape::new(
        rows.map(NonZeroUsize::get).or(settings.expected_rows()),
        cols.map(NonZeroUsize::get).or(settings.expected_cols()),
    );
    log::debug!("{} with A shape {:?}", op.verb(), shape);

    let grid = calc::evaluate(&a, &b, shape, op).map_err(|e| CliError::calc(&e))?;

    if json {
        write_stdout(&to_json(&CalcOutput::new(op, &grid))?)
    } else {
        write_stdout(&render(&grid, &settings.placeholder))
    }
}

/// Rendered result, or the placeholder when there is nothing to show.
fn render(grid: &Grid, placeholder: &str) -> String {
    let text = codec::encode(grid);
    if text.is_empty() {
        placeholder.to_string()
    } else {
        text
    }
}

/// Replace a `-` operand with stdin. At most one operand may come from stdin.
fn resolve_operands(
    a: String,
    b: String,
    stdin: impl FnOnce() -> Result<String, CliError>,
) -> Result<(String, String), CliError> {
    match (a == "-", b == "-") {
        (true, true) => Err(CliError::args("only one operand can be read from stdin")
            .with_hint("pass the other matrix as text")),
        (true, false) => Ok((stdin()?, b)),
        (false, true) => Ok((a, stdin()?)),
        (false, false) => Ok((a, b)),
    }
}

fn read_stdin() -> Result<String, CliError> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| CliError::io(format!("cannot read stdin: {e}")))?;
    Ok(content)
}

// ============================================================================
// samples / self-test
// ============================================================================

fn cmd_samples(json: bool) -> Result<(), CliError> {
    let samples = selftest::SAMPLES;
    if json {
        return write_stdout(&to_json(&samples)?);
    }
    write_stdout(&format!(
        "rows: {}\ncols: {}\nA:    {}\nB:    {}",
        samples.rows, samples.cols, samples.a, samples.b
    ))
}

fn cmd_self_test(json: bool) -> Result<(), CliError> {
    let results = selftest::run();
    let report = selftest::report(&results);

    if json {
        write_stdout(&to_json(&results)?)?;
    } else {
        write_stdout(&report)?;
    }

    if results.iter().all(|r| r.passed) {
        Ok(())
    } else {
        Err(CliError::new(EXIT_SELF_TEST_FAILED, "self_test_failed", format!("self test failed: {report}")))
    }
}

// ============================================================================
// config
// ============================================================================

fn cmd_config_path() -> Result<(), CliError> {
    write_stdout(&Settings::config_path_display())
}

fn cmd_config_show() -> Result<(), CliError> {
    let settings = Settings::load();
    let json = serde_json::to_string_pretty(&settings)
        .map_err(|e| CliError::other(format!("JSON error: {e}")))?;
    write_stdout(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_stdin() -> Result<String, CliError> {
        panic!("stdin should not be read")
    }

    #[test]
    fn operands_without_stdin() {
        let (a, b) = resolve_operands("1".into(), "2".into(), no_stdin).unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("1", "2"));
    }

    #[test]
    fn dash_reads_stdin() {
        let (a, b) = resolve_operands("1".into(), "-".into(), || Ok("5,6".into())).unwrap();
        assert_eq!(a, "1");
        assert_eq!(b, "5,6");
    }

    #[test]
    fn both_dashes_is_usage_error() {
        let err = resolve_operands("-".into(), "-".into(), no_stdin).unwrap_err();
        assert_eq!(err.code, EXIT_USAGE);
    }

    #[test]
    fn empty_result_renders_placeholder() {
        assert_eq!(render(&Grid::empty(), "—"), "—");
        let g = Grid::from_rows(vec![vec![1.0, 2.0]]).unwrap();
        assert_eq!(render(&g, "—"), "1\t2");
    }

    #[test]
    fn calc_error_carries_operand_and_hint() {
        let err = calc::evaluate("1,2", "1,x", Shape::ANY, Operation::Add).unwrap_err();
        let cli = CliError::calc(&err);
        assert_eq!(cli.kind, "invalid_number");
        assert_eq!(cli.operand.as_deref(), Some("b"));
        assert_eq!(cli.message, "Matrix B: Invalid number at row 1");
        assert!(cli.hint.is_some());
    }

    fn parsed_op(args: &[&str]) -> Option<Operation> {
        match Cli::try_parse_from(args).ok()?.command {
            Some(Commands::Calc { op, .. }) => Some(op),
            _ => None,
        }
    }

    #[test]
    fn calc_op_accepts_operation_aliases() {
        assert_eq!(parsed_op(&["matcalc", "calc", "sub", "1", "2"]), Some(Operation::Subtract));
        assert_eq!(parsed_op(&["matcalc", "calc", "subtract", "1", "2"]), Some(Operation::Subtract));
        assert_eq!(parsed_op(&["matcalc", "calc", "Multiply", "1", "2"]), Some(Operation::Multiply));
        assert_eq!(parsed_op(&["matcalc", "calc", "+", "1", "2"]), Some(Operation::Add));
        assert_eq!(parsed_op(&["matcalc", "calc", "div", "1", "2"]), None);
    }

    #[test]
    fn json_cells_keep_non_finite_values() {
        let g = Grid::from_rows(vec![vec![1.5, f64::INFINITY, f64::NEG_INFINITY, f64::NAN]]).unwrap();
        let json = to_json(&CalcOutput::new(Operation::Add, &g)).unwrap();
        assert_eq!(
            json,
            r#"{"operation":"add","rows":1,"cols":4,"values":[[1.5,"inf","-inf","NaN"]]}"#
        );
    }
}
