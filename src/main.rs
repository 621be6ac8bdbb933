//! CLI entry point for `sqlparam`.

use std::io::Read;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use sqlparam::output::formatter::{self, OutputFormat};
use sqlparam::parser::options::{ParserOptions, ProductMode, SqlDialect};
use sqlparam::rewriter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sqlparam",
    about = "Replace literal constants in SQL with named query parameters"
)]
struct Cli {
    /// Input SQL file (reads standard input when omitted)
    input: Option<PathBuf>,

    /// SQL dialect used to parse the input
    #[arg(long, value_enum)]
    dialect: Option<SqlDialect>,

    /// Type naming convention for parameter names
    #[arg(long, value_enum)]
    product_mode: Option<ProductMode>,

    /// JSON file with parser options; explicit flags take precedence
    #[arg(long)]
    options: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write output to this file instead of standard output
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print verbose diagnostics
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = match resolve_options(&cli) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };

    let sql = match read_input(cli.input.as_deref()) {
        Ok(sql) => sql,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };

    let replacement = match rewriter::replace_literals_in_sql(&sql, &options) {
        Ok(replacement) => replacement,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(e.exit_code());
        }
    };

    if cli.verbose {
        for (name, value) in &replacement.parameters {
            eprintln!("{name} = {value}");
        }
    }

    let rendered = match formatter::render(&replacement, cli.format) {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };
    if let Err(e) = formatter::write_output(cli.output.as_deref(), &rendered) {
        eprintln!("Error: {e}");
        process::exit(2);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "sqlparam=debug" } else { "sqlparam=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

/// CLI defaults: `BigQuery` dialect and user-facing type names.
fn resolve_options(cli: &Cli) -> Result<ParserOptions, String> {
    let mut options = match &cli.options {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
            ParserOptions::from_json(&json).map_err(|e| e.to_string())?
        }
        None => ParserOptions::new(SqlDialect::BigQuery, ProductMode::External),
    };
    if let Some(dialect) = cli.dialect {
        options.dialect = dialect;
    }
    if let Some(product_mode) = cli.product_mode {
        options.product_mode = product_mode;
    }
    Ok(options)
}

fn read_input(path: Option<&std::path::Path>) -> Result<String, String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display())),
        None => {
            let mut sql = String::new();
            std::io::stdin()
                .read_to_string(&mut sql)
                .map_err(|e| format!("Failed to read standard input: {e}"))?;
            Ok(sql)
        }
    }
}
