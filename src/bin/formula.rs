//! Command-line front end: evaluate one formula, or verify a file of test cases.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, ValueEnum};
use env_logger::Env;
use formulang::formula::{load_test_cases, run_test_cases};
use formulang::{EngineConfig, FormulaEngine, StdLibrary, Variables, fmt_num};
use log::info;
use std::path::PathBuf;

/// Compile and evaluate formulas
#[derive(Parser)]
#[command(
    name = "formula",
    version,
    about = "Compile and evaluate formulas",
    after_help = r#"Examples:
  formula --expr "(1 + 2) * 3"
  formula --expr "[x] * 2" --var x=21
  formula --expr "(0.1 == 0.105 ? 1 : 0)" --epsilon 0.01
  formula --test cases.csv

Environment Variables:
  RUST_LOG=debug               Overrides --log-level
"#
)]
struct Cli {
    /// Formula to evaluate
    #[arg(short, long, conflicts_with = "test")]
    expr: Option<String>,

    /// CSV file of `expression,expected` rows (first row is a header)
    #[arg(short, long)]
    test: Option<PathBuf>,

    /// Variable binding, repeatable
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
    vars: Vec<(String, f64)>,

    /// Tolerance for ==, !=, <= and >=
    #[arg(long, default_value_t = 0.0)]
    epsilon: f64,

    /// Print the compiled tree's lexemes before the result
    #[arg(long)]
    tree: bool,

    /// List built-in functions and exit
    #[arg(long)]
    functions: bool,

    /// Set log level
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn parse_binding(s: &str) -> std::result::Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{}`", s))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid number `{}` for `{}`", value, name))?;
    Ok((name.trim().to_string(), value))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level.as_str())).init();

    if cli.functions {
        let mut names: Vec<_> = StdLibrary::names().collect();
        names.sort_unstable();
        for name in names {
            println!("{}", name);
        }
        return Ok(());
    }

    let engine = FormulaEngine::new(EngineConfig::default().with_epsilon(cli.epsilon));
    let variables: Variables = cli.vars.into_iter().collect();

    match (cli.expr, cli.test) {
        (Some(expr), None) => {
            let tree = engine
                .compile(&expr)
                .with_context(|| format!("failed to compile `{}`", expr))?;
            if cli.tree {
                println!("{}", tree);
            }
            let value = engine
                .evaluate(&tree, &variables)
                .with_context(|| format!("failed to evaluate `{}`", expr))?;
            println!("{}", fmt_num(value));
        },
        (None, Some(path)) => {
            let cases = load_test_cases(&path)
                .with_context(|| format!("failed to read test cases from {}", path.display()))?;
            info!("running {} test cases from {}", cases.len(), path.display());

            let report = run_test_cases(&engine, &cases, &variables);
            println!("{}", report);
            if !report.all_passed() {
                bail!("{} of {} test cases failed", report.failed(), report.outcomes.len());
            }
        },
        _ => {
            Cli::command().print_help()?;
        },
    }

    Ok(())
}
