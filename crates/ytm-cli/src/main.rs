mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::fixed_income::{CalculateArgs, CashFlowArgs, ClassifyArgs};

/// Bond yield-to-maturity calculations
#[derive(Parser)]
#[command(
    name = "ytm",
    version,
    about = "Bond yield-to-maturity calculations",
    long_about = "Solves a fixed-coupon bond's yield to maturity by bisection with decimal \
                  precision, and reports bond equivalent and effective annual yields, the \
                  cash-flow schedule, and whether the bond trades at par, premium or discount."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log solver diagnostics to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve yield to maturity and report the full bond metrics
    Calculate(CalculateArgs),
    /// Print the period-by-period cash-flow schedule
    CashFlows(CashFlowArgs),
    /// Classify a bond as trading at par, premium, or discount
    Classify(ClassifyArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "ytm_core=debug,ytm=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // stdout carries the result, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::fixed_income::run_calculate(args),
        Commands::CashFlows(args) => commands::fixed_income::run_cash_flows(args),
        Commands::Classify(args) => commands::fixed_income::run_classify(args),
        Commands::Version => {
            println!("ytm {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
