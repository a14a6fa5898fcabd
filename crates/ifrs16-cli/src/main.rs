mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::lease::LeaseArgs;

/// IFRS 16 lease liability and amortisation schedules
#[derive(Parser)]
#[command(
    name = "ifrs16",
    version,
    about = "IFRS 16 lease liability and amortisation schedules",
    long_about = "Measures a lessee's lease under IFRS 16 with decimal precision: \
                  initial lease liability, right-of-use asset, the effective-interest \
                  amortisation schedule, straight-line depreciation and the journals \
                  posted each year."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Decimal places shown by table, csv and minimal output
    #[arg(long, default_value_t = 2, global = true)]
    dp: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Full measurement: schedule, ROU roll-forward, cumulative totals and journals
    Schedule(LeaseArgs),
    /// Initial lease liability (present value of payments)
    PresentValue(LeaseArgs),
    /// Straight-line depreciation of the right-of-use asset
    Depreciation(LeaseArgs),
    /// Commencement and year-by-year journal entries
    Journals(LeaseArgs),
    /// List the chart of accounts used by the journals
    Accounts,
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

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ifrs16=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::lease::run_schedule(args),
        Commands::PresentValue(args) => commands::lease::run_present_value(args),
        Commands::Depreciation(args) => commands::lease::run_depreciation(args),
        Commands::Journals(args) => commands::lease::run_journals(args),
        Commands::Accounts => commands::lease::run_accounts(),
        Commands::Version => {
            println!("ifrs16 {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, cli.dp, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
