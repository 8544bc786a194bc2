mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::{CompareArgs, PaymentArgs, ScheduleArgs, ValidateArgs};

/// Fixed-rate loan payments, amortization schedules and loan comparison
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Fixed-rate loan payments, amortization schedules and loan comparison",
    long_about = "A CLI for fixed-rate amortizing loans with decimal precision. \
                  Computes the monthly payment, total payment and total interest, \
                  the payment-by-payment amortization schedule, and a side-by-side \
                  comparison against an alternative loan."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log computation details to stderr (LOANCALC_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the monthly payment, total payment and total interest
    Payment(PaymentArgs),
    /// Generate the payment-by-payment amortization schedule
    Schedule(ScheduleArgs),
    /// Compare the loan against an alternative (alternative minus current)
    Compare(CompareArgs),
    /// Check loan terms without computing anything
    Validate(ValidateArgs),
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

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Compare(args) => commands::loan::run_compare(args),
        Commands::Validate(args) => commands::loan::run_validate(args),
        Commands::Version => {
            println!("loancalc {}", env!("CARGO_PKG_VERSION"));
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
