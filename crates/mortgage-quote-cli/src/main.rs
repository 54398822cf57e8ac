mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::gate::GateArgs;
use commands::payment::PaymentArgs;
use commands::quote::QuoteArgs;
use commands::resolve::ResolveArgs;

/// Mortgage renewal/refinance rate quoting
#[derive(Parser)]
#[command(
    name = "mq",
    version,
    about = "Mortgage renewal/refinance rate quoting",
    long_about = "Resolves rate cells out of a per-province rate table and computes \
                  monthly payments under the Canadian semi-annual-compounding \
                  convention. Quotes all five offered terms (3/4/5-yr fixed, \
                  3/5-yr variable) for a borrower profile."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote all five terms for a borrower profile
    Quote(QuoteArgs),
    /// Compute a monthly payment (semi-annual compounding annuity)
    Payment(PaymentArgs),
    /// Resolve a single rate cell out of a rate table
    Resolve(ResolveArgs),
    /// Evaluate the renewal-page 80% LTV edit gate
    Gate(GateArgs),
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

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Quote(args) => commands::quote::run_quote(args),
        Commands::Payment(args) => commands::payment::run_payment(args),
        Commands::Resolve(args) => commands::resolve::run_resolve(args),
        Commands::Gate(args) => commands::gate::run_gate(args),
        Commands::Version => {
            println!("mq {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
