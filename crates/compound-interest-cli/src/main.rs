mod commands;
mod input;
mod output;
mod state;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process;

use commands::project::ProjectArgs;
use commands::saved_inputs::SavedInputsArgs;

/// Month-by-month compound interest projections
#[derive(Parser)]
#[command(
    name = "cic",
    version,
    about = "Month-by-month compound interest projections",
    long_about = "Projects a balance month by month from a starting principal, an annual \
                  interest rate and monthly or yearly deposits. The last inputs are \
                  remembered, so later runs only need the flags that change."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Where remembered inputs are kept
    #[arg(long, global = true, env = "CIC_STATE_FILE")]
    state_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a balance with monthly compounding
    Project(ProjectArgs),
    /// Show or clear the remembered inputs
    Inputs(SavedInputsArgs),
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
    env_logger::init();
    let cli = Cli::parse();
    let store = state::StateStore::new(cli.state_file);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Project(args) => commands::project::run_project(args, &cli.output, &store),
        Commands::Inputs(args) => commands::saved_inputs::run_saved_inputs(args, &store),
        Commands::Version => {
            println!("cic {}", env!("CARGO_PKG_VERSION"));
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
