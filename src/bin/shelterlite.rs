use clap::{Parser, Subcommand};
use shelterlite::cli as prog_cli;
use shelterlite::{Config, ShelterDb};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "shelterlite", about = "Animal shelter dashboard data layer", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a shelter outcomes CSV into the store
    Import {
        file: PathBuf,
        /// Print the resulting display table afterwards
        #[arg(long)]
        table: bool,
    },
    /// Print the display table as JSON records
    Table {
        /// Filter name (WATER, MOUNTAIN, DISASTER) or RESET
        #[arg(long)]
        filter: Option<String>,
        /// Bypass the read cache
        #[arg(long)]
        refresh: bool,
    },
    /// Print breed counts for the chart
    Breeds {
        #[arg(long)]
        filter: Option<String>,
    },
    /// Print the map marker for a selected row
    Marker {
        #[arg(long)]
        filter: Option<String>,
        #[arg(long, default_value_t = 0)]
        row: usize,
    },
    /// List registered filter names
    Filters,
    /// Count records matching an ad-hoc JSON query
    Count { query_json: String },
}

fn main() -> ExitCode {
    shelterlite::init();
    let cli = Cli::parse();

    let db = match Config::from_env().and_then(ShelterDb::open) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Import { file, table } => prog_cli::run(&db, prog_cli::Command::Import { file })
            .and_then(|out| {
                if table {
                    println!("{out}");
                    prog_cli::run(&db, prog_cli::Command::Table { filter: None, refresh: false })
                } else {
                    Ok(out)
                }
            }),
        Commands::Table { filter, refresh } => {
            prog_cli::run(&db, prog_cli::Command::Table { filter, refresh })
        }
        Commands::Breeds { filter } => prog_cli::run(&db, prog_cli::Command::Breeds { filter }),
        Commands::Marker { filter, row } => {
            prog_cli::run(&db, prog_cli::Command::Marker { filter, row })
        }
        Commands::Filters => prog_cli::run(&db, prog_cli::Command::Filters),
        Commands::Count { query_json } => {
            prog_cli::run(&db, prog_cli::Command::Count { query_json })
        }
    };

    match result {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
