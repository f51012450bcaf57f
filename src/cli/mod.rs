//! vitrina CLI - browse gallery datasets from the terminal
//!
//! Command-line front end over the library pipeline.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};

mod basic;

/// vitrina - Data pipeline for searchable image galleries
#[derive(Parser)]
#[command(name = "vitrina")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered datasets
    Datasets,
    /// Load a dataset and display its header and row counts
    Info {
        /// Dataset id
        id: String,
    },
    /// Display one page of a dataset
    Page {
        /// Dataset id
        id: String,
        /// Search query
        #[arg(short, long, default_value = "")]
        query: String,
        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Rows per page (10, 20, 50 or 100); remembered for next time
        #[arg(long)]
        page_size: Option<usize>,
        /// Shuffle rows before paging
        #[arg(long)]
        shuffle: bool,
        /// Seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,
        /// Print the view model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Display the word cloud of a dataset
    Cloud {
        /// Dataset id
        id: String,
        /// Search query
        #[arg(short, long, default_value = "")]
        query: String,
        /// Number of words to display
        #[arg(short = 'n', long, default_value = "20")]
        top: usize,
        /// Print the sized words as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Run the vitrina CLI.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = basic::load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Datasets => basic::cmd_datasets(&config),
        Commands::Info { id } => basic::cmd_info(&config, &id),
        Commands::Page {
            id,
            query,
            page,
            page_size,
            shuffle,
            seed,
            json,
        } => {
            let mut config = config;
            config.shuffle |= shuffle || seed.is_some();
            config.seed = seed.or(config.seed);
            basic::cmd_page(
                &config,
                &id,
                &basic::PageArgs {
                    query,
                    page,
                    page_size,
                    json,
                },
            )
        }
        Commands::Cloud {
            id,
            query,
            top,
            json,
        } => basic::cmd_cloud(&config, &id, &query, top, json),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
