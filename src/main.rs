use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use atlabel::Position;

mod cli;

#[derive(Parser)]
#[command(name = "atlabel")]
#[command(about = "Label declarations with `// @name` comments and complete them with `@`")]
#[command(version)]
struct Cli {
    /// Path to the workspace (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Path to the config file (defaults to .atlabel/config.toml in the workspace)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every annotation in the workspace
    Scan {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the completions offered at a cursor position in a file
    Complete {
        /// File to complete in
        file: PathBuf,

        /// Cursor line (0-based)
        #[arg(long)]
        line: u32,

        /// Cursor column in UTF-16 units (0-based)
        #[arg(long)]
        column: u32,

        /// Print JSON instead of a list
        #[arg(long)]
        json: bool,
    },

    /// Run the local HTTP bridge for editor extensions
    Serve {
        /// Port on 127.0.0.1 (overrides [bridge].port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Initialize a new .atlabel/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    // Determine the working directory
    let work_dir = cli.path.unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        Commands::Scan { json } => {
            let config = cli::load_config(&work_dir, cli.config.as_deref())?;
            cli::scan::scan_command(&work_dir, &config, json)?;
        }
        Commands::Complete {
            file,
            line,
            column,
            json,
        } => {
            let config = cli::load_config(&work_dir, cli.config.as_deref())?;
            cli::complete::complete_command(
                &work_dir,
                &config,
                &file,
                Position::new(line, column),
                json,
            )?;
        }
        Commands::Serve { port } => {
            let config = cli::load_config(&work_dir, cli.config.as_deref())?;
            cli::serve::serve_command(&work_dir, &config, port).await?;
        }
        Commands::Init { force } => {
            cli::init::init_command(&work_dir, cli.config, force)?;
        }
    }

    Ok(())
}
