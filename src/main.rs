use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::error;

use ticket_cleaner::config::Config;
use ticket_cleaner::logging;
use ticket_cleaner::pipeline::Pipeline;
use ticket_cleaner::ports::{CommandLauncher, DashboardLauncher, LogAlert, NoDashboard};
use ticket_cleaner::watch::DirectoryPoller;

#[derive(Parser)]
#[command(name = "ticket_cleaner")]
#[command(about = "Cleans helpdesk ticket CSV exports for dashboard use")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML config file; built-in defaults are used if absent
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a single raw export file
    Process {
        /// Path to the raw export
        file: PathBuf,
    },
    /// Clean every export currently in the input directory
    Scan,
    /// Watch the input directory and clean new exports as they arrive
    Watch,
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    if path.exists() {
        Ok(Config::load(path)?)
    } else {
        Ok(Config::default())
    }
}

fn make_launcher(config: &Config) -> Box<dyn DashboardLauncher> {
    match &config.dashboard_command {
        Some(program) => Box::new(CommandLauncher::new(program.clone())),
        None => Box::new(NoDashboard),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    // Initialize logging
    logging::init_logging(&config.log_dir);

    match cli.command {
        Commands::Process { file } => {
            println!("🔄 Cleaning {}...", file.display());
            let pipeline = Pipeline::new(config);
            match pipeline.run_for_file(&file) {
                Ok(summary) => {
                    println!("\n📊 Cleaning results:");
                    println!("   Tickets in: {}", summary.tickets_in);
                    println!("   Rows out: {}", summary.rows_out);
                    println!("   Unassigned tickets: {}", summary.unassigned_tickets);
                    println!("   Output file: {}", summary.output_file.display());
                }
                Err(e) => {
                    error!("Cleaning failed: {}", e);
                    println!("❌ Cleaning failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Scan => {
            println!("🔄 Cleaning existing exports...");
            let launcher = make_launcher(&config);
            let pipeline = Pipeline::new(config);
            let mut poller = DirectoryPoller::new(pipeline, Box::new(LogAlert), launcher);
            poller.scan_existing();
            println!("✅ Scan completed");
        }
        Commands::Watch => {
            let launcher = make_launcher(&config);
            let pipeline = Pipeline::new(config);
            println!(
                "👀 Watching {} for new exports...",
                pipeline.config().input_dir.display()
            );
            let mut poller = DirectoryPoller::new(pipeline, Box::new(LogAlert), launcher);
            poller.scan_existing();
            poller.run();
        }
    }
    Ok(())
}
