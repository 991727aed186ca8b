use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use ticket_cleaner::config::Config;
use ticket_cleaner::pipeline::ingest;
use ticket_cleaner::pipeline::validate;

/// Inspect a raw export before it goes through the cleaning pipeline.
#[derive(Parser, Debug)]
#[command(name = "check-export", version, about = "Report encoding, headers and missing columns of a raw export")]
struct Cli {
    /// Path to the raw export to inspect
    path: PathBuf,

    /// Optional path to a config file (defaults to config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let config_path = args.config.unwrap_or_else(|| PathBuf::from("config.toml"));
    let config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        Config::default()
    };

    let (text, encoding) = ingest::decode_file(&args.path, &config.encodings)?;
    println!("encoding: {encoding}");

    let table = ingest::parse_table(&text)?;
    println!("columns ({}):", table.columns.len());
    for column in &table.columns {
        println!("- {column}");
    }
    println!("tickets: {}", table.rows.len());

    match validate::require_columns(&table, &config.columns.required()) {
        Ok(()) => {
            println!("all required columns present");
            Ok(())
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1)
        }
    }
}
