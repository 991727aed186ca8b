pub mod dates;
pub mod expand;
pub mod ingest;
pub mod normalize;
pub mod validate;
pub mod write;

use crate::config::Config;
use crate::error::{CleanerError, Result};
use metrics::{counter, histogram};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Result of a complete cleaning run for one raw export
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub tickets_in: usize,
    pub rows_out: usize,
    /// Rows emitted with a null technician (tickets nobody was assigned to)
    pub unassigned_tickets: usize,
}

/// Chains ingest -> validate -> expand -> date coercion -> write for a
/// single raw export. One instance is shared across a whole watch session;
/// each run is synchronous and independent.
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the full pipeline for one file. The first component failure is
    /// wrapped with the triggering path so the caller has enough context to
    /// log; the prior cleaned file is never touched on failure.
    pub fn run_for_file(&self, path: &Path) -> Result<RunSummary> {
        self.run_inner(path).map_err(|source| {
            counter!("cleaner_run_errors_total").increment(1);
            CleanerError::Pipeline {
                path: path.display().to_string(),
                source: Box::new(source),
            }
        })
    }

    #[instrument(skip(self, path), fields(file = %path.display()))]
    fn run_inner(&self, path: &Path) -> Result<RunSummary> {
        counter!("cleaner_runs_total").increment(1);
        let t_run = std::time::Instant::now();

        info!("📥 Reading raw export");
        let table = ingest::read_csv(path, &self.config.encodings)?;
        let tickets_in = table.rows.len();
        info!("✅ Parsed {} tickets, {} columns", tickets_in, table.columns.len());

        validate::require_columns(&table, &self.config.columns.required())?;

        info!("🔧 Expanding technicians");
        let mut table = expand::expand_rows(table, &self.config.columns)?;
        let tech_idx = table
            .column_index(&self.config.columns.technician_out)
            .ok_or_else(|| {
                CleanerError::MissingColumns(vec![self.config.columns.technician_out.clone()])
            })?;
        let unassigned_tickets = table.rows.iter().filter(|row| row[tech_idx].is_null()).count();

        dates::coerce_dates(&mut table, &self.config.date_keywords);

        info!("💾 Writing cleaned output to {}", self.config.output_file.display());
        write::write_csv(&table, &self.config.output_file)?;

        let rows_out = table.rows.len();
        counter!("cleaner_rows_out_total").increment(rows_out as u64);
        histogram!("cleaner_run_duration_seconds").record(t_run.elapsed().as_secs_f64());
        info!(
            "✅ Cleaned {} tickets into {} rows ({} unassigned)",
            tickets_in, rows_out, unassigned_tickets
        );

        Ok(RunSummary {
            input_file: path.to_path_buf(),
            output_file: self.config.output_file.clone(),
            tickets_in,
            rows_out,
            unassigned_tickets,
        })
    }
}
