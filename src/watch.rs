use crate::pipeline::Pipeline;
use crate::ports::{AlertSink, DashboardLauncher};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use std::{fs, thread};
use tracing::{error, info, warn};

/// Thin glue around the pipeline: scans the input directory on a fixed
/// cadence and cleans any `.csv` export it has not seen yet. One file is
/// processed to completion before the next is looked at; a failed file is
/// reported and skipped, never retried.
pub struct DirectoryPoller {
    pipeline: Pipeline,
    alerts: Box<dyn AlertSink>,
    dashboard: Box<dyn DashboardLauncher>,
    seen: HashMap<PathBuf, SystemTime>,
}

impl DirectoryPoller {
    pub fn new(
        pipeline: Pipeline,
        alerts: Box<dyn AlertSink>,
        dashboard: Box<dyn DashboardLauncher>,
    ) -> Self {
        Self {
            pipeline,
            alerts,
            dashboard,
            seen: HashMap::new(),
        }
    }

    fn csv_files(&self) -> Vec<(PathBuf, SystemTime)> {
        let input_dir = &self.pipeline.config().input_dir;
        let entries = match fs::read_dir(input_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot read input directory {}: {}", input_dir.display(), e);
                return Vec::new();
            }
        };

        let mut files = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let is_csv = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !is_csv {
                continue;
            }
            match entry.metadata().and_then(|m| m.modified()) {
                Ok(mtime) => files.push((path, mtime)),
                Err(e) => warn!("Cannot stat {}: {}", path.display(), e),
            }
        }
        files.sort();
        files
    }

    /// Startup sweep: cleans every export already sitting in the input
    /// directory and marks it seen.
    pub fn scan_existing(&mut self) {
        for (path, mtime) in self.csv_files() {
            info!("Processing existing export: {}", path.display());
            self.seen.insert(path.clone(), mtime);
            self.process(&path);
        }
    }

    /// One poll round: picks up files that are new or rewritten since the
    /// last round.
    pub fn poll_once(&mut self) {
        for (path, mtime) in self.csv_files() {
            if self.seen.get(&path) == Some(&mtime) {
                continue;
            }
            info!("New export detected: {}", path.display());
            self.seen.insert(path.clone(), mtime);
            self.process(&path);
        }
    }

    /// Blocks forever, polling on the configured cadence.
    pub fn run(&mut self) {
        let interval = Duration::from_secs(self.pipeline.config().poll_interval_secs);
        info!(
            "👀 Watching {} every {}s",
            self.pipeline.config().input_dir.display(),
            interval.as_secs()
        );
        loop {
            self.poll_once();
            thread::sleep(interval);
        }
    }

    fn process(&self, path: &Path) {
        match self.pipeline.run_for_file(path) {
            Ok(summary) => {
                info!(
                    "Cleaned {} into {} ({} rows)",
                    summary.input_file.display(),
                    summary.output_file.display(),
                    summary.rows_out
                );
                self.dashboard.launch(&summary.output_file);
            }
            Err(e) => {
                error!("Skipping {}: {}", path.display(), e);
                self.alerts.alert(&path.display().to_string(), &e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    struct CountingLauncher(Arc<AtomicUsize>);

    impl DashboardLauncher for CountingLauncher {
        fn launch(&self, _output_path: &Path) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct CollectingAlerts(Arc<Mutex<Vec<String>>>);

    impl AlertSink for CollectingAlerts {
        fn alert(&self, _context: &str, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    fn poller_in(
        dir: &Path,
        launches: Arc<AtomicUsize>,
        alerts: Arc<Mutex<Vec<String>>>,
    ) -> DirectoryPoller {
        let config = Config {
            input_dir: dir.join("raw"),
            output_file: dir.join("processed").join("cleaned_latest.csv"),
            log_dir: dir.join("logs"),
            ..Config::default()
        };
        fs::create_dir_all(&config.input_dir).unwrap();
        DirectoryPoller::new(
            Pipeline::new(config),
            Box::new(CollectingAlerts(alerts)),
            Box::new(CountingLauncher(launches)),
        )
    }

    const RAW: &str = "ID;Titre;Attribué à - Technicien;Demandeur - Demandeur\n\
                       1;Panne;Jean Dupont;Luc Besson\n";

    #[test]
    fn test_scan_existing_cleans_and_launches_once() {
        let dir = tempdir().unwrap();
        let launches = Arc::new(AtomicUsize::new(0));
        let alerts = Arc::new(Mutex::new(Vec::new()));
        let mut poller = poller_in(dir.path(), launches.clone(), alerts.clone());

        fs::write(dir.path().join("raw").join("export.csv"), RAW).unwrap();
        poller.scan_existing();

        assert_eq!(launches.load(Ordering::SeqCst), 1);
        assert!(dir.path().join("processed").join("cleaned_latest.csv").exists());

        // Unchanged file is not reprocessed on the next round
        poller.poll_once();
        assert_eq!(launches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_poll_once_picks_up_new_files() {
        let dir = tempdir().unwrap();
        let launches = Arc::new(AtomicUsize::new(0));
        let alerts = Arc::new(Mutex::new(Vec::new()));
        let mut poller = poller_in(dir.path(), launches.clone(), alerts.clone());

        poller.poll_once();
        assert_eq!(launches.load(Ordering::SeqCst), 0);

        fs::write(dir.path().join("raw").join("export.csv"), RAW).unwrap();
        poller.poll_once();
        assert_eq!(launches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_file_alerts_and_does_not_launch() {
        let dir = tempdir().unwrap();
        let launches = Arc::new(AtomicUsize::new(0));
        let alerts = Arc::new(Mutex::new(Vec::new()));
        let mut poller = poller_in(dir.path(), launches.clone(), alerts.clone());

        fs::write(dir.path().join("raw").join("broken.csv"), "ID;Titre\n1;x\n").unwrap();
        poller.poll_once();

        assert_eq!(launches.load(Ordering::SeqCst), 0);
        let messages = alerts.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("missing required columns"));
    }

    #[test]
    fn test_non_csv_files_are_ignored() {
        let dir = tempdir().unwrap();
        let launches = Arc::new(AtomicUsize::new(0));
        let alerts = Arc::new(Mutex::new(Vec::new()));
        let mut poller = poller_in(dir.path(), launches.clone(), alerts.clone());

        fs::write(dir.path().join("raw").join("notes.txt"), "hello").unwrap();
        poller.poll_once();

        assert_eq!(launches.load(Ordering::SeqCst), 0);
        assert!(alerts.lock().unwrap().is_empty());
    }
}
