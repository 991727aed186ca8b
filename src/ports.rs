use std::path::Path;
use std::process::Command;
use tracing::{error, info, warn};

/// Failure reporting channel for the glue around the pipeline. The core
/// never alerts on its own; whoever drives it decides where failures go.
pub trait AlertSink {
    fn alert(&self, context: &str, message: &str);
}

/// Routes alerts through the tracing subscriber.
pub struct LogAlert;

impl AlertSink for LogAlert {
    fn alert(&self, context: &str, message: &str) {
        error!(context, "{}", message);
    }
}

/// Hands the cleaned file to a viewer after a successful run.
pub trait DashboardLauncher {
    fn launch(&self, output_path: &Path);
}

/// Spawns a configured viewer command with the output path as its argument.
/// Launch failures are logged, never propagated.
pub struct CommandLauncher {
    program: String,
}

impl CommandLauncher {
    pub fn new(program: String) -> Self {
        Self { program }
    }
}

impl DashboardLauncher for CommandLauncher {
    fn launch(&self, output_path: &Path) {
        match Command::new(&self.program).arg(output_path).spawn() {
            Ok(_) => info!("Launched dashboard viewer: {}", self.program),
            Err(e) => warn!("Failed to launch dashboard viewer {}: {}", self.program, e),
        }
    }
}

/// For deployments without a viewer.
pub struct NoDashboard;

impl DashboardLauncher for NoDashboard {
    fn launch(&self, _output_path: &Path) {}
}
