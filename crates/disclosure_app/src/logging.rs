//! Logger setup for the harvester binary.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use serde::Deserialize;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Log file used when `harvest.ron` does not name one.
pub const DEFAULT_LOG_FILE: &str = "harvest.log";

/// Where run progress is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum LogDestination {
    File,
    #[default]
    Terminal,
    Both,
}

impl LogDestination {
    fn to_terminal(self) -> bool {
        matches!(self, Self::Terminal | Self::Both)
    }

    fn to_file(self) -> bool {
        matches!(self, Self::File | Self::Both)
    }
}

/// Installs the global logger. A log file that cannot be created is reported
/// on stderr and the run continues with whatever sinks remain.
pub fn initialize(destination: LogDestination, log_file: &Path) {
    let config = harvest_log_config();
    let mut sinks: Vec<Box<dyn SharedLogger>> = Vec::new();

    if destination.to_terminal() {
        sinks.push(TermLogger::new(
            LevelFilter::Info,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if destination.to_file() {
        match File::create(log_file) {
            Ok(file) => sinks.push(WriteLogger::new(LevelFilter::Info, config, file)),
            Err(err) => eprintln!("Cannot write log file {}: {}", log_file.display(), err),
        }
    }

    if !sinks.is_empty() {
        let _ = CombinedLogger::init(sinks);
    }
}

fn harvest_log_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destinations_select_sinks() {
        assert!(LogDestination::Terminal.to_terminal());
        assert!(!LogDestination::Terminal.to_file());
        assert!(LogDestination::File.to_file());
        assert!(!LogDestination::File.to_terminal());
        assert!(LogDestination::Both.to_file() && LogDestination::Both.to_terminal());
    }
}
