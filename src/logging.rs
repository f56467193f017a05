//! Logger setup. Terminal output always; an optional file copy.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Install the global logger. `Debug` when verbose, `Info` otherwise.
pub fn initialize(verbose: bool, log_file: Option<&Path>) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        match File::create(path) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => eprintln!("Warning: could not create log file at {path:?}: {err}"),
        }
    }

    // Ignore the error if a logger is already installed.
    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_allow_str("catwatch")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_twice_is_harmless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catwatch.log");
        initialize(false, Some(&path));
        initialize(true, None);
        log::info!("logger ready");
        assert!(path.exists());
    }
}
