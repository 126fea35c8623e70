//! Minimal `log` backend writing to stderr

use log::{LevelFilter, Log, Metadata, Record};

static LOGGER: StderrLogger = StderrLogger;

/// Writes every enabled record as `[LEVEL] target: message`
pub struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_record(record));
        }
    }

    fn flush(&self) {}
}

pub fn format_record(record: &Record) -> String {
    format!(
        "[{:<5}] {}: {}",
        record.level(),
        record.target(),
        record.args()
    )
}

/// Install the logger. Debug output with `verbose`, info otherwise.
pub fn init(verbose: bool) -> Result<(), log::SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn test_format_record() {
        let line = format_record(
            &Record::builder()
                .args(format_args!("placed {} doors", 3))
                .level(Level::Info)
                .target("dg_core::generator")
                .build(),
        );
        assert_eq!(line, "[INFO ] dg_core::generator: placed 3 doors");
    }
}
