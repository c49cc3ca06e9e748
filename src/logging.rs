//! Logger setup
//!
//! Brief format: `time | LEVEL | file:line | message`.
//! Detailed format additionally carries the module path and thread name.

use std::io::Write;

use crate::error::GameError;
use crate::settings::Settings;

/// Install the global logger. `RUST_LOG` still overrides the configured level.
pub fn init(settings: &Settings) -> Result<(), GameError> {
    let level = settings.log_level()?.to_filter();
    let detailed = settings.log_detailed;

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder.parse_default_env();
    builder.format(move |buf, record| {
        let ts = buf.timestamp_millis();
        let file = record.file().unwrap_or("?");
        let line = record.line().unwrap_or(0);
        if detailed {
            let thread = std::thread::current();
            writeln!(
                buf,
                "{ts} | {:<5} | {} | {file}:{line} | {} | {}",
                record.level(),
                record.module_path().unwrap_or("?"),
                thread.name().unwrap_or("unnamed"),
                record.args()
            )
        } else {
            writeln!(buf, "{ts} | {:<5} | {file}:{line} | {}", record.level(), record.args())
        }
    });

    // A second init (e.g. from tests) keeps the first logger
    if builder.try_init().is_err() {
        log::debug!("Logger already initialised");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_fails_before_install() {
        let settings = Settings {
            log_level: "verbose".into(),
            ..Default::default()
        };
        assert!(matches!(init(&settings), Err(GameError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let settings = Settings::default();
        assert!(init(&settings).is_ok());
        assert!(init(&settings).is_ok());
    }
}
