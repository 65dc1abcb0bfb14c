//! Logging and tracing bootstrap.
//!
//! Installs a `tracing-subscriber` fmt subscriber writing to stderr. The `log`
//! bridge is installed alongside it, so records sent through the `log` facade
//! reach the same output as `tracing` events.

use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use loghelper_kernel::settings::{LogFormat, TelemetrySettings};

const FILTER_ENV: &str = "RUST_LOG";

static INSTALLED: OnceCell<()> = OnceCell::new();

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("invalid log filter '{filter}'")]
    InvalidFilter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("failed to install global subscriber: {0}")]
    Install(String),
}

/// Filter directives to use: `RUST_LOG` when set, otherwise the configured filter.
pub fn filter_directives(settings: &TelemetrySettings) -> String {
    match std::env::var(FILTER_ENV) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => settings.filter.clone(),
    }
}

/// Build the [`EnvFilter`] for the given directives.
pub fn build_filter(directives: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directives).map_err(|source| TelemetryError::InvalidFilter {
        filter: directives.to_string(),
        source,
    })
}

/// Initialize the tracing/logging pipeline. Calls after the first are no-ops.
pub fn init(settings: &TelemetrySettings) -> Result<(), TelemetryError> {
    INSTALLED.get_or_try_init(|| install(settings))?;
    Ok(())
}

fn install(settings: &TelemetrySettings) -> Result<(), TelemetryError> {
    let directives = filter_directives(settings);
    let filter = build_filter(&directives)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match settings.log_format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| TelemetryError::Install(e.to_string()))?;

    tracing::debug!(
        target: "loghelper-telemetry",
        filter = %directives,
        format = ?settings.log_format,
        "telemetry initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives_fall_back_to_settings() {
        let settings = TelemetrySettings::default();
        if std::env::var(FILTER_ENV).is_err() {
            assert_eq!(filter_directives(&settings), "debug");
        }
    }

    #[test]
    fn test_build_filter_accepts_directives() {
        assert!(build_filter("debug").is_ok());
        assert!(build_filter("loghelper=trace,warn").is_ok());
    }

    #[test]
    fn test_build_filter_rejects_garbage() {
        let err = build_filter("loghelper=verbose").unwrap_err();
        assert!(matches!(
            err,
            TelemetryError::InvalidFilter { ref filter, .. } if filter == "loghelper=verbose"
        ));
    }

    #[test]
    fn test_init_is_idempotent_and_bridges_log() {
        let settings = TelemetrySettings {
            log_format: LogFormat::Compact,
            filter: "trace".to_string(),
        };

        init(&settings).unwrap();
        init(&settings).unwrap();

        if std::env::var(FILTER_ENV).is_err() {
            assert!(log::log_enabled!(log::Level::Trace));
            assert!(tracing::enabled!(tracing::Level::TRACE));
        }
    }
}
