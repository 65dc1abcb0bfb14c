//! loghelper application library
//!
//! The trace helper and the demo that the `loghelper-demo` and `loghelper`
//! binaries drive, plus the wiring shared by both binaries.

pub mod demo;
pub mod helper;
pub mod utils;

use std::sync::Arc;

use anyhow::Context;
use loghelper_enhance::LogStringModifier;
use loghelper_kernel::sink::{LogFacadeLogger, TracingLogger};
use loghelper_kernel::{Logger, Settings};

use crate::helper::TraceHelper;

/// The logging front ends, enhanced according to `settings`.
pub struct FrontEnds {
    pub log_facade: Box<dyn Logger>,
    pub tracing: Box<dyn Logger>,
    modifier: Option<Arc<dyn LogStringModifier>>,
}

impl FrontEnds {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let modifier = loghelper_enhance::modifier(&settings.enhance)
            .context("failed to configure log message enhancement")?;

        let log_facade = loghelper_enhance::wrap(
            LogFacadeLogger::new(utils::log_target("demo")),
            modifier.as_ref(),
        );
        let tracing = loghelper_enhance::wrap(
            TracingLogger::new(demo::TRACING_TARGET),
            modifier.as_ref(),
        );

        Ok(Self {
            log_facade,
            tracing,
            modifier,
        })
    }

    /// Trace helper logging through the `log` facade under the `helper` target.
    pub fn trace_helper(&self) -> TraceHelper {
        let logger = loghelper_enhance::wrap(
            LogFacadeLogger::new(utils::log_target("helper")),
            self.modifier.as_ref(),
        );
        TraceHelper::new(Arc::from(logger))
    }

    pub fn modifier(&self) -> Option<&Arc<dyn LogStringModifier>> {
        self.modifier.as_ref()
    }
}

/// Load settings and install the subscriber shared by both front ends.
pub fn bootstrap() -> anyhow::Result<Settings> {
    let settings = Settings::load().context("failed to load loghelper settings")?;
    loghelper_telemetry::init(&settings.telemetry).context("failed to initialize telemetry")?;

    tracing::debug!(
        env = ?settings.environment,
        enhance = settings.enhance.enabled,
        "loghelper bootstrap complete"
    );

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_ends_share_a_single_modifier() {
        let front_ends = FrontEnds::from_settings(&Settings::default()).unwrap();
        let modifier = front_ends.modifier().unwrap();
        // One for the front ends themselves, one per wrapped logger.
        assert_eq!(Arc::strong_count(modifier), 3);

        let _helper = front_ends.trace_helper();
        assert_eq!(Arc::strong_count(modifier), 4);
    }

    #[test]
    fn test_disabled_enhancement_has_no_modifier() {
        let mut settings = Settings::default();
        settings.enhance.enabled = false;
        let front_ends = FrontEnds::from_settings(&settings).unwrap();
        assert!(front_ends.modifier().is_none());
    }
}
