//! Call-site placeholder expansion for log messages.
//!
//! Messages may carry tokens such as `{lineNumber}` or `{functionName}`.
//! Wrapping a logger in [`EnhancingLogger`] replaces them with the location
//! of the log call before the record reaches the backend.

pub mod enhancer;
pub mod modifier;

use std::sync::Arc;

use loghelper_kernel::settings::EnhanceSettings;
use loghelper_kernel::{KernelError, Logger};

pub use enhancer::EnhancingLogger;
pub use modifier::{LogStringModifier, PatternModifier};

/// The modifier described by `settings`, or `None` when enhancement is off.
pub fn modifier(
    settings: &EnhanceSettings,
) -> Result<Option<Arc<dyn LogStringModifier>>, KernelError> {
    if !settings.enabled {
        return Ok(None);
    }
    Ok(Some(Arc::new(PatternModifier::new(settings)?)))
}

/// Box `logger`, decorated with `modifier` when there is one.
pub fn wrap<L>(logger: L, modifier: Option<&Arc<dyn LogStringModifier>>) -> Box<dyn Logger>
where
    L: Logger + 'static,
{
    match modifier {
        Some(modifier) => Box::new(EnhancingLogger::new(logger, modifier.clone())),
        None => Box::new(logger),
    }
}
