use std::sync::Arc;

use loghelper_kernel::{Level, Logger, Record};

use crate::modifier::LogStringModifier;

/// Decorates a [`Logger`], rewriting each message before it is forwarded.
///
/// Level checks go straight to the inner logger, so a disabled call costs no
/// more than it would without enhancement.
pub struct EnhancingLogger<L> {
    inner: L,
    modifier: Arc<dyn LogStringModifier>,
}

impl<L: Logger> EnhancingLogger<L> {
    pub fn new(inner: L, modifier: Arc<dyn LogStringModifier>) -> Self {
        Self { inner, modifier }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: Logger> Logger for EnhancingLogger<L> {
    fn enabled(&self, level: Level) -> bool {
        self.inner.enabled(level)
    }

    fn log(&self, record: Record) {
        let message = self.modifier.apply(&record.message, &record.site);
        self.inner.log(Record { message, ..record });
    }
}
