//! Trace/debug helper whose messages carry the `{lineNumber}` placeholder.

use std::sync::Arc;

use loghelper_kernel::sink::Logger;
use loghelper_kernel::{emit, Level, Record};

/// Placeholder that an enhancing logger replaces with the call-site line.
pub const LINE_NUMBER_PREFIX: &str = "{lineNumber}";

pub struct TraceHelper {
    logger: Arc<dyn Logger>,
}

impl TraceHelper {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }

    /// Log `{lineNumber} -> value` at trace level.
    pub fn trace_value(&self, value: i64) {
        emit!(self.logger, Level::Trace, "{} -> {}", LINE_NUMBER_PREFIX, value);
    }

    /// Log `{lineNumber} -> something<detail>` at debug level, checking the
    /// level explicitly before the message is assembled.
    pub fn debug_detail(&self, detail: &str) {
        if self.logger.enabled(Level::Debug) {
            let message = LINE_NUMBER_PREFIX.to_string() + " -> something" + detail;
            self.logger
                .log(Record::new(Level::Debug, message, loghelper_kernel::call_site!()));
        }
    }

    /// Log `{lineNumber} <message>` at debug level.
    pub fn debug_with_line(&self, message: &str) {
        emit!(self.logger, Level::Debug, "{} {}", LINE_NUMBER_PREFIX, message);
    }
}
