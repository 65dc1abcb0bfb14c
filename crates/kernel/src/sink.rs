//! Logging front-end seam.
//!
//! Application code logs through the [`Logger`] trait instead of calling a
//! logging crate directly, so the same call can reach the `log` facade, a
//! `tracing` subscriber, or an in-memory recorder in tests.
//!
//! Use [`emit!`](crate::emit) rather than [`Logger::log`]: it asks the logger
//! whether the level is enabled before formatting anything, so disabled calls
//! never build their message.
//!
//! ```
//! use loghelper_kernel::emit;
//! use loghelper_kernel::sink::{Level, RecordingLogger};
//!
//! let logger = RecordingLogger::with_min_level(Level::Debug);
//! emit!(logger, Level::Debug, "{} -> {}", "{lineNumber}", 7);
//! emit!(logger, Level::Trace, "skipped");
//!
//! assert_eq!(logger.messages(), vec!["{lineNumber} -> 7".to_string()]);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tracing_log::AsTrace;

use crate::error::KernelError;

/// Log verbosity, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| KernelError::UnknownLevel(s.to_string()))
    }
}

impl From<Level> for log::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => log::Level::Trace,
            Level::Debug => log::Level::Debug,
            Level::Info => log::Level::Info,
            Level::Warn => log::Level::Warn,
            Level::Error => log::Level::Error,
        }
    }
}

impl From<Level> for tracing::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => tracing::Level::TRACE,
            Level::Debug => tracing::Level::DEBUG,
            Level::Info => tracing::Level::INFO,
            Level::Warn => tracing::Level::WARN,
            Level::Error => tracing::Level::ERROR,
        }
    }
}

/// Source location of a log call, captured by [`call_site!`](crate::call_site).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub module_path: &'static str,
    /// Fully qualified path of the enclosing function.
    pub function: &'static str,
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    pub const fn new(
        module_path: &'static str,
        function: &'static str,
        file: &'static str,
        line: u32,
    ) -> Self {
        Self {
            module_path,
            function,
            file,
            line,
        }
    }

    /// Bare name of the enclosing function; closures report their parent.
    pub fn function_name(&self) -> &'static str {
        self.function
            .split("::")
            .filter(|segment| *segment != "{{closure}}")
            .last()
            .unwrap_or(self.function)
    }
}

/// A single log emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub level: Level,
    pub message: String,
    pub site: CallSite,
}

impl Record {
    pub fn new(level: Level, message: impl Into<String>, site: CallSite) -> Self {
        Self {
            level,
            message: message.into(),
            site,
        }
    }
}

/// Logging interface shared by every front end.
pub trait Logger: Send + Sync {
    /// Whether a record at `level` would be kept.
    fn enabled(&self, level: Level) -> bool;

    /// Emit a record. Callers are expected to have checked [`Logger::enabled`].
    fn log(&self, record: Record);
}

impl<L: Logger + ?Sized> Logger for &L {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn log(&self, record: Record) {
        (**self).log(record)
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn log(&self, record: Record) {
        (**self).log(record)
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn log(&self, record: Record) {
        (**self).log(record)
    }
}

/// Front end that forwards to the `log` crate facade.
#[derive(Debug, Clone)]
pub struct LogFacadeLogger {
    target: String,
}

impl LogFacadeLogger {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Logger for LogFacadeLogger {
    fn enabled(&self, level: Level) -> bool {
        log::log_enabled!(target: self.target.as_str(), log::Level::from(level))
    }

    fn log(&self, record: Record) {
        with_log_record(&self.target, &record, |r| log::logger().log(r));
    }
}

/// Front end that forwards to the current `tracing` dispatcher.
///
/// Events carry this logger's target and the caller's module, file and line,
/// so `RUST_LOG` directives match them like any other event.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    target: String,
}

impl TracingLogger {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Logger for TracingLogger {
    fn enabled(&self, level: Level) -> bool {
        let metadata = log::Metadata::builder()
            .level(level.into())
            .target(&self.target)
            .build();
        tracing::dispatcher::get_default(|dispatch| dispatch.enabled(&metadata.as_trace()))
    }

    fn log(&self, record: Record) {
        with_log_record(&self.target, &record, |r| {
            // Always Ok.
            let _ = tracing_log::format_trace(r);
        });
    }
}

fn with_log_record(target: &str, record: &Record, f: impl FnOnce(&log::Record<'_>)) {
    f(&log::Record::builder()
        .args(format_args!("{}", record.message))
        .level(record.level.into())
        .target(target)
        .module_path_static(Some(record.site.module_path))
        .file_static(Some(record.site.file))
        .line(Some(record.site.line))
        .build());
}

/// In-memory logger that records what it is asked and what it receives.
///
/// Every call to [`Logger::enabled`] is counted, and records are kept only
/// when their level is at or above the minimum level.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    min_level: Option<Level>,
    enabled_checks: AtomicUsize,
    records: Mutex<Vec<Record>>,
}

impl RecordingLogger {
    /// A recorder with every level disabled.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_min_level(level: Level) -> Self {
        Self {
            min_level: Some(level),
            ..Self::default()
        }
    }

    pub fn enabled_checks(&self) -> usize {
        self.enabled_checks.load(Ordering::Relaxed)
    }

    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }
}

impl Logger for RecordingLogger {
    fn enabled(&self, level: Level) -> bool {
        self.enabled_checks.fetch_add(1, Ordering::Relaxed);
        self.min_level.is_some_and(|min| level >= min)
    }

    fn log(&self, record: Record) {
        if self.min_level.is_some_and(|min| record.level >= min) {
            self.records
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(record);
        }
    }
}

/// Capture the [`CallSite`] of the macro invocation.
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __type_name_of(__here);
        $crate::sink::CallSite::new(
            ::std::module_path!(),
            name.strip_suffix("::__here").unwrap_or(name),
            ::std::file!(),
            ::std::line!(),
        )
    }};
}

/// Emit a formatted message through a [`Logger`] when `level` is enabled.
///
/// The format arguments are not evaluated for disabled levels.
#[macro_export]
macro_rules! emit {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        #[allow(unused_imports)]
        use $crate::sink::Logger as _;
        let level: $crate::sink::Level = $level;
        let logger = &$logger;
        if logger.enabled(level) {
            logger.log($crate::sink::Record::new(
                level,
                ::std::format!($($arg)+),
                $crate::call_site!(),
            ));
        }
    }};
}
