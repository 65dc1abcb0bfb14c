//! Demo entry point: greet on stdout, then log once through each front end.

use std::io::{self, Write};

use loghelper_kernel::{emit, Level, Logger};

pub const GREETING: &str = "hello";
pub const LOG_FACADE_MESSAGE: &str = "debugging with the log facade";
pub const TRACING_MESSAGE: &str = "debugging with tracing";
/// Target of the demo's `tracing` front end.
pub const TRACING_TARGET: &str = module_path!();

/// Write the greeting to `out`, then emit one debug message through each
/// logger.
pub fn run<W, F, T>(out: &mut W, log_facade: &F, tracing: &T) -> io::Result<()>
where
    W: Write + ?Sized,
    F: Logger + ?Sized,
    T: Logger + ?Sized,
{
    writeln!(out, "{GREETING}")?;
    out.flush()?;

    emit!(log_facade, Level::Debug, "{LOG_FACADE_MESSAGE}");
    emit!(tracing, Level::Debug, "{TRACING_MESSAGE}");

    Ok(())
}
