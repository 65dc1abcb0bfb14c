//! Error type shared by the kernel and the crates built on it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KernelError {
    #[error("failed to build configuration")]
    Config(#[from] config::ConfigError),

    #[error("unable to resolve configuration directory")]
    ConfigDir(#[source] std::io::Error),

    #[error("unsupported environment '{0}'; expected local/staging/production")]
    UnsupportedEnvironment(String),

    #[error("unknown log level '{0}'; expected trace/debug/info/warn/error")]
    UnknownLevel(String),

    #[error("invalid placeholder pattern: {0}")]
    InvalidPattern(String),
}
