//! Core traits, settings, and logging front ends shared by the loghelper crates.

pub mod error;
pub mod settings;
pub mod sink;

pub use error::KernelError;
pub use settings::Settings;
pub use sink::{CallSite, Level, Logger, Record};
