//! Project-specific utilities live here.

/// Formats the `log` target used by a loghelper component.
pub fn log_target(component: &str) -> String {
    format!("loghelper::{component}")
}
