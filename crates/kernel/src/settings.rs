use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::KernelError;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "LOGHELPER_ENV";
const CONFIG_DIR_ENV: &str = "LOGHELPER_CONFIG_DIR";
const ENV_PREFIX: &str = "LOGHELPER";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(KernelError::UnsupportedEnvironment(other.to_string())),
        }
    }
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub enhance: EnhanceSettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, environment overlay
    /// and `LOGHELPER_*` variables.
    pub fn load() -> Result<Self, KernelError> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir()
                .map_err(KernelError::ConfigDir)?
                .join("config"),
        };

        Self::load_from(&config_dir, &environment)
    }

    /// Load configuration from `config_dir` for the named environment.
    pub fn load_from(config_dir: &Path, environment: &str) -> Result<Self, KernelError> {
        let parsed: Environment = environment.parse()?;

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let cfg = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = cfg.try_deserialize()?;
        settings.environment = parsed;
        settings.enhance.validate()?;

        tracing::debug!(
            env = ?settings.environment,
            dir = %config_dir.display(),
            "settings loaded"
        );

        Ok(settings)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "TelemetrySettings::default_filter")]
    pub filter: String,
}

impl TelemetrySettings {
    fn default_filter() -> String {
        "debug".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            filter: Self::default_filter(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Placeholders replaced in log messages with call-site details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhanceSettings {
    #[serde(default = "EnhanceSettings::default_enabled")]
    pub enabled: bool,
    #[serde(default = "EnhanceSettings::default_module_pattern")]
    pub module_pattern: String,
    #[serde(default = "EnhanceSettings::default_function_pattern")]
    pub function_pattern: String,
    #[serde(default = "EnhanceSettings::default_file_pattern")]
    pub file_pattern: String,
    #[serde(default = "EnhanceSettings::default_line_pattern")]
    pub line_pattern: String,
}

impl EnhanceSettings {
    fn default_enabled() -> bool {
        true
    }

    fn default_module_pattern() -> String {
        "{modulePath}".to_string()
    }

    fn default_function_pattern() -> String {
        "{functionName}".to_string()
    }

    fn default_file_pattern() -> String {
        "{fileName}".to_string()
    }

    fn default_line_pattern() -> String {
        "{lineNumber}".to_string()
    }

    /// Patterns paired with their setting names.
    pub fn patterns(&self) -> [(&'static str, &str); 4] {
        [
            ("module_pattern", self.module_pattern.as_str()),
            ("function_pattern", self.function_pattern.as_str()),
            ("file_pattern", self.file_pattern.as_str()),
            ("line_pattern", self.line_pattern.as_str()),
        ]
    }

    /// Every pattern must be non-empty and distinct from the others.
    pub fn validate(&self) -> Result<(), KernelError> {
        let patterns = self.patterns();
        for (i, (name, pattern)) in patterns.iter().enumerate() {
            if pattern.is_empty() {
                return Err(KernelError::InvalidPattern(format!("{name} is empty")));
            }
            if let Some((other, _)) = patterns[i + 1..].iter().find(|(_, p)| p == pattern) {
                return Err(KernelError::InvalidPattern(format!(
                    "{name} and {other} are both '{pattern}'"
                )));
            }
        }
        Ok(())
    }
}

impl Default for EnhanceSettings {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            module_pattern: Self::default_module_pattern(),
            function_pattern: Self::default_function_pattern(),
            file_pattern: Self::default_file_pattern(),
            line_pattern: Self::default_line_pattern(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn default_line_pattern_matches_helper_prefix() {
        let settings = Settings::default();
        assert_eq!(settings.enhance.line_pattern, "{lineNumber}");
        assert!(settings.enhance.enabled);
    }

    #[test]
    fn load_from_missing_directory_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("absent"), "staging").unwrap();
        assert_eq!(settings.environment, Environment::Staging);
        assert_eq!(settings.telemetry.filter, "debug");
        assert_eq!(settings.telemetry.log_format, LogFormat::Pretty);
    }

    #[test]
    fn environment_overlay_wins_over_base() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("base.toml"),
            "[telemetry]\nfilter = \"info\"\nlog_format = \"json\"\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("production.toml"),
            "[telemetry]\nfilter = \"warn\"\n\n[enhance]\nline_pattern = \"__line_number__\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(dir.path(), "production").unwrap();
        assert_eq!(settings.environment, Environment::Production);
        assert_eq!(settings.telemetry.filter, "warn");
        assert_eq!(settings.telemetry.log_format, LogFormat::Json);
        assert_eq!(settings.enhance.line_pattern, "__line_number__");
        assert_eq!(settings.enhance.module_pattern, "{modulePath}");
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_from(dir.path(), "qa").unwrap_err();
        assert!(matches!(err, KernelError::UnsupportedEnvironment(env) if env == "qa"));
    }

    #[test]
    fn duplicate_patterns_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("base.toml"),
            "[enhance]\nfile_pattern = \"{lineNumber}\"\n",
        )
        .unwrap();

        let err = Settings::load_from(dir.path(), "local").unwrap_err();
        assert!(matches!(err, KernelError::InvalidPattern(_)));
    }

    #[test]
    fn empty_pattern_is_rejected() {
        let settings = EnhanceSettings {
            function_pattern: String::new(),
            ..EnhanceSettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid placeholder pattern: function_pattern is empty"
        );
    }

    #[test]
    fn settings_serialize_lowercase_enums() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["environment"], "local");
        assert_eq!(json["telemetry"]["log_format"], "pretty");
    }
}
