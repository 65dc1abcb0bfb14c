use loghelper_kernel::settings::EnhanceSettings;
use loghelper_kernel::{CallSite, KernelError};

/// Rewrites a log message using details of the call site that produced it.
pub trait LogStringModifier: Send + Sync {
    fn apply(&self, message: &str, site: &CallSite) -> String;
}

impl<F> LogStringModifier for F
where
    F: Fn(&str, &CallSite) -> String + Send + Sync,
{
    fn apply(&self, message: &str, site: &CallSite) -> String {
        self(message, site)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Module,
    Function,
    File,
    Line,
}

/// Replaces configured placeholder tokens with call-site values.
///
/// Replacement is a single left-to-right pass, so text produced by one
/// substitution is never matched against another pattern.
#[derive(Debug, Clone)]
pub struct PatternModifier {
    patterns: Vec<(String, Placeholder)>,
}

impl PatternModifier {
    pub fn new(settings: &EnhanceSettings) -> Result<Self, KernelError> {
        settings.validate()?;

        tracing::debug!(
            module = %settings.module_pattern,
            function = %settings.function_pattern,
            file = %settings.file_pattern,
            line = %settings.line_pattern,
            "placeholder patterns configured"
        );

        Ok(Self::from_validated(settings))
    }

    fn from_validated(settings: &EnhanceSettings) -> Self {
        let mut patterns = vec![
            (settings.module_pattern.clone(), Placeholder::Module),
            (settings.function_pattern.clone(), Placeholder::Function),
            (settings.file_pattern.clone(), Placeholder::File),
            (settings.line_pattern.clone(), Placeholder::Line),
        ];
        // Longest first so a pattern that prefixes another cannot shadow it.
        patterns.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { patterns }
    }

    fn matching_at(&self, rest: &str) -> Option<(&str, Placeholder)> {
        self.patterns
            .iter()
            .find(|(pattern, _)| rest.starts_with(pattern.as_str()))
            .map(|(pattern, placeholder)| (pattern.as_str(), *placeholder))
    }
}

impl Default for PatternModifier {
    fn default() -> Self {
        Self::from_validated(&EnhanceSettings::default())
    }
}

impl LogStringModifier for PatternModifier {
    fn apply(&self, message: &str, site: &CallSite) -> String {
        let mut out = String::with_capacity(message.len());
        let mut rest = message;

        while let Some(ch) = rest.chars().next() {
            match self.matching_at(rest) {
                Some((pattern, placeholder)) => {
                    match placeholder {
                        Placeholder::Module => out.push_str(site.module_path),
                        Placeholder::Function => out.push_str(site.function_name()),
                        Placeholder::File => out.push_str(site.file),
                        Placeholder::Line => out.push_str(&site.line.to_string()),
                    }
                    rest = &rest[pattern.len()..];
                }
                None => {
                    out.push(ch);
                    rest = &rest[ch.len_utf8()..];
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: CallSite = CallSite::new(
        "demo::service",
        "demo::service::Worker::handle",
        "src/service.rs",
        42,
    );

    #[test]
    fn test_replaces_every_default_placeholder() {
        let modifier = PatternModifier::default();
        let out = modifier.apply(
            "{modulePath}::{functionName} ({fileName}:{lineNumber}) -> 7",
            &SITE,
        );
        assert_eq!(out, "demo::service::handle (src/service.rs:42) -> 7");
    }

    #[test]
    fn test_message_without_placeholders_is_unchanged() {
        let modifier = PatternModifier::default();
        assert_eq!(modifier.apply("plain message é", &SITE), "plain message é");
        assert_eq!(modifier.apply("", &SITE), "");
    }

    #[test]
    fn test_custom_line_pattern() {
        let settings = EnhanceSettings {
            line_pattern: "__line_number__".to_string(),
            ..EnhanceSettings::default()
        };
        let modifier = PatternModifier::new(&settings).unwrap();

        assert_eq!(modifier.apply("__line_number__ -> 1", &SITE), "42 -> 1");
        assert_eq!(
            modifier.apply("{lineNumber} -> 1", &SITE),
            "{lineNumber} -> 1"
        );
    }

    #[test]
    fn test_substituted_text_is_not_rescanned() {
        let site = CallSite::new("{lineNumber}", "f", "f.rs", 9);
        let modifier = PatternModifier::default();
        assert_eq!(modifier.apply("{modulePath}", &site), "{lineNumber}");
    }

    #[test]
    fn test_longer_pattern_wins_over_its_prefix() {
        let settings = EnhanceSettings {
            line_pattern: "%l".to_string(),
            file_pattern: "%line".to_string(),
            ..EnhanceSettings::default()
        };
        let modifier = PatternModifier::new(&settings).unwrap();
        assert_eq!(modifier.apply("%line:%l", &SITE), "src/service.rs:42");
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = EnhanceSettings {
            module_pattern: "{x}".to_string(),
            function_pattern: "{x}".to_string(),
            ..EnhanceSettings::default()
        };
        assert!(matches!(
            PatternModifier::new(&settings),
            Err(KernelError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_closure_modifier() {
        let upper = |message: &str, _: &CallSite| message.to_uppercase();
        assert_eq!(upper.apply("quiet", &SITE), "QUIET");
    }
}
