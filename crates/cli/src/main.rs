use std::io::Write;

use anyhow::Context;
use clap::{Parser, Subcommand};
use loghelper_app::{bootstrap, demo, FrontEnds};
use loghelper_enhance::{LogStringModifier, PatternModifier};
use loghelper_kernel::CallSite;

#[derive(Debug, Parser)]
#[command(name = "loghelper", version, about = "Logging helper and demo")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the greeting and log through both front ends.
    Demo,
    /// Log `{lineNumber} -> VALUE` at trace level.
    Trace {
        #[arg(allow_hyphen_values = true)]
        value: i64,
    },
    /// Expand placeholders in MESSAGE for the given call site.
    Expand {
        message: String,
        #[arg(long, default_value = "main")]
        module: String,
        #[arg(long, default_value = "main")]
        function: String,
        #[arg(long, default_value = "src/main.rs")]
        file: String,
        #[arg(long, default_value_t = 1)]
        line: u32,
    },
    /// Print the resolved settings as JSON.
    Settings,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = bootstrap()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Demo => {
            let front_ends = FrontEnds::from_settings(&settings)?;
            demo::run(&mut out, &front_ends.log_facade, &front_ends.tracing)
                .with_context(|| "failed to write greeting")?;
        }
        Command::Trace { value } => {
            let front_ends = FrontEnds::from_settings(&settings)?;
            front_ends.trace_helper().trace_value(value);
        }
        Command::Expand {
            message,
            module,
            function,
            file,
            line,
        } => {
            let modifier = PatternModifier::new(&settings.enhance)
                .with_context(|| "invalid placeholder patterns")?;
            let site = CallSite::new(leak(module), leak(function), leak(file), line);
            writeln!(out, "{}", modifier.apply(&message, &site))?;
        }
        Command::Settings => {
            let json = serde_json::to_string_pretty(&settings)
                .with_context(|| "failed to serialize settings")?;
            writeln!(out, "{json}")?;
        }
    }

    tracing::debug!("loghelper command complete");
    Ok(())
}

fn leak(value: String) -> &'static str {
    Box::leak(value.into_boxed_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_trace_accepts_negative_values() {
        let cli = Cli::try_parse_from(["loghelper", "trace", "-5"]).unwrap();
        assert!(matches!(cli.command, Command::Trace { value: -5 }));
    }

    #[test]
    fn test_expand_defaults() {
        let cli = Cli::try_parse_from(["loghelper", "expand", "{lineNumber}"]).unwrap();
        match cli.command {
            Command::Expand {
                message,
                module,
                line,
                ..
            } => {
                assert_eq!(message, "{lineNumber}");
                assert_eq!(module, "main");
                assert_eq!(line, 1);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
