//! Command-line parser.
//!
//! Exactly one of `-f`, `-p` or `-e` must be given.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::error::CliError;

/// Usage text printed on stdout for missing or invalid arguments.
pub const USAGE: &str = "\
Usage: waterslide -f <config.json>
       waterslide -p <base64-payload>
       waterslide -e <config.json>

  -f <path>    Launch the engine from a JSON configuration file
  -p <base64>  Launch the engine with an already encoded payload
  -e <path>    Print the encoded payload for a JSON configuration and exit
";

/// Launcher for the waterslide streaming engine.
#[derive(Debug, Parser)]
#[command(name = "waterslide")]
#[command(about = "Launch the waterslide streaming engine")]
#[command(version)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["file", "payload", "export"]),
))]
pub struct Cli {
    /// Launch the engine from a JSON configuration file
    #[arg(short = 'f', value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Launch the engine with an already encoded base64 payload
    #[arg(short = 'p', value_name = "BASE64")]
    pub payload: Option<String>,

    /// Print the encoded payload for a JSON configuration and exit
    #[arg(short = 'e', value_name = "PATH")]
    pub export: Option<PathBuf>,
}

/// Where the engine configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// JSON document on disk; resolved and encoded by the launcher.
    File(PathBuf),
    /// Pre-encoded payload handed to the engine verbatim.
    Payload(String),
}

/// What the operator asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Launch(ConfigSource),
    Export(PathBuf),
}

impl Cli {
    /// Collapse the three options into one invocation.
    ///
    /// Fails with a usage error unless exactly one option is present. clap
    /// enforces that already, so the error only shows up for hand-built values.
    pub fn into_invocation(self) -> Result<Invocation, CliError> {
        match (self.file, self.payload, self.export) {
            (Some(path), None, None) => Ok(Invocation::Launch(ConfigSource::File(path))),
            (None, Some(payload), None) => Ok(Invocation::Launch(ConfigSource::Payload(payload))),
            (None, None, Some(path)) => Ok(Invocation::Export(path)),
            _ => Err(CliError::Usage(
                "exactly one of -f, -p or -e is required".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("waterslide").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn file_mode() {
        let cli = parse(&["-f", "sender.json"]).unwrap();
        assert_eq!(
            cli.into_invocation().unwrap(),
            Invocation::Launch(ConfigSource::File("sender.json".into()))
        );
    }

    #[test]
    fn payload_mode_keeps_text_verbatim() {
        let cli = parse(&["-p", "CAE+/w=="]).unwrap();
        assert_eq!(
            cli.into_invocation().unwrap(),
            Invocation::Launch(ConfigSource::Payload("CAE+/w==".to_string()))
        );
    }

    #[test]
    fn export_mode() {
        let cli = parse(&["-e", "receiver.json"]).unwrap();
        assert_eq!(
            cli.into_invocation().unwrap(),
            Invocation::Export("receiver.json".into())
        );
    }

    #[test]
    fn no_arguments_is_an_error() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn options_are_mutually_exclusive() {
        let err = parse(&["-f", "a.json", "-e", "b.json"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn hand_built_cli_without_source_is_a_usage_error() {
        let cli = Cli {
            file: None,
            payload: None,
            export: None,
        };
        let err = cli.into_invocation().unwrap_err();
        assert!(matches!(err, CliError::Usage(_)), "{err}");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn missing_value_is_an_error() {
        assert!(parse(&["-f"]).is_err());
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(parse(&["-x", "foo"]).is_err());
    }

    #[test]
    fn usage_mentions_every_mode() {
        for flag in ["-f <", "-p <", "-e <"] {
            assert!(USAGE.contains(flag));
        }
    }
}
