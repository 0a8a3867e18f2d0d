use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use humantime::parse_duration;

#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug)]
#[command(author, version, about = "Show transient status notices", long_about = None)]
pub struct Cli {
    /// Path of the TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Category of MESSAGE; anything other than "success" is shown as an error.
    #[arg(long, short = 'c', value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Override how long a notice stays visible (e.g. "1500ms").
    #[arg(long, value_parser = parse_duration)]
    pub hide_after: Option<Duration>,

    /// Keep earlier hides armed instead of cancelling them on each new notice.
    #[arg(long, action = ArgAction::SetTrue)]
    pub overlap: bool,

    /// Never draw the status line in place, even on a terminal.
    #[arg(long, action = ArgAction::SetTrue)]
    pub plain: bool,

    /// Show notices as desktop notifications instead of on the terminal.
    #[cfg(target_os = "linux")]
    #[arg(long, action = ArgAction::SetTrue)]
    pub desktop: bool,

    /// Emit logs as JSON (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Explicit log filter (e.g. "notice=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Notice to display. Without it, lines are read from stdin as
    /// `category<TAB>text` or `success: text` / `error: text`.
    #[arg(value_name = "MESSAGE")]
    pub message: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use std::time::Duration;

    #[test]
    fn parses_message_and_overrides() {
        let cli = match Cli::try_parse_from([
            "notice",
            "--category",
            "success",
            "--hide-after",
            "1500ms",
            "--overlap",
            "Booking saved",
        ]) {
            Ok(cli) => cli,
            Err(err) => panic!("arguments should parse: {err}"),
        };
        assert_eq!(cli.category.as_deref(), Some("success"));
        assert_eq!(cli.hide_after, Some(Duration::from_millis(1500)));
        assert!(cli.overlap);
        assert_eq!(cli.message.as_deref(), Some("Booking saved"));
    }

    #[test]
    fn message_is_optional() {
        let cli = match Cli::try_parse_from(["notice"]) {
            Ok(cli) => cli,
            Err(err) => panic!("arguments should parse: {err}"),
        };
        assert!(cli.message.is_none());
        assert!(cli.category.is_none());
    }
}
