use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};

/// Split sprint issues into linked tasks, size them and clear the parents out of
/// the sprint.
#[derive(Parser, Debug, Clone, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Agile board id to take sprints from.
    #[arg(short, long, env = "SPRINTER_BOARD")]
    pub board: Option<u64>,

    /// Only triage issues assigned to this user (defaults to `$USER@<email_domain>`).
    #[arg(short, long, env = "SPRINTER_ASSIGNEE")]
    pub assignee: Option<String>,

    /// Disable colored output.
    #[arg(
        short = 'n',
        long,
        env = "SPRINTER_NOCOLOR",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub nocolor: bool,

    /// Print the writes that would happen instead of performing them.
    #[arg(
        short = 'x',
        long,
        env = "SPRINTER_DRY",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub dry: bool,

    /// Triage the board backlog instead of picking a sprint.
    #[arg(long)]
    pub backlog: bool,

    /// Override the config file path.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_flags() {
        let args = Args::try_parse_from([
            "sprinter", "-b", "4321", "-a", "jdoe@example.com", "-n", "-x", "-c", "/tmp/s.toml",
        ])
        .unwrap();
        assert_eq!(args.board, Some(4321));
        assert_eq!(args.assignee.as_deref(), Some("jdoe@example.com"));
        assert!(args.nocolor);
        assert!(args.dry);
        assert!(!args.backlog);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/s.toml")));
    }

    #[test]
    fn long_flags() {
        let args = Args::try_parse_from([
            "sprinter", "--board", "7", "--nocolor", "--dry", "--backlog",
        ])
        .unwrap();
        assert_eq!(args.board, Some(7));
        assert!(args.nocolor && args.dry && args.backlog);
    }

    #[test]
    fn verbosity_counts() {
        let quiet = Args::try_parse_from(["sprinter"]).unwrap();
        assert_eq!(quiet.log_level(), tracing::Level::INFO);
        let debug = Args::try_parse_from(["sprinter", "-v"]).unwrap();
        assert_eq!(debug.log_level(), tracing::Level::DEBUG);
        let trace = Args::try_parse_from(["sprinter", "-vvv"]).unwrap();
        assert_eq!(trace.log_level(), tracing::Level::TRACE);
    }

    #[test]
    fn board_must_be_numeric() {
        assert!(Args::try_parse_from(["sprinter", "-b", "rhel"]).is_err());
    }
}
