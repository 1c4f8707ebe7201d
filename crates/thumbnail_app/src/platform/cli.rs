use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use engine_logging::{LogDestination, DEFAULT_LOG_FILE};
use thumbnail_core::FetchMode;

/// Export game library thumbnails for one category into a zip archive.
#[derive(Debug, Parser)]
#[command(name = "thumbnail-export", version)]
pub(crate) struct Cli {
    /// Shared configuration export (`sharedconfig.vdf`, or the same tree as JSON).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Owned-games list captured from the profile page (JSON array of {appid, name}).
    #[arg(long, value_name = "FILE")]
    pub games: Option<PathBuf>,

    /// Category to export. Without it (or with --all) every game is exported.
    #[arg(long, value_name = "LABEL")]
    pub category: Option<String>,

    /// Export every game, ignoring a remembered category.
    #[arg(long, conflicts_with = "category")]
    pub all: bool,

    /// Thumbnail mode: capsule, header, library, capsule-fallback, header-fallback or
    /// library-fallback.
    #[arg(long, value_name = "MODE")]
    pub mode: Option<FetchMode>,

    /// Directory receiving the archive, the failure report and the settings files.
    #[arg(long, value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Print the categories with their game counts and exit.
    #[arg(long)]
    pub list_categories: bool,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    /// Log per-image lookups.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogTarget {
    Terminal,
    File,
    Both,
}

impl LogTarget {
    pub(crate) fn destination(self) -> LogDestination {
        match self {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File(PathBuf::from(DEFAULT_LOG_FILE)),
            LogTarget::Both => LogDestination::Both(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thumbnail_core::FetchTier;

    #[test]
    fn parses_mode_and_category() {
        let cli = Cli::try_parse_from([
            "thumbnail-export",
            "--config",
            "sharedconfig.vdf",
            "--category",
            "Favorites",
            "--mode",
            "header-fallback",
        ])
        .unwrap();
        assert_eq!(cli.category.as_deref(), Some("Favorites"));
        assert_eq!(cli.mode, Some(FetchMode::fallback(FetchTier::Header)));
        assert_eq!(cli.output_dir, PathBuf::from("output"));
        assert_eq!(cli.log, LogTarget::Terminal);
    }

    #[test]
    fn mode_help_lists_every_accepted_mode() {
        let command = <Cli as clap::CommandFactory>::command();
        let help = command
            .get_arguments()
            .find(|arg| arg.get_id() == "mode")
            .and_then(|arg| arg.get_help())
            .map(ToString::to_string)
            .unwrap();
        for tier in FetchTier::ALL {
            for mode in [FetchMode::Exact(tier), FetchMode::fallback(tier)] {
                let name = mode.to_string();
                assert!(help.contains(&name), "help is missing {name}: {help}");
                let cli = Cli::try_parse_from(["thumbnail-export", "--mode", &name]).unwrap();
                assert_eq!(cli.mode, Some(mode));
            }
        }
    }

    #[test]
    fn rejects_unknown_mode_and_conflicting_flags() {
        assert!(Cli::try_parse_from(["thumbnail-export", "--mode", "poster"]).is_err());
        assert!(
            Cli::try_parse_from(["thumbnail-export", "--all", "--category", "RPG"]).is_err()
        );
    }
}
