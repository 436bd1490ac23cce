use clap::{ArgAction, Args, Parser};
use log::LevelFilter;
use std::path::PathBuf;

pub const DEFAULT_EMAIL: &str = "your@email.com";

#[derive(Parser)]
#[command(name = "gitcal")]
#[command(about = "Scan local git repositories and chart your commits as a calendar heatmap")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[arg(
        long,
        value_name = "FOLDER",
        conflicts_with_all = ["email", "json", "strict"],
        help = "Add a folder to scan for git repositories"
    )]
    pub add: Option<PathBuf>,

    #[arg(long, alias = "graph", default_value = DEFAULT_EMAIL, help = "Author email to chart")]
    pub email: String,

    #[arg(long, help = "Output the calendar as JSON")]
    pub json: bool,

    #[arg(long, help = "Abort on the first repository that cannot be read")]
    pub strict: bool,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, env = "GITCAL_STORE", help = "Path to the repository list [default: ~/.gitlocalstats]")]
    pub store: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count, help = "More log output (-v debug, -vv trace)")]
    pub verbose: u8,

    #[arg(short, long, conflicts_with = "verbose", help = "Only log errors")]
    pub quiet: bool,
}

impl CommonArgs {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> anyhow::Result<()> {
        match self.add {
            Some(folder) => crate::scan::exec(self.common, folder),
            None => crate::stats::exec(self.common, self.email, self.json, self.strict),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_is_the_default_mode() {
        let cli = Cli::try_parse_from(["gitcal"]).unwrap();
        assert!(cli.add.is_none());
        assert_eq!(cli.email, DEFAULT_EMAIL);
        assert_eq!(cli.common.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn graph_is_an_alias_for_email() {
        let cli = Cli::try_parse_from(["gitcal", "--graph", "me@example.com"]).unwrap();
        assert_eq!(cli.email, "me@example.com");
    }

    #[test]
    fn add_and_email_are_exclusive() {
        assert!(Cli::try_parse_from(["gitcal", "--add", "/tmp", "--email", "a@b.c"]).is_err());
        assert!(Cli::try_parse_from(["gitcal", "--add", "/tmp", "--json"]).is_err());
        let cli = Cli::try_parse_from(["gitcal", "--add", "/tmp"]).unwrap();
        assert_eq!(cli.add, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn verbosity_maps_to_log_levels() {
        let cli = Cli::try_parse_from(["gitcal", "-vv"]).unwrap();
        assert_eq!(cli.common.log_level(), LevelFilter::Trace);
        let cli = Cli::try_parse_from(["gitcal", "-q"]).unwrap();
        assert_eq!(cli.common.log_level(), LevelFilter::Error);
    }
}
