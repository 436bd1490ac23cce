use anyhow::Result;
use gitcal::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.common.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();
    cli.execute()
}
