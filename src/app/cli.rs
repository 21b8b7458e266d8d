use clap::{Parser, Subcommand};

/// spotuify - control Spotify playback from your terminal 🎵
#[derive(Parser, Debug)]
#[command(name = "spotuify", version, about)]
pub struct Args {
    /// Poll interval in milliseconds (overrides config.toml)
    #[arg(long, short = 'i', value_name = "MS")]
    pub interval: Option<u64>,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Authorize spotuify with your Spotify account
    Auth,
    /// Forget the cached Spotify token
    Logout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interval_and_subcommand() {
        let args = Args::parse_from(["spotuify", "--interval", "500"]);
        assert_eq!(args.interval, Some(500));
        assert!(args.command.is_none());

        let args = Args::parse_from(["spotuify", "auth"]);
        assert_eq!(args.command, Some(CliCommand::Auth));
    }
}
