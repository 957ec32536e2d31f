use std::path::PathBuf;

use clap::Parser;

use crate::ui::app::Launch;

#[derive(Parser, Debug)]
#[command(name = "tunescout", version, about)]
pub struct Cli {
    /// Start with this search already typed in
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Open the details of this track id
    #[arg(long, short = 't')]
    pub track: Option<u64>,

    /// Read settings from this file instead of the default location
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn launch(&self) -> Launch {
        Launch {
            query: self.query.clone().filter(|q| !q.trim().is_empty()),
            track_id: self.track,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_to_launch() {
        let cli = Cli::parse_from(["tunescout", "--query", "thunder", "-t", "42"]);
        assert_eq!(
            cli.launch(),
            Launch {
                query: Some("thunder".into()),
                track_id: Some(42),
            }
        );
        assert!(cli.config.is_none());
    }

    #[test]
    fn blank_query_is_dropped() {
        let cli = Cli::parse_from(["tunescout", "-q", "  "]);
        assert_eq!(cli.launch(), Launch::default());
    }

    #[test]
    fn non_numeric_track_is_rejected() {
        assert!(Cli::try_parse_from(["tunescout", "--track", "abc"]).is_err());
    }
}
