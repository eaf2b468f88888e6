use crate::prelude::*;
use clap::Parser;
use podium_core::backoff::BackoffPolicy;
use std::path::PathBuf;
use std::time::Duration;

mod error;
mod events;
mod prelude;
mod results;
mod startgg;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Ranked start.gg results with the characters each entrant played"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// start.gg GraphQL endpoint
    #[clap(
        long,
        env = "STARTGG_ENDPOINT",
        global = true,
        default_value = startgg::StartggConfig::DEFAULT_ENDPOINT
    )]
    endpoint: String,

    /// File holding the API key, used when STARTGG_API_TOKEN is not set
    #[clap(long, global = true, default_value = "auth.txt")]
    token_file: PathBuf,

    /// Give up on a request after this many attempts (default: retry forever)
    #[clap(long, global = true)]
    max_attempts: Option<u32>,

    /// Upper bound for a single retry delay, in seconds (default: uncapped)
    #[clap(long, global = true)]
    max_delay_secs: Option<u64>,

    /// Whether to display additional information.
    #[clap(long, env = "PODIUM_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

impl Global {
    pub fn backoff_policy(&self) -> BackoffPolicy {
        BackoffPolicy::default()
            .with_max_attempts(self.max_attempts)
            .with_max_delay(self.max_delay_secs.map(Duration::from_secs))
    }
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Print the top placements of an event or of every event in a tournament
    Results(crate::results::ResultsOptions),

    /// List the events of a tournament
    Events(crate::events::EventsOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Results(options) => crate::results::run(options, app.global).await,
        SubCommands::Events(options) => crate::events::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_results_defaults() {
        let app = App::try_parse_from(["podium", "results", "start.gg/evo"]).unwrap();

        let SubCommands::Results(options) = app.command else {
            panic!("expected results subcommand");
        };
        assert_eq!(options.link, "start.gg/evo");
        assert_eq!(options.places, 16);
        assert_eq!(options.per_page, 100);
        assert!(!options.json);
        assert_eq!(app.global.backoff_policy(), BackoffPolicy::default());
    }

    #[test]
    fn test_parse_backoff_escape_hatch() {
        let app = App::try_parse_from([
            "podium",
            "results",
            "evo",
            "--max-attempts",
            "4",
            "--max-delay-secs",
            "30",
        ])
        .unwrap();

        let policy = app.global.backoff_policy();
        assert_eq!(policy.max_attempts, Some(4));
        assert_eq!(policy.max_delay, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_parse_rejects_zero_page_size() {
        assert!(App::try_parse_from(["podium", "results", "evo", "--per-page", "0"]).is_err());
    }
}
