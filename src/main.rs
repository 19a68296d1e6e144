use std::path::PathBuf;

use clap::Parser;

use tguess::app::App;
use tguess::config::Config;
use tguess::error::AppResult;
use tguess::logging::init_logging;

/// Guess a territory by name, with autocomplete.
#[derive(Debug, Parser)]
#[command(name = "tguess", version)]
struct Cli {
    /// Config file to read instead of the default location.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON territory list, or a directory of `<name>.png` silhouettes.
    #[arg(long, value_name = "PATH")]
    territories: Option<PathBuf>,

    #[arg(long, value_name = "N")]
    max_guesses: Option<usize>,

    /// Write logs to this file. Nothing is logged otherwise.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn resolve_config(&self) -> AppResult<Config> {
        let base = match &self.config {
            Some(path) => Config::load_from_path(path)?,
            None => Config::load()?,
        };
        Ok(self.apply_overrides(base))
    }

    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(path) = &self.territories {
            config.territories.path = Some(path.clone());
        }
        if let Some(max_guesses) = self.max_guesses {
            config.game.max_guesses = max_guesses;
        }
        if let Some(path) = &self.log_file {
            config.log.file = Some(path.clone());
        }
        config.sanitized()
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = cli.resolve_config()?;
    init_logging(&config.log)?;
    tracing::info!(config = ?config, "starting");

    let mut app = App::new_with_config(config);
    app.run().await
}
