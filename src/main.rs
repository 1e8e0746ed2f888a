use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use answerbox::{
    AnswerQueryUseCase, AnswerSource, CompletionClient, FileStateStore, MemoryStateStore,
    MockCompletion, OpenAiClient, RelayClient, RelayConfig, RelayState, StateStore,
};

const DEFAULT_RELAY_URL: &str = "http://localhost:5174";

#[derive(Parser)]
#[command(name = "answerbox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay server
    Serve {
        /// Listening port (overrides the PORT environment variable)
        #[arg(short, long)]
        port: Option<u16>,

        /// Answer with a deterministic mock instead of the completion API
        #[arg(long)]
        mock: bool,
    },

    /// Interactive terminal client
    Tui {
        #[arg(long, default_value = DEFAULT_RELAY_URL)]
        relay_url: String,

        #[arg(long, default_value = "~/.answerbox")]
        data_dir: String,

        /// Keep history and theme in memory only
        #[arg(long)]
        ephemeral: bool,
    },

    /// Ask a single question and print the answer
    Ask {
        query: String,

        #[arg(long, default_value = DEFAULT_RELAY_URL)]
        relay_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, mock } => {
            init_logging(cli.verbose)?;

            let completion: Arc<dyn CompletionClient> = if mock {
                info!("Using mock completion client");
                Arc::new(MockCompletion::new())
            } else {
                match OpenAiClient::from_env() {
                    Ok(client) => {
                        info!("Relaying to model {}", client.model());
                        Arc::new(client)
                    }
                    Err(e) => {
                        error!("{}", e.detail());
                        std::process::exit(1);
                    }
                }
            };

            let use_case = Arc::new(AnswerQueryUseCase::new(completion));
            let mut config = RelayConfig::from_env();
            if let Some(port) = port {
                config.port = port;
            }

            answerbox::serve(config, RelayState::new(use_case)).await
        }

        Commands::Tui {
            relay_url,
            data_dir,
            ephemeral,
        } => {
            // No logging subscriber here: stray writes would tear up the
            // alternate screen.
            let store: Arc<dyn StateStore> = if ephemeral {
                Arc::new(MemoryStateStore::new())
            } else {
                Arc::new(FileStateStore::new(expand_tilde(&data_dir))?)
            };
            let relay = Arc::new(RelayClient::new(relay_url));

            answerbox::client::tui::run(relay, store).await
        }

        Commands::Ask { query, relay_url } => {
            init_logging(cli.verbose)?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_message("Thinking...");
            spinner.enable_steady_tick(Duration::from_millis(120));

            let relay = RelayClient::new(relay_url);
            let result = relay.answer(&query).await;
            spinner.finish_and_clear();

            match result {
                Ok(answer) => {
                    println!("{answer}");
                    Ok(())
                }
                Err(e) => Err(anyhow::anyhow!(e.detail())),
            }
        }
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
