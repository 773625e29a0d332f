//! ficnotes - collaborative fiction-notes chat bot
//!
//! Usage:
//!   ficnotes run                 Run the bot on the console transport
//!   ficnotes --help              Show all commands
//!
//! Type `!ficnotesbot add story <name>` and friends on stdin; while a
//! selection prompt is open, type 1-6 to pick a candidate.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use ficnotes::bot::{engine, BotContext};
use ficnotes::chat::console::ConsoleTransport;
use ficnotes::chat::Author;
use ficnotes::init::AppContext;
use ficnotes::repository::CatalogRepository;

#[derive(Parser)]
#[command(name = "ficnotes", version, about, long_about = None)]
struct Cli {
    /// Override data directory (default: ~/.ficnotes)
    #[arg(long, env = "FICNOTES_DATA_PATH", global = true)]
    data_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot against the local console transport
    Run {
        /// Display name for the local author
        #[arg(long, default_value = "writer")]
        name: String,
        /// Platform account id for the local author
        #[arg(long, default_value = "1")]
        user_id: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ficnotes=info".parse()?),
        )
        .init();

    match cli.command {
        Commands::Run { name, user_id } => {
            let ctx = AppContext::new(cli.data_path).await?;
            let author = Author { id: user_id, name };
            let (transport, inbound) = ConsoleTransport::start(author);
            let repo: Arc<dyn CatalogRepository> = ctx.repo.clone();
            let bot = Arc::new(BotContext::new(repo, transport));

            tokio::select! {
                result = engine::run(bot, inbound) => result?,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutting down");
                }
            }
        }
    }

    Ok(())
}
