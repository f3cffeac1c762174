//! news-bot binary: `run` polls Telegram with the daily scheduler; `daily-once` sends one digest.

use anyhow::Result;
use clap::Parser;
use news_bot::{load_config, run_bot, run_daily_once, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::DailyOnce { token } => {
            let config = load_config(token)?;
            run_daily_once(config).await.map(|_| ())
        }
    }
}
