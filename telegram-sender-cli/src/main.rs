//! tgsend: send text, photos and files to a Telegram chat from the shell.
//! Config from env (BOT_TOKEN, TELEGRAM_CHAT_ID, ...) with CLI overrides.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use telegram_sender::{init_tracing, BotClient, ChatId};
use tokio::io::AsyncReadExt;
use tracing::info;

use cli::{load_config, photo_request, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(config.log_file.as_deref())?;
    let client = BotClient::from_config(&config).context("Failed to build HTTP client")?;
    info!(api_url = %client.api_url(), timeout_secs = config.timeout_secs, "tgsend starting");
    let destination = cli.destination();
    run(cli.command, &client, destination.as_ref()).await
}

async fn run(command: Commands, client: &BotClient, destination: Option<&ChatId>) -> Result<()> {
    match command {
        Commands::Text { text } => {
            let text = if text == "-" {
                let mut buf = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buf)
                    .await
                    .context("Failed to read text from stdin")?;
                buf
            } else {
                text
            };
            client.send_text(&text, destination).await?;
            info!(chars = text.chars().count(), "text sent");
        }
        Commands::Photo {
            path,
            url,
            caption,
            parse_mode,
        } => {
            let (source, options) = photo_request(path, url, caption, parse_mode)?;
            let description = source.describe();
            client.send_media(source, &options, destination).await?;
            info!(payload = %description, "photo sent");
        }
        Commands::File { path } => {
            client.send_file(&path, destination).await?;
            info!(path = %path.display(), "document sent");
        }
        Commands::LastUpdate => {
            println!("{}", client.get_last_update().await);
        }
    }
    Ok(())
}
