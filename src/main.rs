use anyhow::Result;
use dotenvy::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use teloxide::prelude::*;

use tubeparcel::cli::{Cli, Commands};
use tubeparcel::core::{config, init_logger, log_startup_configuration};
use tubeparcel::download::ytdlp::{self as ytdlp, YtDlpFetcher};
use tubeparcel::download::{DownloadRequest, FormatIntent, MediaFetcher, RequestCoordinator};
use tubeparcel::storage::ScratchDir;
use tubeparcel::telegram::{create_bot, schema, setup_bot_commands, CallbackCodec, HandlerDeps, TeloxideTransport};

/// Main entry point
///
/// Parses CLI arguments and dispatches to the selected subcommand.
/// Without a subcommand the bot is started.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Route panics (including ones in spawned request tasks) through the logger
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            log::error!("Panic message: {}", msg);
        }
    }));

    // Load environment variables from .env before any config static is read
    let _ = dotenv();

    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Run) => run_bot().await,
        Some(Commands::Download { url, format, output }) => run_cli_download(url, format, output).await,
        Some(Commands::CheckYtdlp) => {
            let version = ytdlp::ytdlp_version(&config::YTDL_BIN).await?;
            println!("{} {}", *config::YTDL_BIN, version);
            Ok(())
        }
        None => {
            log::info!("No command specified, running bot in default mode");
            run_bot().await
        }
    }
}

/// Start long polling and serve updates until Ctrl+C
async fn run_bot() -> Result<()> {
    log::info!("Starting bot...");
    log_startup_configuration();

    let bot = create_bot()?;

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let scratch = ScratchDir::from_config();
    scratch
        .ensure()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create download folder {}: {}", scratch.root().display(), e))?;

    if let Err(e) = ytdlp::ytdlp_version(&config::YTDL_BIN).await {
        log::warn!("yt-dlp check failed, downloads will fail until it is installed: {}", e);
    }

    let codec = CallbackCodec::default();
    let transport = Arc::new(TeloxideTransport::new(bot.clone(), codec.clone()));
    let fetcher = Arc::new(YtDlpFetcher::from_config());
    let coordinator = RequestCoordinator::new(fetcher, transport, scratch);
    let deps = HandlerDeps::new(coordinator, codec);

    Dispatcher::builder(bot, schema(deps))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Bot stopped");
    Ok(())
}

/// Download a URL into a local directory using the same fetcher the bot uses
async fn run_cli_download(url: String, format: FormatIntent, output: PathBuf) -> Result<()> {
    let request = DownloadRequest::new(&url, format)?;

    println!("URL: {}", request.url());
    println!("Format: {}", request.intent());
    if request.is_playlist() {
        println!("Playlist: yes");
    }

    fs_err::tokio::create_dir_all(&output).await?;

    let fetcher = YtDlpFetcher::from_config();
    let files = fetcher.fetch(&request, &output).await?;

    println!("Downloaded {} file(s):", files.len());
    for file in files {
        println!("  {}", file.display());
    }
    Ok(())
}
