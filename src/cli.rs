use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::download::request::FormatIntent;

#[derive(Parser)]
#[command(name = "tubeparcel")]
#[command(author, version, about = "Telegram bot that downloads YouTube videos, audio and playlists", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the bot (long polling)
    Run,

    /// Download a URL locally without Telegram, printing the produced files
    Download {
        /// YouTube video or playlist URL
        url: String,

        /// What to download
        #[arg(short, long, value_enum, default_value_t = FormatIntent::Video)]
        format: FormatIntent,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Print the installed yt-dlp version
    CheckYtdlp,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
