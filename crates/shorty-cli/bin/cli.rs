use clap::{Parser, Subcommand};
use shorty_cli::{Action, LogFormat};
use std::path::PathBuf;

pub const BASE_URL_ENV: &str = "SHORTY_URL";
pub const API_KEY_ENV: &str = "SHORTY_API_KEY";
pub const PUBLIC_URL_ENV: &str = "SHORTY_PUBLIC_URL";
pub const TIMEOUT_ENV: &str = "SHORTY_TIMEOUT_SECS";
pub const LOG_FORMAT_ENV: &str = "SHORTY_LOG_FORMAT";

#[derive(Debug, Parser)]
#[command(name = "shorty", version, about = "Shorten links and host images on a Shorty backend")]
pub struct CLI {
    /// Base URL of the Shorty backend.
    #[arg(long, env = BASE_URL_ENV)]
    pub base_url: String,

    /// API key for the backend.
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: String,

    /// Public URL short links are served under. Defaults to the base URL.
    #[arg(long, env = PUBLIC_URL_ENV)]
    pub public_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, env = TIMEOUT_ENV, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormat::Text,
        global = true
    )]
    pub log_format: LogFormat,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create and look up short links.
    #[command(subcommand)]
    Link(LinkCommand),
    /// Upload images and look up their metadata.
    #[command(subcommand)]
    Image(ImageCommand),
}

#[derive(Debug, Subcommand)]
pub enum LinkCommand {
    /// Create a short link for URL.
    Create {
        url: String,
        /// Also print a QR code of the short URL.
        #[arg(long)]
        qr: bool,
    },
    /// Show the short link with the given id.
    Get {
        id: String,
        /// Also print a QR code of the short URL.
        #[arg(long)]
        qr: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ImageCommand {
    /// Upload the image at PATH.
    Upload { path: PathBuf },
    /// Show metadata of the image with the given id.
    Info { id: String },
}

impl Command {
    /// Whether the link should also be printed as a QR code.
    pub fn wants_qr(&self) -> bool {
        matches!(
            self,
            Command::Link(LinkCommand::Create { qr: true, .. } | LinkCommand::Get { qr: true, .. })
        )
    }

    pub fn into_action(self) -> Action {
        match self {
            Command::Link(LinkCommand::Create { url, .. }) => Action::CreateLink { url },
            Command::Link(LinkCommand::Get { id, .. }) => Action::GetLink { id },
            Command::Image(ImageCommand::Upload { path }) => Action::UploadImage { path },
            Command::Image(ImageCommand::Info { id }) => Action::ImageInfo { id },
        }
    }
}
