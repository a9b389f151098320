use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use assetdesk_cli::cli;
use assetdesk_core::CoreConfig;

#[derive(Parser)]
#[command(name = "assetdesk-cli")]
#[command(about = "Notification feed for the assetdesk dashboard")]
struct Cli {
    /// Data directory for the durable notification cache
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Address of the notification push channel
    #[arg(long)]
    server: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, short)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to the push channel and stream notifications live
    Watch {
        /// User identity whose notification channel to join
        #[arg(long, short = 'u')]
        user: String,
    },

    /// List cached notifications
    List {
        /// Only show unread notifications
        #[arg(long)]
        unread: bool,
    },

    /// Print the unread count
    Unread,

    /// Mark one notification as read
    MarkRead {
        /// Notification id
        id: String,
    },

    /// Mark every notification as read
    MarkAllRead,

    /// Print the destination route for a notification
    Route {
        /// Notification id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    let mut config = match args.data_dir {
        Some(dir) => CoreConfig::new(dir),
        None => CoreConfig::default(),
    };
    if let Some(server) = args.server {
        config.server_addr = server;
    }

    match args.command {
        Commands::Watch { user } => cli::run_watch(config, &user).await,
        Commands::List { unread } => cli::list(&config, unread, args.pretty).await,
        Commands::Unread => cli::unread(&config).await,
        Commands::MarkRead { id } => cli::mark_read(&config, &id).await,
        Commands::MarkAllRead => cli::mark_all_read(&config).await,
        Commands::Route { id } => cli::route(&config, &id).await,
    }
}
