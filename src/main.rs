//! CLI entry point for quill

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quill")]
#[command(version)]
#[command(about = "A small personal blog server that renders markdown posts on the fly", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the blog server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (overrides config)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,
    },

    /// List posts
    List,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "quill=debug,tower_http=debug,info"
    } else {
        "quill=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Serve { port, ip } => {
            let site = quill::Site::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| site.config.server.ip.clone());
            let port = port.unwrap_or(site.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            quill::server::start(&site, &ip, port).await?;
        }

        Commands::New { title } => {
            let site = quill::Site::new(&base_dir)?;
            tracing::info!("Creating new post: {}", title);
            quill::commands::new::run(&site, &title)?;
        }

        Commands::List => {
            let site = quill::Site::new(&base_dir)?;
            quill::commands::list::run(&site)?;
        }

        Commands::Version => {
            println!("quill version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
