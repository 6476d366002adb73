//! CLI entry point for folio-rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::commands::list::ListOptions;
use folio_rs::commands::new::EntryKind;
use folio_rs::theme::{self, ThemeMode};

#[derive(Parser)]
#[command(name = "folio-rs")]
#[command(version)]
#[command(about = "A static site generator for a personal portfolio and blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Theme to start with (light or dark), overriding `default_theme`
    #[arg(short, long, global = true)]
    theme: Option<ThemeMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post or project
    New {
        /// What to create
        #[arg(short, long, value_enum, default_value_t = EntryKind::Post)]
        kind: EntryKind,

        /// Title of the new entry
        title: String,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Remove the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, project, tag, category)
        #[arg(default_value = "post")]
        r#type: String,

        /// Free-text query over titles, summaries and tags
        #[arg(short, long)]
        query: Option<String>,

        /// Only entries carrying this tag
        #[arg(long)]
        tag: Option<String>,

        /// Only entries in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };

    let load = |dir: &PathBuf| -> Result<folio_rs::Folio> {
        let folio = folio_rs::Folio::new(dir)?;
        theme::init(cli.theme.unwrap_or(folio.config.default_theme));
        Ok(folio)
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { kind, title } => {
            let folio = load(&base_dir)?;
            tracing::info!("Creating new {} with title: {}", kind, title);
            folio.new_entry(&title, kind)?;
        }

        Commands::Generate { watch } => {
            let folio = load(&base_dir)?;
            tracing::info!("Generating static files...");

            folio.generate()?;
            println!("Generated successfully!");

            if watch {
                tracing::info!("Watching for file changes...");
                tokio::task::spawn_blocking(move || folio_rs::commands::generate::watch(&folio))
                    .await??;
            }
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            let folio = load(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            let content = folio_rs::commands::generate::build(&folio)?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio_rs::server::start(&folio, content, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let folio = load(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            folio.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List {
            r#type,
            query,
            tag,
            category,
        } => {
            let folio = load(&base_dir)?;
            let options = ListOptions {
                query,
                tag,
                category,
            };
            folio_rs::commands::list::run(&folio, &r#type, &options)?;
        }

        Commands::Version => {
            println!("folio-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
