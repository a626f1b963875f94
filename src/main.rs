//! CLI entry point for bloggen

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bloggen")]
#[command(version)]
#[command(about = "A small static blog generator", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
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
    /// Generate the static site
    #[command(alias = "b")]
    Build,

    /// Delete the generated output
    Clean,

    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,
    },

    /// List posts in build order
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "bloggen=debug,info"
    } else {
        "bloggen=info"
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
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Build => {
            let site = bloggen::Site::new(&base_dir)?;
            tracing::info!("Generating static files...");
            site.build()?;
            println!("Generated successfully!");
        }

        Commands::Clean => {
            let site = bloggen::Site::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            bloggen::commands::init::run(&target_dir)?;
            println!("Initialized new site in {:?}", target_dir);
        }

        Commands::New { title } => {
            let site = bloggen::Site::new(&base_dir)?;
            site.new_post(&title)?;
        }

        Commands::List => {
            let site = bloggen::Site::new(&base_dir)?;
            bloggen::commands::list::run(&site)?;
        }
    }

    Ok(())
}
