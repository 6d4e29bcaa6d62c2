//! CLI entry point for wp-press

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wp_press::Site;

#[derive(Parser)]
#[command(name = "wp-press")]
#[command(version)]
#[command(about = "Render a headless WordPress export into a static site", long_about = None)]
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
    /// Render every page into the public folder
    #[command(alias = "b")]
    Build,

    /// Print the page of a single post
    Render {
        /// Slug of the post
        slug: String,
    },

    /// Start a local server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Clean the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, tag, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "wp_press=debug,info"
    } else {
        "wp_press=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Build => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Generating static files...");
            let report = site.build()?;
            println!(
                "Generated {} posts, {} categories and {} tags",
                report.posts, report.categories, report.tags
            );
        }

        Commands::Render { slug } => {
            let site = Site::new(&base_dir)?;
            println!("{}", site.render(&slug)?);
        }

        Commands::Serve { port, ip, r#static } => {
            let site = Site::new(&base_dir)?;

            tracing::info!("Generating static files...");
            site.build()?;

            wp_press::server::start(&site, &ip, port, !r#static).await?;
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = Site::new(&base_dir)?;
            wp_press::commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("wp-press version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
