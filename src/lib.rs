//! wp-press: renders a headless WordPress export into a static site
//!
//! Posts come from a build-time GraphQL query result saved as JSON. Every
//! post, the home page and each category and tag listing are rendered with
//! Tera templates embedded in the binary.

pub mod commands;
pub mod components;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use generator::BuildReport;

/// Name of the site configuration file inside the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// A site rooted at a directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Query result the posts are read from
    pub source_file: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Open the site in `base_dir`. Without a `_config.yml` the defaults
    /// apply.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        if config.timezone.parse::<Tz>().is_err() {
            tracing::warn!("Unknown timezone {:?}, using UTC", config.timezone);
        }

        let source_file = base_dir.join(&config.source_file);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            source_file,
            public_dir,
        })
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE)
    }

    /// Generate the static site
    pub fn build(&self) -> anyhow::Result<BuildReport> {
        commands::build::run(self)
    }

    /// Render the page of a single post
    pub fn render(&self, slug: &str) -> anyhow::Result<String> {
        commands::render::run(self, slug)
    }

    /// Clean the public directory
    pub fn clean(&self) -> anyhow::Result<()> {
        commands::clean::run(self)
    }
}
