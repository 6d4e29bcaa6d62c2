//! Site configuration (_config.yml)

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,
    /// IANA zone used for timestamps that carry no offset
    pub timezone: String,

    // URL
    pub url: String,
    pub root: String,

    // Paths
    pub source_file: String,
    pub public_dir: String,
    pub category_dir: String,
    pub tag_dir: String,

    // Date formats (Moment.js tokens)
    pub card_date_format: String,
    pub post_date_format: String,

    // Listings
    pub related_posts: usize,

    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "wp-press".to_string(),
            description: String::new(),
            language: "en".to_string(),
            timezone: "UTC".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_file: "data/posts.json".to_string(),
            public_dir: "public".to_string(),
            category_dir: "category".to_string(),
            tag_dir: "tag".to_string(),

            card_date_format: "Do MMMM YYYY".to_string(),
            post_date_format: "D MMMM YYYY".to_string(),

            related_posts: 3,

            media: MediaConfig::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_yaml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Timezone for naive timestamps, UTC when the name is unknown
    pub fn tz(&self) -> Tz {
        self.timezone.parse::<Tz>().unwrap_or(Tz::UTC)
    }
}

/// Where inline post media lives on the WordPress side
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub wordpress_url: String,
    pub uploads_url: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            wordpress_url: "http://localhost/".to_string(),
            uploads_url: "http://localhost/wp-content/uploads/".to_string(),
        }
    }
}

/// Code block highlighting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
