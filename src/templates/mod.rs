//! Page templates using the Tera template engine
//!
//! The theme is embedded in the binary. Templates only arrange fragments:
//! every value handed to them is already [`Markup`], so autoescaping is off.

mod listing;
mod post;

pub use listing::{Listing, ListingView};
pub use post::{PageContext, PostView};

use chrono::Datelike;
use chrono_tz::Tz;
use serde::Serialize;
use tera::{Context, Tera};

use crate::components::SeoTags;
use crate::config::SiteConfig;
use crate::content::{ContentParser, Post};
use crate::error::Result;
use crate::helpers::{display_text, html_escape, url_for, Markup};

/// Site-wide values shared by every page
#[derive(Debug, Clone, Serialize)]
pub struct SiteView {
    pub title: Markup,
    pub language: String,
    pub root: String,
    pub year: i32,
    pub version: &'static str,
}

impl SiteView {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            title: display_text(&config.title),
            language: html_escape(&config.language),
            root: html_escape(&url_for(config, "")),
            year: chrono::Utc::now().year(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Renders complete pages with the embedded theme
pub struct PageRenderer {
    tera: Tera,
    config: SiteConfig,
    tz: Tz,
    parser: ContentParser,
    site: SiteView,
}

impl PageRenderer {
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("post.html", include_str!("theme/post.html")),
            ("listing.html", include_str!("theme/listing.html")),
        ])?;

        Ok(Self {
            tera,
            config: config.clone(),
            tz: config.tz(),
            parser: ContentParser::new(config),
            site: SiteView::new(config),
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn tz(&self) -> &Tz {
        &self.tz
    }

    /// Render the page for a single post
    pub fn render_post(&self, post: &Post, context: &PageContext<'_>) -> Result<String> {
        let seo = SeoTags::for_post(&self.config, &self.tz, post);
        let view = PostView::build(&self.config, &self.tz, &self.parser, post, context);

        let mut ctx = self.base_context(&seo);
        ctx.insert("post", &view);
        Ok(self.tera.render("post.html", &ctx)?)
    }

    /// Render a listing of article cards
    pub fn render_listing(&self, listing: &Listing<'_>) -> Result<String> {
        let seo = SeoTags::for_listing(&self.config, &listing.title, &listing.path);
        let view = ListingView::build(&self.config, &self.tz, listing);

        let mut ctx = self.base_context(&seo);
        ctx.insert("listing", &view);
        Ok(self.tera.render("listing.html", &ctx)?)
    }

    fn base_context(&self, seo: &SeoTags) -> Context {
        let mut ctx = Context::new();
        ctx.insert("site", &self.site);
        ctx.insert("seo", &seo.render());
        ctx
    }
}
