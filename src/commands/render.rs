//! Render a single post page without writing anything

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::{Error, Site};

/// HTML of the page for the post with `slug`
pub fn run(site: &Site, slug: &str) -> Result<String> {
    let posts = ContentLoader::new(site).load_posts()?;
    let index = posts
        .iter()
        .position(|p| p.slug == slug)
        .ok_or_else(|| Error::PostNotFound(slug.to_string()))?;

    let generator = Generator::new(site)?;
    Ok(generator.render_post(&posts, index)?)
}
