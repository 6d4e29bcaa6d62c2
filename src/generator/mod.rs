//! Generator module - renders every page and writes it below the public
//! directory

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::components::{related_posts, TermKind};
use crate::content::Post;
use crate::error::{Error, Result};
use crate::helpers::post_path;
use crate::templates::{Listing, PageContext, PageRenderer};
use crate::Site;

/// Counts of what a build wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub posts: usize,
    pub categories: usize,
    pub tags: usize,
}

impl BuildReport {
    pub fn pages(&self) -> usize {
        // the home page is always written
        self.posts + self.categories + self.tags + 1
    }
}

/// Static site generator
pub struct Generator {
    public_dir: PathBuf,
    renderer: PageRenderer,
}

impl Generator {
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            public_dir: site.public_dir.clone(),
            renderer: PageRenderer::new(&site.config)?,
        })
    }

    pub fn renderer(&self) -> &PageRenderer {
        &self.renderer
    }

    /// Generate the entire site from `posts`, which are expected newest first
    pub fn generate(&self, posts: &[Post]) -> Result<BuildReport> {
        fs::create_dir_all(&self.public_dir).map_err(|e| Error::io(&self.public_dir, e))?;

        self.generate_post_pages(posts)?;
        self.generate_index_page(posts)?;
        let categories = self.generate_term_pages(TermKind::Category, posts)?;
        let tags = self.generate_term_pages(TermKind::Tag, posts)?;

        Ok(BuildReport {
            posts: posts.len(),
            categories,
            tags,
        })
    }

    /// Render the page for `posts[index]` with its related posts
    pub fn render_post(&self, posts: &[Post], index: usize) -> Result<String> {
        let post = posts
            .get(index)
            .ok_or_else(|| Error::PostNotFound(format!("#{}", index)))?;
        let config = self.renderer.config();
        let context = PageContext {
            related_posts: related_posts(posts, index, config.related_posts, self.renderer.tz()),
        };
        self.renderer.render_post(post, &context)
    }

    fn generate_post_pages(&self, posts: &[Post]) -> Result<()> {
        posts
            .par_iter()
            .enumerate()
            .try_for_each(|(index, post)| {
                let html = self.render_post(posts, index)?;
                let output_path = self.output_path(&post_path(&post.slug));
                write_page(&output_path, &html)?;
                tracing::debug!("Generated post: {:?}", output_path);
                Ok::<_, Error>(())
            })?;

        tracing::info!("Generated {} post pages", posts.len());
        Ok(())
    }

    fn generate_index_page(&self, posts: &[Post]) -> Result<()> {
        let listing = Listing::home(self.renderer.config(), posts);
        let html = self.renderer.render_listing(&listing)?;
        write_page(&self.output_path(&listing.path), &html)?;
        tracing::info!("Generated index page");
        Ok(())
    }

    fn generate_term_pages(&self, kind: TermKind, posts: &[Post]) -> Result<usize> {
        let listings = Listing::for_terms(self.renderer.config(), kind, posts);

        listings.par_iter().try_for_each(|listing| {
            let html = self.renderer.render_listing(listing)?;
            let output_path = self.output_path(&listing.path);
            write_page(&output_path, &html)?;
            tracing::debug!("Generated {:?} page: {:?}", kind, output_path);
            Ok::<_, Error>(())
        })?;

        tracing::info!("Generated {} {:?} pages", listings.len(), kind);
        Ok(listings.len())
    }

    /// `index.html` inside the directory for a site path
    fn output_path(&self, path: &str) -> PathBuf {
        let dir = path.trim_matches('/');
        if dir.is_empty() {
            self.public_dir.join("index.html")
        } else {
            self.public_dir.join(dir).join("index.html")
        }
    }
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, html).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn posts() -> Vec<Post> {
        vec![
            Post::from_value(&json!({
                "slug": "second",
                "title": "Second",
                "date": "2020-02-01, 00:00:00",
                "categories": { "nodes": [{ "name": "Rust" }] },
                "tags": { "nodes": [{ "name": "async" }] }
            })),
            Post::from_value(&json!({
                "slug": "first",
                "title": "First",
                "date": "2020-01-01, 00:00:00",
                "categories": { "nodes": [{ "name": "Rust" }] }
            })),
        ]
    }

    #[test]
    fn test_generate_writes_all_pages() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let generator = Generator::new(&site).unwrap();

        let report = generator.generate(&posts()).unwrap();
        assert_eq!(
            report,
            BuildReport {
                posts: 2,
                categories: 1,
                tags: 1
            }
        );
        assert_eq!(report.pages(), 5);

        let public = dir.path().join("public");
        for page in [
            "index.html",
            "second/index.html",
            "first/index.html",
            "category/rust/index.html",
            "tag/async/index.html",
        ] {
            assert!(public.join(page).is_file(), "missing {}", page);
        }

        let first = fs::read_to_string(public.join("first/index.html")).unwrap();
        assert!(first.contains(r#"<section class="related">"#));
        assert!(first.contains(r#"<a href="/second/">"#));
    }

    #[test]
    fn test_render_post_out_of_range() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let generator = Generator::new(&site).unwrap();
        let posts = posts();

        assert!(generator.render_post(&posts, 1).unwrap().contains("<h1>First</h1>"));
        assert!(matches!(
            generator.render_post(&posts, 2),
            Err(Error::PostNotFound(_))
        ));
    }

    #[test]
    fn test_output_path() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let generator = Generator::new(&site).unwrap();
        let public = dir.path().join("public");

        assert_eq!(generator.output_path(""), public.join("index.html"));
        assert_eq!(
            generator.output_path("category/rust/"),
            public.join("category/rust/index.html")
        );
    }
}
