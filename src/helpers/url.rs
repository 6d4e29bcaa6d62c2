//! URL helper functions

use std::path::{Component, Path};

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "category/rust/") // -> "/blog/category/rust/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Site path of a post page. Slugs are used verbatim.
pub fn post_path(slug: &str) -> String {
    format!("{}/", slug.trim_matches('/'))
}

/// Whether a site path names a directory below the output root. Empty paths
/// and `.`/`..` or absolute components do not.
pub fn is_routable(path: &str) -> bool {
    let path = Path::new(path.trim_matches('/'));
    path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)))
}

/// Site path of a category listing
pub fn category_path(config: &SiteConfig, name: &str) -> String {
    format!("{}/{}/", config.category_dir, normalize_slug(name))
}

/// Site path of a tag listing
pub fn tag_path(config: &SiteConfig, name: &str) -> String {
    format!("{}/{}/", config.tag_dir, normalize_slug(name))
}

/// Lower-case, hyphen-separated slug.
///
/// Word boundaries are spaces, punctuation, and lower-to-upper case changes,
/// so `"fooBar Baz"` becomes `"foo-bar-baz"`. Normalizing an already
/// normalized slug returns it unchanged.
pub fn normalize_slug(s: &str) -> String {
    let mut split = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;

    for c in s.chars() {
        if let Some(p) = prev {
            if c.is_uppercase() && (p.is_lowercase() || p.is_ascii_digit()) {
                split.push('-');
            }
        }
        split.push(c);
        prev = Some(c);
    }

    slug::slugify(split)
}
