//! Post body parsing: inline media, internal links, code blocks

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::highlight::CodeHighlighter;
use crate::config::SiteConfig;
use crate::helpers::{url_for, Markup};

lazy_static! {
    static ref IMG_TAG: Regex = Regex::new(r"(?i)<img\b[^>]*>").expect("img pattern");
    static ref ANCHOR_TAG: Regex = Regex::new(r"(?i)<a\b[^>]*>").expect("anchor pattern");
    static ref SRC_ATTR: Regex =
        Regex::new(r#"(?i)\b(src)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("src pattern");
    static ref SRCSET_ATTR: Regex =
        Regex::new(r#"(?i)\b(srcset)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("srcset pattern");
    static ref HREF_ATTR: Regex =
        Regex::new(r#"(?i)\b(href)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("href pattern");
}

/// Turns the WordPress body HTML into page-ready markup
pub struct ContentParser {
    config: SiteConfig,
    wordpress_url: String,
    uploads_url: String,
    highlighter: Option<CodeHighlighter>,
}

impl ContentParser {
    pub fn new(config: &SiteConfig) -> Self {
        let highlighter = config
            .highlight
            .enable
            .then(|| CodeHighlighter::new(&config.highlight));

        Self {
            config: config.clone(),
            wordpress_url: config.media.wordpress_url.trim_end_matches('/').to_string(),
            uploads_url: config.media.uploads_url.trim_end_matches('/').to_string(),
            highlighter,
        }
    }

    /// Resolve inline images, localize links to the WordPress origin and
    /// highlight code blocks
    pub fn parse(&self, html: &str) -> Markup {
        let html = IMG_TAG.replace_all(html, |caps: &Captures| self.rewrite_img(&caps[0]));
        let html = ANCHOR_TAG.replace_all(&html, |caps: &Captures| {
            rewrite_attr(&caps[0], &HREF_ATTR, |href| self.localize_link(href))
        });

        let html = match &self.highlighter {
            Some(highlighter) => highlighter.highlight_html(&html),
            None => html.into_owned(),
        };

        Markup::trusted(html)
    }

    /// Absolute URL for an inline media reference.
    ///
    /// Root-relative paths and `wp-content/...` paths hang off the WordPress
    /// origin; other relative paths are taken to be inside the uploads
    /// directory. Absolute and data URLs pass through.
    pub fn resolve_media_url(&self, src: &str) -> String {
        let src = src.trim();
        if src.is_empty() || is_absolute(src) {
            return src.to_string();
        }

        if let Some(path) = src.strip_prefix('/') {
            format!("{}/{}", self.wordpress_url, path)
        } else if src.starts_with("wp-content/") {
            format!("{}/{}", self.wordpress_url, src)
        } else {
            format!("{}/{}", self.uploads_url, src.trim_start_matches("./"))
        }
    }

    /// Site-relative path for links into the WordPress origin. Uploads and
    /// foreign links are kept as they are.
    pub fn localize_link(&self, href: &str) -> String {
        let bare = strip_scheme(href);
        let into_uploads =
            !self.uploads_url.is_empty() && bare.starts_with(strip_scheme(&self.uploads_url));
        if href.is_empty() || into_uploads {
            return href.to_string();
        }

        let origin = strip_scheme(&self.wordpress_url);
        match bare.strip_prefix(origin) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('?') => {
                url_for(&self.config, rest)
            }
            _ => href.to_string(),
        }
    }

    fn rewrite_img(&self, tag: &str) -> String {
        let tag = rewrite_attr(tag, &SRC_ATTR, |src| self.resolve_media_url(src));
        let tag = rewrite_attr(&tag, &SRCSET_ATTR, |srcset| {
            srcset
                .split(',')
                .map(|candidate| {
                    let candidate = candidate.trim();
                    match candidate.split_once(char::is_whitespace) {
                        Some((url, descriptor)) => {
                            format!("{} {}", self.resolve_media_url(url), descriptor.trim())
                        }
                        None => self.resolve_media_url(candidate),
                    }
                })
                .collect::<Vec<_>>()
                .join(", ")
        });

        if tag.to_ascii_lowercase().contains("loading=") {
            tag
        } else {
            format!(r#"<img loading="lazy"{}"#, &tag[4..])
        }
    }
}

/// Apply `f` to the value of the attribute matched by `attr`, requoting it
/// with double quotes
fn rewrite_attr(tag: &str, attr: &Regex, f: impl Fn(&str) -> String) -> String {
    attr.replace_all(tag, |caps: &Captures| {
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())
            .unwrap_or("");
        format!(r#"{}="{}""#, &caps[1], f(value))
    })
    .into_owned()
}

fn is_absolute(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("//")
        || lower.starts_with("data:")
        || lower.starts_with("mailto:")
}

fn strip_scheme(url: &str) -> &str {
    url.split_once("://").map(|(_, rest)| rest).unwrap_or(url)
}
