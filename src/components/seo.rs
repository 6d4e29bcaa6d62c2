//! SEO head block: document title, meta description, robots, Open Graph and
//! Twitter cards

use chrono_tz::Tz;

use crate::config::SiteConfig;
use crate::content::{ImageVariant, Post};
use crate::helpers::{
    decode_entities, full_url_for, html_escape, post_path, squash_whitespace, strip_html,
    DateDisplay, Markup,
};

/// Resolved head metadata for one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeoTags {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub robots: String,
    pub canonical: String,
    pub site_name: String,
    pub og_type: &'static str,
    pub og_title: String,
    pub og_description: String,
    pub twitter_title: String,
    pub twitter_description: String,
    pub facebook_image: Option<ImageVariant>,
    pub twitter_image: Option<String>,
    pub published: Option<String>,
    pub modified: Option<String>,
}

impl SeoTags {
    /// Head metadata for a post page. The description is the SEO meta
    /// description, or the excerpt when that is empty.
    pub fn for_post(config: &SiteConfig, tz: &Tz, post: &Post) -> Self {
        let seo = &post.seo;
        let title = plain_or(&seo.title, &post.title);
        let description = plain_or(&seo.meta_desc, &post.excerpt);
        let path = if post.uri.is_empty() {
            post_path(&post.slug)
        } else {
            post.uri.clone()
        };

        let image = post.featured_image.as_ref();
        let facebook_image = image.and_then(|img| img.facebook.clone()).map(|v| ImageVariant {
            src: absolute(config, &v.src),
            ..v
        });
        let twitter_image = image
            .and_then(|img| img.twitter.as_ref())
            .map(|v| absolute(config, &v.src));

        let iso = |raw: &str| {
            let iso = DateDisplay::new(raw, "", tz).iso;
            (!iso.is_empty()).then_some(iso)
        };

        Self {
            og_title: plain_or(&seo.opengraph_title, &title),
            og_description: plain_or(&seo.opengraph_description, &description),
            twitter_title: plain_or(&seo.twitter_title, &title),
            twitter_description: plain_or(&seo.twitter_description, &description),
            title,
            description,
            keywords: seo.meta_keywords.clone(),
            robots: seo.robots(),
            canonical: full_url_for(config, &path),
            site_name: config.title.clone(),
            og_type: "article",
            facebook_image,
            twitter_image,
            published: iso(&post.date),
            modified: iso(&post.modified),
        }
    }

    /// Head metadata for a listing page (home, category, tag)
    pub fn for_listing(config: &SiteConfig, title: &str, path: &str) -> Self {
        let description = plain_or(&config.description, "");
        Self {
            title: title.to_string(),
            og_title: title.to_string(),
            twitter_title: title.to_string(),
            og_description: description.clone(),
            twitter_description: description.clone(),
            description,
            robots: "index, follow".to_string(),
            canonical: full_url_for(config, path),
            site_name: config.title.clone(),
            og_type: "website",
            ..Self::default()
        }
    }

    /// Render the tags for the document head
    pub fn render(&self) -> Markup {
        let mut tags = vec![format!("<title>{}</title>", html_escape(&self.title))];

        let mut meta = |attr: &str, key: &str, value: &str| {
            if !value.is_empty() {
                tags.push(format!(
                    r#"<meta {}="{}" content="{}">"#,
                    attr,
                    key,
                    html_escape(value)
                ));
            }
        };

        meta("name", "description", &self.description);
        meta("name", "keywords", &self.keywords);
        meta("name", "robots", &self.robots);
        meta("property", "og:type", self.og_type);
        meta("property", "og:title", &self.og_title);
        meta("property", "og:description", &self.og_description);
        meta("property", "og:url", &self.canonical);
        meta("property", "og:site_name", &self.site_name);
        if let Some(image) = &self.facebook_image {
            meta("property", "og:image", &image.src);
            meta("property", "og:image:width", &opt_num(image.width));
            meta("property", "og:image:height", &opt_num(image.height));
        }
        meta(
            "property",
            "article:published_time",
            self.published.as_deref().unwrap_or(""),
        );
        meta(
            "property",
            "article:modified_time",
            self.modified.as_deref().unwrap_or(""),
        );
        let card = if self.twitter_image.is_some() {
            "summary_large_image"
        } else {
            "summary"
        };
        meta("name", "twitter:card", card);
        meta("name", "twitter:title", &self.twitter_title);
        meta("name", "twitter:description", &self.twitter_description);
        meta("name", "twitter:image", self.twitter_image.as_deref().unwrap_or(""));

        if !self.canonical.is_empty() {
            tags.push(format!(
                r#"<link rel="canonical" href="{}">"#,
                html_escape(&self.canonical)
            ));
        }

        Markup::trusted(tags.join("\n"))
    }
}

/// Plain text of `primary` (tags stripped, entities decoded), or of
/// `fallback` when that comes out empty
fn plain_or(primary: &str, fallback: &str) -> String {
    let plain = |s: &str| squash_whitespace(&decode_entities(&strip_html(s)));
    let text = plain(primary);
    if text.is_empty() {
        plain(fallback)
    } else {
        text
    }
}

fn absolute(config: &SiteConfig, src: &str) -> String {
    if src.starts_with("http://") || src.starts_with("https://") || src.starts_with("data:") {
        src.to_string()
    } else {
        full_url_for(config, src)
    }
}

fn opt_num(n: Option<u32>) -> String {
    n.map(|n| n.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> SiteConfig {
        SiteConfig {
            title: "Thoughts".to_string(),
            url: "https://example.com".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_post_seo_prefers_meta() {
        let post = Post::from_value(&json!({
            "slug": "cafe",
            "uri": "/cafe/",
            "title": "Caf&eacute; Review",
            "date": "2020-01-15, 10:00:00",
            "excerpt": "<p>From the excerpt</p>",
            "seo": {
                "title": "Cafe | Thoughts",
                "metaDesc": "Meta &amp; more",
                "metaRobotsNoindex": "noindex",
                "opengraphTitle": "OG title"
            },
            "featuredImage": {
                "sourceUrl": "x.jpg",
                "imageFile": { "childImageSharp": {
                    "facebook": { "src": "/static/fb.jpg", "width": 1024, "height": 512 },
                    "twitter": { "src": "/static/tw.jpg" }
                }}
            }
        }));
        let tags = SeoTags::for_post(&config(), &Tz::UTC, &post);

        assert_eq!(tags.title, "Cafe | Thoughts");
        assert_eq!(tags.description, "Meta & more");
        assert_eq!(tags.og_title, "OG title");
        assert_eq!(tags.twitter_title, "Cafe | Thoughts");
        assert_eq!(tags.robots, "noindex, follow");
        assert_eq!(tags.canonical, "https://example.com/cafe/");
        assert_eq!(tags.twitter_image.as_deref(), Some("https://example.com/static/tw.jpg"));
        assert_eq!(tags.published.as_deref(), Some("2020-01-15T10:00:00+00:00"));
        assert_eq!(tags.modified, None);

        let html = tags.render();
        let html = html.as_str();
        assert!(html.starts_with("<title>Cafe | Thoughts</title>"));
        assert!(html.contains(r#"<meta name="description" content="Meta &amp; more">"#));
        assert!(html.contains(r#"<meta property="og:image" content="https://example.com/static/fb.jpg">"#));
        assert!(html.contains(r#"<meta property="og:image:width" content="1024">"#));
        assert!(html.contains(r#"<meta name="twitter:card" content="summary_large_image">"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://example.com/cafe/">"#));
        assert!(!html.contains("article:modified_time"));
    }

    #[test]
    fn test_post_seo_falls_back() {
        let post = Post::from_value(&json!({
            "slug": "plain",
            "title": "Caf&eacute; Review",
            "excerpt": "<p>From the\n excerpt</p>"
        }));
        let tags = SeoTags::for_post(&config(), &Tz::UTC, &post);
        assert_eq!(tags.title, "Café Review");
        assert_eq!(tags.description, "From the excerpt");
        assert_eq!(tags.canonical, "https://example.com/plain/");
        assert_eq!(tags.robots, "index, follow");

        let html = tags.render();
        assert!(html.as_str().contains(r#"<meta name="twitter:card" content="summary">"#));
        assert!(!html.as_str().contains("og:image"));
    }

    #[test]
    fn test_listing_seo() {
        let tags = SeoTags::for_listing(&config(), "Rust", "category/rust/");
        assert_eq!(tags.canonical, "https://example.com/category/rust/");
        assert!(tags.render().as_str().contains(r#"<meta property="og:type" content="website">"#));
    }
}
