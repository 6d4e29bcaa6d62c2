//! Post, term, image and SEO view models
//!
//! Built once per build from the raw query record through the field
//! accessor. Every optional field degrades to an empty value or `None`.

use serde::Serialize;
use serde_json::Value;

use super::accessor::{first_str, get_flag, Fields};
use crate::helpers::{decode_entities, normalize_slug};

/// A blog post as delivered by the content source
#[derive(Debug, Clone, Default, Serialize)]
pub struct Post {
    pub id: String,

    /// Routing key, unique per post
    pub slug: String,

    /// WordPress URI of the post (used for the canonical URL)
    pub uri: String,

    /// Title as delivered, possibly entity-encoded
    pub title: String,

    /// Body HTML
    pub content: String,

    /// Raw publish timestamp
    pub date: String,

    /// Raw last-modified timestamp
    pub modified: String,

    /// Excerpt HTML
    pub excerpt: String,

    pub seo: SeoMeta,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub featured_image: Option<FeaturedImage>,
}

impl Post {
    /// Normalize a raw post record
    pub fn from_value(value: &Value) -> Self {
        let f = Fields(value);
        Self {
            id: f.str("id"),
            slug: f.str("slug"),
            uri: f.str("uri"),
            title: f.str("title"),
            content: f.str("content"),
            date: f.str("date"),
            modified: f.str("modified"),
            excerpt: f.str("excerpt"),
            seo: f.at("seo").map(SeoMeta::from_fields).unwrap_or_default(),
            categories: f
                .nodes("categories")
                .into_iter()
                .filter_map(Category::from_value)
                .collect(),
            tags: f
                .nodes("tags")
                .into_iter()
                .filter_map(Tag::from_value)
                .collect(),
            featured_image: f.at("featuredImage").and_then(FeaturedImage::from_fields),
        }
    }

    /// Entity-decoded title for display
    pub fn display_title(&self) -> String {
        decode_entities(&self.title)
    }

    /// Modified timestamp, falling back to the publish date
    pub fn modified_or_date(&self) -> &str {
        if self.modified.is_empty() {
            &self.date
        } else {
            &self.modified
        }
    }

    /// Record slugs of every category and tag, prefixed by taxonomy, for
    /// relatedness scoring
    pub fn term_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.categories
            .iter()
            .map(|c| format!("c:{}", c.slug))
            .chain(self.tags.iter().map(|t| format!("t:{}", t.slug)))
    }
}

/// Something a post can be filed under
pub trait Term {
    fn name(&self) -> &str;
    fn slug(&self) -> &str;
}

/// A category reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

impl Category {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            slug: normalize_slug(&decode_entities(name)),
            description: None,
        }
    }

    /// `None` for records with neither a name nor a slug
    pub fn from_value(value: &Value) -> Option<Self> {
        let f = Fields(value);
        let (name, slug) = term_name_and_slug(&f)?;
        Some(Self {
            name,
            slug,
            description: f.opt_str("description"),
        })
    }
}

impl Term for Category {
    fn name(&self) -> &str {
        &self.name
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}

/// A tag reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
    pub slug: String,
}

impl Tag {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            slug: normalize_slug(&decode_entities(name)),
        }
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        let (name, slug) = term_name_and_slug(&Fields(value))?;
        Some(Self { name, slug })
    }
}

impl Term for Tag {
    fn name(&self) -> &str {
        &self.name
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}

/// Name and slug of a term, each filled from the other when missing
fn term_name_and_slug(f: &Fields<'_>) -> Option<(String, String)> {
    let name = f.str("name");
    let slug = f.str("slug");
    match (name.is_empty(), slug.is_empty()) {
        (true, true) => None,
        (false, true) => {
            let slug = normalize_slug(&decode_entities(&name));
            Some((name, slug))
        }
        (true, false) => Some((slug.clone(), slug)),
        (false, false) => Some((name, slug)),
    }
}

/// A fixed-size rendition of the featured image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageVariant {
    pub src: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ImageVariant {
    fn from_fields(f: &Fields<'_>, path: &str) -> Option<Self> {
        let variant = f.at(path)?;
        let src = variant.opt_str("src")?;
        Some(Self {
            src,
            width: variant.or("width", None),
            height: variant.or("height", None),
        })
    }
}

/// A post's representative image with its precomputed transforms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeaturedImage {
    pub source_url: String,
    pub alt_text: String,
    pub title: String,
    /// Card-sized rendition (`image1000`)
    pub card: Option<ImageVariant>,
    /// Inline data-URI placeholder (`base700.base64`)
    pub placeholder: Option<String>,
    pub facebook: Option<ImageVariant>,
    pub twitter: Option<ImageVariant>,
}

impl FeaturedImage {
    /// `None` when the record carries no usable image at all
    pub fn from_fields(f: Fields<'_>) -> Option<Self> {
        let sharp = "imageFile.childImageSharp";
        let image = Self {
            source_url: f.str("sourceUrl"),
            alt_text: first_str(f.0, &["altText", "alt_text"]),
            title: f.str("title"),
            card: ImageVariant::from_fields(&f, &format!("{}.image1000", sharp)),
            placeholder: f.opt_str(&format!("{}.base700.base64", sharp)),
            facebook: ImageVariant::from_fields(&f, &format!("{}.facebook", sharp)),
            twitter: ImageVariant::from_fields(&f, &format!("{}.twitter", sharp)),
        };

        let usable = !image.source_url.is_empty()
            || image.card.is_some()
            || image.placeholder.is_some();
        usable.then_some(image)
    }

    /// Source for article cards
    pub fn card_src(&self) -> &str {
        self.card
            .as_ref()
            .map(|v| v.src.as_str())
            .unwrap_or(&self.source_url)
    }

    /// Source for the post page
    pub fn page_src(&self) -> &str {
        self.placeholder.as_deref().unwrap_or(&self.source_url)
    }
}

/// Search and social preview metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeoMeta {
    pub title: String,
    pub meta_desc: String,
    pub meta_keywords: String,
    pub noindex: bool,
    pub nofollow: bool,
    pub opengraph_title: String,
    pub opengraph_description: String,
    pub twitter_title: String,
    pub twitter_description: String,
}

impl SeoMeta {
    pub fn from_fields(f: Fields<'_>) -> Self {
        Self {
            title: f.str("title"),
            meta_desc: f.str("metaDesc"),
            meta_keywords: f.str("metaKeywords"),
            noindex: get_flag(f.0, "metaRobotsNoindex", "noindex"),
            nofollow: get_flag(f.0, "metaRobotsNofollow", "nofollow"),
            opengraph_title: f.str("opengraphTitle"),
            opengraph_description: f.str("opengraphDescription"),
            twitter_title: f.str("twitterTitle"),
            twitter_description: f.str("twitterDescription"),
        }
    }

    /// Robots directives, e.g. `"noindex, follow"`
    pub fn robots(&self) -> String {
        format!(
            "{}, {}",
            if self.noindex { "noindex" } else { "index" },
            if self.nofollow { "nofollow" } else { "follow" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_record() -> Value {
        json!({
            "id": "cG9zdDox",
            "slug": "cafe-review",
            "uri": "/cafe-review/",
            "title": "Caf&eacute; Review",
            "content": "<p>Body</p>",
            "date": "2020-01-15, 10:00:00",
            "modified": "2020-02-01, 09:00:00",
            "excerpt": "<p>Short</p>",
            "seo": {
                "title": "Cafe Review | Blog",
                "metaDesc": "Hello",
                "metaRobotsNoindex": "index",
                "metaRobotsNofollow": "nofollow"
            },
            "categories": { "nodes": [
                { "name": "Food & Drink", "slug": "food-drink", "description": "Eating" },
                { "name": "Reviews" }
            ]},
            "tags": { "nodes": [{ "name": "coffee", "slug": "coffee" }] },
            "featuredImage": {
                "sourceUrl": "http://wp.example.com/cup.jpg",
                "altText": "A cup",
                "title": "Cup",
                "imageFile": { "childImageSharp": {
                    "image1000": { "src": "/static/cup-1000.jpg" },
                    "base700": { "base64": "data:image/jpeg;base64,AAA" },
                    "facebook": { "src": "/static/cup-fb.jpg", "width": 1024, "height": 512 },
                    "twitter": { "src": "/static/cup-tw.jpg" }
                }}
            }
        })
    }

    #[test]
    fn test_from_full_record() {
        let post = Post::from_value(&full_record());
        assert_eq!(post.slug, "cafe-review");
        assert_eq!(post.display_title(), "Café Review");
        assert_eq!(post.seo.meta_desc, "Hello");
        assert_eq!(post.seo.robots(), "index, nofollow");
        assert_eq!(post.categories.len(), 2);
        assert_eq!(post.categories[0].description.as_deref(), Some("Eating"));
        assert_eq!(post.categories[1].slug, "reviews");
        assert_eq!(post.tags, vec![Tag { name: "coffee".into(), slug: "coffee".into() }]);

        let image = post.featured_image.expect("image");
        assert_eq!(image.card_src(), "/static/cup-1000.jpg");
        assert_eq!(image.page_src(), "data:image/jpeg;base64,AAA");
        assert_eq!(image.alt_text, "A cup");
        let facebook = image.facebook.expect("facebook");
        assert_eq!(facebook.width, Some(1024));
        assert_eq!(image.twitter.map(|t| t.height), Some(None));
    }

    #[test]
    fn test_from_sparse_record() {
        let post = Post::from_value(&json!({ "slug": "bare", "title": "Bare" }));
        assert_eq!(post.slug, "bare");
        assert!(post.categories.is_empty());
        assert!(post.tags.is_empty());
        assert!(post.featured_image.is_none());
        assert_eq!(post.seo, SeoMeta::default());
        assert_eq!(post.excerpt, "");
    }

    #[test]
    fn test_null_sub_objects() {
        let post = Post::from_value(&json!({
            "slug": "nulls",
            "seo": null,
            "categories": null,
            "tags": { "nodes": null },
            "featuredImage": null
        }));
        assert!(post.categories.is_empty());
        assert!(post.tags.is_empty());
        assert!(post.featured_image.is_none());
    }

    #[test]
    fn test_image_without_variants() {
        let image = FeaturedImage::from_fields(Fields(&json!({
            "sourceUrl": "http://wp.example.com/a.png",
            "alt_text": "legacy alt"
        })))
        .expect("image");
        assert_eq!(image.card_src(), "http://wp.example.com/a.png");
        assert_eq!(image.page_src(), "http://wp.example.com/a.png");
        assert_eq!(image.alt_text, "legacy alt");

        assert!(FeaturedImage::from_fields(Fields(&json!({ "title": "nothing" }))).is_none());
    }

    #[test]
    fn test_term_without_name_or_slug_is_skipped() {
        assert!(Category::from_value(&json!({ "description": "x" })).is_none());
        let tag = Tag::from_value(&json!({ "slug": "only-slug" })).expect("tag");
        assert_eq!(tag.name, "only-slug");
    }

    #[test]
    fn test_modified_falls_back_to_date() {
        let post = Post::from_value(&json!({ "date": "2020-01-01, 00:00:00" }));
        assert_eq!(post.modified_or_date(), "2020-01-01, 00:00:00");
    }
}
