//! View model of a single post page

use chrono_tz::Tz;
use serde::Serialize;

use crate::components::{category_list, related_cards, tag_list};
use crate::config::SiteConfig;
use crate::content::{ContentParser, Post};
use crate::helpers::{display_text, image_tag, DateDisplay, Markup};

/// Build-time data a post page needs beyond the post itself
#[derive(Debug, Default)]
pub struct PageContext<'a> {
    pub related_posts: Vec<&'a Post>,
}

/// Markup fragments of a post page, in document order
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub title: Markup,
    pub published: Markup,
    pub modified: Markup,
    pub categories: Markup,
    pub featured_image: Markup,
    pub content: Markup,
    pub tags: Markup,
    pub related: Markup,
}

impl PostView {
    pub fn build(
        config: &SiteConfig,
        tz: &Tz,
        parser: &ContentParser,
        post: &Post,
        context: &PageContext<'_>,
    ) -> Self {
        let published = DateDisplay::new(&post.date, &config.post_date_format, tz);
        let modified = DateDisplay::new(post.modified_or_date(), &config.post_date_format, tz);

        let featured_image = post
            .featured_image
            .as_ref()
            .map(|img| image_tag(img.page_src(), &img.alt_text, &img.title, Some("post__feat-image")))
            .unwrap_or_default();

        Self {
            title: display_text(&post.title),
            published: published.time_tag("published"),
            modified: modified.time_tag("updated"),
            categories: category_list(config, &post.categories),
            featured_image,
            content: parser.parse(&post.content),
            tags: tag_list(config, &post.tags),
            related: related_cards(config, tz, &context.related_posts),
        }
    }
}
