//! Article card: the summary of a post shown in listings

use chrono_tz::Tz;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{display_text, html_escape, image_tag, post_path, url_for, DateDisplay, Markup};

/// Body snippet of a card: the SEO meta description as a paragraph when
/// there is one, the excerpt as delivered otherwise
pub fn card_snippet(post: &Post) -> Markup {
    if post.seo.meta_desc.is_empty() {
        Markup::trusted(post.excerpt.clone())
    } else {
        Markup::trusted(format!("<p>{}</p>", post.seo.meta_desc))
    }
}

/// Render a link-wrapped card for `post`
pub fn article_card(config: &SiteConfig, tz: &Tz, post: &Post) -> Markup {
    let href = url_for(config, &post_path(&post.slug));

    let image = post
        .featured_image
        .as_ref()
        .map(|img| {
            format!(
                "<div>{}</div>",
                image_tag(img.card_src(), &img.alt_text, &img.title, Some("post__feat-image"))
            )
        })
        .unwrap_or_default();

    let published = DateDisplay::new(&post.date, &config.card_date_format, tz);
    let modified = DateDisplay::new(post.modified_or_date(), &config.card_date_format, tz);

    Markup::trusted(format!(
        concat!(
            r#"<div class="post"><a href="{}">{}"#,
            r#"<h3 class="post__title">{}</h3>{}{}"#,
            r#"<div class="post-content">{}</div></a></div>"#
        ),
        html_escape(&href),
        image,
        display_text(&post.title),
        published.time_tag("published"),
        modified.time_tag("updated"),
        card_snippet(post)
    ))
}
