//! Related posts: selection at build time and the cards section

use chrono_tz::Tz;
use std::collections::HashSet;

use super::card::article_card;
use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{parse_timestamp, Markup};

/// Posts sharing the most categories and tags with `posts[index]`, most
/// recent first among equals. Posts sharing nothing are not related.
pub fn related_posts<'a>(posts: &'a [Post], index: usize, limit: usize, tz: &Tz) -> Vec<&'a Post> {
    let Some(current) = posts.get(index) else {
        return Vec::new();
    };
    let keys: HashSet<String> = current.term_keys().collect();
    if keys.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(usize, Option<_>, &Post)> = posts
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .filter_map(|(_, post)| {
            let candidate: HashSet<String> = post.term_keys().collect();
            let shared = candidate.intersection(&keys).count();
            (shared > 0).then(|| (shared, parse_timestamp(&post.date, tz), post))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));
    scored.into_iter().take(limit).map(|(_, _, post)| post).collect()
}

/// Section of article cards; nothing when there are no related posts
pub fn related_cards(config: &SiteConfig, tz: &Tz, related: &[&Post]) -> Markup {
    if related.is_empty() {
        return Markup::empty();
    }

    let cards: Markup = related
        .iter()
        .map(|post| article_card(config, tz, post))
        .collect();

    Markup::trusted(format!(
        r#"<section class="related"><h2 class="related__title">Related Posts</h2><div class="related__cards">{}</div></section>"#,
        cards
    ))
}
