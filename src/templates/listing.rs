//! Listing pages: the home page and one page per category and tag

use chrono_tz::Tz;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::components::{article_card, TermKind};
use crate::config::SiteConfig;
use crate::content::{Post, Term};
use crate::helpers::{decode_entities, display_text, Markup};

/// A titled run of posts rendered as article cards
#[derive(Debug)]
pub struct Listing<'a> {
    pub title: String,
    /// Site path of the page, relative to the root
    pub path: String,
    pub description: Option<String>,
    pub posts: Vec<&'a Post>,
}

impl<'a> Listing<'a> {
    /// Every post, in the order given
    pub fn home(config: &SiteConfig, posts: &'a [Post]) -> Self {
        Self {
            title: config.title.clone(),
            path: String::new(),
            description: (!config.description.is_empty()).then(|| config.description.clone()),
            posts: posts.iter().collect(),
        }
    }

    /// One listing per distinct category or tag, keyed by site path. Terms
    /// whose names normalize to the same path share a page; the first name
    /// seen titles it.
    pub fn for_terms(config: &SiteConfig, kind: TermKind, posts: &'a [Post]) -> Vec<Self> {
        let mut pages: BTreeMap<String, Self> = BTreeMap::new();

        for post in posts {
            let terms: Vec<(Option<String>, &str, Option<&str>)> = match kind {
                TermKind::Category => post
                    .categories
                    .iter()
                    .map(|c| (kind.path(config, c), c.name(), c.description.as_deref()))
                    .collect(),
                TermKind::Tag => post
                    .tags
                    .iter()
                    .map(|t| (kind.path(config, t), t.name(), None))
                    .collect(),
            };

            for (path, name, description) in terms {
                let Some(path) = path else {
                    tracing::warn!("Skipping {:?} {:?} without a usable slug", kind, name);
                    continue;
                };
                let page = pages.entry(path.clone()).or_insert_with(|| Self {
                    title: decode_entities(name),
                    path,
                    description: None,
                    posts: Vec::new(),
                });
                if page.description.is_none() {
                    page.description = description.filter(|d| !d.is_empty()).map(str::to_string);
                }
                if !page.posts.iter().any(|p| p.slug == post.slug) {
                    page.posts.push(post);
                }
            }
        }

        pages.into_values().collect()
    }
}

/// Markup fragments of a listing page
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub title: Markup,
    pub description: Markup,
    pub cards: Markup,
}

impl ListingView {
    pub fn build(config: &SiteConfig, tz: &Tz, listing: &Listing<'_>) -> Self {
        Self {
            title: display_text(&listing.title),
            description: listing
                .description
                .as_deref()
                .map(display_text)
                .unwrap_or_default(),
            cards: listing
                .posts
                .iter()
                .map(|post| article_card(config, tz, post))
                .collect(),
        }
    }
}
