//! Category and tag lists

use crate::config::SiteConfig;
use crate::content::{Category, Tag, Term};
use crate::helpers::{
    category_path, decode_entities, display_text, html_escape, normalize_slug, tag_path, url_for,
    Markup,
};

/// Which taxonomy a list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    Category,
    Tag,
}

impl TermKind {
    fn heading(self) -> &'static str {
        match self {
            TermKind::Category => "Categories",
            TermKind::Tag => "Tags",
        }
    }

    /// Wrapper, list and item classes
    fn classes(self) -> (&'static str, &'static str, &'static str) {
        match self {
            TermKind::Category => ("cat-wrap", "cats", "cat"),
            TermKind::Tag => ("tag-wrap", "tags", "tag"),
        }
    }

    /// Site path of the listing page for `term`, keyed by its normalized
    /// name, or by its slug when the name normalizes to nothing. `None` when
    /// neither gives a usable key.
    pub fn path<T: Term>(self, config: &SiteConfig, term: &T) -> Option<String> {
        let mut key = normalize_slug(&decode_entities(term.name()));
        if key.is_empty() {
            key = normalize_slug(term.slug());
        }
        if key.is_empty() {
            return None;
        }

        Some(match self {
            TermKind::Category => category_path(config, &key),
            TermKind::Tag => tag_path(config, &key),
        })
    }
}

/// Keyed list of links to term listings, in input order. Terms without a
/// usable path are left out; nothing at all when none remain.
pub fn term_list<T: Term>(config: &SiteConfig, kind: TermKind, terms: &[T]) -> Markup {
    let (wrap_class, list_class, item_class) = kind.classes();
    let items: Markup = terms
        .iter()
        .filter_map(|term| {
            let href = url_for(config, &kind.path(config, term)?);
            Some(Markup::trusted(format!(
                r#"<li class="{}" data-key="{}"><a href="{}">{}</a></li>"#,
                item_class,
                html_escape(term.slug()),
                html_escape(&href),
                display_text(term.name())
            )))
        })
        .collect();

    if items.is_empty() {
        return Markup::empty();
    }

    Markup::trusted(format!(
        r#"<div class="{}"><h3>{}</h3><ul class="{}">{}</ul></div>"#,
        wrap_class,
        kind.heading(),
        list_class,
        items
    ))
}

pub fn category_list(config: &SiteConfig, categories: &[Category]) -> Markup {
    term_list(config, TermKind::Category, categories)
}

pub fn tag_list(config: &SiteConfig, tags: &[Tag]) -> Markup {
    term_list(config, TermKind::Tag, tags)
}
