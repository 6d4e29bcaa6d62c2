//! Presentational components
//!
//! Pure functions from view models to markup fragments. None of them fail:
//! missing optional data renders as nothing.

mod card;
mod list;
mod related;
mod seo;

pub use card::{article_card, card_snippet};
pub use list::{category_list, tag_list, term_list, TermKind};
pub use related::{related_cards, related_posts};
pub use seo::SeoTags;
