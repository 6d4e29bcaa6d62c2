//! Content module - query records, their view models, and body parsing

pub mod accessor;
mod highlight;
pub mod loader;
mod parser;
mod post;

pub use highlight::CodeHighlighter;
pub use parser::ContentParser;
pub use post::{Category, FeaturedImage, ImageVariant, Post, SeoMeta, Tag, Term};
