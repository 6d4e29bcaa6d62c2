//! Formatting helpers shared by the components and page templates

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
