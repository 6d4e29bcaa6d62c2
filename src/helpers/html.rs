//! HTML helper functions

use serde::Serialize;
use std::fmt;

/// Pre-sanitized HTML.
///
/// Anything held here is emitted into pages without escaping. Plain text gets
/// in only through [`Markup::text`]; [`Markup::trusted`] is reserved for HTML
/// that comes from the content source or from our own renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    /// Wrap HTML that is already safe to emit
    pub fn trusted(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Escape plain text for use as element content
    pub fn text(text: &str) -> Self {
        Self(html_escape(text))
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn push(&mut self, other: &Markup) {
        self.0.push_str(&other.0);
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromIterator<Markup> for Markup {
    fn from_iter<I: IntoIterator<Item = Markup>>(iter: I) -> Self {
        let mut out = Markup::empty();
        for fragment in iter {
            out.push(&fragment);
        }
        out
    }
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Decode named and numeric character references into plain text
///
/// # Examples
/// ```ignore
/// decode_entities("Caf&eacute; Review") // -> "Café Review"
/// ```
pub fn decode_entities(s: &str) -> String {
    ::html_escape::decode_html_entities(s).into_owned()
}

/// Entity-encoded source text, decoded and then escaped as element content
pub fn display_text(s: &str) -> Markup {
    Markup::text(&decode_entities(s))
}

/// Generate an image tag, skipping empty attributes other than `alt`
pub fn image_tag(src: &str, alt: &str, title: &str, class: Option<&str>) -> Markup {
    let class_attr = class
        .map(|c| format!(r#" class="{}""#, c))
        .unwrap_or_default();
    let title_attr = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, html_escape(&decode_entities(title)))
    };

    Markup::trusted(format!(
        r#"<img{} src="{}"{} alt="{}">"#,
        class_attr,
        html_escape(src),
        title_attr,
        html_escape(&decode_entities(alt))
    ))
}

/// Strip HTML tags from a string
pub fn strip_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Collapse runs of whitespace into single spaces
pub fn squash_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("Caf&eacute; Review"), "Café Review");
        assert_eq!(decode_entities("Tips &amp; Tricks"), "Tips & Tricks");
        assert_eq!(decode_entities("It&#8217;s here"), "It\u{2019}s here");
        assert_eq!(decode_entities("plain"), "plain");
    }

    #[test]
    fn test_display_text_reescapes() {
        assert_eq!(display_text("&lt;b&gt;bold&lt;/b&gt;").as_str(), "&lt;b&gt;bold&lt;/b&gt;");
        assert_eq!(display_text("Caf&eacute;").as_str(), "Café");
    }

    #[test]
    fn test_markup_text_escapes() {
        assert_eq!(Markup::text("a < b & c").as_str(), "a &lt; b &amp; c");
        assert_eq!(Markup::trusted("<p>x</p>").as_str(), "<p>x</p>");
    }

    #[test]
    fn test_image_tag() {
        let tag = image_tag("/a.jpg", "A \"cat\"", "", Some("post__feat-image"));
        assert_eq!(
            tag.as_str(),
            r#"<img class="post__feat-image" src="/a.jpg" alt="A &quot;cat&quot;">"#
        );
        let tag = image_tag("/a.jpg", "", "Cat", None);
        assert_eq!(tag.as_str(), r#"<img src="/a.jpg" title="Cat" alt="">"#);
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>World</b></p>"), "Hello World");
        assert_eq!(squash_whitespace(" a \n  b "), "a b");
    }

    #[test]
    fn test_markup_collect() {
        let joined: Markup = vec![Markup::trusted("<li>1</li>"), Markup::trusted("<li>2</li>")]
            .into_iter()
            .collect();
        assert_eq!(joined.as_str(), "<li>1</li><li>2</li>");
    }
}
