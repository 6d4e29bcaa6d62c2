//! Build-time syntax highlighting for code blocks in post bodies

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;
use crate::helpers::{decode_entities, strip_html};

lazy_static! {
    static ref CODE_BLOCK: Regex =
        Regex::new(r"(?is)<pre\b([^>]*)>\s*<code\b([^>]*)>(.*?)</code>\s*</pre>")
            .expect("code block pattern");
    static ref LANGUAGE_CLASS: Regex =
        Regex::new(r"\blang(?:uage)?-([A-Za-z0-9_+#-]+)").expect("language class pattern");
}

/// Highlights `<pre><code class="language-x">` blocks with syntect.
///
/// Blocks without a language class are left untouched.
pub struct CodeHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl CodeHighlighter {
    /// Create a new highlighter
    pub fn new(config: &HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: config.theme.clone(),
            line_numbers: config.line_number,
        }
    }

    /// Highlight every code block in `html`
    pub fn highlight_html(&self, html: &str) -> String {
        CODE_BLOCK
            .replace_all(html, |caps: &Captures| {
                let attrs = format!("{} {}", &caps[1], &caps[2]);
                let Some(lang) = LANGUAGE_CLASS.captures(&attrs).map(|c| c[1].to_lowercase())
                else {
                    return caps[0].to_string();
                };
                let code = decode_entities(&strip_html(&caps[3]));
                self.highlight_code(&code, &lang)
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: &str) -> Option<String> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let highlighted =
            match highlighted_html_for_string(code, &self.syntax_set, syntax, self.theme()?) {
                Ok(highlighted) => highlighted,
                Err(e) => {
                    tracing::warn!("Failed to highlight {} block: {}", lang, e);
                    return None;
                }
            };

        Some(if self.line_numbers {
            add_line_numbers(&highlighted, lang, code.lines().count())
        } else {
            format!(r#"<figure class="highlight {}">{}</figure>"#, lang, highlighted)
        })
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
    }
}

/// Put a numbered gutter next to syntect's `<pre>` output
fn add_line_numbers(highlighted: &str, lang: &str, line_count: usize) -> String {
    let gutter = (1..=line_count)
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        lang, gutter, highlighted
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlighter(line_number: bool) -> CodeHighlighter {
        CodeHighlighter::new(&HighlightConfig {
            line_number,
            ..HighlightConfig::default()
        })
    }

    #[test]
    fn test_highlights_language_block() {
        let html = r#"<p>x</p><pre><code class="language-rust">fn main() {}</code></pre>"#;
        let out = highlighter(false).highlight_html(html);
        assert!(out.starts_with("<p>x</p>"));
        assert!(out.contains(r#"<figure class="highlight rust">"#));
        assert!(out.contains("main"));
        assert!(!out.contains("language-rust"));
    }

    #[test]
    fn test_language_on_pre() {
        let html = r#"<pre class="wp-block-code language-js"><code>let a = 1;</code></pre>"#;
        let out = highlighter(false).highlight_html(html);
        assert!(out.contains(r#"<figure class="highlight js">"#));
    }

    #[test]
    fn test_block_without_language_untouched() {
        let html = r#"<pre class="wp-block-code"><code>plain &lt;text&gt;</code></pre>"#;
        assert_eq!(highlighter(false).highlight_html(html), html);
    }

    #[test]
    fn test_entities_decoded_before_highlighting() {
        let html = r#"<pre><code class="language-html">&lt;div&gt;&amp;&lt;/div&gt;</code></pre>"#;
        let out = highlighter(false).highlight_html(html);
        // syntect re-escapes the decoded source
        assert!(out.contains("&lt;"));
        assert!(!out.contains("&amp;lt;"));
    }

    #[test]
    fn test_line_numbers() {
        let html = "<pre><code class=\"language-python\">a = 1\nb = 2\n</code></pre>";
        let out = highlighter(true).highlight_html(html);
        assert!(out.contains(r#"<span class="line-number">1</span>"#));
        assert!(out.contains(r#"<span class="line-number">2</span>"#));
        assert!(!out.contains(r#"<span class="line-number">3</span>"#));
        assert!(out.contains(r#"<td class="gutter">"#));
    }
}
