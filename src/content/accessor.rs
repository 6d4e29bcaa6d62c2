//! Null-safe field access on loosely-typed query records
//!
//! The GraphQL source controls the shape of every record, so any field may be
//! missing, `null`, or of an unexpected type. Lookups here never fail: a
//! missing segment or a type mismatch yields the caller's fallback.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Value at a dotted `path` (`"featuredImage.imageFile.childImageSharp"`).
///
/// Numeric segments index into arrays. `null` anywhere along the path counts
/// as absent.
pub fn get_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return (!record.is_null()).then_some(record);
    }

    path.split('.').try_fold(record, |node, segment| {
        let next = match node {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }?;
        (!next.is_null()).then_some(next)
    })
}

/// Typed value at `path`, or `None` if it is absent or of another type
pub fn get_opt<T: DeserializeOwned>(record: &Value, path: &str) -> Option<T> {
    get_path(record, path).and_then(|value| T::deserialize(value).ok())
}

/// Typed value at `path`, or `fallback`
pub fn get_or<T: DeserializeOwned>(record: &Value, path: &str, fallback: T) -> T {
    get_opt(record, path).unwrap_or(fallback)
}

/// String at `path`, or an empty string
pub fn get_str(record: &Value, path: &str) -> String {
    get_or(record, path, String::new())
}

/// First non-empty string among `paths`, or an empty string.
///
/// Covers fields whose spelling differs between queries (`altText` vs
/// `alt_text`).
pub fn first_str(record: &Value, paths: &[&str]) -> String {
    paths
        .iter()
        .map(|path| get_str(record, path))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// Items of a GraphQL connection: `{ nodes: [...] }`, `{ edges: [{ node }] }`
/// or a bare array. Anything else is empty.
pub fn get_nodes<'a>(record: &'a Value, path: &str) -> Vec<&'a Value> {
    let Some(value) = get_path(record, path) else {
        return Vec::new();
    };

    if let Some(Value::Array(nodes)) = get_path(value, "nodes") {
        return nodes.iter().filter(|n| !n.is_null()).collect();
    }
    if let Some(Value::Array(edges)) = get_path(value, "edges") {
        return edges.iter().filter_map(|e| get_path(e, "node")).collect();
    }
    match value {
        Value::Array(items) => items.iter().filter(|n| !n.is_null()).collect(),
        _ => Vec::new(),
    }
}

/// Flag that WordPress plugins report as a bool, a number, or a string such
/// as `"noindex"` / `"1"`.
pub fn get_flag(record: &Value, path: &str, truthy: &str) -> bool {
    match get_path(record, path) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.eq_ignore_ascii_case(truthy) || s == "1" || s.eq_ignore_ascii_case("true")
        }
        _ => false,
    }
}

/// Borrowing view over a record, for call sites with many lookups
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a>(pub &'a Value);

impl<'a> Fields<'a> {
    pub fn str(&self, path: &str) -> String {
        get_str(self.0, path)
    }

    pub fn opt_str(&self, path: &str) -> Option<String> {
        get_opt::<String>(self.0, path).filter(|s| !s.is_empty())
    }

    pub fn or<T: DeserializeOwned>(&self, path: &str, fallback: T) -> T {
        get_or(self.0, path, fallback)
    }

    pub fn at(&self, path: &str) -> Option<Fields<'a>> {
        get_path(self.0, path).map(Fields)
    }

    pub fn nodes(&self, path: &str) -> Vec<&'a Value> {
        get_nodes(self.0, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> Value {
        json!({
            "title": "Hello",
            "seo": { "metaDesc": null, "title": "SEO" },
            "featuredImage": {
                "imageFile": { "childImageSharp": { "image1000": { "src": "/img.jpg" } } }
            },
            "categories": { "nodes": [{ "name": "Rust" }, null, { "name": "Web" }] },
            "tags": [{ "name": "a" }],
            "edges": { "edges": [{ "node": { "id": 1 } }] },
            "count": 3
        })
    }

    #[test]
    fn test_get_path_present() {
        let r = record();
        assert_eq!(
            get_path(&r, "featuredImage.imageFile.childImageSharp.image1000.src"),
            Some(&json!("/img.jpg"))
        );
        assert_eq!(get_path(&r, "categories.nodes.2.name"), Some(&json!("Web")));
    }

    #[test]
    fn test_missing_nested_field_returns_fallback() {
        let r = record();
        assert_eq!(get_path(&r, "featuredImage.imageFile.missing.src"), None);
        assert!(!get_or(&r, "featuredImage.alt.deeper", false));
        assert_eq!(get_or(&r, "a.b.c.d", "none".to_string()), "none");
        assert_eq!(get_str(&r, "seo.metaDesc"), "");
        assert_eq!(get_str(&r, "title.nested"), "");
        assert_eq!(get_str(&r, "categories.nodes.9.name"), "");
    }

    #[test]
    fn test_type_mismatch_returns_fallback() {
        let r = record();
        assert_eq!(get_or(&r, "title", 7_i64), 7);
        assert_eq!(get_or(&r, "count", 0_i64), 3);
        assert_eq!(get_str(&r, "count"), "");
    }

    #[test]
    fn test_null_record() {
        assert_eq!(get_path(&Value::Null, ""), None);
        assert_eq!(get_str(&Value::Null, "anything"), "");
        assert!(get_nodes(&Value::Null, "tags").is_empty());
    }

    #[test]
    fn test_get_nodes_shapes() {
        let r = record();
        assert_eq!(get_nodes(&r, "categories").len(), 2);
        assert_eq!(get_nodes(&r, "tags").len(), 1);
        assert_eq!(get_nodes(&r, "edges").len(), 1);
        assert!(get_nodes(&r, "title").is_empty());
        assert!(get_nodes(&r, "missing").is_empty());
    }

    #[test]
    fn test_first_str() {
        let r = json!({ "alt_text": "B" });
        assert_eq!(first_str(&r, &["altText", "alt_text"]), "B");
        assert_eq!(first_str(&r, &["x", "y"]), "");
    }

    #[test]
    fn test_get_flag() {
        let r = json!({ "a": "noindex", "b": "index", "c": true, "d": 1, "e": "1" });
        assert!(get_flag(&r, "a", "noindex"));
        assert!(!get_flag(&r, "b", "noindex"));
        assert!(get_flag(&r, "c", "noindex"));
        assert!(get_flag(&r, "d", "noindex"));
        assert!(get_flag(&r, "e", "noindex"));
        assert!(!get_flag(&r, "missing", "noindex"));
    }

    #[test]
    fn test_fields_view() {
        let r = record();
        let fields = Fields(&r);
        assert_eq!(fields.opt_str("seo.title").as_deref(), Some("SEO"));
        assert_eq!(fields.opt_str("seo.metaDesc"), None);
        assert!(fields.at("seo").is_some());
        assert!(fields.at("nope").is_none());
    }
}
