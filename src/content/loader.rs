//! Content loader - reads the build-time query result

use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::accessor::{get_nodes, get_path};
use super::Post;
use crate::error::{Error, Result};
use crate::helpers::{is_routable, parse_timestamp, post_path};
use crate::Site;

/// Paths, tried in order, at which a query result may hold its post list
const POST_LIST_PATHS: &[&str] = &[
    "data.wpgraphql.posts",
    "wpgraphql.posts",
    "data.posts",
    "posts",
];

/// Paths at which a single-post query result holds its post
const SINGLE_POST_PATHS: &[&str] = &["data.wpgraphql.post", "wpgraphql.post", "data.post", "post"];

/// Loads posts from the configured query result file
pub struct ContentLoader<'a> {
    site: &'a Site,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Load all posts, newest first. A missing source file means no posts.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let path = &self.site.source_file;
        if !path.exists() {
            tracing::warn!("Query result {:?} not found, nothing to render", path);
            return Ok(Vec::new());
        }

        let value = read_query_result(path)?;
        let mut posts = posts_from_value(&value);

        let tz = self.site.config.tz();
        posts.sort_by_cached_key(|p| std::cmp::Reverse(parse_timestamp(&p.date, &tz)));

        tracing::debug!("Loaded {} posts from {:?}", posts.len(), path);
        Ok(posts)
    }
}

/// Read and parse a query result file
pub fn read_query_result(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&content).map_err(|source| Error::Query {
        path: path.to_path_buf(),
        source,
    })
}

/// Extract posts from any supported query result shape.
///
/// Records without a slug, or whose slug does not name a directory below the
/// output root, are skipped. Of several records mapping to the same page the
/// first one wins.
pub fn posts_from_value(value: &Value) -> Vec<Post> {
    let records = post_records(value);
    let mut seen = HashSet::new();
    let mut posts = Vec::with_capacity(records.len());

    for record in records {
        let post = Post::from_value(record);
        if post.slug.is_empty() {
            tracing::warn!("Skipping post {:?} without a slug", post.id);
            continue;
        }
        let path = post_path(&post.slug);
        if !is_routable(&path) {
            tracing::warn!("Skipping post {:?} with unusable slug {:?}", post.id, post.slug);
            continue;
        }
        if !seen.insert(path) {
            tracing::warn!("Skipping duplicate slug {:?}", post.slug);
            continue;
        }
        posts.push(post);
    }

    posts
}

fn post_records(value: &Value) -> Vec<&Value> {
    if let Value::Array(items) = value {
        return items.iter().filter(|v| v.is_object()).collect();
    }

    for path in POST_LIST_PATHS {
        if get_path(value, path).is_some() {
            return get_nodes(value, path);
        }
    }

    SINGLE_POST_PATHS
        .iter()
        .find_map(|path| get_path(value, path))
        .map(|post| vec![post])
        .unwrap_or_default()
}
