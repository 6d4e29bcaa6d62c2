//! List site content

use anyhow::Result;
use std::collections::BTreeMap;

use crate::content::loader::ContentLoader;
use crate::content::Term;
use crate::helpers::{decode_entities, DateDisplay};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let posts = ContentLoader::new(site).load_posts()?;

    match content_type {
        "post" | "posts" => {
            let tz = site.config.tz();
            println!("Posts ({}):", posts.len());
            for post in &posts {
                let date = DateDisplay::new(&post.date, "YYYY-MM-DD", &tz);
                println!("  {} - {} [{}]", date.human, post.display_title(), post.slug);
            }
        }
        "tag" | "tags" => {
            let counts = count_terms(posts.iter().flat_map(|p| p.tags.iter()));
            print_counts("Tags", counts);
        }
        "category" | "categories" => {
            let counts = count_terms(posts.iter().flat_map(|p| p.categories.iter()));
            print_counts("Categories", counts);
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    Ok(())
}

/// Post count per term name
fn count_terms<'a, T: Term + 'a>(terms: impl Iterator<Item = &'a T>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for term in terms {
        *counts.entry(decode_entities(term.name())).or_insert(0) += 1;
    }
    counts
}

fn print_counts(heading: &str, counts: BTreeMap<String, usize>) {
    println!("{} ({}):", heading, counts.len());
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    for (name, count) in counts {
        println!("  {} ({})", name, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Tag;

    #[test]
    fn test_count_terms() {
        let tags = vec![Tag::new("Rust"), Tag::new("Food &amp; Drink"), Tag::new("Rust")];
        let counts = count_terms(tags.iter());
        assert_eq!(counts.get("Rust"), Some(&2));
        assert_eq!(counts.get("Food & Drink"), Some(&1));
    }
}
