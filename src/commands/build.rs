//! Build the static site

use anyhow::Result;
use std::time::Instant;

use crate::content::loader::ContentLoader;
use crate::generator::{BuildReport, Generator};
use crate::Site;

/// Load the query result and render every page
pub fn run(site: &Site) -> Result<BuildReport> {
    let start = Instant::now();

    let posts = ContentLoader::new(site).load_posts()?;
    tracing::info!("Loaded {} posts", posts.len());

    let generator = Generator::new(site)?;
    let report = generator.generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages in {:.2}s",
        report.pages(),
        duration.as_secs_f64()
    );

    Ok(report)
}
