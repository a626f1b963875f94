//! Generate the static site

use anyhow::Result;

use crate::content::loader;
use crate::generator::SiteBuilder;
use crate::Site;

/// Generate the site: load posts, render every page, swap into place
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let posts = loader::load_posts(&site.posts_dir)?;
    tracing::info!("Loaded {} posts", posts.len());

    let builder = SiteBuilder::new(site)?;
    builder.build(&posts)?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}
