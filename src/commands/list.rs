//! List posts

use anyhow::Result;

use crate::content::loader;
use crate::Site;

/// Print the loaded posts in build order
pub fn run(site: &Site) -> Result<()> {
    let posts = loader::load_posts(&site.posts_dir)?;

    println!("Posts ({}):", posts.len());
    for post in posts {
        println!(
            "  {} - {} [{}]",
            post.date.format("%Y-%m-%d"),
            post.title,
            post.slug
        );
    }

    Ok(())
}
