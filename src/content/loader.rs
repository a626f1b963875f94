//! Post loader - loads posts from the posts directory

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{FrontMatter, Post};
use crate::error::BuildError;

/// The fixed document name inside each post directory
const POST_DOCUMENT: &str = "index.mdx";

/// Load all posts from the given directory, sorted by date descending.
///
/// Each immediate subdirectory must contain an `index.mdx` document with
/// `title`, `date` and `slug` front-matter. Subdirectories are visited in
/// name order, so posts with equal dates come out in the same order on
/// every run.
pub fn load_posts(posts_dir: &Path) -> Result<Vec<Post>, BuildError> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(posts_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();

    let mut posts = Vec::with_capacity(dirs.len());
    for dir in &dirs {
        posts.push(load_post(dir)?);
    }

    // Stable sort: date ties keep directory-name order
    posts.sort_by(|a, b| b.date.cmp(&a.date));

    check_unique_slugs(&posts)?;

    tracing::debug!("Loaded {} posts from {:?}", posts.len(), posts_dir);
    Ok(posts)
}

/// Load a single post from its directory
fn load_post(dir: &Path) -> Result<Post, BuildError> {
    let missing = |field| BuildError::MissingMetadata {
        dir: dir.to_path_buf(),
        field,
    };

    let doc_path = dir.join(POST_DOCUMENT);
    if !doc_path.is_file() {
        return Err(missing(POST_DOCUMENT));
    }

    let content = fs::read_to_string(&doc_path)?;
    let (fm, body) = FrontMatter::parse(&content)?;

    let date = fm.parse_date().ok_or_else(|| missing("date"))?;
    let title = fm.title.ok_or_else(|| missing("title"))?;
    let slug = fm.slug.ok_or_else(|| missing("slug"))?;

    let directory = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Post {
        title,
        date,
        slug,
        directory,
        source_dir: dir.to_path_buf(),
        raw: body.to_string(),
        extra: fm.extra,
    })
}

/// Every slug names an output directory, so collisions would silently
/// overwrite an earlier post's page.
fn check_unique_slugs(posts: &[Post]) -> Result<(), BuildError> {
    let mut seen: HashMap<&str, &Post> = HashMap::new();
    for post in posts {
        if let Some(first) = seen.insert(post.slug.as_str(), post) {
            return Err(BuildError::DuplicateSlug {
                slug: post.slug.clone(),
                first: first.source_dir.clone(),
                second: post.source_dir.clone(),
            });
        }
    }
    Ok(())
}
