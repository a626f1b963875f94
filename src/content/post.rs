//! Post model

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use std::path::PathBuf;

/// A blog post loaded from `<posts>/<directory>/index.mdx`
#[derive(Debug, Clone)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Publication date; the sole sort key
    pub date: NaiveDateTime,

    /// URL-safe identifier; names the output directory under `blog/`
    pub slug: String,

    /// Name of the source directory under the posts root
    pub directory: String,

    /// Full path of the source directory
    pub source_dir: PathBuf,

    /// Raw markdown body
    pub raw: String,

    /// Custom front-matter fields
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Post {
    /// Directory holding the post's bundled images, if any
    pub fn images_dir(&self) -> PathBuf {
        self.source_dir.join("images")
    }
}
