//! Build pipeline errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading posts or building the site.
///
/// Nothing below `main` catches these; every failure aborts the run.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("post {dir:?}: missing or invalid `{field}`")]
    MissingMetadata { dir: PathBuf, field: &'static str },

    #[error("duplicate slug `{slug}`: used by {first:?} and {second:?}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("template {name}: {source}")]
    Template {
        name: String,
        #[source]
        source: tera::Error,
    },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
