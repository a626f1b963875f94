//! Site configuration (config.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::BuildError;

/// Main site configuration
///
/// Every field has a default, so a site without a `config.yml` builds with
/// the standard layout: posts in `blog/`, templates in `resources/`, output
/// in `public/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub url: String,

    // Directory
    pub posts_dir: String,
    pub resources_dir: String,
    pub public_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            author: String::new(),
            url: String::new(),

            posts_dir: "blog".to_string(),
            resources_dir: "resources".to_string(),
            public_dir: "public".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BuildError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
