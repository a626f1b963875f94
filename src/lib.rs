//! bloggen: a small static blog generator
//!
//! Reads front-matter Markdown posts from `blog/<post>/index.mdx`, renders
//! them through the Tera templates in `resources/`, and writes the finished
//! site to `public/`.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod templates;

use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::error::BuildError;

/// A site rooted at a base directory
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Posts source directory
    pub posts_dir: PathBuf,
    /// Templates and static assets directory
    pub resources_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Create a new site handle from a base directory
    ///
    /// Reads `config.yml` when present; otherwise the default layout
    /// applies (`blog/`, `resources/`, `public/`).
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, BuildError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("config.yml");

        let config = if config_path.exists() {
            SiteConfig::load(&config_path)?
        } else {
            SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);
        let resources_dir = base_dir.join(&config.resources_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
            resources_dir,
            public_dir,
        })
    }

    /// Generate the static site
    pub fn build(&self) -> anyhow::Result<()> {
        commands::build::run(self)
    }

    /// Delete the generated output
    pub fn clean(&self) -> anyhow::Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str) -> anyhow::Result<()> {
        commands::new::run(self, title)
    }
}
