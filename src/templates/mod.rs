//! Template rendering backed by Tera
//!
//! Templates are plain files in the site's resources directory; this module
//! only loads them and supplies the data context. `about.html` is not
//! registered here - it is a static fragment the builder reads directly.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera};

use crate::error::BuildError;

/// Template files expected in the resources directory
pub const TEMPLATE_NAMES: [&str; 3] = ["layout.html", "index.html", "post.html"];

/// Template renderer over the site's resources directory
#[derive(Debug)]
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Load the site templates from the resources directory
    pub fn from_dir(resources_dir: &Path) -> Result<Self, BuildError> {
        let mut tera = Tera::default();

        // Pages are composed from pre-rendered HTML fragments, so
        // autoescaping would double-escape the content variables.
        tera.autoescape_on(vec![]);

        for name in TEMPLATE_NAMES {
            let source = fs::read_to_string(resources_dir.join(name))?;
            tera.add_raw_template(name, &source)
                .map_err(|e| BuildError::Template {
                    name: name.to_string(),
                    source: e,
                })?;
        }

        Ok(Self { tera })
    }

    /// Render a template with the given context
    pub fn render(&self, name: &str, context: &Context) -> Result<String, BuildError> {
        self.tera
            .render(name, context)
            .map_err(|e| BuildError::Template {
                name: name.to_string(),
                source: e,
            })
    }
}

/// Post fields exposed to the index template
#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub title: String,
    pub date: String,
    pub slug: String,
    pub directory: String,
    pub content: String,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: indexmap::IndexMap<String, serde_yaml::Value>,
}

/// Site fields exposed to the layout template
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub author: String,
    pub url: String,
}
