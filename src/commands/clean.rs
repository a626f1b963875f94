//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::generator;
use crate::Site;

/// Delete the generated output and any leftover staging tree
pub fn run(site: &Site) -> Result<()> {
    if site.public_dir.exists() {
        fs::remove_dir_all(&site.public_dir)?;
        tracing::info!("Deleted: {:?}", site.public_dir);
    }

    let staging = generator::staging_dir(&site.public_dir);
    if staging.exists() {
        fs::remove_dir_all(&staging)?;
        tracing::info!("Deleted: {:?}", staging);
    }

    Ok(())
}
