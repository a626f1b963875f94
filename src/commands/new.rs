//! Create a new post

use anyhow::Result;
use std::fs;

use crate::Site;

/// Create `blog/<slug>/index.mdx` scaffolded from the title
pub fn run(site: &Site, title: &str) -> Result<()> {
    let now = chrono::Local::now();
    let slug = slug::slugify(title);
    let post_dir = site.posts_dir.join(&slug);

    if post_dir.exists() {
        anyhow::bail!("Post directory already exists: {:?}", post_dir);
    }
    fs::create_dir_all(&post_dir)?;

    let content = format!(
        "---\ntitle: {}\ndate: {}\nslug: {}\n---\n\n",
        title,
        now.format("%Y-%m-%d %H:%M:%S"),
        slug
    );

    let file_path = post_dir.join("index.mdx");
    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader;

    #[test]
    fn test_new_post_loads_back() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("blog")).unwrap();
        let site = Site::new(tmp.path()).unwrap();

        run(&site, "My First Post!").unwrap();

        let posts = loader::load_posts(&site.posts_dir).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "My First Post!");
        assert_eq!(posts[0].slug, "my-first-post");
        assert_eq!(posts[0].directory, "my-first-post");
    }

    #[test]
    fn test_new_post_refuses_existing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("blog/taken")).unwrap();
        let site = Site::new(tmp.path()).unwrap();

        assert!(run(&site, "Taken").is_err());
    }
}
