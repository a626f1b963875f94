//! Site builder - renders pages and assembles the output tree
//!
//! The whole site is built into a staging directory next to the output
//! root, then swapped into place. A failed build never touches the
//! previous output; leftover staging trees are cleared on the next run.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tera::Context;
use walkdir::WalkDir;

use crate::content::{MarkdownRenderer, Post};
use crate::error::BuildError;
use crate::templates::{PostData, SiteData, TemplateRenderer};
use crate::Site;

/// Date format used in rendered pages
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Staging tree built next to the output root and renamed into place
pub fn staging_dir(public_dir: &Path) -> PathBuf {
    let mut name = public_dir
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("public"));
    name.push(".staging");
    public_dir.with_file_name(name)
}

/// Builds the static site from loaded posts
pub struct SiteBuilder {
    site: Site,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
    site_data: SiteData,
}

impl SiteBuilder {
    /// Create a new builder, loading the site templates
    pub fn new(site: &Site) -> Result<Self, BuildError> {
        let renderer = TemplateRenderer::from_dir(&site.resources_dir)?;
        let site_data = SiteData {
            title: site.config.title.clone(),
            author: site.config.author.clone(),
            url: site.config.url.clone(),
        };

        Ok(Self {
            site: site.clone(),
            renderer,
            markdown: MarkdownRenderer::new(),
            site_data,
        })
    }

    /// Build the whole site, then swap the staging tree into place
    pub fn build(&self, posts: &[Post]) -> Result<(), BuildError> {
        let staging = staging_dir(&self.site.public_dir);
        if staging.exists() {
            fs::remove_dir_all(&staging)?;
        }
        fs::create_dir_all(staging.join("about"))?;
        fs::create_dir(staging.join("blog"))?;

        fs::copy(
            self.site.resources_dir.join("styles.css"),
            staging.join("styles.css"),
        )?;

        let home = self.render_home(posts)?;
        fs::write(staging.join("index.html"), home)?;

        let about = self.render_about()?;
        fs::write(staging.join("about").join("index.html"), about)?;

        for post in posts {
            self.build_post(&staging, post)?;
        }

        self.swap_into_place(&staging)?;

        tracing::info!(
            "Generated {} posts into {:?}",
            posts.len(),
            self.site.public_dir
        );
        Ok(())
    }

    /// Render the home page: index content wrapped in the layout
    fn render_home(&self, posts: &[Post]) -> Result<String, BuildError> {
        let post_data: Vec<PostData> = posts
            .iter()
            .map(|p| PostData {
                title: p.title.clone(),
                date: p.date.format(DATE_FORMAT).to_string(),
                slug: p.slug.clone(),
                directory: p.directory.clone(),
                content: p.raw.clone(),
                extra: p.extra.clone(),
            })
            .collect();

        let mut context = Context::new();
        context.insert("posts", &post_data);
        let content = self.renderer.render("index.html", &context)?;

        self.render_layout("Home", &content)
    }

    /// Render the about page from the static fragment
    fn render_about(&self) -> Result<String, BuildError> {
        let fragment = fs::read_to_string(self.site.resources_dir.join("about.html"))?;
        self.render_layout("About", &fragment)
    }

    /// Wrap rendered content in the shared layout
    fn render_layout(&self, title: &str, content: &str) -> Result<String, BuildError> {
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("content", content);
        context.insert("site", &self.site_data);
        self.renderer.render("layout.html", &context)
    }

    /// Build one post page (and its bundled images) into the staging tree
    fn build_post(&self, staging: &Path, post: &Post) -> Result<(), BuildError> {
        let post_dir = staging.join("blog").join(&post.slug);
        fs::create_dir(&post_dir)?;

        let images = post.images_dir();
        if images.is_dir() {
            copy_dir(&images, &post_dir.join("images"))?;
        }

        let html = self.markdown.render(&post.raw);

        let mut context = Context::new();
        context.insert("date", &post.date.format(DATE_FORMAT).to_string());
        context.insert("content", &html);
        let content = self.renderer.render("post.html", &context)?;

        let page = self.render_layout(&post.title, &content)?;
        fs::write(post_dir.join("index.html"), page)?;

        tracing::debug!("Generated post: {:?}", post_dir);
        Ok(())
    }

    /// Replace the output root with the finished staging tree
    fn swap_into_place(&self, staging: &Path) -> Result<(), BuildError> {
        if self.site.public_dir.exists() {
            fs::remove_dir_all(&self.site.public_dir)?;
        }
        fs::rename(staging, &self.site.public_dir)?;
        Ok(())
    }
}

/// Recursively copy a directory
fn copy_dir(from: &Path, to: &Path) -> Result<(), BuildError> {
    for entry in WalkDir::new(from)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        let Ok(relative) = path.strip_prefix(from) else {
            continue;
        };
        let dest = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)?;
        } else {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader;
    use std::collections::BTreeMap;

    const LAYOUT: &str =
        "<html><head><title>{{ title }} - {{ site.title }}</title></head><body>{{ content }}</body></html>";
    const INDEX: &str =
        "{% for post in posts %}<a href=\"/blog/{{ post.slug }}/\">{{ post.title }}</a>\n{% endfor %}";
    const POST: &str = "<time>{{ date }}</time>\n{{ content }}";
    const ABOUT: &str = "<p>About me.</p>";

    fn scaffold_site(root: &Path) {
        let resources = root.join("resources");
        fs::create_dir_all(&resources).unwrap();
        fs::write(resources.join("layout.html"), LAYOUT).unwrap();
        fs::write(resources.join("index.html"), INDEX).unwrap();
        fs::write(resources.join("post.html"), POST).unwrap();
        fs::write(resources.join("about.html"), ABOUT).unwrap();
        fs::write(resources.join("styles.css"), "body { margin: 0; }").unwrap();
        fs::create_dir_all(root.join("blog")).unwrap();
    }

    fn write_post(root: &Path, dir: &str, title: &str, date: &str, slug: &str, body: &str) {
        let d = root.join("blog").join(dir);
        fs::create_dir_all(&d).unwrap();
        fs::write(
            d.join("index.mdx"),
            format!("---\ntitle: {title}\ndate: {date}\nslug: {slug}\n---\n\n{body}"),
        )
        .unwrap();
    }

    fn build_site(root: &Path) -> Result<(), BuildError> {
        let site = Site::new(root).unwrap();
        let posts = loader::load_posts(&site.posts_dir)?;
        SiteBuilder::new(&site)?.build(&posts)
    }

    /// Snapshot the output tree as relative-path -> bytes
    fn read_tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
        let mut tree = BTreeMap::new();
        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file() {
                let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
                tree.insert(relative, fs::read(entry.path()).unwrap());
            }
        }
        tree
    }

    #[test]
    fn test_output_layout_and_slug_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        scaffold_site(tmp.path());
        write_post(tmp.path(), "a-post", "Older", "2023-01-01", "older", "one");
        write_post(tmp.path(), "b-post", "Newer", "2024-01-01", "newer", "two");

        build_site(tmp.path()).unwrap();

        let public = tmp.path().join("public");
        assert!(public.join("index.html").is_file());
        assert!(public.join("about/index.html").is_file());
        assert!(public.join("styles.css").is_file());
        assert!(public.join("blog/older/index.html").is_file());
        assert!(public.join("blog/newer/index.html").is_file());

        // no leftover staging tree
        assert!(!staging_dir(&public).exists());

        // home page lists newest first
        let home = fs::read_to_string(public.join("index.html")).unwrap();
        let newer = home.find("/blog/newer/").unwrap();
        let older = home.find("/blog/older/").unwrap();
        assert!(newer < older);

        // layout applied everywhere
        assert!(home.starts_with("<html>"));
        let about = fs::read_to_string(public.join("about/index.html")).unwrap();
        assert!(about.contains("<title>About - Blog</title>"));
        assert!(about.contains("<p>About me.</p>"));
    }

    #[test]
    fn test_markdown_rendered_into_post_page() {
        let tmp = tempfile::tempdir().unwrap();
        scaffold_site(tmp.path());
        write_post(tmp.path(), "p", "Post", "2024-01-01", "post", "# Hello");

        build_site(tmp.path()).unwrap();

        let page =
            fs::read_to_string(tmp.path().join("public/blog/post/index.html")).unwrap();
        assert!(page.contains("<h1>Hello</h1>"));
        assert!(page.contains("<time>2024-01-01</time>"));
        assert!(page.contains("<title>Post - Blog</title>"));
    }

    #[test]
    fn test_images_copied_when_present() {
        let tmp = tempfile::tempdir().unwrap();
        scaffold_site(tmp.path());
        write_post(tmp.path(), "with-pics", "Pics", "2024-01-01", "pics", "body");

        let images = tmp.path().join("blog/with-pics/images");
        fs::create_dir_all(images.join("nested")).unwrap();
        fs::write(images.join("photo.png"), b"\x89PNG fake").unwrap();
        fs::write(images.join("nested/deep.gif"), b"GIF89a fake").unwrap();

        build_site(tmp.path()).unwrap();

        let out = tmp.path().join("public/blog/pics/images");
        assert_eq!(fs::read(out.join("photo.png")).unwrap(), b"\x89PNG fake");
        assert_eq!(
            fs::read(out.join("nested/deep.gif")).unwrap(),
            b"GIF89a fake"
        );
    }

    #[test]
    fn test_no_images_directory_created_when_absent() {
        let tmp = tempfile::tempdir().unwrap();
        scaffold_site(tmp.path());
        write_post(tmp.path(), "plain", "Plain", "2024-01-01", "plain", "body");

        build_site(tmp.path()).unwrap();

        assert!(!tmp.path().join("public/blog/plain/images").exists());
    }

    #[test]
    fn test_rebuild_is_byte_identical() {
        let tmp = tempfile::tempdir().unwrap();
        scaffold_site(tmp.path());
        write_post(tmp.path(), "a", "A", "2024-01-01 08:00:00", "a", "# One");
        write_post(tmp.path(), "b", "B", "2024-02-01", "b", "Two `code`");

        build_site(tmp.path()).unwrap();
        let first = read_tree(&tmp.path().join("public"));

        build_site(tmp.path()).unwrap();
        let second = read_tree(&tmp.path().join("public"));

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_slug_aborts_before_output() {
        let tmp = tempfile::tempdir().unwrap();
        scaffold_site(tmp.path());
        write_post(tmp.path(), "ok", "Ok", "2024-01-01", "ok", "fine");

        // first build succeeds
        build_site(tmp.path()).unwrap();
        let before = read_tree(&tmp.path().join("public"));

        // a bad post fails the load, and the previous output is untouched
        let bad = tmp.path().join("blog/bad");
        fs::create_dir_all(&bad).unwrap();
        fs::write(bad.join("index.mdx"), "---\ntitle: Bad\ndate: 2024-03-01\n---\nbody").unwrap();

        let err = build_site(tmp.path()).unwrap_err();
        assert!(matches!(
            err,
            BuildError::MissingMetadata { field: "slug", .. }
        ));
        assert_eq!(before, read_tree(&tmp.path().join("public")));
    }

    #[test]
    fn test_duplicate_slug_aborts_before_output() {
        let tmp = tempfile::tempdir().unwrap();
        scaffold_site(tmp.path());
        write_post(tmp.path(), "one", "One", "2024-01-01", "same", "x");
        write_post(tmp.path(), "two", "Two", "2024-02-01", "same", "y");

        let err = build_site(tmp.path()).unwrap_err();
        assert!(matches!(err, BuildError::DuplicateSlug { .. }));
        assert!(!tmp.path().join("public").exists());
    }

    #[test]
    fn test_template_error_leaves_previous_output() {
        let tmp = tempfile::tempdir().unwrap();
        scaffold_site(tmp.path());
        write_post(tmp.path(), "p", "P", "2024-01-01", "p", "x");

        build_site(tmp.path()).unwrap();
        let before = read_tree(&tmp.path().join("public"));

        // break the post template: renders fail, swap never happens
        fs::write(
            tmp.path().join("resources/post.html"),
            "{{ undefined_variable }}",
        )
        .unwrap();

        let err = build_site(tmp.path()).unwrap_err();
        assert!(matches!(err, BuildError::Template { .. }));
        assert_eq!(before, read_tree(&tmp.path().join("public")));
    }

    #[test]
    fn test_staging_dir_name() {
        assert_eq!(
            staging_dir(Path::new("/site/public")),
            Path::new("/site/public.staging")
        );
    }
}
