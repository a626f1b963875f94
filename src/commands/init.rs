//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Site
title: Blog
author: John Doe
url: http://example.com

# Directory
posts_dir: blog
resources_dir: resources
public_dir: public
"#;

const LAYOUT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site.title }}</title>
  <link rel="stylesheet" href="/styles.css">
</head>
<body>
  <header>
    <nav>
      <a href="/">Home</a>
      <a href="/about/">About</a>
    </nav>
  </header>
  <main>
{{ content }}
  </main>
  <footer>
    <p>{{ site.author }}</p>
  </footer>
</body>
</html>
"#;

const INDEX_TEMPLATE: &str = r#"<h1>Latest posts</h1>
<ul class="post-list">
{% for post in posts %}
  <li>
    <time>{{ post.date }}</time>
    <a href="/blog/{{ post.slug }}/">{{ post.title }}</a>
  </li>
{% endfor %}
</ul>
"#;

const POST_TEMPLATE: &str = r#"<article>
  <time>{{ date }}</time>
{{ content }}
</article>
"#;

const ABOUT_FRAGMENT: &str = r#"<h1>About</h1>
<p>Write something about yourself here.</p>
"#;

const STYLESHEET: &str = r#"body {
  max-width: 44rem;
  margin: 0 auto;
  padding: 0 1rem;
  font-family: sans-serif;
  line-height: 1.6;
}

nav a {
  margin-right: 1rem;
}

.post-list {
  list-style: none;
  padding: 0;
}

.post-list time {
  margin-right: 0.75rem;
  color: #666;
}
"#;

/// Initialize a new site in the given directory
pub fn run(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("blog"))?;
    fs::create_dir_all(target_dir.join("resources"))?;

    fs::write(target_dir.join("config.yml"), CONFIG)?;

    let resources = target_dir.join("resources");
    fs::write(resources.join("layout.html"), LAYOUT_TEMPLATE)?;
    fs::write(resources.join("index.html"), INDEX_TEMPLATE)?;
    fs::write(resources.join("post.html"), POST_TEMPLATE)?;
    fs::write(resources.join("about.html"), ABOUT_FRAGMENT)?;
    fs::write(resources.join("styles.css"), STYLESHEET)?;

    // Create a sample post
    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
slug: hello-world
---

Welcome to your new blog. This is your very first post.

## Quick start

Create a post:

```bash
$ bloggen new "My New Post"
```

Generate the site:

```bash
$ bloggen build
```

The finished site lands in `public/`.
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    let sample_dir = target_dir.join("blog").join("hello-world");
    fs::create_dir_all(&sample_dir)?;
    fs::write(sample_dir.join("index.mdx"), sample_post)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader;
    use crate::generator::SiteBuilder;
    use crate::Site;

    #[test]
    fn test_init_scaffolds_site() {
        let tmp = tempfile::tempdir().unwrap();
        run(tmp.path()).unwrap();

        assert!(tmp.path().join("config.yml").is_file());
        assert!(tmp.path().join("resources/layout.html").is_file());
        assert!(tmp.path().join("resources/styles.css").is_file());
        assert!(tmp.path().join("blog/hello-world/index.mdx").is_file());
    }

    #[test]
    fn test_init_then_build() {
        let tmp = tempfile::tempdir().unwrap();
        run(tmp.path()).unwrap();

        let site = Site::new(tmp.path()).unwrap();
        let posts = loader::load_posts(&site.posts_dir).unwrap();
        assert_eq!(posts.len(), 1);

        SiteBuilder::new(&site).unwrap().build(&posts).unwrap();

        let home = fs::read_to_string(tmp.path().join("public/index.html")).unwrap();
        assert!(home.contains("Hello World"));
        assert!(home.contains("/blog/hello-world/"));
        assert!(tmp.path().join("public/blog/hello-world/index.html").is_file());
    }
}
