//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

const THEME: &str = "InspiredGitHub";

/// CommonMark renderer
///
/// Fenced code blocks with a recognized language token are syntax
/// highlighted; everything else renders as plain CommonMark with no
/// extensions enabled.
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Render a CommonMark string to HTML
    pub fn render(&self, markdown: &str) -> String {
        // Front-matter is stripped before the body reaches this point
        let parser = Parser::new(markdown);

        let mut events: Vec<Event> = Vec::new();
        // (language token, buffered block text) while inside a code block
        let mut code: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, text)) = code.take() {
                        let highlighted = self.highlight(&text, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code.is_some() => {
                    if let Some((_, buffer)) = code.as_mut() {
                        buffer.push_str(&text);
                    }
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block, falling back to an escaped plain block
    fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let token = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(token)
            .or_else(|| self.syntax_set.find_syntax_by_extension(token));

        if let (Some(syntax), Some(theme)) = (syntax, self.theme_set.themes.get(THEME)) {
            if let Ok(highlighted) =
                highlighted_html_for_string(code, &self.syntax_set, syntax, theme)
            {
                return highlighted;
            }
        }

        format!(
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            token,
            html_escape(code)
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
