//! Generic markdown renderer with pluggable backend.

use std::fmt::Write;
use std::marker::PhantomData;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::backend::{AlertKind, RenderBackend};
use crate::state::{CodeBlockState, HeadingState, ImageState, TableState, TocEntry, escape_html};

/// Result of rendering markdown.
#[derive(Clone, Debug, Default)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Table of contents entries, one per heading in document order.
    pub toc: Vec<TocEntry>,
}

/// Generic markdown renderer with pluggable backend.
///
/// Uses the [`RenderBackend`] trait to delegate format-specific rendering
/// while handling common elements (tables, lists, inline formatting) generically.
pub struct MarkdownRenderer<B: RenderBackend> {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    /// Directory of the current page, for resolving relative links.
    base_path: Option<String>,
    /// Pending image data (src, title) waiting for alt text.
    pending_image: Option<(String, String)>,
    gfm: bool,
    /// One entry per open blockquote; `Some` for GFM alerts.
    alert_stack: Vec<Option<AlertKind>>,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::default(),
            base_path: None,
            pending_image: None,
            gfm: true,
            alert_stack: Vec::new(),
            _backend: PhantomData,
        }
    }

    /// Set the directory used to resolve relative links (e.g., "guides").
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    /// - Alerts (`> [!NOTE]`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render markdown text using the configured parser options.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        let parser = Parser::new_ext(markdown, self.parser_options());
        self.render(parser)
    }

    /// Render markdown events and return the result.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }

        RenderResult {
            html: std::mem::take(&mut self.output),
            toc: self.heading.take_toc(),
        }
    }

    /// Push content to output or heading buffer based on context.
    ///
    /// Markup inside image alt text is dropped; only its text is kept.
    fn push_inline(&mut self, content: &str) {
        if self.image.is_active() {
            return;
        }
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.raw_html(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => B::hard_break(&mut self.output),
            Event::Rule => B::horizontal_rule(&mut self.output),
            Event::TaskListMarker(checked) => B::task_list_marker(checked, &mut self.output),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                // Opening tag is written in end_tag once the ID is known
                self.heading.start_heading(heading_level_to_num(level));
            }
            Tag::BlockQuote(kind) => {
                let alert = kind.map(AlertKind::from);
                match alert {
                    Some(alert) => B::alert_start(alert, &mut self.output),
                    None => B::blockquote_start(&mut self.output),
                }
                self.alert_stack.push(alert);
            }
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(|lang| lang.trim_start_matches('{').to_owned())
                        .filter(|lang| !lang.is_empty()),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::List(Some(1)) => self.output.push_str("<ol>"),
            Tag::List(Some(start)) => {
                let _ = write!(self.output, r#"<ol start="{start}">"#);
            }
            Tag::List(None) => self.output.push_str("<ul>"),
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                let _ = write!(self.output, "<{tag}{align}>");
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<del>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                let href = B::transform_link(&dest_url, self.base_path.as_deref());
                let link_tag = if title.is_empty() {
                    format!(r#"<a href="{}">"#, escape_html(&href))
                } else {
                    format!(
                        r#"<a href="{}" title="{}">"#,
                        escape_html(&href),
                        escape_html(&title)
                    )
                };
                self.push_inline(&link_tag);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                if !self.image.is_active() {
                    self.pending_image = Some((dest_url.into_string(), title.into_string()));
                }
                self.image.start();
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => {
                if let Some(heading) = self.heading.complete_heading() {
                    B::heading(heading.level, &heading.id, &heading.html, &mut self.output);
                }
            }
            TagEnd::BlockQuote(_) => match self.alert_stack.pop() {
                Some(Some(alert)) => B::alert_end(alert, &mut self.output),
                _ => B::blockquote_end(&mut self.output),
            },
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                B::code_block(lang.as_deref(), &content, &mut self.output);
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</del>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                if let Some(alt) = self.image.end()
                    && let Some((src, title)) = self.pending_image.take()
                {
                    let mut img = String::new();
                    B::image(&src, &alt, &title, &mut img);
                    self.push_inline(&img);
                }
            }
        }
    }

    fn text(&mut self, text: &str) {
        // Priority: code > image alt > heading > normal text
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.push_html(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
            return;
        }
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        self.push_inline(&format!("<code>{}</code>", escape_html(code)));
    }

    /// Raw HTML is passed through untouched.
    fn raw_html(&mut self, html: &str) {
        self.push_inline(html);
    }

    fn soft_break(&mut self) {
        if self.heading.is_active() {
            self.heading.push_text(" ");
            self.heading.push_html("\n");
        } else if self.image.is_active() {
            self.image.push_str(" ");
        } else {
            self.output.push('\n');
        }
    }
}

impl<B: RenderBackend> Default for MarkdownRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::HtmlBackend;

    fn render_html(markdown: &str) -> RenderResult {
        MarkdownRenderer::<HtmlBackend>::new().render_markdown(markdown)
    }

    fn render_with_base_path(markdown: &str, base_path: &str) -> RenderResult {
        MarkdownRenderer::<HtmlBackend>::new()
            .with_base_path(base_path)
            .render_markdown(markdown)
    }

    #[test]
    fn test_basic_paragraph() {
        let result = render_html("Hello, world!");
        assert_eq!(result.html, "<p>Hello, world!</p>");
    }

    #[test]
    fn test_heading_with_anchor_link() {
        let result = render_html("## Section Title");
        assert_eq!(
            result.html,
            r##"<h2 id="section-title"><a class="anchor-link" href="#section-title">Section Title</a></h2>"##
        );
        assert_eq!(
            result.toc,
            vec![TocEntry {
                level: 2,
                title: "Section Title".to_owned(),
                id: "section-title".to_owned(),
            }]
        );
    }

    #[test]
    fn test_heading_with_inline_formatting() {
        let result = render_html("# Using `cargo` **fast**");
        assert_eq!(
            result.html,
            r##"<h1 id="using-cargo-fast"><a class="anchor-link" href="#using-cargo-fast">Using <code>cargo</code> <strong>fast</strong></a></h1>"##
        );
        assert_eq!(result.toc[0].title, "Using cargo fast");
    }

    #[test]
    fn test_duplicate_headings_get_suffixes() {
        let result = render_html("## Usage\n\n## Usage\n\n## Usage");
        let ids: Vec<_> = result.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["usage", "usage-1", "usage-2"]);
    }

    #[test]
    fn test_code_block_with_language() {
        let result = render_html("```rust\nfn main() {}\n```");
        assert_eq!(
            result.html,
            "<pre><code class=\"hljs language-rust\">fn main() {}\n</code></pre>"
        );
    }

    #[test]
    fn test_code_block_ignores_extra_info() {
        let result = render_html("```python title=\"app.py\"\nprint(1)\n```");
        assert!(result.html.contains(r#"class="hljs language-python""#));
    }

    #[test]
    fn test_indented_code_block() {
        let result = render_html("    let x = 1;\n");
        assert!(result.html.starts_with(r#"<pre><code class="hljs">let x = 1;"#));
    }

    #[test]
    fn test_code_block_escapes_html() {
        let result = render_html("```html\n<div>&</div>\n```");
        assert!(result.html.contains("&lt;div&gt;&amp;&lt;/div&gt;"));
    }

    #[test]
    fn test_raw_html_passthrough() {
        let result = render_html("<div class=\"custom\">Hi</div>\n\nText with <kbd>Ctrl</kbd>.");
        assert!(result.html.contains("<div class=\"custom\">Hi</div>"));
        assert!(result.html.contains("<kbd>Ctrl</kbd>"));
    }

    #[test]
    fn test_table_with_alignment() {
        let result = render_html("| A | B |\n|:--|--:|\n| 1 | 2 |");
        assert_eq!(
            result.html,
            concat!(
                r#"<table><thead><tr><th style="text-align:left">A</th><th style="text-align:right">B</th></tr></thead>"#,
                r#"<tbody><tr><td style="text-align:left">1</td><td style="text-align:right">2</td></tr></tbody></table>"#
            )
        );
    }

    #[test]
    fn test_strikethrough() {
        let result = render_html("~~gone~~");
        assert_eq!(result.html, "<p><del>gone</del></p>");
    }

    #[test]
    fn test_task_list() {
        let result = render_html("- [x] done\n- [ ] todo");
        assert!(result.html.contains(r#"<input type="checkbox" checked disabled> done"#));
        assert!(result.html.contains(r#"<input type="checkbox" disabled> todo"#));
    }

    #[test]
    fn test_gfm_disabled() {
        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_gfm(false)
            .render_markdown("~~not struck~~");
        assert_eq!(result.html, "<p>~~not struck~~</p>");
    }

    #[test]
    fn test_alert() {
        let result = render_html("> [!NOTE]\n> Remember this.");
        assert_eq!(
            result.html,
            r#"<div class="alert alert-note"><p class="alert-title">Note</p><p>Remember this.</p></div>"#
        );
    }

    #[test]
    fn test_plain_blockquote() {
        let result = render_html("> Quoted");
        assert_eq!(result.html, "<blockquote><p>Quoted</p></blockquote>");
    }

    #[test]
    fn test_ordered_list_with_start() {
        let result = render_html("3. three\n4. four");
        assert_eq!(
            result.html,
            r#"<ol start="3"><li>three</li><li>four</li></ol>"#
        );
    }

    #[test]
    fn test_image_alt_text() {
        let result = render_html("![A *diagram*](arch.png \"Architecture\")");
        assert_eq!(
            result.html,
            r#"<p><img src="arch.png" title="Architecture" alt="A diagram"></p>"#
        );
    }

    #[test]
    fn test_link_resolved_with_base_path() {
        let result = render_with_base_path("[Setup](./setup.md#install)", "guides");
        assert_eq!(
            result.html,
            r#"<p><a href="/docs/guides/setup#install">Setup</a></p>"#
        );
    }

    #[test]
    fn test_link_untouched_without_base_path() {
        let result = render_html("[Setup](setup.md)");
        assert_eq!(result.html, r#"<p><a href="setup.md">Setup</a></p>"#);
    }

    #[test]
    fn test_link_in_heading() {
        let result = render_with_base_path("## See [API](../api.md)", "guides");
        assert_eq!(
            result.html,
            r##"<h2 id="see-api"><a class="anchor-link" href="#see-api">See <a href="/docs/api">API</a></a></h2>"##
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let result = render_html("1 < 2 & 3 > 2");
        assert_eq!(result.html, "<p>1 &lt; 2 &amp; 3 &gt; 2</p>");
    }

    #[test]
    fn test_parser_options() {
        let renderer = MarkdownRenderer::<HtmlBackend>::new();
        let options = renderer.parser_options();
        assert!(options.contains(Options::ENABLE_TABLES));
        assert!(options.contains(Options::ENABLE_GFM));

        let renderer = renderer.with_gfm(false);
        assert_eq!(renderer.parser_options(), Options::empty());
    }
}
