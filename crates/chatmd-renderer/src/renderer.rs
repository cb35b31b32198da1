//! Generic markdown renderer with pluggable backend.

use std::collections::HashSet;
use std::fmt::Write;
use std::marker::PhantomData;
use std::sync::LazyLock;
use std::time::Duration;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, TextMergeStream};
use regex::Regex;

use crate::backend::RenderBackend;
use crate::code_block::{CodeBlock, FenceView};
use crate::linkify::{Segment, linkify};
use crate::sanitize::sanitize_fence;
use crate::state::{CodeBlockState, ImageState, TableState, escape_html};
use crate::util::heading_level_to_num;

/// How long a copied block shows its check icon unless configured otherwise.
pub const DEFAULT_COPY_FEEDBACK: Duration = Duration::from_millis(2000);

/// Longest accepted copy feedback window.
pub const MAX_COPY_FEEDBACK: Duration = Duration::from_secs(60);

static ANCHOR_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<a[>\s]").unwrap());
static ANCHOR_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</a\s*>").unwrap());

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Cleaned fenced code blocks, in document order.
    pub code_blocks: Vec<CodeBlock>,
}

/// Parser and inline rendering switches.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Tables, strikethrough and task lists.
    pub gfm: bool,
    /// Render soft line breaks as `<br>`.
    pub breaks: bool,
    /// Curly quotes, dashes and ellipses.
    pub smart_punctuation: bool,
    /// Turn bare URLs in text into links.
    pub linkify: bool,
    /// Pass raw HTML through; when off it is escaped and shown as text.
    pub raw_html: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            breaks: true,
            smart_punctuation: true,
            linkify: true,
            raw_html: true,
        }
    }
}

/// Generic markdown renderer with pluggable backend.
///
/// Walks the `pulldown-cmark` event stream and asks the [`RenderBackend`] for
/// the markup of each construct. Fenced code blocks are cleaned with
/// [`sanitize_fence`] and numbered in document order, starting from 0 on every
/// call to [`render`](Self::render).
///
/// # Example
///
/// ```
/// use chatmd_renderer::{HtmlBackend, MarkdownRenderer};
///
/// let mut renderer = MarkdownRenderer::<HtmlBackend>::new();
/// let result = renderer.render_markdown("```sh\nHere is the command\nls -la\n```");
/// assert_eq!(result.code_blocks[0].code, "ls -la");
/// assert!(result.html.contains(r#"<code class="language-sh">ls -la</code>"#));
/// ```
pub struct MarkdownRenderer<B: RenderBackend> {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    pending_image: Option<(String, String)>,
    link_depth: usize,
    options: RenderOptions,
    copy_feedback: Duration,
    copied: HashSet<usize>,
    code_block_index: usize,
    code_blocks: Vec<CodeBlock>,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a new renderer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            pending_image: None,
            link_depth: 0,
            options: RenderOptions::default(),
            copy_feedback: DEFAULT_COPY_FEEDBACK,
            copied: HashSet::new(),
            code_block_index: 0,
            code_blocks: Vec::new(),
            _backend: PhantomData,
        }
    }

    /// Replace all rendering options.
    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.options.gfm = enabled;
        self
    }

    /// Set the copy feedback window embedded in copy controls.
    ///
    /// Clamped to [`MAX_COPY_FEEDBACK`].
    #[must_use]
    pub fn with_copy_feedback(mut self, window: Duration) -> Self {
        self.copy_feedback = window.min(MAX_COPY_FEEDBACK);
        self
    }

    /// Current rendering options.
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Copy feedback window.
    pub fn copy_feedback(&self) -> Duration {
        self.copy_feedback
    }

    /// Mark which block indices render in their copied state on the next pass.
    pub(crate) fn set_copied(&mut self, copied: HashSet<usize>) {
        self.copied = copied;
    }

    /// Get parser options based on configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.options.gfm {
            options |=
                Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
        }
        if self.options.smart_punctuation {
            options |= Options::ENABLE_SMART_PUNCTUATION;
        }
        options
    }

    /// Create a configured parser for the given markdown text.
    #[must_use]
    pub fn create_parser<'a>(&self, markdown: &'a str) -> Parser<'a> {
        Parser::new_ext(markdown, self.parser_options())
    }

    /// Render markdown text directly using configured parser options.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        self.render(TextMergeStream::new(self.create_parser(markdown)))
    }

    /// Render markdown events and return the result.
    ///
    /// Never fails: unbalanced or unusual event sequences produce best-effort
    /// output.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        self.reset();

        for event in events {
            self.process_event(event);
        }

        let html = std::mem::take(&mut self.output);
        let code_blocks = std::mem::take(&mut self.code_blocks);
        tracing::debug!(
            fences = self.code_block_index,
            rendered = code_blocks.len(),
            bytes = html.len(),
            "Rendered markdown"
        );

        RenderResult { html, code_blocks }
    }

    fn reset(&mut self) {
        self.output.clear();
        self.code = CodeBlockState::default();
        self.table = TableState::default();
        self.image = ImageState::default();
        self.pending_image = None;
        self.link_depth = 0;
        self.code_block_index = 0;
        self.code_blocks.clear();
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.raw_html(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.hard_break(),
            Event::Rule => B::horizontal_rule(&mut self.output),
            Event::TaskListMarker(checked) => B::task_list_marker(checked, &mut self.output),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if !self.code.is_active() {
                    self.output.push_str("<p>");
                }
            }
            Tag::Heading { level, .. } => {
                B::heading_start(heading_level_to_num(level), &mut self.output);
            }
            Tag::BlockQuote(_) => B::blockquote_start(&mut self.output),
            Tag::CodeBlock(kind) => match kind {
                CodeBlockKind::Fenced(info) => self.code.start_fenced(&info),
                CodeBlockKind::Indented => self.code.start_indented(),
            },
            Tag::List(start) => B::list_start(start, &mut self.output),
            Tag::Item => self.output.push_str("<li>"),
            // Footnotes, definition lists and super/subscript are never enabled.
            Tag::FootnoteDefinition(_)
            | Tag::HtmlBlock
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::Superscript
            | Tag::Subscript => {}
            Tag::Table(alignments) => {
                self.table.start(alignments);
                B::table_start(&mut self.output);
            }
            Tag::TableHead => {
                self.table.start_head();
                B::table_head_start(&mut self.output);
            }
            Tag::TableRow => {
                self.table.start_row();
                B::table_row_start(&mut self.output);
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                B::table_cell_start(self.table.is_in_head(), align, &mut self.output);
            }
            Tag::Emphasis => self.output.push_str("<em>"),
            Tag::Strong => self.output.push_str("<strong>"),
            Tag::Strikethrough => self.output.push_str("<s>"),
            Tag::Link { dest_url, .. } => {
                self.link_depth += 1;
                B::link_start(&dest_url, &mut self.output);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Start collecting alt text; image will be rendered in end_tag
                self.image.start();
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if !self.code.is_active() {
                    self.output.push_str("</p>");
                }
            }
            TagEnd::Heading(level) => {
                B::heading_end(heading_level_to_num(level), &mut self.output);
            }
            TagEnd::BlockQuote(_) => B::blockquote_end(&mut self.output),
            TagEnd::CodeBlock => {
                let block = self.code.end();
                if block.fenced {
                    self.fence(block.info, &block.content);
                } else {
                    B::code_block(None, &block.content, &mut self.output);
                }
            }
            TagEnd::List(ordered) => B::list_end(ordered, &mut self.output),
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition
            | TagEnd::HtmlBlock
            | TagEnd::MetadataBlock(_)
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition
            | TagEnd::Superscript
            | TagEnd::Subscript => {}
            TagEnd::Image => {
                // Render image with collected alt text
                let alt = self.image.end();
                if let Some((src, title)) = self.pending_image.take() {
                    B::image(&src, &alt, &title, &mut self.output);
                }
            }
            TagEnd::Table => B::table_end(&mut self.output),
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
            TagEnd::Emphasis => self.output.push_str("</em>"),
            TagEnd::Strong => self.output.push_str("</strong>"),
            TagEnd::Strikethrough => self.output.push_str("</s>"),
            TagEnd::Link => {
                self.link_depth = self.link_depth.saturating_sub(1);
                self.output.push_str("</a>");
            }
        }
    }

    /// Clean and emit one fenced block. Every fence consumes an index, even
    /// when it is dropped for being empty.
    fn fence(&mut self, language: Option<String>, content: &str) {
        let index = self.code_block_index;
        self.code_block_index += 1;

        let Some(code) = sanitize_fence(content) else {
            tracing::trace!(index, "Skipping empty fenced block");
            return;
        };

        let block = CodeBlock {
            index,
            language,
            code,
        };
        let view = FenceView {
            block: &block,
            copied: self.copied.contains(&index),
            feedback: self.copy_feedback,
        };
        B::fence(&view, &mut self.output);
        self.code_blocks.push(block);
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else if self.options.linkify && self.link_depth == 0 {
            self.linkified_text(text);
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn linkified_text(&mut self, text: &str) {
        for segment in linkify(text) {
            match segment {
                Segment::Text(plain) => self.output.push_str(&escape_html(plain)),
                Segment::Url { text, href } => {
                    B::link_start(&href, &mut self.output);
                    self.output.push_str(&escape_html(text));
                    self.output.push_str("</a>");
                }
            }
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
        } else {
            write!(self.output, "<code>{}</code>", escape_html(code)).unwrap();
        }
    }

    fn raw_html(&mut self, html: &str) {
        if !self.options.raw_html {
            self.output.push_str(&escape_html(html));
            return;
        }

        // Text inside a raw <a> element is already a link.
        self.link_depth += ANCHOR_OPEN_RE.find_iter(html).count();
        self.link_depth = self
            .link_depth
            .saturating_sub(ANCHOR_CLOSE_RE.find_iter(html).count());
        self.output.push_str(html);
    }

    fn hard_break(&mut self) {
        if self.image.is_active() {
            self.image.push_str("\n");
        } else {
            B::hard_break(&mut self.output);
        }
    }

    fn soft_break(&mut self) {
        if self.code.is_active() {
            self.code.push_newline();
        } else if self.image.is_active() {
            self.image.push_str("\n");
        } else if self.options.breaks {
            B::hard_break(&mut self.output);
            self.output.push('\n');
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HtmlBackend, PlainBackend};
    use pretty_assertions::assert_eq;

    fn render_plain(markdown: &str) -> RenderResult {
        MarkdownRenderer::<PlainBackend>::new().render_markdown(markdown)
    }

    fn render_styled(markdown: &str) -> RenderResult {
        MarkdownRenderer::<HtmlBackend>::new().render_markdown(markdown)
    }

    #[test]
    fn test_basic_paragraph() {
        let result = render_plain("Hello, world!");
        assert_eq!(result.html, "<p>Hello, world!</p>");
    }

    #[test]
    fn test_fence_with_language_class() {
        let result = render_plain("```python\nx = 1\n```");
        assert_eq!(
            result.html,
            r#"<pre><code class="language-python">x = 1</code></pre>"#
        );
    }

    #[test]
    fn test_fence_without_language_has_no_class() {
        let result = render_plain("```\nx = 1\n```");
        assert_eq!(result.html, "<pre><code>x = 1</code></pre>");
        assert_eq!(result.code_blocks[0].language, None);
    }

    #[test]
    fn test_unknown_language_passed_through() {
        let result = render_plain("```my-dsl v2\nrun\n```");
        assert!(result.html.contains(r#"class="language-my-dsl v2""#));
    }

    #[test]
    fn test_empty_fence_renders_nothing() {
        assert_eq!(render_plain("```\n```").html, "");
        assert_eq!(render_styled("```rust\n   \n\n```").html, "");
    }

    #[test]
    fn test_fence_prose_dropped() {
        let result = render_plain("```\nThis is a note about the code\nx = 1\ny = 2\n```");
        assert_eq!(result.code_blocks[0].code, "x = 1\ny = 2");
        assert_eq!(result.html, "<pre><code>x = 1\ny = 2</code></pre>");
    }

    #[test]
    fn test_fence_indentation_stripped() {
        let result = render_plain("```\n    a\n      b\n    c\n```");
        assert_eq!(result.code_blocks[0].code, "a\n  b\nc");
    }

    #[test]
    fn test_all_prose_fence_still_emitted() {
        let result = render_plain("```\nThis is just prose\n```");
        assert_eq!(result.html, "<pre><code></code></pre>");
        assert_eq!(result.code_blocks.len(), 1);
    }

    #[test]
    fn test_inner_closing_fence_cuts_block() {
        let result = render_plain("````\na = 1\n```\nb = 2\n````");
        assert_eq!(result.code_blocks[0].code, "a = 1");
    }

    #[test]
    fn test_fence_code_is_escaped() {
        let result = render_plain("```html\n<div>&</div>\n```");
        assert!(result.html.contains("&lt;div&gt;&amp;&lt;/div&gt;"));
        assert_eq!(result.code_blocks[0].code, "<div>&</div>");
    }

    #[test]
    fn test_indented_code_not_sanitized() {
        let result = render_plain("    This is code\n");
        assert_eq!(result.html, "<pre><code>This is code\n</code></pre>");
        assert!(result.code_blocks.is_empty());
    }

    #[test]
    fn test_block_indices_follow_token_order() {
        let markdown = "```a\nx\n```\n\n```\n\n```\n\n```b\ny\n```";
        let result = render_styled(markdown);
        let indices: Vec<_> = result.code_blocks.iter().map(|b| b.index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert!(result.html.contains(r#"id="code-wrapper-0""#));
        assert!(!result.html.contains(r#"id="code-wrapper-1""#));
        assert!(result.html.contains(r#"id="code-wrapper-2""#));
    }

    #[test]
    fn test_block_indices_stable_across_passes() {
        let markdown = "text\n\n```a\nx\n```\n\n- item\n\n```b\ny\n```";
        let mut renderer = MarkdownRenderer::<HtmlBackend>::new();
        let first = renderer.render_markdown(markdown);
        let second = renderer.render_markdown(markdown);
        assert_eq!(first.html, second.html);
        assert_eq!(first.code_blocks, second.code_blocks);
        assert_eq!(second.code_blocks[1].index, 1);
    }

    #[test]
    fn test_copied_block_renders_check_icon() {
        let mut renderer = MarkdownRenderer::<HtmlBackend>::new();
        renderer.set_copied(HashSet::from([1]));
        let result = renderer.render_markdown("```\na\n```\n\n```\nb\n```");
        let second = result.html.find("'#code-wrapper-1'").unwrap();
        let (first_half, second_half) = result.html.split_at(second);
        assert!(first_half.contains("#icon-copy\"/></svg></button>"));
        assert!(second_half.contains(r##"<use href="#icon-check"/></svg></button>"##));
    }

    #[test]
    fn test_copy_feedback_in_script() {
        let mut renderer =
            MarkdownRenderer::<HtmlBackend>::new().with_copy_feedback(Duration::from_millis(750));
        let result = renderer.render_markdown("```\na\n```");
        assert!(result.html.contains("}, 750); });"));
    }

    #[test]
    fn test_soft_breaks_render_as_br() {
        let result = render_plain("Line one\nLine two");
        assert_eq!(result.html, "<p>Line one<br>\nLine two</p>");
    }

    #[test]
    fn test_soft_breaks_disabled() {
        let options = RenderOptions {
            breaks: false,
            ..RenderOptions::default()
        };
        let result = MarkdownRenderer::<PlainBackend>::new()
            .with_options(options)
            .render_markdown("Line one\nLine two");
        assert_eq!(result.html, "<p>Line one\nLine two</p>");
    }

    #[test]
    fn test_smart_punctuation() {
        let result = render_plain(r#"He said "hi""#);
        assert!(result.html.contains("\u{201c}hi\u{201d}"));

        let options = RenderOptions {
            smart_punctuation: false,
            ..RenderOptions::default()
        };
        let result = MarkdownRenderer::<PlainBackend>::new()
            .with_options(options)
            .render_markdown(r#"He said "hi""#);
        assert!(result.html.contains("&quot;hi&quot;"));
    }

    #[test]
    fn test_linkify_bare_url() {
        let result = render_styled("See https://ollama.com for models.");
        assert!(result.html.contains(
            r#"<a href="https://ollama.com" class="text-blue-600 dark:text-blue-400 hover:underline" target="_blank" rel="noopener noreferrer">https://ollama.com</a> for models."#
        ));
    }

    #[test]
    fn test_linkify_skips_code_and_links() {
        let result = render_plain("`https://a.io` and [https://b.io](https://b.io)");
        assert!(result.html.contains("<code>https://a.io</code>"));
        assert_eq!(result.html.matches("<a ").count(), 1);
    }

    #[test]
    fn test_linkify_disabled() {
        let options = RenderOptions {
            linkify: false,
            ..RenderOptions::default()
        };
        let result = MarkdownRenderer::<PlainBackend>::new()
            .with_options(options)
            .render_markdown("https://a.io");
        assert_eq!(result.html, "<p>https://a.io</p>");
    }

    #[test]
    fn test_linkify_email_and_bare_domain() {
        let result = render_plain("mail a@b.com or visit ollama.com");
        assert_eq!(
            result.html,
            r#"<p>mail <a href="mailto:a@b.com">a@b.com</a> or visit <a href="http://ollama.com">ollama.com</a></p>"#
        );
    }

    #[test]
    fn test_linkify_skips_raw_anchor_text() {
        let result = render_plain(r#"<a href="https://x.io">see https://y.io</a>"#);
        assert_eq!(
            result.html,
            r#"<p><a href="https://x.io">see https://y.io</a></p>"#
        );

        let result = render_plain(r#"<A HREF="https://x.io">x</A> then https://y.io"#);
        assert!(result.html.ends_with(r#"then <a href="https://y.io">https://y.io</a></p>"#));
    }

    #[test]
    fn test_closed_anchor_in_html_block() {
        let result = render_plain("<div><a href=\"https://x.io\">x</a></div>\n\nsee https://y.io");
        assert!(result.html.ends_with(r#"<p>see <a href="https://y.io">https://y.io</a></p>"#));
    }

    #[test]
    fn test_escaped_anchor_does_not_block_linkify() {
        let options = RenderOptions {
            raw_html: false,
            ..RenderOptions::default()
        };
        let result = MarkdownRenderer::<PlainBackend>::new()
            .with_options(options)
            .render_markdown("<a>see https://y.io");
        assert!(result.html.contains(r#"<a href="https://y.io">https://y.io</a>"#));
    }

    #[test]
    fn test_raw_html_passthrough() {
        let result = render_plain("<span>hi</span>");
        assert_eq!(result.html, "<p><span>hi</span></p>");

        let options = RenderOptions {
            raw_html: false,
            ..RenderOptions::default()
        };
        let result = MarkdownRenderer::<PlainBackend>::new()
            .with_options(options)
            .render_markdown("<span>hi</span>");
        assert_eq!(result.html, "<p>&lt;span&gt;hi&lt;/span&gt;</p>");
    }

    #[test]
    fn test_styled_headings() {
        let result = render_styled("## Section");
        assert_eq!(
            result.html,
            r#"<h2 class="text-2xl font-bold mb-3 mt-5 dark:text-white">Section</h2>"#
        );
    }

    #[test]
    fn test_styled_link() {
        let result = render_styled("[docs](https://example.com)");
        assert!(result.html.contains(r#"target="_blank" rel="noopener noreferrer">docs</a>"#));
    }

    #[test]
    fn test_styled_blockquote() {
        let result = render_styled("> quoted");
        assert!(result.html.starts_with(
            r#"<blockquote class="border-l-4 border-gray-300 dark:border-gray-600 pl-4 my-4 italic">"#
        ));
        assert!(result.html.ends_with("</blockquote>"));
    }

    #[test]
    fn test_styled_lists() {
        let result = render_styled("- a\n- b");
        assert!(result.html.starts_with(r#"<ul class="list-disc list-inside space-y-1 my-4"><li>"#));

        let result = render_styled("1. a\n2. b");
        assert!(result.html.starts_with(r#"<ol class="list-decimal"#));
        assert!(result.html.ends_with("</ol>"));
    }

    #[test]
    fn test_styled_table() {
        let result = render_styled("| A | B |\n|---|--:|\n| 1 | 2 |");
        assert!(result.html.starts_with(
            r#"<div class="overflow-x-auto my-4"><table class="min-w-full divide-y divide-gray-200 dark:divide-gray-700"><thead class="bg-gray-50 dark:bg-gray-800"><tr class="hover:bg-gray-50 dark:hover:bg-gray-700"><th class=""#
        ));
        assert!(result.html.contains(
            r#"<td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500 dark:text-gray-400" style="text-align:right">2</td>"#
        ));
        assert!(result.html.ends_with("</tr></tbody></table></div>"));
    }

    #[test]
    fn test_plain_table() {
        let result = render_plain("| A |\n|---|\n| 1 |");
        assert_eq!(
            result.html,
            "<table><thead><tr><th>A</th></tr></thead><tbody><tr><td>1</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_gfm_disabled() {
        let mut renderer = MarkdownRenderer::<PlainBackend>::new().with_gfm(false);
        let result = renderer.render_markdown("| A | B |\n|---|---|\n| 1 | 2 |");
        assert!(!result.html.contains("<table>"));
    }

    #[test]
    fn test_task_list() {
        let result = render_plain("- [ ] Unchecked\n- [x] Checked");
        assert!(result.html.contains(r#"<input type="checkbox" disabled>"#));
        assert!(result.html.contains(r#"<input type="checkbox" checked disabled>"#));
    }

    #[test]
    fn test_emphasis_and_strikethrough() {
        let result = render_plain("*italic* **bold** ~~gone~~");
        assert!(result.html.contains("<em>italic</em>"));
        assert!(result.html.contains("<strong>bold</strong>"));
        assert!(result.html.contains("<s>gone</s>"));
    }

    #[test]
    fn test_image() {
        let result = render_plain("![Alt text](image.png)");
        assert!(result.html.contains(r#"<img src="image.png" alt="Alt text">"#));
    }

    #[test]
    fn test_image_alt_keeps_line_breaks() {
        let result = render_plain("![a\nb](i.png)");
        assert_eq!(result.html, "<p><img src=\"i.png\" alt=\"a\nb\"></p>");

        let result = render_plain("![a  \nb](i.png)");
        assert_eq!(result.html, "<p><img src=\"i.png\" alt=\"a\nb\"></p>");
    }

    #[test]
    fn test_unsupported_extensions_render_as_text() {
        let renderer = MarkdownRenderer::<PlainBackend>::new();
        assert!(!renderer.parser_options().intersects(
            Options::ENABLE_FOOTNOTES
                | Options::ENABLE_DEFINITION_LIST
                | Options::ENABLE_SUPERSCRIPT
                | Options::ENABLE_SUBSCRIPT
        ));

        let result = render_plain("Term\n: definition");
        assert_eq!(result.html, "<p>Term<br>\n: definition</p>");
    }

    #[test]
    fn test_alert_marker_stays_blockquote_text() {
        let result = render_plain("> [!NOTE]\n> Careful");
        assert!(result.html.starts_with("<blockquote>"));
        assert!(result.html.contains("[!NOTE]"));
        assert!(result.html.contains("Careful"));
    }

    #[test]
    fn test_copy_feedback_is_clamped() {
        let renderer = MarkdownRenderer::<HtmlBackend>::new().with_copy_feedback(Duration::MAX);
        assert_eq!(renderer.copy_feedback(), MAX_COPY_FEEDBACK);
    }

    #[test]
    fn test_parser_options() {
        let renderer = MarkdownRenderer::<PlainBackend>::new();
        let options = renderer.parser_options();
        assert!(options.contains(Options::ENABLE_TABLES));
        assert!(options.contains(Options::ENABLE_STRIKETHROUGH));
        assert!(options.contains(Options::ENABLE_TASKLISTS));
        assert!(options.contains(Options::ENABLE_SMART_PUNCTUATION));

        let renderer = MarkdownRenderer::<PlainBackend>::new().with_options(RenderOptions {
            gfm: false,
            smart_punctuation: false,
            ..RenderOptions::default()
        });
        assert_eq!(renderer.parser_options(), Options::empty());
    }

    #[test]
    fn test_render_is_total() {
        let inputs = [
            "",
            "```",
            "````\n```",
            "\u{0}",
            "> ```\n> Note this\n> a",
            "- ```\n  x",
            "| a |\n|---|\n| ``` |",
            "\r\n\r\n```\r\nx\r\n```",
            "[unclosed](",
            "```\n\u{3000}\u{3000}\n```",
            "<div>\n```\n</div>",
            "www. https:// http://)",
        ];
        let mut renderer = MarkdownRenderer::<HtmlBackend>::new();
        for input in inputs {
            let _ = renderer.render_markdown(input);
        }
    }
}
