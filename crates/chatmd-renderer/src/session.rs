//! Render session: one rendered view of a changing Markdown source.
//!
//! The UI shell re-renders the whole source on every change. The session
//! keeps what has to survive between passes: which blocks were recently
//! copied and the cleaned code of the last pass, so a copy action puts exactly
//! the displayed text on the clipboard.

use std::fmt::Write;
use std::time::Instant;

use crate::backend::RenderBackend;
use crate::code_block::CodeBlock;
use crate::copy::CopyTracker;
use crate::renderer::MarkdownRenderer;

/// A render session over one backend.
///
/// # Example
///
/// ```
/// use chatmd_renderer::{HtmlBackend, MarkdownRenderer, RenderSession};
///
/// let mut session = RenderSession::new(MarkdownRenderer::<HtmlBackend>::new());
/// let html = session.render("```python\nprint(1)\n```");
/// assert!(html.contains("#icon-copy"));
///
/// assert_eq!(session.copy(0), Some("print(1)"));
/// assert!(session.is_copied(0));
/// assert!(session.render("```python\nprint(1)\n```").contains(r##"<use href="#icon-check"/></svg></button>"##));
/// ```
pub struct RenderSession<B: RenderBackend> {
    renderer: MarkdownRenderer<B>,
    copies: CopyTracker,
    blocks: Vec<CodeBlock>,
    container: bool,
}

impl<B: RenderBackend> RenderSession<B> {
    /// Create a session. The copy window is taken from the renderer.
    #[must_use]
    pub fn new(renderer: MarkdownRenderer<B>) -> Self {
        Self {
            copies: CopyTracker::new(renderer.copy_feedback()),
            renderer,
            blocks: Vec::new(),
            container: true,
        }
    }

    /// Wrap output in the backend's container element (default: on).
    #[must_use]
    pub fn with_container(mut self, enabled: bool) -> Self {
        self.container = enabled;
        self
    }

    /// Render a full document.
    pub fn render(&mut self, markdown: &str) -> String {
        self.render_at(markdown, Instant::now())
    }

    /// Render a full document, evaluating copy state at `now`.
    pub fn render_at(&mut self, markdown: &str, now: Instant) -> String {
        self.copies.expire_at(now);
        self.renderer.set_copied(self.copies.copied_at(now));

        let result = self.renderer.render_markdown(markdown);
        self.blocks = result.code_blocks;

        let container = if self.container {
            B::CONTAINER_CLASS
        } else {
            None
        };

        let mut html = String::with_capacity(B::PRELUDE.len() + result.html.len() + 64);
        if let Some(class) = container {
            write!(html, r#"<div class="{class}">"#).unwrap();
        }
        html.push_str(B::PRELUDE);
        html.push_str(&result.html);
        if container.is_some() {
            html.push_str("</div>");
        }
        html
    }

    /// Copy block `index` of the last pass.
    ///
    /// Returns the text to write to the clipboard and puts the block in its
    /// copied state. Unknown indices return `None` and change nothing.
    pub fn copy(&mut self, index: usize) -> Option<&str> {
        self.copy_at(index, Instant::now())
    }

    /// [`copy`](Self::copy) at an explicit instant.
    pub fn copy_at(&mut self, index: usize, now: Instant) -> Option<&str> {
        let block = self.blocks.iter().find(|block| block.index == index)?;
        self.copies.mark_at(index, now);
        tracing::debug!(
            index,
            window_ms = self.copies.window().as_millis(),
            "Copied code block"
        );
        Some(block.code.as_str())
    }

    /// Whether block `index` currently shows its check icon.
    pub fn is_copied(&self, index: usize) -> bool {
        self.is_copied_at(index, Instant::now())
    }

    /// [`is_copied`](Self::is_copied) at an explicit instant.
    pub fn is_copied_at(&self, index: usize, now: Instant) -> bool {
        self.copies.is_copied_at(index, now)
    }

    /// Reset blocks whose window has passed; returns their indices.
    ///
    /// A non-empty result means the next render will differ.
    pub fn expire(&mut self) -> Vec<usize> {
        self.expire_at(Instant::now())
    }

    /// [`expire`](Self::expire) at an explicit instant.
    pub fn expire_at(&mut self, now: Instant) -> Vec<usize> {
        let expired = self.copies.expire_at(now);
        if !expired.is_empty() {
            tracing::debug!(?expired, "Copy feedback reset");
        }
        expired
    }

    /// When the earliest copied block reverts, if any.
    pub fn next_reset(&self) -> Option<Instant> {
        self.copies.next_deadline()
    }

    /// Cleaned code blocks of the last pass.
    pub fn code_blocks(&self) -> &[CodeBlock] {
        &self.blocks
    }
}

impl<B: RenderBackend> Default for RenderSession<B> {
    fn default() -> Self {
        Self::new(MarkdownRenderer::new())
    }
}
