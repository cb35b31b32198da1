//! Cleaned fenced code blocks and the view handed to render backends.

use std::time::Duration;

/// A fenced code block after [`sanitize_fence`](crate::sanitize_fence).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
    /// Zero-based position among the fenced blocks of one render pass.
    pub index: usize,
    /// Trimmed fence info string, `None` when the fence had none.
    pub language: Option<String>,
    /// Cleaned code, the exact text the copy action puts on the clipboard.
    pub code: String,
}

impl CodeBlock {
    /// DOM ID of the hidden copy target for this block.
    #[must_use]
    pub fn wrapper_id(&self) -> String {
        wrapper_id(self.index)
    }
}

/// DOM ID of the hidden copy target for block `index`.
#[must_use]
pub fn wrapper_id(index: usize) -> String {
    format!("code-wrapper-{index}")
}

/// Everything a backend needs to render one fence.
#[derive(Clone, Copy, Debug)]
pub struct FenceView<'a> {
    pub block: &'a CodeBlock,
    /// Whether the block is inside its copy feedback window.
    pub copied: bool,
    /// Length of the copy feedback window.
    pub feedback: Duration,
}

impl FenceView<'_> {
    /// Feedback window in whole milliseconds, for inline scripts.
    #[must_use]
    pub fn feedback_ms(&self) -> u128 {
        self.feedback.as_millis()
    }
}
