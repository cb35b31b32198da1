//! Markdown renderer for chat transcripts.
//!
//! Turns model output into an HTML fragment. Fenced code blocks are cleaned
//! of leading explanatory prose, re-indented and wrapped with a copy button;
//! headings, lists, tables, links and blockquotes carry fixed style classes.
//!
//! # Architecture
//!
//! - [`sanitize_fence`]: line-level cleanup of one fence's content
//! - [`RenderBackend`]: the rule table, one method per construct
//!   - [`HtmlBackend`]: styled output with copy controls and icon sprite
//!   - [`PlainBackend`]: unstyled semantic HTML
//! - [`MarkdownRenderer`]: walks `pulldown-cmark` events and dispatches to the backend
//! - [`RenderSession`]: full-document renders plus copy feedback state
//!
//! Rendering is total: every input string produces a string.
//!
//! # Example
//!
//! ```
//! use chatmd_renderer::{HtmlBackend, MarkdownRenderer, RenderSession};
//!
//! let mut session = RenderSession::new(MarkdownRenderer::<HtmlBackend>::new());
//! let html = session.render("# Hello\n\n```rust\nfn main() {}\n```");
//! assert!(html.contains(r#"<code class="language-rust">fn main() {}</code>"#));
//! ```

mod backend;
mod code_block;
mod copy;
mod html;
mod linkify;
mod plain;
mod renderer;
mod sanitize;
mod session;
mod state;
mod util;

pub use backend::RenderBackend;
pub use code_block::{CodeBlock, FenceView, wrapper_id};
pub use copy::CopyTracker;
pub use html::{HtmlBackend, ICON_SPRITE};
pub use linkify::{Segment, linkify};
pub use plain::PlainBackend;
pub use renderer::{
    DEFAULT_COPY_FEEDBACK, MAX_COPY_FEEDBACK, MarkdownRenderer, RenderOptions, RenderResult,
};
pub use sanitize::sanitize_fence;
pub use session::RenderSession;
pub use state::escape_html;
