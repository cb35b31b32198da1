//! Unstyled HTML backend.

use crate::backend::RenderBackend;

/// Plain semantic HTML: no classes, no copy controls, no icon sprite.
///
/// Fences are still cleaned; only the presentation differs from
/// [`HtmlBackend`](crate::HtmlBackend).
pub struct PlainBackend;

impl RenderBackend for PlainBackend {}
