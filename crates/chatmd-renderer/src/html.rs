//! Styled HTML backend.
//!
//! Every block construct carries fixed utility classes with light and dark
//! variants, links open in a new tab, and fenced code blocks are wrapped with
//! a hover-revealed copy button.

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::code_block::FenceView;
use crate::state::escape_html;

/// SVG symbols referenced by the copy button (`#icon-copy`, `#icon-check`).
pub const ICON_SPRITE: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" style="display: none;">"#,
    r#"<symbol id="icon-copy" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">"#,
    r#"<path d="M8 4v12a2 2 0 0 0 2 2h8a2 2 0 0 0 2-2V7.242a2 2 0 0 0-.602-1.43L16.083 2.57A2 2 0 0 0 14.685 2H10a2 2 0 0 0-2 2z"/>"#,
    r#"<path d="M16 18v2a2 2 0 0 1-2 2H6a2 2 0 0 1-2-2V9a2 2 0 0 1 2-2h2"/>"#,
    r#"</symbol>"#,
    r#"<symbol id="icon-check" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">"#,
    r#"<path d="M20 6L9 17l-5-5"/>"#,
    r#"</symbol>"#,
    r#"</svg>"#,
);

const PROSE_CLASS: &str = "prose dark:prose-invert max-w-none";

const BLOCKQUOTE_CLASS: &str = "border-l-4 border-gray-300 dark:border-gray-600 pl-4 my-4 italic";
const LINK_CLASS: &str = "text-blue-600 dark:text-blue-400 hover:underline";
const BULLET_LIST_CLASS: &str = "list-disc list-inside space-y-1 my-4";
const ORDERED_LIST_CLASS: &str = "list-decimal list-inside space-y-1 my-4";
const TABLE_WRAPPER_CLASS: &str = "overflow-x-auto my-4";
const TABLE_CLASS: &str = "min-w-full divide-y divide-gray-200 dark:divide-gray-700";
const THEAD_CLASS: &str = "bg-gray-50 dark:bg-gray-800";
const TH_CLASS: &str =
    "px-6 py-3 text-left text-xs font-medium text-gray-500 dark:text-gray-400 uppercase tracking-wider";
const TR_CLASS: &str = "hover:bg-gray-50 dark:hover:bg-gray-700";
const TD_CLASS: &str = "px-6 py-4 whitespace-nowrap text-sm text-gray-500 dark:text-gray-400";

const COPY_BUTTON_CLASS: &str =
    "absolute right-2 top-2 opacity-0 group-hover:opacity-100 transition-opacity";
const ICON_COPY: &str =
    r##"<svg class="size-5 text-gray-400 hover:text-gray-300"><use href="#icon-copy"/></svg>"##;
const ICON_CHECK: &str = r##"<svg class="size-5 text-green-500"><use href="#icon-check"/></svg>"##;

/// Heading classes indexed by level - 1.
const HEADING_CLASSES: [&str; 6] = [
    "text-3xl font-bold mb-4 mt-6 dark:text-white",
    "text-2xl font-bold mb-3 mt-5 dark:text-white",
    "text-xl font-bold mb-2 mt-4 dark:text-white",
    "text-lg font-bold mb-2 mt-3 dark:text-white",
    "text-base font-bold mb-2 mt-2 dark:text-white",
    "text-sm font-bold mb-2 mt-2 dark:text-white",
];

/// Styled HTML render backend.
pub struct HtmlBackend;

impl HtmlBackend {
    /// Classes for a heading level, clamped to 1-6.
    #[must_use]
    pub fn heading_class(level: u8) -> &'static str {
        HEADING_CLASSES[usize::from(level.clamp(1, 6)) - 1]
    }
}

impl RenderBackend for HtmlBackend {
    const PRELUDE: &'static str = ICON_SPRITE;
    const CONTAINER_CLASS: Option<&'static str> = Some(PROSE_CLASS);

    fn fence(view: &FenceView<'_>, out: &mut String) {
        let id = view.block.wrapper_id();
        let icon = if view.copied { ICON_CHECK } else { ICON_COPY };
        let ms = view.feedback_ms();

        out.push_str(r#"<div class="relative group">"#);
        write!(
            out,
            r#"<button onclick="document.querySelector('#{id}').click()" class="{COPY_BUTTON_CLASS}">{icon}</button>"#
        )
        .unwrap();

        // The hidden target copies the sibling <pre> and swaps the button icon
        // for the feedback window.
        write!(
            out,
            concat!(
                r#"<div id="{id}" style="display:none" onclick='"#,
                r#"const code = this.parentElement.querySelector("pre").textContent;"#,
                r#" navigator.clipboard.writeText(code).then(() => {{"#,
                r#" const btn = this.parentElement.querySelector("button svg");"#,
                r##" btn.innerHTML = "<use href=\"#icon-check\"/>";"##,
                r#" btn.classList.add("text-green-500");"#,
                r#" btn.classList.remove("text-gray-400", "hover:text-gray-300");"#,
                r#" setTimeout(() => {{"#,
                r##" btn.innerHTML = "<use href=\"#icon-copy\"/>";"##,
                r#" btn.classList.remove("text-green-500");"#,
                r#" btn.classList.add("text-gray-400", "hover:text-gray-300");"#,
                r#" }}, {ms}); }});'></div>"#,
            ),
            id = id,
            ms = ms,
        )
        .unwrap();

        match view.block.language.as_deref() {
            Some(lang) => write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(&view.block.code)
            )
            .unwrap(),
            None => write!(out, "<pre><code>{}</code></pre>", escape_html(&view.block.code)).unwrap(),
        }
        out.push_str("</div>");
    }

    fn blockquote_start(out: &mut String) {
        write!(out, r#"<blockquote class="{BLOCKQUOTE_CLASS}">"#).unwrap();
    }

    fn heading_start(level: u8, out: &mut String) {
        write!(out, r#"<h{level} class="{}">"#, Self::heading_class(level)).unwrap();
    }

    fn link_start(href: &str, out: &mut String) {
        write!(
            out,
            r#"<a href="{}" class="{LINK_CLASS}" target="_blank" rel="noopener noreferrer">"#,
            escape_html(href)
        )
        .unwrap();
    }

    fn list_start(start: Option<u64>, out: &mut String) {
        match start {
            Some(1) => write!(out, r#"<ol class="{ORDERED_LIST_CLASS}">"#).unwrap(),
            Some(n) => write!(out, r#"<ol start="{n}" class="{ORDERED_LIST_CLASS}">"#).unwrap(),
            None => write!(out, r#"<ul class="{BULLET_LIST_CLASS}">"#).unwrap(),
        }
    }

    fn table_start(out: &mut String) {
        write!(
            out,
            r#"<div class="{TABLE_WRAPPER_CLASS}"><table class="{TABLE_CLASS}">"#
        )
        .unwrap();
    }

    fn table_end(out: &mut String) {
        out.push_str("</tbody></table></div>");
    }

    fn table_head_start(out: &mut String) {
        write!(out, r#"<thead class="{THEAD_CLASS}"><tr class="{TR_CLASS}">"#).unwrap();
    }

    fn table_row_start(out: &mut String) {
        write!(out, r#"<tr class="{TR_CLASS}">"#).unwrap();
    }

    fn table_cell_start(header: bool, align: &str, out: &mut String) {
        if header {
            write!(out, r#"<th class="{TH_CLASS}"{align}>"#).unwrap();
        } else {
            write!(out, r#"<td class="{TD_CLASS}"{align}>"#).unwrap();
        }
    }
}
