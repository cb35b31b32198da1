//! Render rule table.
//!
//! A [`RenderBackend`] maps each block-level construct to the HTML fragment
//! that opens or closes it. The default methods produce plain semantic HTML;
//! a backend overrides the constructs it wants to style. The renderer is
//! generic over the backend, so the table is fixed at compile time.

use std::fmt::Write;

use crate::code_block::FenceView;
use crate::state::escape_html;

/// Backend trait for construct-specific rendering.
pub trait RenderBackend {
    /// Markup placed once ahead of the rendered document (icon sprites etc.).
    const PRELUDE: &'static str = "";

    /// Class of the element wrapping a whole document, if the backend has one.
    const CONTAINER_CLASS: Option<&'static str> = None;

    /// Render a cleaned fenced code block.
    ///
    /// Fences that were empty before cleanup never reach the backend.
    fn fence(view: &FenceView<'_>, out: &mut String) {
        Self::code_block(view.block.language.as_deref(), &view.block.code, out);
    }

    /// Render a code block as `<pre><code>`.
    ///
    /// Used for indented code blocks and by the default [`fence`](Self::fence).
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        if let Some(lang) = lang {
            write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(content)
            )
            .unwrap();
        } else {
            write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap();
        }
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    /// Open a heading; `level` is 1-6.
    fn heading_start(level: u8, out: &mut String) {
        write!(out, "<h{level}>").unwrap();
    }

    fn heading_end(level: u8, out: &mut String) {
        write!(out, "</h{level}>").unwrap();
    }

    /// Open a link. `href` is the raw destination and must be escaped here.
    fn link_start(href: &str, out: &mut String) {
        write!(out, r#"<a href="{}">"#, escape_html(href)).unwrap();
    }

    /// Open a list. `start` is `Some` for ordered lists.
    fn list_start(start: Option<u64>, out: &mut String) {
        match start {
            Some(1) => out.push_str("<ol>"),
            Some(n) => write!(out, r#"<ol start="{n}">"#).unwrap(),
            None => out.push_str("<ul>"),
        }
    }

    fn list_end(ordered: bool, out: &mut String) {
        out.push_str(if ordered { "</ol>" } else { "</ul>" });
    }

    fn table_start(out: &mut String) {
        out.push_str("<table>");
    }

    fn table_end(out: &mut String) {
        out.push_str("</tbody></table>");
    }

    /// Open the table head and its single row.
    fn table_head_start(out: &mut String) {
        out.push_str("<thead><tr>");
    }

    fn table_row_start(out: &mut String) {
        out.push_str("<tr>");
    }

    /// Open a cell. `align` is a ready-made ` style="..."` attribute or empty.
    fn table_cell_start(header: bool, align: &str, out: &mut String) {
        let tag = if header { "th" } else { "td" };
        write!(out, "<{tag}{align}>").unwrap();
    }

    /// Render an image.
    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        write!(
            out,
            r#"<img src="{}"{title_attr} alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        )
        .unwrap();
    }

    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}
