//! Fenced code block cleanup.
//!
//! Chat models like to pad code fences with a sentence of explanation, a
//! `> Note:` aside or a `[Tip]` tag before the actual code. [`sanitize_fence`]
//! strips those lines, removes the common indentation and squeezes runs of
//! blank lines, so that what the copy button puts on the clipboard is code.
//!
//! Classification is a line-level heuristic. It knows nothing about the
//! language of the block, so some real code is dropped as prose (a Python
//! statement such as `Foo bar` at column 0) and some prose survives (a
//! sentence starting with a lowercase word).

use std::sync::LazyLock;

use regex::Regex;

/// Comment-style line: optional whitespace, then one or more of `/ # * -`.
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[/#*-]+").unwrap());

/// Capitalized word followed by a lowercase word: "This is ...".
static SENTENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[A-Z][a-z]+\s+[a-z]+").unwrap());

/// `# ... Ex: ...`
static EXAMPLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*#.*Ex:").unwrap());

/// `# ... (aside)`
static ASIDE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*#.*\(.*\)").unwrap());

/// `> Note: ...`
static QUOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*>+\s*[A-Z]").unwrap());

/// `[Note] ...`
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\[[A-Z][a-z]+\]").unwrap());

static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Clean the raw content of one fenced code block.
///
/// Returns `None` when the content is empty or whitespace-only; such blocks are
/// not rendered at all. Otherwise returns the cleaned code, which may itself be
/// empty when every line was classified as prose.
///
/// # Examples
///
/// ```
/// use chatmd_renderer::sanitize_fence;
///
/// let raw = "This is a note about the code\nx = 1\ny = 2\n";
/// assert_eq!(sanitize_fence(raw).as_deref(), Some("x = 1\ny = 2"));
/// assert_eq!(sanitize_fence("  \n\n"), None);
/// ```
#[must_use]
pub fn sanitize_fence(code: &str) -> Option<String> {
    if code.trim().is_empty() {
        return None;
    }

    let lines: Vec<&str> = code
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let indent = common_indent(&lines);

    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut has_seen_code = false;
    let mut dropped = 0usize;

    for line in lines {
        if is_closing_fence(line) {
            // Anything after a stray closing fence is outside the block.
            break;
        }

        if !has_seen_code && line.trim().is_empty() {
            continue;
        }

        let line = strip_indent(line, indent);
        if is_explanation(line) {
            dropped += 1;
            continue;
        }

        has_seen_code = true;
        kept.push(line);
    }

    if dropped > 0 {
        tracing::trace!(dropped, kept = kept.len(), "Dropped explanatory lines from fence");
    }

    let joined = kept.join("\n");
    Some(BLANK_RUN_RE.replace_all(&joined, "\n\n").trim().to_owned())
}

/// Smallest leading-whitespace width (in characters) over non-blank lines.
fn common_indent(lines: &[&str]) -> usize {
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0)
}

/// Drop the first `width` characters, or the whole line if it is shorter.
fn strip_indent(line: &str, width: usize) -> &str {
    match line.char_indices().nth(width) {
        Some((offset, _)) => &line[offset..],
        None => "",
    }
}

fn is_closing_fence(line: &str) -> bool {
    line.trim() == "```"
}

/// Whether a (de-indented) line reads like explanatory prose rather than code.
fn is_explanation(line: &str) -> bool {
    let is_comment = COMMENT_RE.is_match(line);

    (!is_comment && SENTENCE_RE.is_match(line))
        || EXAMPLE_RE.is_match(line)
        || ASIDE_RE.is_match(line)
        || QUOTE_RE.is_match(line)
        || TAG_RE.is_match(line)
}
