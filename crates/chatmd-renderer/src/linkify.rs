//! Bare link detection in text runs.
//!
//! Model output often contains naked `https://...` addresses, bare domains
//! such as `ollama.com` and e-mail addresses. The renderer turns them into
//! links the same way it renders Markdown links.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Link candidates. Trailing punctuation is trimmed afterwards.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:",
        r#"(?P<url>(?:https?://|www\.)[^\s<>"]+)"#,
        r"|(?P<email>[a-z0-9][a-z0-9._%+-]*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,})\b",
        r#"|(?P<host>(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+(?P<tld>[a-z]{2,})\b(?::\d+)?(?:[/?#][^\s<>"]*)?)"#,
        r")",
    ))
    .unwrap()
});

/// ISO country-code TLDs.
static CCTLD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:a[cdefgilmnoqrstuwxz]|b[abdefghijmnorstvwyz]|c[acdfghiklmnoruvwxyz]|d[ejkmoz]",
        r"|e[cegrstu]|f[ijkmor]|g[abdefghilmnpqrstuwy]|h[kmnrtu]|i[delmnoqrst]|j[emop]",
        r"|k[eghimnprwyz]|l[abcikrstuvy]|m[acdeghklmnopqrstuvwxyz]|n[acefgilopruz]|om",
        r"|p[aefghklmnrstwy]|qa|r[eosuw]|s[abcdeghijklmnortuvxyz]|t[cdfghjklmnortvwz]",
        r"|u[agksyz]|v[aceginu]|w[fs]|y[et]|z[amw])$",
    ))
    .unwrap()
});

/// Generic TLDs accepted for bare domains.
const TLDS: [&str; 16] = [
    "biz", "com", "edu", "gov", "net", "org", "pro", "web", "xxx", "aero", "asia", "coop",
    "info", "museum", "name", "shop",
];

/// A piece of a text run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Plain text.
    Text(&'a str),
    /// A detected link, with the text as written and the link target.
    Url { text: &'a str, href: Cow<'a, str> },
}

/// Split `text` into plain text and link segments.
///
/// Returns a single [`Segment::Text`] when nothing is found. Empty input
/// yields no segments.
///
/// # Examples
///
/// ```
/// use chatmd_renderer::{Segment, linkify};
///
/// let segments = linkify("see www.rust-lang.org.");
/// assert_eq!(segments[0], Segment::Text("see "));
/// assert!(matches!(&segments[1], Segment::Url { href, .. } if href == "http://www.rust-lang.org"));
/// assert_eq!(segments[2], Segment::Text("."));
///
/// let segments = linkify("ask a@b.com");
/// assert!(matches!(&segments[1], Segment::Url { href, .. } if href == "mailto:a@b.com"));
/// ```
pub fn linkify(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in LINK_RE.captures_iter(text) {
        let Some((start, end, href)) = link(text, &caps) else {
            continue;
        };

        if start > last {
            segments.push(Segment::Text(&text[last..start]));
        }
        segments.push(Segment::Url {
            text: &text[start..end],
            href,
        });
        last = end;
    }

    if last < text.len() {
        segments.push(Segment::Text(&text[last..]));
    }
    segments
}

/// Byte range and href of an accepted candidate.
fn link<'a>(text: &'a str, caps: &Captures<'a>) -> Option<(usize, usize, Cow<'a, str>)> {
    if let Some(m) = caps.name("url") {
        let start = m.start();
        let url = &text[start..start + trim_trailing(m.as_str())];
        if !has_host(url) {
            return None;
        }
        let href = if url.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("www.")) {
            Cow::Owned(format!("http://{url}"))
        } else {
            Cow::Borrowed(url)
        };
        return Some((start, start + url.len(), href));
    }

    if !at_fuzzy_boundary(text, caps.get(0)?.start()) {
        return None;
    }

    if let Some(m) = caps.name("email") {
        return Some((m.start(), m.end(), Cow::Owned(format!("mailto:{}", m.as_str()))));
    }

    let m = caps.name("host")?;
    if !caps.name("tld").is_some_and(|tld| is_known_tld(tld.as_str())) {
        return None;
    }
    let end = m.start() + trim_trailing(m.as_str());
    let host = &text[m.start()..end];
    Some((m.start(), end, Cow::Owned(format!("http://{host}"))))
}

/// Bare domains and e-mails only count at the start of the text or after
/// whitespace or an opening delimiter.
fn at_fuzzy_boundary(text: &str, start: usize) -> bool {
    text[..start].chars().next_back().is_none_or(|c| {
        c.is_whitespace() || c.is_control() || matches!(c, '<' | '>' | '|' | '"' | '(')
    })
}

fn is_known_tld(tld: &str) -> bool {
    let tld = tld.to_ascii_lowercase();
    TLDS.contains(&tld.as_str()) || CCTLD_RE.is_match(&tld)
}

/// Length of `candidate` once trailing punctuation and unbalanced closing
/// brackets are removed.
fn trim_trailing(candidate: &str) -> usize {
    let bytes = candidate.as_bytes();
    let mut end = bytes.len();
    loop {
        match bytes[..end].last() {
            Some(b'.' | b',' | b';' | b':' | b'!' | b'?' | b'\'') => end -= 1,
            Some(b')') if count(&bytes[..end], b')') > count(&bytes[..end], b'(') => end -= 1,
            Some(b']') if count(&bytes[..end], b']') > count(&bytes[..end], b'[') => end -= 1,
            _ => return end,
        }
    }
}

fn count(bytes: &[u8], needle: u8) -> usize {
    bytes.iter().filter(|&&b| b == needle).count()
}

/// Whether anything host-like follows the scheme or `www.` prefix.
fn has_host(url: &str) -> bool {
    fn host(rest: &str) -> &str {
        rest.split(['/', '?', '#']).next().unwrap_or("")
    }

    match url.find("://") {
        Some(pos) => !host(&url[pos + 3..]).is_empty(),
        None => url.get(4..).is_some_and(|rest| host(rest).contains('.')),
    }
}
