//! Inline span formatting: bold, italic, inline code.
//!
//! Four independent substitution passes applied in a fixed order. These are
//! plain regex rewrites, not a tokenizer: each pass is blind to the spans
//! the previous ones produced. Patterns never match across line boundaries,
//! so markers on adjacent lines (e.g. two list bullets) cannot pair up.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::escape::escape_html;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static ITALIC_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_(.+?)_").unwrap());
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

/// Rewrite inline Markdown spans to HTML.
///
/// Pass order: `**bold**`, `*italic*`, `_italic_`, then `` `code` ``.
/// Inline code contents are HTML-escaped at substitution time. Because the
/// emphasis passes run first, emphasis markers between backticks have
/// already been rewritten by the time the code pass sees them; the
/// resulting tags end up escaped inside the code span. Known limitation,
/// kept as-is.
pub fn format_inline(text: &str) -> String {
    let text = BOLD.replace_all(text, "<strong>$1</strong>");
    let text = ITALIC_STAR.replace_all(&text, "<em>$1</em>");
    let text = ITALIC_UNDERSCORE.replace_all(&text, "<em>$1</em>");
    INLINE_CODE
        .replace_all(&text, |caps: &Captures| {
            format!("<code>{}</code>", escape_html(&caps[1]))
        })
        .into_owned()
}
