//! Fenced code block extraction and syntax highlighting.
//!
//! Fenced blocks are cut out of the working text before any other stage
//! runs and replaced with placeholder lines; the finished `<pre><code>`
//! fragments are substituted back after block structuring. Nothing between
//! the fences can therefore be mistaken for a list marker, table pipe, or
//! emphasis span by the later stages.
//!
//! Highlighting wraps lexical categories in control-character markers and
//! converts the markers to `<span>` tags at the end. The marker passes run
//! in a fixed order over the evolving text, so a later category may re-wrap
//! text already inside an earlier one: a keyword inside a string literal
//! still gets a keyword span. That matches the reference pipeline and is
//! deliberately not filtered out.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::escape::escape_html;

/// Languages the highlighter knows. Anything else is escaped verbatim.
const LANGUAGES: &[&str] = &["java", "kotlin", "kt"];

const KEYWORDS: &[&str] = &[
    "abstract", "as", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "companion", "const", "continue", "data", "default", "do", "double", "else", "enum", "extends",
    "false", "final", "finally", "float", "for", "fun", "if", "implements", "import", "in", "init",
    "instanceof", "int", "interface", "internal", "is", "lateinit", "long", "native", "new",
    "null", "object", "open", "override", "package", "private", "protected", "public", "return",
    "sealed", "short", "static", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "val", "var", "void", "volatile", "when", "while",
];

const TYPES: &[&str] = &[
    "Any", "Array", "ArrayList", "Boolean", "Byte", "Char", "CharSequence", "Double", "Float",
    "HashMap", "HashSet", "Int", "Integer", "List", "Long", "Map", "Object", "Pair", "Set",
    "Short", "String", "StringBuilder", "Unit",
];

static FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```([A-Za-z0-9_+#-]*)[ \t]*\n(.*?)```").unwrap());

static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)//[^\n]*").unwrap());
static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
// Not escape-aware: a quote inside a string reads as its terminator.
static STRING: Lazy<Regex> = Lazy::new(|| Regex::new(r#""[^"]*""#).unwrap());
static ANNOTATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"@[A-Za-z_]\w*").unwrap());
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+\b").unwrap());
static KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b(?:{})\b", KEYWORDS.join("|"))).unwrap());
static TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b(?:{})\b", TYPES.join("|"))).unwrap());
static METHOD_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Za-z_]\w*)\(").unwrap());

// Category markers. The delimiters are control characters and the names
// contain nothing the passes above can match (no digits, quotes, capitals,
// keywords, or identifier-parenthesis sequences), so passes can run over
// already-marked text without corrupting the markup itself.
static MARK_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new("\u{2}([a-z]+)\u{3}").unwrap());
const MARK_CLOSE: &str = "\u{2}/\u{3}";

fn mark(category: &str, text: &str) -> String {
    format!("\u{2}{category}\u{3}{text}{MARK_CLOSE}")
}

/// Replace every fenced code block in `source` with a placeholder line and
/// return the rewritten text plus the rendered fragments, index-aligned
/// with the placeholders.
pub fn extract_code_blocks(source: &str) -> (String, Vec<String>) {
    let mut blocks = Vec::new();
    let text = FENCE.replace_all(source, |caps: &Captures| {
        let lang = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str());
        let body = body.strip_suffix('\n').unwrap_or(body);
        blocks.push(render_fence(lang, body));
        placeholder(blocks.len() - 1)
    });
    (text.into_owned(), blocks)
}

/// Substitute rendered code fragments back into the structured text.
pub fn restore_code_blocks(text: &str, blocks: &[String]) -> String {
    let mut result = text.to_string();
    for (index, block) in blocks.iter().enumerate() {
        result = result.replacen(&placeholder(index), block, 1);
    }
    result
}

// The sentinel control character cannot occur in document text, so the
// placeholder is unambiguous. It reads as an HTML comment to the paragraph
// machine and matches no other machine's pattern.
fn placeholder(index: usize) -> String {
    format!("<!--\u{1}code:{index}-->")
}

/// Render one fenced block to a `<pre><code>` fragment.
///
/// The body is always HTML-escaped. Highlight spans are added only when the
/// language tag is recognized (case-insensitive).
pub fn render_fence(lang: &str, body: &str) -> String {
    let tag = lang.to_ascii_lowercase();
    let escaped = escape_html(body);
    if LANGUAGES.contains(&tag.as_str()) {
        format!(
            "<pre><code class=\"language-{tag}\">{}</code></pre>",
            highlight_source(&escaped)
        )
    } else if tag.is_empty() {
        format!("<pre><code>{escaped}</code></pre>")
    } else {
        format!("<pre><code class=\"language-{tag}\">{escaped}</code></pre>")
    }
}

/// Apply the ordered highlight passes to an escaped code body.
fn highlight_source(escaped: &str) -> String {
    let text = LINE_COMMENT.replace_all(escaped, |caps: &Captures| mark("comment", &caps[0]));
    let text = BLOCK_COMMENT.replace_all(&text, |caps: &Captures| mark("comment", &caps[0]));
    let text = STRING.replace_all(&text, |caps: &Captures| mark("string", &caps[0]));
    let text = ANNOTATION.replace_all(&text, |caps: &Captures| mark("annotation", &caps[0]));
    let text = NUMBER.replace_all(&text, |caps: &Captures| mark("number", &caps[0]));
    let text = KEYWORD.replace_all(&text, |caps: &Captures| mark("keyword", &caps[0]));
    let text = TYPE.replace_all(&text, |caps: &Captures| mark("type", &caps[0]));
    let text = METHOD_CALL.replace_all(&text, |caps: &Captures| {
        format!("{}(", mark("call", &caps[1]))
    });

    let text = MARK_OPEN.replace_all(&text, "<span class=\"hl-$1\">");
    text.replace(MARK_CLOSE, "</span>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_replaces_fence_with_placeholder() {
        let source = "before\n```\nlet x = 1;\n```\nafter";
        let (text, blocks) = extract_code_blocks(source);
        assert_eq!(blocks.len(), 1);
        assert!(text.contains("before"));
        assert!(text.contains("after"));
        assert!(!text.contains("let x = 1;"));
        assert!(text.contains(&placeholder(0)));
    }

    #[test]
    fn test_restore_round_trip() {
        let source = "a\n```\ncode\n```\nb";
        let (text, blocks) = extract_code_blocks(source);
        let restored = restore_code_blocks(&text, &blocks);
        assert!(restored.contains("<pre><code>code</code></pre>"));
        assert!(!restored.contains('\u{1}'));
    }

    #[test]
    fn test_fence_contents_are_opaque_to_later_stages() {
        // Pipes, list markers, and quote markers inside a fence must never
        // reach the block machines.
        let source = "```\n| a | b |\n* item\n> quote\n```\n";
        let (text, blocks) = extract_code_blocks(source);
        assert!(!text.contains('|'));
        assert!(!text.contains("* item"));
        assert!(blocks[0].contains("| a | b |"));
    }

    #[test]
    fn test_unrecognized_language_is_escaped_only() {
        let html = render_fence("python", "print(1 < 2)");
        assert_eq!(
            html,
            "<pre><code class=\"language-python\">print(1 &lt; 2)</code></pre>"
        );
        assert!(!html.contains("hl-"));
    }

    #[test]
    fn test_no_language_tag() {
        assert_eq!(render_fence("", "a & b"), "<pre><code>a &amp; b</code></pre>");
    }

    #[test]
    fn test_keyword_highlighting() {
        let html = render_fence("java", "public static void main");
        assert!(html.contains("<span class=\"hl-keyword\">public</span>"));
        assert!(html.contains("<span class=\"hl-keyword\">static</span>"));
        assert!(html.contains("<span class=\"hl-keyword\">void</span>"));
    }

    #[test]
    fn test_language_tag_case_insensitive() {
        let html = render_fence("Java", "int x;");
        assert!(html.contains("<span class=\"hl-keyword\">int</span>"));
    }

    #[test]
    fn test_string_and_number_highlighting() {
        let html = render_fence("kotlin", "val n = 42; val s = \"hi\"");
        assert!(html.contains("<span class=\"hl-number\">42</span>"));
        assert!(html.contains("<span class=\"hl-string\">\"hi\"</span>"));
    }

    #[test]
    fn test_comment_highlighting() {
        let html = render_fence("java", "x(); // trailing note");
        assert!(html.contains("<span class=\"hl-comment\">// trailing note</span>"));
    }

    #[test]
    fn test_block_comment_highlighting() {
        let html = render_fence("java", "/* one\ntwo */");
        assert!(html.contains("<span class=\"hl-comment\">/* one\ntwo */</span>"));
    }

    #[test]
    fn test_annotation_highlighting() {
        let html = render_fence("kotlin", "@Override fun run()");
        assert!(html.contains("<span class=\"hl-annotation\">@Override</span>"));
    }

    #[test]
    fn test_type_highlighting() {
        let html = render_fence("kotlin", "val name: String");
        assert!(html.contains("<span class=\"hl-type\">String</span>"));
    }

    #[test]
    fn test_method_call_highlighting() {
        let html = render_fence("java", "foo(bar)");
        assert!(html.contains("<span class=\"hl-call\">foo</span>("));
    }

    #[test]
    fn test_keyword_inside_string_still_highlighted() {
        // The keyword pass does not exclude string contents. Current
        // behavior, kept on purpose.
        let html = render_fence("java", "\"while\"");
        assert!(html.contains("<span class=\"hl-keyword\">while</span>"));
        assert!(html.contains("hl-string"));
    }

    #[test]
    fn test_body_is_escaped() {
        let html = render_fence("java", "if (a < b && c > d)");
        assert!(html.contains("&lt;"));
        assert!(html.contains("&amp;&amp;"));
        assert!(html.contains("&gt;"));
    }

    #[test]
    fn test_multiple_fences() {
        let source = "```\none\n```\nmiddle\n```java\nint two;\n```\n";
        let (text, blocks) = extract_code_blocks(source);
        assert_eq!(blocks.len(), 2);
        let restored = restore_code_blocks(&text, &blocks);
        assert!(restored.contains("one"));
        assert!(restored.contains("middle"));
        assert!(restored.contains("<span class=\"hl-keyword\">int</span>"));
    }
}
