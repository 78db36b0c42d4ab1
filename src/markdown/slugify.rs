//! Anchor slug generation for heading links.
//!
//! Table-of-contents entries link into the content document via fragment
//! identifiers derived from heading text. Two headings with identical text
//! produce identical anchors; collisions are accepted, not deduplicated.

/// Derive a URL-fragment-safe slug from heading text.
///
/// Lowercases the text, drops every character that is not a word character,
/// whitespace, or hyphen, then collapses whitespace/hyphen runs into a
/// single hyphen.
///
/// # Examples
///
/// ```
/// use mdpress::markdown::slugify;
///
/// assert_eq!(slugify("Hello, World"), "hello-world");
/// assert_eq!(slugify("Getting Started!"), "getting-started");
/// assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
/// ```
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else if c.is_whitespace() || c == '-' {
                '-'
            } else {
                // Dropped below
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
