//! The embedded book stylesheet.

use std::borrow::Cow;

/// CSS injected into the content document's `<style>` block.
///
/// One immutable value handed to the package builder at construction time;
/// [`Stylesheet::default`] is the built-in book style.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    css: Cow<'static, str>,
}

impl Stylesheet {
    pub fn new(css: impl Into<String>) -> Self {
        Self {
            css: Cow::Owned(css.into()),
        }
    }

    pub fn css(&self) -> &str {
        &self.css
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self {
            css: Cow::Borrowed(DEFAULT_CSS),
        }
    }
}

const DEFAULT_CSS: &str = r#"body {
    font-family: Georgia, 'Times New Roman', serif;
    line-height: 1.8;
    color: #333;
    max-width: 800px;
    margin: 0 auto;
    padding: 20px;
    font-size: 1.1em;
}

h1 {
    font-size: 2.5em;
    color: #2c3e50;
    margin-top: 1.5em;
    margin-bottom: 0.8em;
    border-bottom: 3px solid #3498db;
    padding-bottom: 0.3em;
    font-weight: 700;
}

h2 {
    font-size: 2em;
    color: #34495e;
    margin-top: 1.5em;
    margin-bottom: 0.7em;
    border-bottom: 2px solid #95a5a6;
    padding-bottom: 0.3em;
    font-weight: 600;
}

h3 {
    font-size: 1.6em;
    color: #2c3e50;
    margin-top: 1.3em;
    margin-bottom: 0.6em;
    font-weight: 600;
}

h4 {
    font-size: 1.3em;
    color: #34495e;
    margin-top: 1.2em;
    margin-bottom: 0.5em;
    font-weight: 600;
}

p {
    margin: 1em 0;
    text-align: justify;
}

strong, b {
    font-weight: 700;
    color: #2c3e50;
}

em, i {
    font-style: italic;
    color: #555;
}

code {
    font-family: 'Courier New', Monaco, monospace;
    background-color: #f8f8f8;
    padding: 2px 6px;
    border: 1px solid #e1e4e8;
    border-radius: 3px;
    font-size: 0.9em;
    color: #d73a49;
}

pre {
    background-color: #f6f8fa;
    border: 1px solid #e1e4e8;
    border-radius: 6px;
    padding: 16px;
    overflow-x: auto;
    margin: 1.5em 0;
    line-height: 1.5;
}

pre code {
    background-color: transparent;
    border: none;
    padding: 0;
    color: #24292e;
    font-size: 0.95em;
}

blockquote {
    border-left: 4px solid #3498db;
    margin-left: 0;
    font-style: italic;
    color: #555;
    background-color: #f8f9fa;
    padding: 15px 20px;
    border-radius: 0 4px 4px 0;
}

ul, ol {
    margin: 1em 0;
    padding-left: 2em;
}

li {
    margin: 0.5em 0;
    line-height: 1.6;
}

a {
    color: #3498db;
    text-decoration: none;
    border-bottom: 1px solid #3498db;
}

.table-scroll {
    overflow-x: auto;
}

table {
    border-collapse: collapse;
    width: 100%;
    margin: 1.5em 0;
    font-size: 0.95em;
}

th, td {
    border: 1px solid #ddd;
    padding: 12px;
}

th {
    background-color: #3498db;
    color: white;
    font-weight: 600;
}

tr:nth-child(even) {
    background-color: #f8f9fa;
}

hr {
    border: none;
    border-top: 2px solid #e1e4e8;
    margin: 2em 0;
}

.hl-keyword { color: #d73a49; font-weight: 600; }
.hl-type { color: #6f42c1; }
.hl-string { color: #032f62; }
.hl-comment { color: #6a737d; font-style: italic; }
.hl-number { color: #005cc5; }
.hl-annotation { color: #e36209; }
.hl-call { color: #6f42c1; }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stylesheet_covers_generated_markup() {
        let sheet = Stylesheet::default();
        for selector in [
            "blockquote", "pre code", ".table-scroll", ".hl-keyword", ".hl-string",
        ] {
            assert!(sheet.css().contains(selector), "missing {selector}");
        }
    }

    #[test]
    fn test_custom_stylesheet() {
        let sheet = Stylesheet::new("body { color: red; }");
        assert_eq!(sheet.css(), "body { color: red; }");
    }
}
