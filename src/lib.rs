//! # mdpress
//!
//! Convert a single Markdown document into a styled EPUB book.
//!
//! The pipeline parses a constrained subset of Markdown (headings, bold,
//! italic, inline code, fenced code blocks with syntax highlighting for
//! JVM languages, single-level lists, blockquotes, tables) into HTML,
//! embeds a book stylesheet, and packages the result as a valid EPUB 2
//! container.
//!
//! ## Quick Start
//!
//! ```
//! let source = "# My Book\n\nHello **world**.\n";
//! let bytes = mdpress::convert(source, "my-book.md").unwrap();
//! assert!(bytes.starts_with(b"PK"));
//! ```
//!
//! ## Pieces
//!
//! - [`Document`] extracts the title and heading outline from raw source.
//! - [`document::render_html`] runs the Markdown-to-HTML stages.
//! - [`PackageBuilder`] assembles the zip container from a document, an
//!   HTML fragment, and an injected [`Stylesheet`].
//!
//! [`convert`] wires the three together for the common case.

pub mod document;
pub mod epub;
pub mod error;
pub mod markdown;

use std::io::Cursor;

pub use document::{Document, Section};
pub use epub::{PackageBuilder, Stylesheet};
pub use error::{Error, Result};

/// Convert Markdown source text into EPUB archive bytes.
///
/// `source_name` is the file name the text came from (e.g. `notes.md`);
/// it supplies the title fallback and package metadata. The conversion
/// itself cannot fail on any text input — errors only arise from archive
/// serialization.
pub fn convert(source: &str, source_name: &str) -> Result<Vec<u8>> {
    let document = Document::from_source(source, source_name);
    let html = document::render_html(source);

    let mut buffer = Cursor::new(Vec::new());
    PackageBuilder::new(Stylesheet::default()).write(&document, &html, &mut buffer)?;
    Ok(buffer.into_inner())
}
