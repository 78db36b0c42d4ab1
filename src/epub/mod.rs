//! EPUB container assembly.
//!
//! [`PackageBuilder`] renders the container descriptor, OPF package
//! document, NCX navigation document, and XHTML content document, and
//! serializes all five required members into a zip archive. The archive
//! layout is the part readers are strict about: `mimetype` must be the
//! first member and stored uncompressed.

mod css;
mod writer;

pub use css::Stylesheet;
pub use writer::PackageBuilder;
