use std::io::{Seek, Write};

use chrono::{DateTime, Utc};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::document::Document;
use crate::error::Result;
use crate::markdown::slugify;

use super::css::Stylesheet;

/// Assembles the five-member EPUB container.
///
/// Holds the stylesheet and the package timestamp; both are fixed at
/// construction so one builder always produces identical metadata.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use mdpress::{Document, PackageBuilder, Stylesheet};
///
/// let doc = Document::from_source("# Hi\n", "hi.md");
/// let mut buf = Cursor::new(Vec::new());
/// PackageBuilder::new(Stylesheet::default())
///     .write(&doc, "<h1 id=\"hi\">Hi</h1>", &mut buf)?;
/// # Ok::<(), mdpress::Error>(())
/// ```
pub struct PackageBuilder {
    stylesheet: Stylesheet,
    timestamp: DateTime<Utc>,
}

impl PackageBuilder {
    pub fn new(stylesheet: Stylesheet) -> Self {
        Self {
            stylesheet,
            timestamp: Utc::now(),
        }
    }

    /// Override the package timestamp (identifier date, dc:date,
    /// dcterms:modified).
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Write the complete package to any [`Write`] + [`Seek`] destination.
    ///
    /// Member order is fixed and required by readers: `mimetype` first and
    /// stored uncompressed, then the four XML documents deflated.
    pub fn write<W: Write + Seek>(&self, document: &Document, html: &str, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);

        let options_stored =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        let options_deflate =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        zip.start_file("mimetype", options_stored)?;
        zip.write_all(b"application/epub+zip")?;

        zip.start_file("META-INF/container.xml", options_deflate)?;
        zip.write_all(CONTAINER_XML.as_bytes())?;

        // Generated once so OPF and NCX agree
        let identifier = self.identifier(document);

        zip.start_file("content.opf", options_deflate)?;
        zip.write_all(self.generate_opf(document, &identifier).as_bytes())?;

        zip.start_file("toc.ncx", options_deflate)?;
        zip.write_all(self.generate_ncx(document, &identifier).as_bytes())?;

        zip.start_file("content.html", options_deflate)?;
        zip.write_all(self.generate_content(document, html).as_bytes())?;

        zip.finish()?;
        Ok(())
    }

    fn identifier(&self, document: &Document) -> String {
        format!(
            "{}-{}",
            slugify(document.file_stem()),
            self.timestamp.format("%Y-%m-%d")
        )
    }

    fn generate_opf(&self, document: &Document, identifier: &str) -> String {
        let mut opf = String::new();

        opf.push_str(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="BookId">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
"#,
        );

        opf.push_str(&format!(
            "    <dc:title>{}</dc:title>\n",
            escape_xml(&document.title)
        ));
        opf.push_str(&format!(
            "    <dc:identifier id=\"BookId\">{}</dc:identifier>\n",
            escape_xml(identifier)
        ));
        opf.push_str("    <dc:language>en</dc:language>\n");
        opf.push_str("    <dc:creator>Technical Documentation</dc:creator>\n");
        opf.push_str(&format!(
            "    <dc:description>Converted from {}</dc:description>\n",
            escape_xml(&document.source_name)
        ));
        opf.push_str(&format!(
            "    <dc:date>{}</dc:date>\n",
            self.timestamp.format("%Y-%m-%d")
        ));
        opf.push_str(&format!(
            "    <meta property=\"dcterms:modified\">{}</meta>\n",
            self.timestamp.format("%Y-%m-%dT%H:%M:%SZ")
        ));

        opf.push_str(
            r#"  </metadata>
  <manifest>
    <item id="content" href="content.html" media-type="application/xhtml+xml"/>
    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
  </manifest>
  <spine toc="ncx">
    <itemref idref="content"/>
  </spine>
</package>
"#,
        );
        opf
    }

    fn generate_ncx(&self, document: &Document, identifier: &str) -> String {
        let mut ncx = String::new();

        ncx.push_str(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE ncx PUBLIC "-//NISO//DTD ncx 2005-1//EN" "http://www.daisy.org/z3986/2005/ncx-2005-1.dtd">
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
    <meta name="dtb:uid" content=""#,
        );
        ncx.push_str(&escape_xml(identifier));
        ncx.push_str(
            r#""/>
    <meta name="dtb:depth" content="1"/>
    <meta name="dtb:totalPageCount" content="0"/>
    <meta name="dtb:maxPageNumber" content="0"/>
  </head>
  <docTitle>
    <text>"#,
        );
        ncx.push_str(&escape_xml(&document.title));
        ncx.push_str(
            r#"</text>
  </docTitle>
  <navMap>
"#,
        );

        let mut play_order = 1;
        write_nav_point(&mut ncx, &document.title, "content.html", play_order);
        for section in document.navigation_sections() {
            play_order += 1;
            let src = if section.anchor.is_empty() {
                "content.html".to_string()
            } else {
                format!("content.html#{}", section.anchor)
            };
            write_nav_point(&mut ncx, &section.title, &src, play_order);
        }

        ncx.push_str("  </navMap>\n</ncx>\n");
        ncx
    }

    fn generate_content(&self, document: &Document, html: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
<title>{title}</title>
<style type="text/css">
{css}</style>
</head>
<body>
{html}
</body>
</html>
"#,
            title = escape_xml(&document.title),
            css = self.stylesheet.css(),
        )
    }
}

impl Default for PackageBuilder {
    fn default() -> Self {
        Self::new(Stylesheet::default())
    }
}

const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

fn write_nav_point(ncx: &mut String, title: &str, src: &str, play_order: usize) {
    ncx.push_str(&format!(
        "    <navPoint id=\"navpoint-{play_order}\" playOrder=\"{play_order}\">\n"
    ));
    ncx.push_str(&format!(
        "      <navLabel>\n        <text>{}</text>\n      </navLabel>\n",
        escape_xml(title)
    ));
    ncx.push_str(&format!("      <content src=\"{}\"/>\n", escape_xml(src)));
    ncx.push_str("    </navPoint>\n");
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
