//! Error types for document rendering.

use std::path::PathBuf;
use std::str::Utf8Error;

/// Error while invoking the external AsciiDoc converter.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The converter binary could not be started.
    #[error("failed to run asciidoctor")]
    Spawn(#[source] std::io::Error),

    /// The converter exited with a non-zero status.
    #[error("asciidoctor failed with status {code:?}")]
    Failed {
        /// Process exit code, if any.
        code: Option<i32>,
    },

    /// The converter reported success but the output file is missing.
    #[error("converter produced no output at {}", .0.display())]
    MissingOutput(PathBuf),
}

/// Error while parsing or rewriting rendered XHTML.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum XhtmlError {
    /// XML parsing error.
    #[error("XML parse error")]
    XmlParse(#[from] quick_xml::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error")]
    Utf8(#[from] Utf8Error),

    /// XML attribute error.
    #[error("XML attribute error")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    /// Encoding error during XML parsing.
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// The rendered document has no `<title>` element.
    #[error("rendered document has no <title> element")]
    MissingTitle,

    /// The rendered document has no `<body>` element.
    #[error("rendered document has no <body> element")]
    MissingBody,
}
