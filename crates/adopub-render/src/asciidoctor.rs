//! External `asciidoctor` converter invocation.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::error::ConvertError;

/// Converter binary name, resolved via `PATH`.
const ASCIIDOCTOR_BIN: &str = "asciidoctor";

/// Output backend passed to the converter.
const BACKEND: &str = "xhtml5";

/// Extension of the rendered document.
const RENDERED_EXTENSION: &str = "xhtml";

/// Derive the rendered output path for a source document.
///
/// The rendered file lands next to the source with the same base name
/// and the `.xhtml` extension.
#[must_use]
pub fn output_path(source: &Path) -> PathBuf {
    source.with_extension(RENDERED_EXTENSION)
}

/// Convert an AsciiDoc source file to XHTML.
///
/// Runs `asciidoctor -b xhtml5 -a webfonts!` on the source file and
/// returns the path of the rendered document. Unlike asciidoctor's own
/// tolerant callers, a non-zero converter exit aborts the pipeline.
///
/// # Errors
///
/// Returns [`ConvertError::Spawn`] if the binary cannot be started,
/// [`ConvertError::Failed`] on a non-zero exit status and
/// [`ConvertError::MissingOutput`] if the converter claimed success but
/// wrote no file.
pub fn convert(source: &Path) -> Result<PathBuf, ConvertError> {
    let output = output_path(source);

    info!(
        "Converting {} to {}",
        source.display(),
        output.display()
    );

    let status = Command::new(ASCIIDOCTOR_BIN)
        .args(["-b", BACKEND, "-a", "webfonts!"])
        .arg(source)
        .arg("-o")
        .arg(&output)
        .status()
        .map_err(ConvertError::Spawn)?;

    if !status.success() {
        return Err(ConvertError::Failed {
            code: status.code(),
        });
    }

    if !output.exists() {
        return Err(ConvertError::MissingOutput(output));
    }

    Ok(output)
}
