//! Choreography exporters for the Three-Finger Waltz
//!
//! Four stateless renderers over a read-only pipeline instance:
//!
//! - **Mermaid**: a four-node flowchart with styling, for docs and
//!   Mermaid-compatible viewers.
//! - **GraphViz**: a DOT digraph with colored nodes; edges appear only
//!   for phases actually present in the step log.
//! - **JSON**: machine-readable metadata, steps, and phase summary.
//! - **ASCII**: a banner table for terminals.
//!
//! [`export`] dispatches by [`ExportFormat`]; [`export_to_file`] also
//! infers the format from the destination's extension.

#![deny(unsafe_code)]

mod ascii;
mod graphviz;
mod json;
mod mermaid;

pub use ascii::render_ascii;
pub use graphviz::render_dot;
pub use json::render_json;
pub use mermaid::render_mermaid;

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use waltz_engine::ThreeFingerWaltz;

/// Errors from the export surface.
///
/// Unknown formats are programming errors and surface as `Err`, unlike
/// the pipeline's expected-condition outcomes.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unknown format '{0}'; supported formats: mermaid, graphviz, ascii, json")]
    UnknownFormat(String),

    #[error("cannot auto-detect export format from '{0}'")]
    UnknownExtension(String),

    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// The supported export formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Mermaid,
    Graphviz,
    Json,
    Ascii,
}

impl ExportFormat {
    /// All formats, in the order they are documented.
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Mermaid,
        ExportFormat::Graphviz,
        ExportFormat::Json,
        ExportFormat::Ascii,
    ];

    /// Infer a format from a file extension (`.md`, `.dot`/`.gv`,
    /// `.json`, `.txt`).
    pub fn from_path(path: &Path) -> ExportResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        match extension {
            "md" => Ok(ExportFormat::Mermaid),
            "dot" | "gv" => Ok(ExportFormat::Graphviz),
            "json" => Ok(ExportFormat::Json),
            "txt" => Ok(ExportFormat::Ascii),
            _ => Err(ExportError::UnknownExtension(path.display().to_string())),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mermaid" => Ok(ExportFormat::Mermaid),
            "graphviz" | "dot" => Ok(ExportFormat::Graphviz),
            "json" => Ok(ExportFormat::Json),
            "ascii" => Ok(ExportFormat::Ascii),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Mermaid => "mermaid",
            ExportFormat::Graphviz => "graphviz",
            ExportFormat::Json => "json",
            ExportFormat::Ascii => "ascii",
        };
        f.write_str(name)
    }
}

/// Render the waltz choreography in the given format.
pub fn export(waltz: &ThreeFingerWaltz, format: ExportFormat) -> String {
    match format {
        ExportFormat::Mermaid => render_mermaid(waltz),
        ExportFormat::Graphviz => render_dot(waltz),
        ExportFormat::Json => render_json(waltz, true),
        ExportFormat::Ascii => render_ascii(waltz),
    }
}

/// Render using a format name, failing on unknown names.
pub fn export_named(waltz: &ThreeFingerWaltz, format: &str) -> ExportResult<String> {
    Ok(export(waltz, format.parse()?))
}

/// Write an export to `path`.
///
/// With `format: None` the format is inferred from the file extension.
/// Returns the format actually used.
pub fn export_to_file(
    waltz: &ThreeFingerWaltz,
    path: impl AsRef<Path>,
    format: Option<ExportFormat>,
) -> ExportResult<ExportFormat> {
    let path = path.as_ref();
    let format = match format {
        Some(f) => f,
        None => ExportFormat::from_path(path)?,
    };
    std::fs::write(path, export(waltz, format))?;
    Ok(format)
}
