//! Conversion error types.

use std::path::PathBuf;

use mmdsvg_kroki::RenderError;

/// Failure of a single conversion job.
///
/// Each variant names the path involved so batch reports stay readable.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("cannot read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("rendering {} failed: {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("cannot create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
