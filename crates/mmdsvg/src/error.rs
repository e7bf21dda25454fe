//! CLI error types.

use mmdsvg_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Single-file conversion failed; the failure was already reported.
    #[error("conversion failed")]
    ConversionFailed,
}
