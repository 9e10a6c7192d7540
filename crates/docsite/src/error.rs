//! CLI error types.

use docsite_config::ConfigError;
use docsite_server::ServerError;
use docsite_site::ErrorKind;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Server(#[from] ServerError),

    #[error("rendered the error page ({kind}): {detail}")]
    Render { kind: ErrorKind, detail: String },
}
