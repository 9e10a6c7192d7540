//! Server error types.

use std::net::SocketAddr;

/// Error returned when the server cannot start or stops abnormally.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Host and port do not form a socket address.
    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),
    /// Binding the listener failed.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Address that could not be bound.
        addr: SocketAddr,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The server loop failed.
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}
