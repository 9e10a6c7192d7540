//! HTTP server for docsite.
//!
//! Serves a single documentation page at `/`. Every request re-reads and
//! re-renders the source file, so edits show up on the next reload without
//! restarting the server.
//!
//! # Quick Start
//!
//! ```ignore
//! use docsite_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 7979,
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum server (docsite-server)
//!                        │
//!                        ├─► GET /  ──► PageComposer (docsite-site)
//!                        │                 │
//!                        │                 └─► docs/main.md ──► docsite-renderer
//!                        │
//!                        └─► anything else ──► 404
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use docsite_config::{Environment, RenderMode as ConfigRenderMode};
use docsite_site::{CompileOptions, Layout, PageComposer, PageComposerConfig, RenderMode};
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Page pipeline configuration.
    pub composer: PageComposerConfig,
    /// Enable verbose output.
    pub verbose: bool,
    /// Application version (part of the `ETag`).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            composer: PageComposerConfig::default(),
            verbose: false,
            version: String::new(),
        }
    }
}

/// Run the server until Ctrl-C is received.
///
/// # Errors
///
/// Returns an error if the address is invalid, binding fails, or the server
/// stops with an I/O error.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let composer = Arc::new(PageComposer::new(config.composer.clone()));
    let state = Arc::new(AppState {
        composer,
        verbose: config.verbose,
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let address = format!("{}:{}", config.host, config.port);
    let addr = SocketAddr::from_str(&address).map_err(|_| ServerError::InvalidAddress(address))?;
    tracing::info!(
        address = %addr,
        source = %config.composer.source_file.display(),
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Build the page pipeline configuration from docsite config.
#[must_use]
pub fn composer_config_from_docsite_config(config: &docsite_config::Config) -> PageComposerConfig {
    PageComposerConfig {
        source_file: config.docs.source_file.clone(),
        base_dir: config.base_dir(),
        mode: match config.render.mode {
            ConfigRenderMode::Markdown => RenderMode::Markdown,
            ConfigRenderMode::Verbatim => RenderMode::Verbatim,
        },
        show_path: config.render.show_path,
        development: config.render.environment == Environment::Development,
        layout: Layout {
            title: config.site.title.clone(),
            description: config.site.description.clone(),
            lang: config.site.lang.clone(),
        },
        compile: CompileOptions::default(),
    }
}

/// Create server configuration from docsite config.
///
/// # Arguments
///
/// * `config` - docsite configuration
/// * `version` - Application version
/// * `verbose` - Enable verbose output
#[must_use]
pub fn server_config_from_docsite_config(
    config: &docsite_config::Config,
    version: String,
    verbose: bool,
) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        composer: composer_config_from_docsite_config(config),
        verbose,
        version,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_server_config_from_default_config() {
        let config = docsite_config::Config::default();

        let server = server_config_from_docsite_config(&config, "1.2.3".to_owned(), true);

        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 7979);
        assert_eq!(server.version, "1.2.3");
        assert!(server.verbose);
        assert_eq!(server.composer.source_file, PathBuf::from("docs/main.md"));
        assert_eq!(server.composer.mode, RenderMode::Markdown);
        assert!(server.composer.show_path);
        assert!(!server.composer.development);
        assert_eq!(server.composer.layout.lang, "zh");
    }

    #[test]
    fn test_composer_config_maps_render_settings() {
        let mut config = docsite_config::Config::default();
        config.render.mode = ConfigRenderMode::Verbatim;
        config.render.show_path = false;
        config.render.environment = Environment::Development;
        config.site.title = "Runbooks".to_owned();

        let composer = composer_config_from_docsite_config(&config);

        assert_eq!(composer.mode, RenderMode::Verbatim);
        assert!(!composer.show_path);
        assert!(composer.development);
        assert_eq!(composer.layout.title, "Runbooks");
    }

    #[test]
    fn test_relative_config_path_locates_absolute_source() {
        let file = tempfile::Builder::new()
            .prefix("docsite-relative-")
            .suffix(".toml")
            .tempfile_in(".")
            .unwrap();
        let relative = std::path::Path::new(file.path().file_name().unwrap());
        let config = docsite_config::Config::load(Some(relative), None).unwrap();

        let composer = PageComposer::new(composer_config_from_docsite_config(&config));
        let located = composer.locate();

        assert!(located.as_path().is_absolute());
        assert_eq!(
            located.as_path(),
            std::env::current_dir().unwrap().join("docs/main.md")
        );
    }
}
