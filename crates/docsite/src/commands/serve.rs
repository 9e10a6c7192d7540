//! `docsite serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use docsite_config::{CliSettings, Config, RenderMode};
use docsite_server::{run_server, server_config_from_docsite_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover docsite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source file (overrides config).
    #[arg(short, long)]
    source_file: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Show the raw source instead of compiling markdown.
    #[arg(long)]
    verbatim: bool,

    /// Do not show the attempted source path on the error page.
    #[arg(long)]
    hide_path: bool,

    /// Enable verbose output (log every request).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            source_file: self.source_file,
            mode: self.verbatim.then_some(RenderMode::Verbatim),
            show_path: self.hide_path.then_some(false),
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.banner(&format!(
            "Serving http://{}:{}/",
            config.server.host, config.server.port
        ));
        output.field("Source file", &config.docs.source_file.display());
        if let Some(path) = &config.config_path {
            output.field("Config", &path.display());
        }
        output.field("Mode", &render_mode_name(config.render.mode));
        output.field("Environment", &config.render.environment);

        let server_config =
            server_config_from_docsite_config(&config, version.to_owned(), self.verbose);
        run_server(server_config).await?;

        output.success("Server stopped");
        Ok(())
    }
}

/// Display name of a render mode.
fn render_mode_name(mode: RenderMode) -> &'static str {
    match mode {
        RenderMode::Markdown => "markdown",
        RenderMode::Verbatim => "verbatim",
    }
}
