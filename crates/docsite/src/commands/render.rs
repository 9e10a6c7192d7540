//! `docsite render` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use docsite_config::{CliSettings, Config, RenderMode};
use docsite_server::composer_config_from_docsite_config;
use docsite_site::PageComposer;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to configuration file (default: auto-discover docsite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source file (overrides config).
    #[arg(short, long)]
    source_file: Option<PathBuf>,

    /// Show the raw source instead of compiling markdown.
    #[arg(long)]
    verbatim: bool,

    /// Do not show the attempted source path on the error page.
    #[arg(long)]
    hide_path: bool,

    /// Write the page to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// The page is written even when it is the error page; the command then
    /// fails so scripts can detect a broken source.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, writing fails, or the error
    /// page was rendered.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_file: self.source_file,
            mode: self.verbatim.then_some(RenderMode::Verbatim),
            show_path: self.hide_path.then_some(false),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let composer = PageComposer::new(composer_config_from_docsite_config(&config));
        let page = composer.compose();

        match &self.output {
            Some(path) => {
                std::fs::write(path, &page.html)?;
                output.field("Output", &path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(page.html.as_bytes())?;
                stdout.flush()?;
            }
        }

        if let Some(diagnostic) = page.diagnostic {
            return Err(CliError::Render {
                kind: diagnostic.kind,
                detail: diagnostic.detail,
            });
        }

        output.success(&format!("Rendered {}", composer.locate()));
        Ok(())
    }
}
