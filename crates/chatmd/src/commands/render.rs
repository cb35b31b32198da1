//! `chatmd render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use chatmd_config::{CliSettings, Config, Theme};
use chatmd_renderer::{HtmlBackend, PlainBackend, RenderBackend, RenderSession};
use clap::Args;

use super::{read_input, renderer};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: stdin, also `-`).
    input: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover chatmd.toml).
    #[arg(short, long, env = "CHATMD_CONFIG")]
    config: Option<PathBuf>,

    /// Render unstyled HTML without copy controls (overrides config).
    #[arg(long)]
    plain: bool,

    /// Do not wrap output in the prose container (overrides config).
    #[arg(long)]
    no_wrap: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or input/output can't be accessed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            theme: self.plain.then_some(Theme::Plain),
            wrap_prose: self.no_wrap.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let markdown = read_input(self.input.as_deref())?;
        let html = render_document(&config, &markdown);

        write_output(self.output.as_deref(), &html)?;
        if let Some(path) = &self.output {
            Output::new().success(&format!("Wrote {}", path.display()));
        }
        Ok(())
    }
}

/// Render a whole document with the configured theme.
fn render_document(config: &Config, markdown: &str) -> String {
    match config.render.theme {
        Theme::Styled => render_with::<HtmlBackend>(config, markdown),
        Theme::Plain => render_with::<PlainBackend>(config, markdown),
    }
}

fn render_with<B: RenderBackend>(config: &Config, markdown: &str) -> String {
    RenderSession::new(renderer::<B>(config))
        .with_container(config.output.wrap_prose)
        .render(markdown)
}

fn write_output(path: Option<&Path>, html: &str) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, html)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.write_all(b"\n")?;
            stdout.flush()?;
        }
    }
    Ok(())
}
