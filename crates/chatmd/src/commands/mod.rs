//! CLI command implementations.

pub(crate) mod blocks;
pub(crate) mod render;

pub(crate) use blocks::BlocksArgs;
pub(crate) use render::RenderArgs;

use std::io::Read;
use std::path::Path;

use chatmd_config::{Config, RenderConfig};
use chatmd_renderer::{MarkdownRenderer, RenderBackend, RenderOptions};

use crate::error::CliError;

/// Read Markdown from `input`, or stdin when absent or `-`.
fn read_input(input: Option<&Path>) -> Result<String, CliError> {
    match input {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|source| CliError::Input {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut markdown = String::new();
            std::io::stdin().lock().read_to_string(&mut markdown)?;
            Ok(markdown)
        }
    }
}

fn render_options(config: &RenderConfig) -> RenderOptions {
    RenderOptions {
        gfm: config.gfm,
        breaks: config.breaks,
        smart_punctuation: config.smart_punctuation,
        linkify: config.linkify,
        raw_html: config.raw_html,
    }
}

/// Build a renderer from loaded configuration.
fn renderer<B: RenderBackend>(config: &Config) -> MarkdownRenderer<B> {
    MarkdownRenderer::new()
        .with_options(render_options(&config.render))
        .with_copy_feedback(config.copy.feedback())
}
