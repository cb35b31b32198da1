//! `chatmd blocks` command implementation.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;

use chatmd_config::Config;
use chatmd_renderer::{CodeBlock, PlainBackend};
use clap::Args;

use super::{read_input, renderer};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the blocks command.
#[derive(Args)]
pub(crate) struct BlocksArgs {
    /// Markdown file to scan (default: stdin, also `-`).
    input: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover chatmd.toml).
    #[arg(short, long, env = "CHATMD_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BlocksArgs {
    /// Execute the blocks command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or input can't be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let markdown = read_input(self.input.as_deref())?;

        let result = renderer::<PlainBackend>(&config).render_markdown(&markdown);
        if result.code_blocks.is_empty() {
            Output::new().info("No code blocks found");
            return Ok(());
        }

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(format_blocks(&result.code_blocks).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// One header line per block followed by its code.
fn format_blocks(blocks: &[CodeBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        let language = block.language.as_deref().unwrap_or("text");
        writeln!(out, "--- block {} ({language}) ---", block.index).unwrap();
        out.push_str(&block.code);
        out.push('\n');
    }
    out
}
