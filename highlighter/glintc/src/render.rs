//! Per-worker render pipeline: read, tokenize, render, write.

use std::fs;
use std::path::Path;

use glint_match::Matcher;
use glint_pool::{Job, JobError, Worker};
use glint_scan::Tokenizer;

use crate::html;

/// Highlights one file at a time.
///
/// Each pool worker owns its own instance; the tokenizer clone shares the
/// immutable pattern index, so instances never contend.
pub struct RenderWorker {
    tokenizer: Tokenizer,
    css_link: Option<String>,
}

impl RenderWorker {
    pub fn new(matcher: &Matcher, css_link: Option<&str>) -> Self {
        Self {
            tokenizer: Tokenizer::new(matcher.clone()),
            css_link: css_link.map(str::to_owned),
        }
    }

    /// Read `input`, highlight it, and write the page to `output`,
    /// creating output directories as needed.
    pub fn render_file(&mut self, input: &Path, output: &Path) -> Result<(), JobError> {
        let source = fs::read_to_string(input).map_err(|e| JobError::io(input, e))?;
        let tokens = self.tokenizer.tokenize(&source);
        let page = html::render_page(&source, &tokens, self.css_link.as_deref());
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(|e| JobError::io(parent, e))?;
        }
        fs::write(output, page).map_err(|e| JobError::io(output, e))?;
        tracing::info!(input = %input.display(), output = %output.display(), "generated");
        Ok(())
    }
}

impl Worker for RenderWorker {
    type Job = Job;

    fn run(&mut self, job: Job) -> Result<(), JobError> {
        self.render_file(&job.input, &job.output)
    }
}
