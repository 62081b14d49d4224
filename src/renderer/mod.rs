//! Renderer module — trait-based output dispatch.

pub mod emacs;
pub mod text;

use std::io::{self, Write};

use crate::commands::RenderMode;

/// Receives the progress and diagnostics of one run, file by file.
pub trait Renderer {
    fn start_rendering(&mut self, name: &str) -> io::Result<()>;
    fn display_error(&mut self, msg: &str, token: &str, line: usize, col: usize) -> io::Result<()>;
    fn finish_ok(&mut self) -> io::Result<()>;
}

/// Create the renderer for the given mode, writing to `out`.
pub fn create_renderer<'a, W: Write + 'a>(
    mode: RenderMode,
    color: bool,
    out: W,
) -> Box<dyn Renderer + 'a> {
    match mode {
        RenderMode::Text => Box::new(text::TextRenderer::new(out, color)),
        RenderMode::Emacs => Box::new(emacs::EmacsRenderer::new(out)),
    }
}

/// Names accepted by `--renderer`.
pub fn renderer_names() -> Vec<String> {
    use clap::ValueEnum;

    RenderMode::value_variants()
        .iter()
        .filter_map(|mode| mode.to_possible_value())
        .map(|value| value.get_name().to_string())
        .collect()
}
