use std::io::{self, Write};

use super::Renderer;

/// `file:line:col: error: message` lines for compilation-mode style tooling.
/// Columns are printed 1-based; the empty-file error keeps `0:0`.
pub struct EmacsRenderer<W> {
    out: W,
    name: String,
}

impl<W: Write> EmacsRenderer<W> {
    pub fn new(out: W) -> Self {
        EmacsRenderer {
            out,
            name: String::new(),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for EmacsRenderer<W> {
    fn start_rendering(&mut self, name: &str) -> io::Result<()> {
        self.name = name.to_string();
        Ok(())
    }

    fn display_error(&mut self, msg: &str, _token: &str, line: usize, col: usize) -> io::Result<()> {
        let col = if line == 0 { 0 } else { col + 1 };
        let msg = msg.replace('\n', " ");
        writeln!(self.out, "{}:{line}:{col}: error: {msg}", self.name)
    }

    fn finish_ok(&mut self) -> io::Result<()> {
        Ok(())
    }
}
