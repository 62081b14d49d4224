use std::io::{self, Write};

use colored::Colorize;

use super::Renderer;

/// Human readable output.
pub struct TextRenderer<W> {
    out: W,
    color: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        TextRenderer { out, color }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn start_rendering(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.out, "Checking SQL syntax of {name}")
    }

    fn display_error(&mut self, msg: &str, token: &str, line: usize, col: usize) -> io::Result<()> {
        let token = escape_token(token);
        if self.color {
            writeln!(self.out, " Line {line}, col {col} at \"{token}\": {}", msg.red())
        } else {
            writeln!(self.out, " Line {line}, col {col} at \"{token}\": {msg}")
        }
    }

    fn finish_ok(&mut self) -> io::Result<()> {
        if self.color {
            writeln!(self.out, " {}", "OK".green())
        } else {
            writeln!(self.out, " OK")
        }
    }
}

/// Make newlines, carriage returns and tabs visible.
pub fn escape_token(token: &str) -> String {
    token
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
