//! Per-file check and format runs.

use std::fs;
use std::io::{self, Read, Write};

use tracing::debug;

use crate::error::{Error, Result};
use crate::position::LineIndex;
use crate::renderer::Renderer;
use crate::sql::{FormatStyle, SqlEngine};

pub const STDIN: &str = "-";

/// Read a file, or standard input for `-`.
pub fn load_source(name: &str) -> Result<String> {
    let read = if name == STDIN {
        let mut sql = String::new();
        io::stdin().read_to_string(&mut sql).map(|_| sql)
    } else {
        fs::read_to_string(name)
    };

    read.map_err(|source| Error::Read {
        name: name.to_string(),
        source,
    })
}

fn is_blank(sql: &str) -> bool {
    sql.trim_matches(|c: char| c.is_whitespace() || c == '\0')
        .is_empty()
}

/// Report an empty document through the renderer. Returns true when blank.
fn reject_blank(sql: &str, renderer: &mut dyn Renderer) -> Result<bool> {
    if is_blank(sql) {
        renderer.display_error("SQL file empty", "", 0, 0)?;
        return Ok(true);
    }
    Ok(false)
}

/// Check one document, returning whether it is free of syntax errors.
pub fn check_source(
    name: &str,
    sql: &str,
    engine: &dyn SqlEngine,
    renderer: &mut dyn Renderer,
) -> Result<bool> {
    if reject_blank(sql, renderer)? {
        debug!(name, "empty input");
        return Ok(false);
    }

    let errors = engine.parse_errors(sql);
    if errors.is_empty() {
        renderer.finish_ok()?;
        return Ok(true);
    }

    let index = LineIndex::build(sql);
    debug!(name, errors = errors.len(), lines = index.line_count(), "syntax errors");

    for error in &errors {
        let pos = index.resolve(error.offset);
        renderer.display_error(&error.message, &error.token, pos.line, pos.column)?;
    }

    Ok(false)
}

pub fn check_file(name: &str, engine: &dyn SqlEngine, renderer: &mut dyn Renderer) -> Result<bool> {
    renderer.start_rendering(name)?;
    let sql = load_source(name)?;
    check_source(name, &sql, engine, renderer)
}

/// Format one document into `out`. Only a blank document fails.
pub fn format_source(
    name: &str,
    sql: &str,
    style: FormatStyle,
    engine: &dyn SqlEngine,
    renderer: &mut dyn Renderer,
    out: &mut dyn Write,
) -> Result<bool> {
    if reject_blank(sql, renderer)? {
        debug!(name, "empty input");
        return Ok(false);
    }

    let formatted = engine.format(name, sql, style)?;
    writeln!(out, "{}", formatted.trim_end_matches(['\n', '\r']))?;
    out.flush()?;

    Ok(true)
}

pub fn format_file(
    name: &str,
    style: FormatStyle,
    engine: &dyn SqlEngine,
    renderer: &mut dyn Renderer,
    out: &mut dyn Write,
) -> Result<bool> {
    renderer.start_rendering(name)?;
    let sql = load_source(name)?;
    format_source(name, &sql, style, engine, renderer, out)
}
