use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use glob::glob;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::commands::{Cli, OperatingMode};
use crate::error::{Error, Result};
use crate::pipeline::STDIN;
use crate::renderer::{Renderer, create_renderer, renderer_names};
use crate::sql::{FormatStyle, SqlEngine, SqruffEngine};

mod commands;
mod error;
mod highlight;
mod pipeline;
mod position;
mod renderer;
mod sql;

const EXIT_OK: u8 = 0;
const EXIT_USAGE: u8 = 1;
const EXIT_SYNTAX: u8 = 10;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => return usage_error(err),
    };

    match run(&args) {
        Ok(true) => ExitCode::from(EXIT_OK),
        Ok(false) => ExitCode::from(EXIT_SYNTAX),
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn usage_error(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::from(EXIT_OK)
        }
        _ => {
            let rendered = err.to_string();
            let message = rendered.lines().next().unwrap_or_default();
            eprintln!("Error: {}", message.trim_start_matches("error: "));
            ExitCode::from(EXIT_USAGE)
        }
    }
}

/// Returns whether every input passed.
fn run(args: &Cli) -> Result<bool> {
    if args.list_renderers {
        for name in renderer_names() {
            println!("{name}");
        }
        return Ok(true);
    }

    let files = expand_paths(&args.sql_files)?;
    validate_paths(&files)?;

    let color = args.use_color(io::stdout().is_terminal());
    colored::control::set_override(color);

    let engine = match &args.config {
        Some(path) => {
            let source = fs::read_to_string(path).map_err(|source| Error::Config {
                path: path.clone(),
                source,
            })?;
            SqruffEngine::new(&source)
        }
        None => SqruffEngine::default(),
    };

    let mode = args.operating_mode();
    debug!(?mode, renderer = ?args.renderer, color, files = files.len(), "starting run");

    let all_passed = match mode {
        OperatingMode::Check => {
            let mut renderer = create_renderer(args.renderer, color, io::stdout());
            check_all(&files, &engine, renderer.as_mut())?
        }
        OperatingMode::Format => {
            let style = if color {
                FormatStyle::Decorated
            } else {
                FormatStyle::Plain
            };
            let mut renderer = create_renderer(args.renderer, color, io::stderr());
            format_all(&files, style, &engine, renderer.as_mut())?
        }
    };

    info!(all_passed, "run finished");
    Ok(all_passed)
}

fn check_all(files: &[String], engine: &dyn SqlEngine, renderer: &mut dyn Renderer) -> Result<bool> {
    let mut all_passed = true;
    for file in files {
        let passed = pipeline::check_file(file, engine, renderer)?;
        all_passed = all_passed && passed;
    }
    Ok(all_passed)
}

fn format_all(
    files: &[String],
    style: FormatStyle,
    engine: &dyn SqlEngine,
    renderer: &mut dyn Renderer,
) -> Result<bool> {
    let mut stdout = io::stdout();
    let mut all_passed = true;
    for file in files {
        let passed = pipeline::format_file(file, style, engine, renderer, &mut stdout)?;
        all_passed = all_passed && passed;
    }
    Ok(all_passed)
}

fn is_pattern(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

/// Expand glob patterns in order. `-`, existing paths and anything without
/// pattern characters pass through untouched.
fn expand_paths(args: &[String]) -> Result<Vec<String>> {
    let mut paths = Vec::new();

    for arg in args {
        if arg == STDIN || !is_pattern(arg) || Path::new(arg).exists() {
            paths.push(arg.clone());
            continue;
        }

        let entries = glob(arg).map_err(|source| Error::Pattern {
            pattern: arg.clone(),
            source,
        })?;
        let mut matched: Vec<_> = entries.filter_map(|entry| entry.ok()).collect();
        if matched.is_empty() {
            return Err(Error::NoMatch(arg.clone()));
        }
        matched.sort();
        paths.extend(matched.iter().map(|path| path.display().to_string()));
    }

    Ok(paths)
}

/// Every input other than stdin must be an existing regular file.
fn validate_paths(paths: &[String]) -> Result<()> {
    for name in paths.iter().filter(|name| *name != STDIN) {
        let path = Path::new(name);
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(Error::NotAFile(path.to_path_buf()));
        }
    }
    Ok(())
}
