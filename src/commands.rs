use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "sqllint")]
#[command(version, about = "sqllint checks SQL files for syntax errors or reformats them", long_about = None)]
pub struct Cli {
    /// Output mode for diagnostics.
    #[arg(short, long, value_enum, default_value_t = RenderMode::Text)]
    pub renderer: RenderMode,
    /// Reformat the SQL instead of checking it.
    #[arg(short, long)]
    pub format: bool,
    /// Force colored output.
    #[arg(long, overrides_with = "nocolor")]
    pub color: bool,
    /// Disable colored output.
    #[arg(long, overrides_with = "color")]
    pub nocolor: bool,
    /// Path to a sqruff configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// List the available renderers and exit.
    #[arg(long, alias = "list-renderer")]
    pub list_renderers: bool,
    /// SQL files, "-" for stdin. Glob patterns are expanded.
    #[arg(required_unless_present = "list_renderers")]
    pub sql_files: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderMode {
    Text,
    Emacs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingMode {
    Check,
    Format,
}

impl Cli {
    pub fn operating_mode(&self) -> OperatingMode {
        if self.format {
            OperatingMode::Format
        } else {
            OperatingMode::Check
        }
    }

    /// Explicit flags win, otherwise color follows whether stdout is a terminal.
    pub fn use_color(&self, stdout_is_terminal: bool) -> bool {
        if self.color {
            true
        } else if self.nocolor {
            false
        } else {
            stdout_is_terminal
        }
    }
}
