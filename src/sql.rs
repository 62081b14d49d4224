//! SQL parsing and formatting, delegated to sqruff.

use std::ops::Range;

use sqruff_lib::core::{config::FluffConfig, linter::core::Linter};
use sqruff_lib_core::dialects::syntax::SyntaxKind;
use sqruff_lib_core::parser::segments::Tables;
use tracing::debug;

use crate::error::{Error, Result};
use crate::highlight::{TokenClass, paint};
use crate::position::LineIndex;

pub const DEFAULT_CONFIG: &str = "[sqruff]
dialect = ansi
rules = all
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub offset: usize,
    pub token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatStyle {
    Plain,
    Decorated,
}

/// The parser and formatter the pipelines run against.
pub trait SqlEngine {
    /// Syntax errors in the order the parser reports them.
    fn parse_errors(&self, sql: &str) -> Vec<ParseError>;

    fn format(&self, name: &str, sql: &str, style: FormatStyle) -> Result<String>;
}

pub struct SqruffEngine {
    linter: Linter,
}

impl SqruffEngine {
    pub fn new(config_source: &str) -> Self {
        let config = FluffConfig::from_source(config_source, None);

        SqruffEngine {
            linter: Linter::new(config, None, None, true),
        }
    }

    /// Leaf segments of the parse tree, classified for highlighting.
    fn tokens(&self, sql: &str) -> Option<Vec<(TokenClass, String)>> {
        let tables = Tables::default();
        let tree = self.linter.parse_string(&tables, sql, None).ok()?.tree?;

        let tokens = tree
            .get_raw_segments()
            .into_iter()
            .map(|segment| {
                let class = if segment.is_type(SyntaxKind::Keyword) {
                    TokenClass::Keyword
                } else if segment.is_type(SyntaxKind::QuotedLiteral) {
                    TokenClass::String
                } else if segment.is_type(SyntaxKind::NumericLiteral) {
                    TokenClass::Number
                } else if segment.is_type(SyntaxKind::Comment)
                    || segment.is_type(SyntaxKind::InlineComment)
                    || segment.is_type(SyntaxKind::BlockComment)
                {
                    TokenClass::Comment
                } else {
                    TokenClass::Other
                };
                (class, segment.raw().to_string())
            })
            .collect();

        Some(tokens)
    }
}

impl Default for SqruffEngine {
    fn default() -> Self {
        SqruffEngine::new(DEFAULT_CONFIG)
    }
}

impl SqlEngine for SqruffEngine {
    // Parsing alone reports lexer and parser errors; no lint rule runs.
    fn parse_errors(&self, sql: &str) -> Vec<ParseError> {
        let tables = Tables::default();
        let parsed = match self.linter.parse_string(&tables, sql, None) {
            Ok(parsed) => parsed,
            Err(err) => {
                return vec![ParseError {
                    message: format!("{err:?}"),
                    offset: 0,
                    token: String::new(),
                }];
            }
        };

        let index = LineIndex::build(sql);
        parsed
            .violations
            .into_iter()
            .map(|v| locate(sql, &index, v.line_no, v.line_pos, &v.source_slice, v.description))
            .collect()
    }

    fn format(&self, name: &str, sql: &str, style: FormatStyle) -> Result<String> {
        let errors = self.parse_errors(sql);
        if !errors.is_empty() {
            return Err(Error::Format {
                name: name.to_string(),
                count: errors.len(),
            });
        }

        let fixed = self.linter.lint_string(sql, None, true).fix_string();
        match style {
            FormatStyle::Plain => Ok(fixed),
            FormatStyle::Decorated => match self.tokens(&fixed) {
                Some(tokens) => Ok(paint(&fixed, &tokens)),
                None => {
                    debug!(name, "formatted output did not parse, left undecorated");
                    Ok(fixed)
                }
            },
        }
    }
}

/// sqruff positions errors by 1-based line and character; its slices are often empty.
fn locate(
    sql: &str,
    index: &LineIndex,
    line_no: usize,
    line_pos: usize,
    slice: &Range<usize>,
    message: String,
) -> ParseError {
    let offset = index.offset_of(sql, line_no, line_pos.saturating_sub(1));
    let token = match sql.get(slice.clone()) {
        Some(text) if !text.is_empty() => text,
        _ => token_at(sql, offset),
    };

    ParseError {
        message,
        offset,
        token: token.to_string(),
    }
}

/// The word starting at `offset`, or the single character there.
pub fn token_at(sql: &str, offset: usize) -> &str {
    let rest = sql.get(offset..).unwrap_or_default();
    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    match rest.chars().next() {
        Some(c) if is_word(c) => &rest[..rest.find(|c: char| !is_word(c)).unwrap_or(rest.len())],
        Some(c) if !c.is_whitespace() => &rest[..c.len_utf8()],
        _ => "",
    }
}

