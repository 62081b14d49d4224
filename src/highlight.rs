//! ANSI highlighting for decorated format output.

use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Keyword,
    String,
    Number,
    Comment,
    Other,
}

/// Colour each parsed token. If the tokens do not spell out `source`
/// exactly, the source is returned unpainted.
pub fn paint(source: &str, tokens: &[(TokenClass, String)]) -> String {
    let joined: String = tokens.iter().map(|(_, raw)| raw.as_str()).collect();
    if joined != source {
        return source.to_string();
    }

    tokens
        .iter()
        .map(|(class, raw)| match class {
            TokenClass::Keyword => raw.blue().bold().to_string(),
            TokenClass::String => raw.green().to_string(),
            TokenClass::Number => raw.yellow().to_string(),
            TokenClass::Comment => raw.dimmed().to_string(),
            TokenClass::Other => raw.clone(),
        })
        .collect()
}
