//! Terminal color helpers.

use owo_colors::OwoColorize;

pub const SEPARATOR: &str = "--------------------------------------------------";

pub fn success(text: impl AsRef<str>) -> String {
    text.as_ref().green().to_string()
}

pub fn error(text: impl AsRef<str>) -> String {
    text.as_ref().red().to_string()
}

pub fn notice(text: impl AsRef<str>) -> String {
    text.as_ref().yellow().to_string()
}

pub fn hint(text: impl AsRef<str>) -> String {
    text.as_ref().bright_black().to_string()
}

/// `question hint: ` with the question in green and the hint dimmed.
pub fn prompt(question: &str, hint_text: Option<&str>) -> String {
    match hint_text {
        Some(text) => format!("{} {}: ", success(question), hint(text)),
        None => format!("{}: ", success(question)),
    }
}
