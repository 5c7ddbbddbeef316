//! Cleans raw generative output into a single tidy line.
//!
//! Steps run in a fixed order. Bold unwrapping must run before stray asterisks
//! are stripped, otherwise `**calm**` loses its markers as plain asterisks and
//! the inner text is never identified.

use once_cell::sync::Lazy;
use regex::Regex;

static BACKSLASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\+").expect("valid regex"));
static NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n]+").expect("valid regex"));
static QUOTES: Lazy<Regex> = Lazy::new(|| Regex::new(r#""+"#).expect("valid regex"));
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));
static ASTERISKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*+").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Total and idempotent: `sanitize(&sanitize(x)) == sanitize(x)`.
///
/// The output never contains a backslash, a line break, a double quote or an asterisk,
/// and has no leading, trailing or repeated whitespace.
pub fn sanitize(raw: &str) -> String {
    let text = BACKSLASHES.replace_all(raw, "");
    let text = NEWLINES.replace_all(&text, "");
    let text = QUOTES.replace_all(&text, "");
    let text = BOLD.replace_all(&text, "$1");
    let text = ASTERISKS.replace_all(&text, "");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}
