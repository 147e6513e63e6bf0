//! Identifier case conversion used when naming schema keys and struct fields.

use std::sync::LazyLock;

use regex::Regex;

/// Any character followed by a capitalized run, e.g. the `PC` in `myHTTPCode`.
static FIRST_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("valid regex"));

/// A lowercase letter or digit followed by an uppercase letter.
static ALL_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));

/// Convert a camelCase or PascalCase identifier to snake_case.
///
/// Acronyms stay together: `myHTTPCode` becomes `my_http_code`.
/// The result is always lowercase, so applying this twice is a no-op.
pub fn to_snake_case(s: &str) -> String {
    let split = FIRST_CAP.replace_all(s, "${1}_${2}");
    let split = ALL_CAP.replace_all(&split, "${1}_${2}");
    split.to_lowercase()
}

/// Capitalize the first letter of every whitespace-delimited word.
///
/// Internal casing is kept, so `simpleName` becomes `SimpleName`.
pub fn to_title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }

    out
}
