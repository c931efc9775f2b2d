//! Service-message value escaping.
//!
//! Attribute values are embedded inside single quotes in a
//! `##teamcity[...]` line, so a small set of characters must be
//! rewritten with a `|` prefix. Substitution order matters: `|` is
//! doubled first so later rules never re-touch the escape character
//! they introduce.

/// Escape a value for embedding in a single-quoted attribute.
///
/// Applies, in order: `|`→`||`, `\n`→`|n`, `\r`→`|r`, `[`→`|[`,
/// `]`→`|]`, U+0085→`|x`, U+2028→`|l`, U+2029→`|p`, `'`→`|'`.
/// No other characters are altered. Pure and total over all inputs.
#[must_use]
pub fn escape(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    value
        .replace('|', "||")
        .replace('\n', "|n")
        .replace('\r', "|r")
        .replace('[', "|[")
        .replace(']', "|]")
        .replace('\u{0085}', "|x")
        .replace('\u{2028}', "|l")
        .replace('\u{2029}', "|p")
        .replace('\'', "|'")
}

/// Escape an optional value, mapping `None` to the empty string.
#[must_use]
pub fn escape_opt(value: Option<&str>) -> String {
    value.map_or_else(String::new, escape)
}
