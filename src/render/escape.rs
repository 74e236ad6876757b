//! HTML escaping for rendered text and attribute content.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static NEEDS_ESCAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[&<>"]"#).unwrap());

/// Escapes `&`, `<`, `>`, and `"`. Returns the input unchanged (no
/// allocation) when none of those characters are present.
pub(crate) fn escape(text: &str) -> Cow<'_, str> {
    if !NEEDS_ESCAPE.is_match(text) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
