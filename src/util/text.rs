// src/util/text.rs
use regex::Regex;
use std::sync::OnceLock;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Single-line preview of note text for terminal listings.
///
/// 1. Collapses every whitespace run (newlines included) to one space
/// 2. Trims
/// 3. Cuts at `max_chars` characters, marking the cut with `…`
///
/// # Examples
///
/// ```
/// use notegrid::util::text::preview;
///
/// assert_eq!(preview("milk\n  eggs", 20), "milk eggs");
/// assert_eq!(preview("abcdef", 3), "abc…");
/// ```
pub fn preview(text: &str, max_chars: usize) -> String {
    let collapsed = whitespace_re().replace_all(text.trim(), " ");
    if collapsed.chars().count() <= max_chars {
        return collapsed.into_owned();
    }
    let mut cut: String = collapsed.chars().take(max_chars).collect();
    cut.truncate(cut.trim_end().len());
    cut.push('…');
    cut
}
