//! String utilities for the domain layer.

/// Single-line preview of `s` for log fields, at most `max_chars` characters.
///
/// Newlines are flattened to spaces and an ellipsis marks truncation.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let kept: String = flat.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}
