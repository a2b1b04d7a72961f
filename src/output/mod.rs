// Output formatting: terminal display and report export.

pub mod export;
pub mod terminal;

/// Shorten a cluster or keyword label for the summary table.
///
/// Counts characters, not bytes, so non-ASCII keywords are cut cleanly. A cut
/// label ends in "...".
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}
