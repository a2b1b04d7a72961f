// Top-K URL overlap between two keyword blocks.
//
// Two keywords count as the same search intent when their result pages
// share enough URLs. Order and rank don't matter here, only set membership:
// a URL that shows up twice in one block is counted once.

use std::collections::HashSet;

/// Number of distinct URLs two blocks have in common, given their
/// `KeywordBlock::url_set`s.
pub fn url_overlap(a: &HashSet<&str>, b: &HashSet<&str>) -> usize {
    // Walk the smaller set
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter(|url| large.contains(*url)).count()
}

/// Whether two URL sets share strictly more than `threshold` URLs.
pub fn is_same_intent(a: &HashSet<&str>, b: &HashSet<&str>, threshold: usize) -> bool {
    url_overlap(a, b) > threshold
}
