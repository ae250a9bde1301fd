//! Title similarity scoring for fuzzy lookups.

use rapidfuzz::fuzz;

/// Case-insensitive similarity between two strings on a 0-100 scale.
///
/// Indel ratio of the lowercased inputs, `2 * matches / (len_a + len_b)`,
/// rounded to the nearest integer. A short query contained in a longer title
/// keeps a proportional share of the score. Identical strings score 100.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn ratio(a: &str, b: &str) -> u8 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let score = fuzz::ratio(a.chars(), b.chars());
    (score.clamp(0.0, 1.0) * 100.0).round() as u8
}
