//! Contact similarity scoring
//!
//! Percent similarity between two normalized contacts, derived from the
//! character-level Levenshtein distance.

pub struct SimilarityScorer;

impl SimilarityScorer {
    /// `round(100 * (1 - distance / max_len))`, clamped to 0..=100.
    /// Empty input on either side scores 0.
    pub fn similarity(a: &str, b: &str) -> u8 {
        let len_a = a.chars().count();
        let len_b = b.chars().count();

        if len_a == 0 || len_b == 0 {
            return 0;
        }

        if a == b {
            return 100;
        }

        let distance = strsim::levenshtein(a, b) as f64;
        let max_len = len_a.max(len_b) as f64;
        let percent = (100.0 * (1.0 - distance / max_len)).round();

        percent.clamp(0.0, 100.0) as u8
    }
}
