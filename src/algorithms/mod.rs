//! Text algorithms behind street matching
//!
//! Each algorithm is a standalone function for composability; the edit
//! distance also sits behind a trait so scorers can swap it.

pub mod levenshtein;
pub mod normalize;
pub mod phonetic;
pub mod spelled;

pub use levenshtein::*;
pub use phonetic::{double_metaphone, encode, DoubleMetaphone, PhoneticCodes};

/// Trait for edit distance algorithms that return integer distances
pub trait EditDistance: Send + Sync {
    fn distance(&self, a: &str, b: &str) -> usize;

    /// Convert to normalized similarity score (0.0 to 1.0)
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let dist = self.distance(a, b);
        let max_len = a.chars().count().max(b.chars().count());
        if max_len == 0 {
            1.0
        } else {
            1.0 - (dist as f64 / max_len as f64)
        }
    }

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}
