//! Levenshtein (edit) distance
//!
//! Street core names are short, so almost every comparison runs through the
//! Myers bit-parallel algorithm in a single 64-bit word; longer inputs fall
//! back to a single-row DP.

use super::EditDistance;
use ahash::AHashMap;
use smallvec::SmallVec;

/// Maximum pattern length for Myers bit-parallel algorithm (64 bits per block)
const MYERS_BLOCK_SIZE: usize = 64;

/// Myers bit-parallel Levenshtein distance for patterns up to 64 characters.
///
/// Based on: Myers, G. (1999). "A fast bit-vector algorithm for approximate string matching"
#[inline]
fn myers_64(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    let n = text.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }
    if m > MYERS_BLOCK_SIZE {
        return dp_distance(pattern, text);
    }

    // Peq[c] has bit i set if pattern[i] == c
    let mut peq: AHashMap<char, u64> = AHashMap::with_capacity(m.min(26));
    for (i, &c) in pattern.iter().enumerate() {
        *peq.entry(c).or_insert(0) |= 1u64 << i;
    }

    let mut vp: u64 = !0u64;
    let mut vn: u64 = 0u64;
    let mut score = m;
    let mask = 1u64 << (m - 1);

    for &tc in text {
        let eq = peq.get(&tc).copied().unwrap_or(0);

        let xv = eq | vn;
        let xh = (((eq & vp).wrapping_add(vp)) ^ vp) | eq;

        let hp = vn | !(xh | vp);
        let hn = vp & xh;

        if (hp & mask) != 0 {
            score += 1;
        } else if (hn & mask) != 0 {
            score -= 1;
        }

        // First row is 0,1,2,... so bit 0 of the shifted hp is always set
        let hp_shifted = (hp << 1) | 1;
        let hn_shifted = hn << 1;

        vp = hn_shifted | !(xv | hp_shifted);
        vn = hp_shifted & xv;
    }

    score
}

/// Single-row DP distance, used for patterns longer than one Myers block.
#[inline]
fn dp_distance(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let (target, source) = if a.len() < b.len() { (a, b) } else { (b, a) };
    let n_target = target.len();

    let mut row: SmallVec<[usize; 64]> = (0..=n_target).collect();

    for (i, &sc) in source.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;

        for j in 0..n_target {
            let cost = usize::from(sc != target[j]);
            let deletion = row[j + 1] + 1;
            let insertion = row[j] + 1;
            let substitution = prev + cost;

            prev = row[j + 1];
            row[j + 1] = substitution.min(deletion).min(insertion);
        }
    }

    row[n_target]
}

/// Classic Levenshtein distance (insert, delete, substitute; unit cost).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein;

impl Levenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EditDistance for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        levenshtein(a, b)
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

/// Levenshtein distance over Unicode scalar values.
///
/// # Example
/// ```
/// use streetmatch::algorithms::levenshtein::levenshtein;
///
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// assert_eq!(levenshtein("grouse", "grouse"), 0);
/// ```
#[inline]
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();

    // Shorter string as the Myers pattern
    if a_chars.len() <= b_chars.len() {
        myers_64(&a_chars, &b_chars)
    } else {
        myers_64(&b_chars, &a_chars)
    }
}

/// Normalized similarity: `1 - distance / max(len_a, len_b)`, in `[0.0, 1.0]`.
#[inline]
#[must_use]
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    EditDistance::similarity(&Levenshtein, a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_basic() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("saturday", "sunday"), 3);
    }

    #[test]
    fn test_levenshtein_street_names() {
        assert_eq!(levenshtein("golf", "gulf"), 1);
        assert_eq!(levenshtein("grouse", "grous"), 1);
        assert_eq!(levenshtein("maple", "mable"), 1);
    }

    #[test]
    fn test_levenshtein_unicode() {
        assert_eq!(levenshtein("peña", "pena"), 1);
    }

    #[test]
    fn test_myers_matches_dp() {
        let pairs = [
            ("algorithm", "altruistic"),
            ("intention", "execution"),
            ("a", "b"),
            ("ab", "ba"),
            ("cottonwood", "cotton"),
        ];
        for (a, b) in pairs {
            let a_chars: Vec<char> = a.chars().collect();
            let b_chars: Vec<char> = b.chars().collect();
            assert_eq!(levenshtein(a, b), dp_distance(&a_chars, &b_chars), "{a} / {b}");
        }
    }

    #[test]
    fn test_long_pattern_falls_back_to_dp() {
        let a = "a".repeat(70);
        let b = format!("{}b", "a".repeat(69));
        assert_eq!(levenshtein(&a, &b), 1);
    }

    #[test]
    fn test_similarity() {
        assert_eq!(levenshtein_similarity("", ""), 1.0);
        assert_eq!(levenshtein_similarity("golf", "golf"), 1.0);
        assert_eq!(levenshtein_similarity("golf", "gulf"), 0.75);
        assert_eq!(levenshtein_similarity("abc", "xyz"), 0.0);
    }
}
