//! String edit distances.
//!
//! Distances count characters (Unicode scalar values), not bytes.

use std::collections::HashMap;

/// Restricted Damerau-Levenshtein distance with an optional cap.
///
/// Insertion, deletion, substitution and transposition of adjacent
/// characters each cost one. Two shortcuts trade accuracy for speed:
///
/// - If fewer than three quarters of the shorter string's characters can be
///   paired with characters of the other string (each used at most once, in
///   any order), the shorter length is returned without running the full
///   computation. This is a heuristic, not a bound: for short strings it
///   can report less than the true distance.
/// - If `max` is given and the lengths differ by at least `max`, `max` is
///   returned.
///
/// # Examples
///
/// ```
/// use place_core::matching::damerau_levenshtein;
///
/// assert_eq!(damerau_levenshtein("kitten", "sitting", None), 3);
/// assert_eq!(damerau_levenshtein("abc", "abc", None), 0);
/// assert_eq!(damerau_levenshtein("", "abc", None), 3);
/// assert_eq!(damerau_levenshtein("ab", "ba", None), 1);
/// ```
pub fn damerau_levenshtein(a: &str, b: &str, max: Option<usize>) -> usize {
    if a == b {
        return 0;
    }

    let chars_a: Vec<char> = a.chars().collect();
    let chars_b: Vec<char> = b.chars().collect();
    if chars_a.is_empty() {
        return chars_b.len();
    }
    if chars_b.is_empty() {
        return chars_a.len();
    }

    let shortest = chars_a.len().min(chars_b.len());
    if shared_characters(&chars_a, &chars_b) < shortest * 3 / 4 {
        return shortest;
    }

    if let Some(max) = max {
        if chars_a.len().abs_diff(chars_b.len()) >= max {
            return max;
        }
    }

    strsim::osa_distance(a, b)
}

/// Plain Levenshtein distance (no transpositions, no shortcuts).
///
/// ```
/// use place_core::matching::levenshtein;
///
/// assert_eq!(levenshtein("ab", "ba"), 2);
/// assert_eq!(levenshtein("flaw", "lawn"), 2);
/// ```
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Number of characters of `b` that can each be paired with a distinct
/// character of `a`.
fn shared_characters(a: &[char], b: &[char]) -> usize {
    let mut available: HashMap<char, usize> = HashMap::new();
    for &c in a {
        *available.entry(c).or_default() += 1;
    }

    b.iter()
        .filter(|&&c| match available.get_mut(&c) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        })
        .count()
}
