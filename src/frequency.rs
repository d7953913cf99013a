//! Letter-frequency analysis.
//!
//! Orders the letters of a text from most to least frequent and scores the
//! ordering against the canonical English frequency ranking. The score is a
//! relative ranking signal for candidate decryption keys, not a probability.

use crate::alphabet::{ALPHABET, ALPHABET_LEN};

/// The letters of the English alphabet ordered from most to least frequent.
pub const ENGLISH_FREQUENCY: &str = "ETAOINSHRDLCUMWFGYPBVKJXQZ";

/// Number of letters compared at each end of the ordering by
/// [`match_score`].
const MATCH_WINDOW: usize = 6;

/// Counts the occurrences of each letter in `text`, ignoring case.
///
/// # Returns
/// An array of 26 counts indexed by zero-based letter position.
pub fn count_letters(text: &str) -> [u32; 26] {
    let mut counts = [0u32; 26];
    for ch in text.chars() {
        if ch.is_ascii_alphabetic() {
            counts[(ch.to_ascii_uppercase() as u8 - b'A') as usize] += 1;
        }
    }
    counts
}

/// Position of a letter in [`ENGLISH_FREQUENCY`]. Lower is more common.
fn reference_rank(letter: char) -> usize {
    ENGLISH_FREQUENCY
        .chars()
        .position(|candidate| candidate == letter)
        .unwrap_or(ALPHABET_LEN as usize)
}

/// Returns the 26 letters of `text` ordered from most to least frequent.
///
/// Letters with equal counts are ordered by ascending position in
/// [`ENGLISH_FREQUENCY`], so the more common reference letter comes first.
///
/// # Examples
///
/// ```
/// use classicrypt::frequency::frequency_order;
///
/// assert!(frequency_order("EEEE").starts_with('E'));
/// ```
pub fn frequency_order(text: &str) -> String {
    let counts = count_letters(text);
    let mut letters: Vec<char> = ALPHABET.chars().collect();
    letters.sort_by(|&a, &b| {
        let count_a = counts[(a as u8 - b'A') as usize];
        let count_b = counts[(b as u8 - b'A') as usize];
        count_b
            .cmp(&count_a)
            .then_with(|| reference_rank(a).cmp(&reference_rank(b)))
    });
    letters.into_iter().collect()
}

/// Scores how closely the letter frequencies of `text` match English.
///
/// Counts how many of the six most common reference letters appear among
/// the six most frequent letters of `text`, plus how many of the six least
/// common reference letters appear among its six least frequent letters.
///
/// # Returns
/// A score in `[0, 12]`.
pub fn match_score(text: &str) -> u32 {
    let order: Vec<char> = frequency_order(text).chars().collect();
    let top = &order[..MATCH_WINDOW];
    let bottom = &order[order.len() - MATCH_WINDOW..];

    let mut score = 0;
    for common in ENGLISH_FREQUENCY.chars().take(MATCH_WINDOW) {
        if top.contains(&common) {
            score += 1;
        }
    }
    for uncommon in ENGLISH_FREQUENCY
        .chars()
        .skip(ENGLISH_FREQUENCY.len() - MATCH_WINDOW)
    {
        if bottom.contains(&uncommon) {
            score += 1;
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_letters_mixed_case() {
        let counts = count_letters("AaBb!!");
        assert_eq!(counts[0], 2);
        assert_eq!(counts[1], 2);
        assert_eq!(counts[2], 0);
    }

    #[test]
    fn test_count_letters_ignores_non_letters() {
        let counts = count_letters("123 .,;");
        assert_eq!(counts.iter().sum::<u32>(), 0);
    }

    #[test]
    fn test_frequency_order_single_letter() {
        // E leads both by count and by reference rank, and the zero-count
        // tie group falls back to the reference ordering.
        assert_eq!(frequency_order("EEEE"), ENGLISH_FREQUENCY);
    }

    #[test]
    fn test_frequency_order_count_beats_rank() {
        let order = frequency_order("ZZZZE");
        assert!(order.starts_with('Z'));
        assert_eq!(order.chars().nth(1), Some('E'));
    }

    #[test]
    fn test_frequency_order_is_a_permutation() {
        let order = frequency_order("attack at dawn");
        assert_eq!(order.len(), 26);
        for letter in ALPHABET.chars() {
            assert!(order.contains(letter));
        }
    }

    #[test]
    fn test_match_score_uniform_text() {
        // One of each letter: a single tie group in reference order.
        assert_eq!(match_score(ENGLISH_FREQUENCY), 12);
    }

    #[test]
    fn test_match_score_bounds() {
        let score = match_score("The smell of rain on dry ground is sweet.");
        assert!(score <= 12);
    }

    #[test]
    fn test_match_score_english_beats_shifted() {
        let plain = "It was a bright cold day in April and the clocks were \
                     striking thirteen and the wind was cold and the streets \
                     were full of people going home from work in the evening";
        let shifted: String = plain
            .chars()
            .map(|ch| crate::caesar::shift_letter(ch, 11, crate::alphabet::Mode::Encrypt))
            .collect();
        assert!(match_score(plain) > match_score(&shifted));
    }
}
