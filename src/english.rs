//! English-likeness detection.
//!
//! Classifies candidate decryptions during bruteforce attacks by combining
//! two heuristics: the fraction of whitespace-delimited tokens found in an
//! English word list, and the fraction of characters that are letters or
//! whitespace. Both thresholds are expressed as whole percentages.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::ClassiCryptError;

/// Default minimum percentage of tokens that must be dictionary words.
pub const DEFAULT_WORD_PERCENTAGE: u32 = 20;

/// Default minimum percentage of characters that must be letters or spaces.
pub const DEFAULT_LETTER_PERCENTAGE: u32 = 85;

/// Word list compiled into the library.
const EMBEDDED_WORD_LIST: &str = include_str!("../data/english_words.txt");

/// Removes every character that is not an ASCII letter.
///
/// When `delete_spaces` is `false`, space, tab and newline characters
/// survive as token separators.
///
/// # Examples
///
/// ```
/// use classicrypt::english::remove_non_letters;
///
/// assert_eq!(remove_non_letters("He said: 42!", false), "He said ");
/// assert_eq!(remove_non_letters("He said: 42!", true), "Hesaid");
/// ```
pub fn remove_non_letters(text: &str, delete_spaces: bool) -> String {
    let mut letters = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii_alphabetic() || (!delete_spaces && matches!(ch, ' ' | '\t' | '\n')) {
            letters.push(ch);
        }
    }
    letters
}

/// English text classifier backed by a word list.
///
/// The word list is held uppercase; lookups are case-insensitive.
pub struct EnglishDetector {
    words: HashSet<String>,
}

impl EnglishDetector {
    /// Creates a detector from the word list compiled into the library.
    ///
    /// # Examples
    ///
    /// ```
    /// use classicrypt::EnglishDetector;
    ///
    /// let detector = EnglishDetector::new();
    /// assert!(detector.is_english("The quick brown fox jumps over the lazy dog."));
    /// assert!(!detector.is_english("Xfcou bypdt qwkzj mnvrl"));
    /// ```
    pub fn new() -> Self {
        Self::from_words(EMBEDDED_WORD_LIST.lines())
    }

    /// Creates a detector from a word list file (one word per line).
    ///
    /// # Errors
    /// Returns [`ClassiCryptError::DictionaryUnavailable`] if the file
    /// cannot be read. This is the only fatal-at-startup resource error;
    /// nothing else in the library touches the filesystem.
    pub fn from_file(path: &Path) -> Result<Self, ClassiCryptError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            ClassiCryptError::DictionaryUnavailable(format!("{}: {}", path.display(), err))
        })?;
        Ok(Self::from_words(contents.lines()))
    }

    /// Creates a detector from an iterator of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_ascii_uppercase())
            .filter(|word| !word.is_empty())
            .collect();
        EnglishDetector { words }
    }

    /// Returns the number of words in the list.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Returns whether a single word is in the list, ignoring case.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_ascii_uppercase())
    }

    /// Returns the fraction of tokens in `text` that are dictionary words.
    ///
    /// Non-letter characters are stripped before tokenizing, so `"don't"`
    /// is looked up as `DONT`. A text with no alphabetic tokens scores 0.
    pub fn word_probability(&self, text: &str) -> f64 {
        let stripped = remove_non_letters(&text.to_ascii_uppercase(), false);
        let mut tokens = 0usize;
        let mut matches = 0usize;
        for word in stripped.split_whitespace() {
            tokens += 1;
            if self.words.contains(word) {
                matches += 1;
            }
        }
        if tokens == 0 {
            0.0
        } else {
            matches as f64 / tokens as f64
        }
    }

    /// Classifies `text` with the default thresholds.
    pub fn is_english(&self, text: &str) -> bool {
        self.is_english_with(text, DEFAULT_WORD_PERCENTAGE, DEFAULT_LETTER_PERCENTAGE)
    }

    /// Classifies `text` with explicit thresholds.
    ///
    /// Returns `true` iff at least `word_percentage` percent of the tokens
    /// are dictionary words and at least `letter_percentage` percent of the
    /// characters are letters or whitespace. An empty text is never English.
    pub fn is_english_with(
        &self,
        text: &str,
        word_percentage: u32,
        letter_percentage: u32,
    ) -> bool {
        let total_chars = text.chars().count();
        if total_chars == 0 {
            return false;
        }
        let words_match = self.word_probability(text) * 100.0 >= word_percentage as f64;
        let letter_chars = remove_non_letters(text, false).chars().count();
        let letters_match =
            letter_chars as f64 / total_chars as f64 * 100.0 >= letter_percentage as f64;
        words_match && letters_match
    }
}

impl Default for EnglishDetector {
    fn default() -> Self {
        Self::new()
    }
}
