//! Error types for the ClassiCrypt library.

use std::fmt;

/// Errors produced by the ClassiCrypt library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassiCryptError {
    /// A parameter supplied by the caller is malformed or missing.
    IncorrectInput,
    /// A bruteforce search exhausted its key space without a match.
    KeysNotFound,
    /// The cipher key is outside the valid range for the operation.
    KeyOutOfRange,
    /// A Vigenère keyword contains characters other than letters.
    NonAlphabeticKey,
    /// The text is too short for the requested operation.
    TextTooShort,
    /// The English word list could not be loaded.
    DictionaryUnavailable(String),
}

impl ClassiCryptError {
    /// Returns the error label used in the key-value output contract.
    ///
    /// Search exhaustion maps to `keys_not_found`; every other failure is
    /// a malformed parameter and maps to `incorrect_input`.
    pub fn label(&self) -> &'static str {
        match self {
            ClassiCryptError::KeysNotFound => "keys_not_found",
            _ => "incorrect_input",
        }
    }
}

impl fmt::Display for ClassiCryptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassiCryptError::IncorrectInput => {
                write!(f, "Input parameter is malformed or missing")
            }
            ClassiCryptError::KeysNotFound => {
                write!(f, "No keys were found for the given ciphertext")
            }
            ClassiCryptError::KeyOutOfRange => {
                write!(f, "Key is outside the valid range for this cipher")
            }
            ClassiCryptError::NonAlphabeticKey => {
                write!(f, "Keyword must consist of letters only")
            }
            ClassiCryptError::TextTooShort => {
                write!(f, "Text is too short for this operation")
            }
            ClassiCryptError::DictionaryUnavailable(reason) => {
                write!(f, "English word list could not be loaded: {}", reason)
            }
        }
    }
}

impl std::error::Error for ClassiCryptError {}
