//! Cipher dispatch and the key-value output contract.
//!
//! Callers (the interactive shell lives outside this crate) select a
//! cipher with [`CipherKind`] and an [`Operation`], and receive their
//! results as ordered key-value fields. Failures are reported as an
//! `ERROR` field carrying `incorrect_input` or `keys_not_found`, never as
//! a panic. Every implementation exposes the same capability set through
//! the [`Cipher`] trait: translate, attack, manual.

use crate::alphabet::Mode;
use crate::caesar;
use crate::english::EnglishDetector;
use crate::error::ClassiCryptError;
use crate::progress::AttackInteraction;
use crate::transposition;
use crate::vigenere;

/// The cipher families implemented by the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherKind {
    Caesar,
    Transposition,
    Vigenere,
}

impl CipherKind {
    /// Resolves a cipher by its command name.
    pub fn from_name(name: &str) -> Option<CipherKind> {
        match name.to_ascii_lowercase().as_str() {
            "caesar" => Some(CipherKind::Caesar),
            "transposition" => Some(CipherKind::Transposition),
            "vigenere" => Some(CipherKind::Vigenere),
            _ => None,
        }
    }

    /// The command name of this cipher.
    pub fn name(self) -> &'static str {
        match self {
            CipherKind::Caesar => "caesar",
            CipherKind::Transposition => "transposition",
            CipherKind::Vigenere => "vigenere",
        }
    }
}

/// What the caller wants done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Encrypt,
    Decrypt,
    Attack,
    Manual,
}

/// A cipher key, tagged by the family it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CipherKey {
    /// Caesar shift in `[1, 25]`.
    Shift(u32),
    /// Transposition column count in `[2, len(text) - 1]`.
    Columns(usize),
    /// Vigenère keyword, letters only.
    Keyword(String),
}

impl CipherKey {
    fn label(&self) -> String {
        match self {
            CipherKey::Shift(shift) => shift.to_string(),
            CipherKey::Columns(columns) => columns.to_string(),
            CipherKey::Keyword(keyword) => keyword.clone(),
        }
    }
}

/// Validated input for one operation. Fields the operation does not use
/// may be left `None`; a missing required field is `incorrect_input`.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub text: Option<String>,
    pub key: Option<CipherKey>,
    pub max_key_length: Option<usize>,
}

/// Uniform capability set of every cipher implementation.
pub trait Cipher {
    /// Encrypts or decrypts `text` under `key`.
    fn translate(
        &self,
        text: &str,
        key: &CipherKey,
        mode: Mode,
    ) -> Result<String, ClassiCryptError>;

    /// Searches for keys that decrypt `ciphertext` to English.
    fn attack(
        &self,
        ciphertext: &str,
        max_key_length: Option<usize>,
        detector: &EnglishDetector,
        interaction: &mut dyn AttackInteraction,
    ) -> Result<Vec<String>, ClassiCryptError>;

    /// The cipher's manual page.
    fn manual(&self) -> &'static str;
}

struct CaesarCipher;

impl Cipher for CaesarCipher {
    fn translate(
        &self,
        text: &str,
        key: &CipherKey,
        mode: Mode,
    ) -> Result<String, ClassiCryptError> {
        match key {
            CipherKey::Shift(shift) => caesar::translate(text, *shift, mode),
            _ => Err(ClassiCryptError::IncorrectInput),
        }
    }

    fn attack(
        &self,
        ciphertext: &str,
        _max_key_length: Option<usize>,
        detector: &EnglishDetector,
        interaction: &mut dyn AttackInteraction,
    ) -> Result<Vec<String>, ClassiCryptError> {
        Ok(caesar::attack(ciphertext, detector, interaction)
            .into_iter()
            .map(|key| key.to_string())
            .collect())
    }

    fn manual(&self) -> &'static str {
        caesar::manual()
    }
}

struct TranspositionCipher;

impl Cipher for TranspositionCipher {
    fn translate(
        &self,
        text: &str,
        key: &CipherKey,
        mode: Mode,
    ) -> Result<String, ClassiCryptError> {
        match key {
            CipherKey::Columns(columns) => transposition::translate(text, *columns, mode),
            _ => Err(ClassiCryptError::IncorrectInput),
        }
    }

    fn attack(
        &self,
        ciphertext: &str,
        _max_key_length: Option<usize>,
        detector: &EnglishDetector,
        interaction: &mut dyn AttackInteraction,
    ) -> Result<Vec<String>, ClassiCryptError> {
        Ok(transposition::attack(ciphertext, detector, interaction)
            .into_iter()
            .map(|key| key.to_string())
            .collect())
    }

    fn manual(&self) -> &'static str {
        transposition::manual()
    }
}

struct VigenereCipher;

impl Cipher for VigenereCipher {
    fn translate(
        &self,
        text: &str,
        key: &CipherKey,
        mode: Mode,
    ) -> Result<String, ClassiCryptError> {
        match key {
            CipherKey::Keyword(keyword) => vigenere::translate(text, keyword, mode),
            _ => Err(ClassiCryptError::IncorrectInput),
        }
    }

    fn attack(
        &self,
        ciphertext: &str,
        max_key_length: Option<usize>,
        detector: &EnglishDetector,
        interaction: &mut dyn AttackInteraction,
    ) -> Result<Vec<String>, ClassiCryptError> {
        match max_key_length {
            Some(max_key_length) if max_key_length >= 2 => Ok(vigenere::attack(
                ciphertext,
                max_key_length,
                detector,
                interaction,
            )),
            _ => Err(ClassiCryptError::IncorrectInput),
        }
    }

    fn manual(&self) -> &'static str {
        vigenere::manual()
    }
}

/// Returns the implementation registered for a cipher kind.
pub fn implementation(kind: CipherKind) -> &'static dyn Cipher {
    match kind {
        CipherKind::Caesar => &CaesarCipher,
        CipherKind::Transposition => &TranspositionCipher,
        CipherKind::Vigenere => &VigenereCipher,
    }
}

/// Runs one operation and renders its key-value output.
///
/// `input` is the outcome of the caller's field acquisition: an `Err`
/// (for example a failed range check in the input layer) short-circuits
/// the whole operation into an `ERROR` field.
///
/// # Returns
/// Ordered fields with keys among `plaintext`, `ciphertext`, `key`,
/// `possible keys (<n>)`, `manual` and `ERROR`.
pub fn execute(
    kind: CipherKind,
    operation: Operation,
    input: Result<Request, ClassiCryptError>,
    detector: &EnglishDetector,
    interaction: &mut dyn AttackInteraction,
) -> Vec<(String, String)> {
    let cipher = implementation(kind);

    if operation == Operation::Manual {
        return vec![("manual".to_string(), cipher.manual().to_string())];
    }

    let request = match input {
        Ok(request) => request,
        Err(error) => return error_fields(&error),
    };
    let text = match request.text {
        Some(text) => text,
        None => return error_fields(&ClassiCryptError::IncorrectInput),
    };

    match operation {
        Operation::Encrypt | Operation::Decrypt => {
            let key = match request.key {
                Some(key) => key,
                None => return error_fields(&ClassiCryptError::IncorrectInput),
            };
            let mode = if operation == Operation::Encrypt {
                Mode::Encrypt
            } else {
                Mode::Decrypt
            };
            match cipher.translate(&text, &key, mode) {
                Ok(result) => {
                    let (plaintext, ciphertext) = match mode {
                        Mode::Encrypt => (text, result),
                        Mode::Decrypt => (result, text),
                    };
                    vec![
                        ("plaintext".to_string(), plaintext),
                        ("ciphertext".to_string(), ciphertext),
                        ("key".to_string(), key.label()),
                    ]
                }
                Err(error) => error_fields(&error),
            }
        }
        Operation::Attack => {
            match cipher.attack(&text, request.max_key_length, detector, interaction) {
                Ok(keys) if keys.is_empty() => error_fields(&ClassiCryptError::KeysNotFound),
                Ok(keys) => vec![(
                    format!("possible keys ({})", keys.len()),
                    keys.join(", "),
                )],
                Err(error) => error_fields(&error),
            }
        }
        Operation::Manual => unreachable!("handled above"),
    }
}

fn error_fields(error: &ClassiCryptError) -> Vec<(String, String)> {
    vec![("ERROR".to_string(), error.label().to_string())]
}
