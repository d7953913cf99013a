//! The Caesar cipher: fixed-shift substitution and bruteforce attack.
//!
//! [`shift_letter`] is the atomic translation unit of the crate; the
//! Vigenère cipher applies it per character with a cycling shift.

use tracing::debug;

use crate::alphabet::{letter_at, letter_index, Mode, ALPHABET_LEN};
use crate::english::EnglishDetector;
use crate::error::ClassiCryptError;
use crate::progress::{AttackEvent, AttackInteraction};

/// Smallest meaningful shift. A shift of 0 leaves the text unchanged.
pub const MIN_KEY: u32 = 1;

/// Largest meaningful shift.
pub const MAX_KEY: u32 = 25;

/// Shifts a single character, preserving its case.
///
/// Letters move `shift` positions forward (`Encrypt`) or backward
/// (`Decrypt`) through the alphabet, wrapping modulo 26. Any other
/// character is returned unchanged.
pub fn shift_letter(ch: char, shift: u32, mode: Mode) -> char {
    match letter_index(ch) {
        Some(index) => {
            let shift = shift % ALPHABET_LEN;
            let shifted = match mode {
                Mode::Encrypt => (index + shift) % ALPHABET_LEN,
                Mode::Decrypt => (index + ALPHABET_LEN - shift) % ALPHABET_LEN,
            };
            let letter = letter_at(shifted);
            if ch.is_ascii_lowercase() {
                letter.to_ascii_lowercase()
            } else {
                letter
            }
        }
        None => ch,
    }
}

/// Translates `text` with the given shift.
///
/// # Parameters
/// - `text`: The plaintext or ciphertext.
/// - `key`: The shift, between 1 and 25.
/// - `mode`: Direction of translation.
///
/// # Errors
/// Returns [`ClassiCryptError::KeyOutOfRange`] if `key` is outside
/// `[1, 25]`.
///
/// # Examples
///
/// ```
/// use classicrypt::{caesar, Mode};
///
/// assert_eq!(caesar::translate("ABC", 2, Mode::Encrypt).unwrap(), "CDE");
/// assert_eq!(caesar::translate("XYZ", 2, Mode::Encrypt).unwrap(), "ZAB");
/// assert!(caesar::translate("ABC", 26, Mode::Encrypt).is_err());
/// ```
pub fn translate(text: &str, key: u32, mode: Mode) -> Result<String, ClassiCryptError> {
    if !(MIN_KEY..=MAX_KEY).contains(&key) {
        return Err(ClassiCryptError::KeyOutOfRange);
    }
    Ok(shift_text(text, key, mode))
}

/// Shifts every character of `text` without validating the shift.
pub(crate) fn shift_text(text: &str, shift: u32, mode: Mode) -> String {
    text.chars().map(|ch| shift_letter(ch, shift, mode)).collect()
}

/// Bruteforces a Caesar ciphertext.
///
/// Tries every shift in `[1, 25]`, classifies each decryption with the
/// default thresholds and reports every trial through `interaction` as an
/// [`AttackEvent::KeyTried`] carrying the decrypted preview.
///
/// # Returns
/// The shifts whose decryption reads as English, in ascending order.
/// An empty result means the search space is exhausted and the caller
/// reports `keys_not_found`.
pub fn attack(
    ciphertext: &str,
    detector: &EnglishDetector,
    interaction: &mut dyn AttackInteraction,
) -> Vec<u32> {
    let mut possible_keys = Vec::new();
    for key in MIN_KEY..=MAX_KEY {
        let decrypted = shift_text(ciphertext, key, Mode::Decrypt);
        let matched = detector.is_english(&decrypted);
        debug!(key, matched, "caesar shift tried");
        let key_label = key.to_string();
        interaction.on_event(AttackEvent::KeyTried {
            key: &key_label,
            decrypted: &decrypted,
            matched,
        });
        if matched {
            possible_keys.push(key);
        }
    }
    possible_keys
}

/// Returns the Caesar cipher manual page.
pub fn manual() -> &'static str {
    MANUAL
}

const MANUAL: &str = "\
CAESAR CIPHER MANUAL.

The Caesar cipher is one of the oldest and most popular ciphers in the
history of mankind. Julius Caesar used this cipher to communicate with
his generals. It is the simplest substitution cipher: each letter of a
plaintext is shifted by some number called a shift. This shift (key) is
an integer between 0 and 26 for English, which is the length of the
alphabet.

The mathematical model of the Caesar cipher:
    C[i] = (P[i] + K) mod N
    P[i] = (C[i] - K) mod N
where C is a ciphertext, P is a plaintext, K is a shift and N is the
length of the alphabet (26 for English). The cipher works on the indexes
of letters in the alphabet: when ABC encrypts with the key 2, we compute
0 + 2, 1 + 2, 2 + 2, since A -> 0, B -> 1, C -> 2. Getting 2, 3, 4,
convert this back to the text: CDE.

Cryptanalysis.
The Caesar cipher is easy to hack. You can use frequency cryptanalysis,
but it is faster to use a simple bruteforce attack: because of the small
key range (26 for English) it is really fast.";
