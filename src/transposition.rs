//! The columnar transposition cipher.
//!
//! Encryption reorders characters into `key` columns read off in order;
//! a trailing `|` sentinel keeps end-of-message whitespace visible in the
//! ciphertext. Decryption rebuilds the grid, skipping the shaded boxes of
//! the last column when the message length is not a multiple of the key.

use tracing::debug;

use crate::alphabet::Mode;
use crate::english::{EnglishDetector, DEFAULT_LETTER_PERCENTAGE};
use crate::error::ClassiCryptError;
use crate::progress::{AttackEvent, AttackInteraction};

/// Smallest meaningful key: one column is no transposition at all.
pub const MIN_KEY: usize = 2;

/// Marks the end of the ciphertext so trailing spaces survive transport.
pub const SENTINEL: char = '|';

/// Word-match threshold used by [`attack`]. Transposition leaves letter
/// frequencies untouched, so the classifier needs a stronger word signal
/// than the default to tell a correct decryption from a near miss.
pub const ATTACK_WORD_PERCENTAGE: u32 = 60;

/// Translates `text` with the given number of columns.
///
/// # Parameters
/// - `text`: The plaintext or ciphertext. A decrypt input may carry the
///   trailing [`SENTINEL`] produced by encryption.
/// - `key`: The column count, between 2 and `len(text) - 1`.
/// - `mode`: Direction of translation.
///
/// # Errors
/// Returns [`ClassiCryptError::TextTooShort`] for texts with no valid key
/// range, or [`ClassiCryptError::KeyOutOfRange`] if `key` falls outside it.
///
/// # Examples
///
/// ```
/// use classicrypt::{transposition, Mode};
///
/// let ciphertext = transposition::translate("HELLOWORLD", 3, Mode::Encrypt).unwrap();
/// assert_eq!(ciphertext, "HLODEORLWL|");
/// let plaintext = transposition::translate(&ciphertext, 3, Mode::Decrypt).unwrap();
/// assert_eq!(plaintext, "HELLOWORLD");
/// ```
pub fn translate(text: &str, key: usize, mode: Mode) -> Result<String, ClassiCryptError> {
    match mode {
        Mode::Encrypt => encrypt(text, key),
        Mode::Decrypt => decrypt(text, key),
    }
}

fn validate_key(key: usize, text_len: usize) -> Result<(), ClassiCryptError> {
    if text_len < 3 {
        return Err(ClassiCryptError::TextTooShort);
    }
    if !(MIN_KEY..=text_len - 1).contains(&key) {
        return Err(ClassiCryptError::KeyOutOfRange);
    }
    Ok(())
}

fn encrypt(text: &str, key: usize) -> Result<String, ClassiCryptError> {
    let chars: Vec<char> = text.chars().collect();
    validate_key(key, chars.len())?;

    let mut columns = vec![String::new(); key];
    for (index, &ch) in chars.iter().enumerate() {
        columns[index % key].push(ch);
    }

    let mut result = columns.concat();
    result.push(SENTINEL);
    Ok(result)
}

fn decrypt(text: &str, key: usize) -> Result<String, ClassiCryptError> {
    let mut chars: Vec<char> = text.chars().collect();
    if chars.last() == Some(&SENTINEL) {
        chars.pop();
    }
    validate_key(key, chars.len())?;

    let num_columns = chars.len().div_ceil(key);
    let num_rows = key;
    let num_shaded_boxes = num_columns * num_rows - chars.len();

    // Fill the grid row-major, skipping the shaded boxes at the bottom of
    // the rightmost column, then read it back column-major.
    let mut grid = vec![String::new(); num_columns];
    let mut column = 0;
    let mut row = 0;
    for ch in chars {
        grid[column].push(ch);
        column += 1;
        if column == num_columns
            || (column == num_columns - 1 && row >= num_rows - num_shaded_boxes)
        {
            column = 0;
            row += 1;
        }
    }

    Ok(grid.concat())
}

/// Bruteforces a transposition ciphertext.
///
/// Tries every key in `[2, len - 1]` and classifies each decryption with
/// the raised word threshold of [`ATTACK_WORD_PERCENTAGE`]. Every trial is
/// reported through `interaction` as an [`AttackEvent::KeyTried`].
///
/// # Returns
/// The matching keys in ascending order; empty when the whole range fails
/// classification.
pub fn attack(
    ciphertext: &str,
    detector: &EnglishDetector,
    interaction: &mut dyn AttackInteraction,
) -> Vec<usize> {
    let length = ciphertext.chars().count();
    let mut possible_keys = Vec::new();
    for key in MIN_KEY..length {
        let decrypted = match decrypt(ciphertext, key) {
            Ok(decrypted) => decrypted,
            Err(_) => continue,
        };
        let matched =
            detector.is_english_with(&decrypted, ATTACK_WORD_PERCENTAGE, DEFAULT_LETTER_PERCENTAGE);
        debug!(key, matched, "transposition key tried");
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

/// Returns the transposition cipher manual page.
pub fn manual() -> &'static str {
    MANUAL
}

const MANUAL: &str = "\
TRANSPOSITION CIPHER MANUAL.

The transposition cipher is a cryptosystem which performs a permutation
of the characters of a plaintext. It simply reorders the chars, changing
their positions.

Encryption.
1. Set a key which is greater than 1 and less than the length of the
   message.
2. Build a table: divide the length of the message by the key and round
   up to get the number of rows; the number of columns equals the key.
3. Fill the plaintext into the boxes from left to right, row by row.
4. Cross out the unused boxes at the end of the last row.
5. Read the ciphertext from the top left going down each column,
   skipping the crossed-out boxes.

Decryption.
1. Knowing the key, build the table with the numbers of rows and columns
   swapped relative to encryption.
2. The number of boxes to cross out is (columns * rows) minus the length
   of the ciphertext; cross them out at the bottom of the rightmost
   column.
3. Fill the ciphertext into the boxes from left to right, row by row,
   skipping the crossed-out boxes.
4. Read the plaintext down each column.

A note on the trailing bar. Encryption appends a | so that space
characters at the end of a ciphertext stay visible. The bar is not part
of the ciphertext: leave it untouched when decrypting and the decryption
routine removes it by itself.

Cryptanalysis.
The number of possible keys is bounded by the message length, so a
bruteforce attack over every key between 2 and length - 1 is practical.";
