//! ClassiCrypt: classical cipher engine with automated cryptanalysis.
//!
//! Implements the Caesar shift, columnar transposition and Vigenère
//! polyalphabetic ciphers together with the statistical machinery that
//! breaks them: letter-frequency analysis, English-likeness detection and
//! the Kasiski examination.
//!
//! # Architecture
//!
//! ```text
//! english / frequency / kasiski   (statistical primitives)
//!     ↕ consumed by
//! caesar, transposition           (translate + bruteforce attack)
//!     ↕ caesar shift primitive reused by
//! vigenere                        (translate + Kasiski-driven key search)
//!     ↕ dispatched through
//! registry                        (uniform translate / attack / manual)
//! ```
//!
//! Attacks report progress and ask their yes/no questions through the
//! [`AttackInteraction`] trait; the Vigenère search is additionally
//! exposed as the resumable [`VigenereAttack`] state machine, so no
//! algorithm ever blocks on a terminal by itself.
//!
//! # Examples
//!
//! Encrypt and decrypt with the Vigenère cipher:
//!
//! ```
//! use classicrypt::{vigenere, Mode};
//!
//! let ciphertext = vigenere::translate("Attack at dawn", "LEMON", Mode::Encrypt).unwrap();
//! let plaintext = vigenere::translate(&ciphertext, "LEMON", Mode::Decrypt).unwrap();
//! assert_eq!(plaintext, "Attack at dawn");
//! ```
//!
//! Bruteforce a Caesar ciphertext:
//!
//! ```
//! use classicrypt::{caesar, EnglishDetector, Mode, NullInteraction};
//!
//! let detector = EnglishDetector::new();
//! let ciphertext = caesar::translate("Meet me at the river", 9, Mode::Encrypt).unwrap();
//! let keys = caesar::attack(&ciphertext, &detector, &mut NullInteraction);
//! assert!(keys.contains(&9));
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod caesar;
pub mod english;
pub mod error;
pub mod frequency;
pub mod kasiski;
pub mod progress;
pub mod registry;
pub mod transposition;
pub mod vigenere;

pub use alphabet::Mode;
pub use english::EnglishDetector;
pub use error::ClassiCryptError;
pub use progress::{AttackEvent, AttackInteraction, Candidate, Decision, NullInteraction};
pub use registry::{Cipher, CipherKey, CipherKind, Operation, Request};
pub use vigenere::{AttackStep, Pause, VigenereAttack};
