//! Caller-interaction surface for the attacks.
//!
//! Attacks report incremental progress through [`AttackEvent`] values and
//! ask their yes/no questions through the [`AttackInteraction`] trait, so
//! the search algorithms never touch an input stream or a terminal
//! themselves. A non-interactive caller can pass [`NullInteraction`]: it
//! drops events, accepts the first candidate and skips the exhaustive
//! fallback.

/// A yes/no answer to an attack question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Yes,
    No,
}

/// A trial key whose decryption classified as English.
///
/// `plaintext` carries the ciphertext's original casing pattern so an
/// interactive caller can show the candidate the way the message was
/// typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub key: String,
    pub plaintext: String,
}

/// Incremental progress reported by the attacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackEvent<'a> {
    /// A bruteforce trial finished, with its decrypted preview.
    KeyTried {
        key: &'a str,
        decrypted: &'a str,
        matched: bool,
    },
    /// Kasiski examination produced its candidate key lengths.
    KeyLengthsRanked { lengths: &'a [usize] },
    /// A per-length Vigenère attempt began.
    AttemptStarted { attempt: usize, key_length: usize },
    /// The top-ranked letters for one position of the key (1-based).
    CandidateLetters { position: usize, letters: &'a [char] },
    /// A full trial key was assembled and is being tested.
    KeyAttempted { key: &'a str },
}

/// Receives attack progress and answers the attack's questions.
pub trait AttackInteraction {
    /// Called once per progress event. The default drops the event.
    fn on_event(&mut self, _event: AttackEvent<'_>) {}

    /// A candidate key was found: keep searching the remaining
    /// combinations of this key length? Answering `No` accepts the key and
    /// ends the attack. The default accepts the first candidate.
    fn continue_cryptanalysis(&mut self, _candidate: &Candidate) -> Decision {
        Decision::No
    }

    /// All ranked key lengths failed: fall back to an exhaustive search
    /// over every remaining length? The default declines.
    fn start_exhaustive_search(&mut self) -> Decision {
        Decision::No
    }
}

/// Interaction that never watches progress and declines every question.
pub struct NullInteraction;

impl AttackInteraction for NullInteraction {}
