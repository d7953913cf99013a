//! The Vigenère cipher: polyalphabetic substitution and its cryptanalysis.
//!
//! Translation applies a cycling series of Caesar shifts taken from the
//! keyword. The attack combines three stages:
//!
//! ```text
//! kasiski     rank candidate key lengths from repeat distances
//!     ↓
//! frequency   top-4 candidate letters per key position
//!     ↓
//! search      Cartesian product of the candidates, classified by the
//!             English detector (at most 4^length trial keys)
//! ```
//!
//! The search is an explicit state machine, [`VigenereAttack`]: it pauses
//! when a candidate key is found and when the ranked key lengths are
//! exhausted, and resumes on the caller's [`Decision`]. The blocking
//! [`attack`] wrapper answers those pauses through an
//! [`AttackInteraction`], which restores the original interactive flow.

use std::cmp::Reverse;

use tracing::{debug, info};

use crate::alphabet::{letter_index, Mode, ALPHABET};
use crate::caesar::shift_letter;
use crate::english::{remove_non_letters, EnglishDetector};
use crate::error::ClassiCryptError;
use crate::frequency::match_score;
use crate::kasiski::{self, MIN_KEY_LENGTH};
use crate::progress::{AttackEvent, AttackInteraction, Candidate, Decision};

/// Candidate letters kept per key position during an attack.
pub const CANDIDATES_PER_POSITION: usize = 4;

/// Translates `text` with an alphabetic keyword.
///
/// Each alphabetic character is shifted by the next key letter; the key
/// cycles over alphabetic characters only, so punctuation and spaces pass
/// through without consuming a key position.
///
/// # Errors
/// Returns [`ClassiCryptError::NonAlphabeticKey`] if `key` is empty or
/// contains a character that is not an ASCII letter.
///
/// # Examples
///
/// ```
/// use classicrypt::{vigenere, Mode};
///
/// let ciphertext = vigenere::translate("ATTACKATDAWN", "LEMON", Mode::Encrypt).unwrap();
/// assert_eq!(ciphertext, "LXFOPVEFRNHR");
/// let plaintext = vigenere::translate(&ciphertext, "LEMON", Mode::Decrypt).unwrap();
/// assert_eq!(plaintext, "ATTACKATDAWN");
/// ```
pub fn translate(text: &str, key: &str, mode: Mode) -> Result<String, ClassiCryptError> {
    if key.is_empty() || !key.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(ClassiCryptError::NonAlphabeticKey);
    }
    let shifts: Vec<u32> = key.chars().filter_map(letter_index).collect();

    let mut key_cursor = 0;
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii_alphabetic() {
            result.push(shift_letter(ch, shifts[key_cursor], mode));
            key_cursor = (key_cursor + 1) % shifts.len();
        } else {
            result.push(ch);
        }
    }
    Ok(result)
}

/// Extracts the letter subgroup enciphered by one position of the key.
///
/// `start_index` is 1-based: position 1 collects the 1st, `1 + length`th,
/// `1 + 2 * length`th... letters of the letters-only ciphertext. Each
/// subgroup is a plain Caesar ciphertext under its key letter. A zero
/// `key_length` yields an empty subgroup.
pub fn subkey_letters(start_index: usize, key_length: usize, ciphertext: &str) -> String {
    if key_length == 0 {
        return String::new();
    }
    let letters = remove_non_letters(ciphertext, true);
    letters
        .chars()
        .skip(start_index.saturating_sub(1))
        .step_by(key_length)
        .collect()
}

/// Maps the casing pattern of `original` onto `decrypted`.
fn restore_case(original: &str, decrypted: &str) -> String {
    original
        .chars()
        .zip(decrypted.chars())
        .map(|(reference, ch)| {
            if reference.is_ascii_uppercase() {
                ch.to_ascii_uppercase()
            } else {
                ch.to_ascii_lowercase()
            }
        })
        .collect()
}

/// Ranks the candidate letters for every position of a key of the given
/// length: each subgroup is decrypted under all 26 single-letter keys and
/// the decryptions are scored against the English letter frequencies.
fn candidate_letters(ciphertext_upper: &str, key_length: usize) -> Vec<Vec<char>> {
    let mut all_positions = Vec::with_capacity(key_length);
    for position in 1..=key_length {
        let letters = subkey_letters(position, key_length, ciphertext_upper);

        let mut scores: Vec<(char, u32)> = Vec::with_capacity(ALPHABET.len());
        for (index, letter) in ALPHABET.chars().enumerate() {
            let decrypted: String = letters
                .chars()
                .map(|ch| shift_letter(ch, index as u32, Mode::Decrypt))
                .collect();
            scores.push((letter, match_score(&decrypted)));
        }
        // Stable sort: equal scores keep alphabetical order.
        scores.sort_by_key(|&(_, score)| Reverse(score));

        all_positions.push(
            scores
                .into_iter()
                .take(CANDIDATES_PER_POSITION)
                .map(|(letter, _)| letter)
                .collect(),
        );
    }
    all_positions
}

/// Odometer over the candidate indexes of every key position, in the same
/// order as a nested loop with the last position cycling fastest.
struct KeyCombinations {
    indexes: Vec<usize>,
    base: usize,
    fresh: bool,
    exhausted: bool,
}

impl KeyCombinations {
    fn new(length: usize, base: usize) -> Self {
        KeyCombinations {
            indexes: vec![0; length],
            base,
            fresh: true,
            exhausted: false,
        }
    }

    fn advance(&mut self) -> Option<Vec<usize>> {
        if self.exhausted {
            return None;
        }
        if self.fresh {
            self.fresh = false;
            return Some(self.indexes.clone());
        }
        let mut position = self.indexes.len();
        loop {
            if position == 0 {
                self.exhausted = true;
                return None;
            }
            position -= 1;
            self.indexes[position] += 1;
            if self.indexes[position] < self.base {
                break;
            }
            self.indexes[position] = 0;
        }
        Some(self.indexes.clone())
    }
}

/// One key length being searched: the ranked candidate letters and the
/// position of the search within the combination space.
struct LengthTrial {
    candidates: Vec<Vec<char>>,
    combinations: KeyCombinations,
}

/// Where the state machine currently stands.
enum Phase {
    /// Kasiski ranking has not run yet.
    Start,
    /// Working through the ranked key lengths; `next` indexes the one to
    /// try after the current trial is exhausted.
    Ranked { next: usize },
    /// Working through the exhaustive fallback range.
    Fallback { next_length: usize },
    /// The attack finished.
    Done,
}

/// A question the state machine is waiting on.
enum Waiting {
    Continue { candidate: Candidate },
    Fallback,
}

/// Outcome of driving the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttackStep {
    /// The attack needs a [`Decision`] before it can go on.
    Paused(Pause),
    /// The attack is over; zero or one recovered keys.
    Finished(Vec<String>),
}

/// The two questions an attack can pause on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pause {
    /// A trial key decrypted to English. `No` accepts it and ends the
    /// attack; `Yes` keeps searching this key length.
    CandidateFound(Candidate),
    /// Every ranked key length failed. `Yes` searches all remaining
    /// lengths up to the maximum; `No` gives up.
    ExhaustiveFallback,
}

/// Resumable Vigenère attack.
///
/// Construct with [`VigenereAttack::new`], then call
/// [`run`](VigenereAttack::run) and answer every
/// [`AttackStep::Paused`] with [`resume`](VigenereAttack::resume) until
/// the machine reports [`AttackStep::Finished`]. The maximum key length
/// is fixed per attack; there is no ambient configuration.
pub struct VigenereAttack {
    ciphertext: String,
    ciphertext_upper: String,
    max_key_length: usize,
    ranked: Vec<usize>,
    attempt_counter: usize,
    trial: Option<LengthTrial>,
    phase: Phase,
    waiting: Option<Waiting>,
    outcome: Vec<String>,
}

enum TrialStep {
    Candidate(Candidate),
    Exhausted,
}

impl VigenereAttack {
    /// Prepares an attack on `ciphertext` with key lengths bounded by
    /// `max_key_length`.
    pub fn new(ciphertext: &str, max_key_length: usize) -> Self {
        VigenereAttack {
            ciphertext: ciphertext.to_string(),
            ciphertext_upper: ciphertext.to_ascii_uppercase(),
            max_key_length,
            ranked: Vec::new(),
            attempt_counter: 0,
            trial: None,
            phase: Phase::Start,
            waiting: None,
            outcome: Vec::new(),
        }
    }

    /// Drives the attack until it pauses or finishes.
    ///
    /// Calling `run` while a question is pending repeats the pause without
    /// advancing the search.
    pub fn run(
        &mut self,
        detector: &EnglishDetector,
        interaction: &mut dyn AttackInteraction,
    ) -> AttackStep {
        match &self.waiting {
            Some(Waiting::Continue { candidate }) => {
                AttackStep::Paused(Pause::CandidateFound(candidate.clone()))
            }
            Some(Waiting::Fallback) => AttackStep::Paused(Pause::ExhaustiveFallback),
            None => self.drive(detector, interaction),
        }
    }

    /// Answers the pending question and drives the attack onward.
    ///
    /// Without a pending question the decision is ignored and the attack
    /// simply continues.
    pub fn resume(
        &mut self,
        decision: Decision,
        detector: &EnglishDetector,
        interaction: &mut dyn AttackInteraction,
    ) -> AttackStep {
        match self.waiting.take() {
            Some(Waiting::Continue { candidate }) => {
                if decision == Decision::No {
                    self.phase = Phase::Done;
                    self.trial = None;
                    self.outcome = vec![candidate.key];
                    return AttackStep::Finished(self.outcome.clone());
                }
                self.drive(detector, interaction)
            }
            Some(Waiting::Fallback) => {
                if decision == Decision::No {
                    self.phase = Phase::Done;
                    return AttackStep::Finished(Vec::new());
                }
                self.phase = Phase::Fallback {
                    next_length: MIN_KEY_LENGTH,
                };
                self.drive(detector, interaction)
            }
            None => self.drive(detector, interaction),
        }
    }

    fn drive(
        &mut self,
        detector: &EnglishDetector,
        interaction: &mut dyn AttackInteraction,
    ) -> AttackStep {
        loop {
            match self.phase {
                Phase::Start => {
                    self.ranked = kasiski::rank_key_lengths(&self.ciphertext, self.max_key_length);
                    info!(lengths = ?self.ranked, "kasiski examination finished");
                    interaction.on_event(AttackEvent::KeyLengthsRanked {
                        lengths: &self.ranked,
                    });
                    self.phase = Phase::Ranked { next: 0 };
                }
                Phase::Ranked { next } => {
                    if self.trial.is_none() {
                        if next >= self.ranked.len() {
                            self.waiting = Some(Waiting::Fallback);
                            return AttackStep::Paused(Pause::ExhaustiveFallback);
                        }
                        let key_length = self.ranked[next];
                        self.phase = Phase::Ranked { next: next + 1 };
                        self.begin_trial(key_length, interaction);
                    }
                    match self.step_trial(detector, interaction) {
                        TrialStep::Candidate(candidate) => {
                            self.waiting = Some(Waiting::Continue {
                                candidate: candidate.clone(),
                            });
                            return AttackStep::Paused(Pause::CandidateFound(candidate));
                        }
                        TrialStep::Exhausted => {
                            self.trial = None;
                        }
                    }
                }
                Phase::Fallback { next_length } => {
                    if self.trial.is_none() {
                        let mut length = next_length;
                        while length <= self.max_key_length && self.ranked.contains(&length) {
                            length += 1;
                        }
                        if length > self.max_key_length {
                            self.phase = Phase::Done;
                            return AttackStep::Finished(Vec::new());
                        }
                        self.phase = Phase::Fallback {
                            next_length: length + 1,
                        };
                        self.begin_trial(length, interaction);
                    }
                    match self.step_trial(detector, interaction) {
                        TrialStep::Candidate(candidate) => {
                            self.waiting = Some(Waiting::Continue {
                                candidate: candidate.clone(),
                            });
                            return AttackStep::Paused(Pause::CandidateFound(candidate));
                        }
                        TrialStep::Exhausted => {
                            self.trial = None;
                        }
                    }
                }
                Phase::Done => {
                    return AttackStep::Finished(self.outcome.clone());
                }
            }
        }
    }

    /// Sets up the candidate-letter table and combination odometer for one
    /// key length.
    fn begin_trial(&mut self, key_length: usize, interaction: &mut dyn AttackInteraction) {
        self.attempt_counter += 1;
        info!(
            attempt = self.attempt_counter,
            key_length, "starting vigenere attempt"
        );
        interaction.on_event(AttackEvent::AttemptStarted {
            attempt: self.attempt_counter,
            key_length,
        });

        let candidates = candidate_letters(&self.ciphertext_upper, key_length);
        for (index, letters) in candidates.iter().enumerate() {
            interaction.on_event(AttackEvent::CandidateLetters {
                position: index + 1,
                letters,
            });
        }

        self.trial = Some(LengthTrial {
            candidates,
            combinations: KeyCombinations::new(key_length, CANDIDATES_PER_POSITION),
        });
    }

    /// Advances the current trial until a candidate is found or its
    /// combination space runs out.
    fn step_trial(
        &mut self,
        detector: &EnglishDetector,
        interaction: &mut dyn AttackInteraction,
    ) -> TrialStep {
        let trial = match self.trial.as_mut() {
            Some(trial) => trial,
            None => return TrialStep::Exhausted,
        };

        while let Some(indexes) = trial.combinations.advance() {
            let key: String = indexes
                .iter()
                .enumerate()
                .map(|(position, &index)| trial.candidates[position][index])
                .collect();
            debug!(%key, "vigenere trial key");
            interaction.on_event(AttackEvent::KeyAttempted { key: &key });

            let decrypted = match translate(&self.ciphertext_upper, &key, Mode::Decrypt) {
                Ok(decrypted) => decrypted,
                Err(_) => continue,
            };
            if detector.is_english(&decrypted) {
                let plaintext = restore_case(&self.ciphertext, &decrypted);
                return TrialStep::Candidate(Candidate { key, plaintext });
            }
        }
        TrialStep::Exhausted
    }
}

/// Attacks `ciphertext`, answering the state machine's pauses through
/// `interaction`.
///
/// # Parameters
/// - `ciphertext`: The text to attack.
/// - `max_key_length`: Upper bound on the key lengths tried. Must be
///   threaded in by the caller; the library keeps no ambient maximum.
/// - `detector`: English classifier for trial decryptions.
/// - `interaction`: Progress sink and decision source.
///
/// # Returns
/// The recovered keys; empty means `keys_not_found` after both the ranked
/// phase and, if the caller opted in, the exhaustive fallback.
pub fn attack(
    ciphertext: &str,
    max_key_length: usize,
    detector: &EnglishDetector,
    interaction: &mut dyn AttackInteraction,
) -> Vec<String> {
    let mut machine = VigenereAttack::new(ciphertext, max_key_length);
    let mut step = machine.run(detector, interaction);
    loop {
        match step {
            AttackStep::Finished(keys) => return keys,
            AttackStep::Paused(Pause::CandidateFound(candidate)) => {
                let decision = interaction.continue_cryptanalysis(&candidate);
                step = machine.resume(decision, detector, interaction);
            }
            AttackStep::Paused(Pause::ExhaustiveFallback) => {
                let decision = interaction.start_exhaustive_search();
                step = machine.resume(decision, detector, interaction);
            }
        }
    }
}

/// Returns the Vigenère cipher manual page.
pub fn manual() -> &'static str {
    MANUAL
}

const MANUAL: &str = "\
VIGENERE CIPHER MANUAL.

The Vigenere cipher is a polyalphabetic cryptosystem. The cipher uses a
series of Caesar ciphers obtained from a chosen key. Although it was
first invented by Giovan Battista Bellaso in 1553, the cipher was
misattributed to Blaise de Vigenere in the 19th century.

The mathematical model is the same as the Caesar cipher's, applied per
key letter:
    C[i] = (P[i] + K[i]) mod N
    P[i] = (C[i] - K[i]) mod N
where C is a ciphertext, P is a plaintext, K is the key repeated over
the message and N is the length of the alphabet (26 for English). The
keyword must consist only of letters.

Cryptanalysis.
Frequency analysis alone cannot break the cipher, because it mixes
several monoalphabetic ciphers. The attack instead uses the Kasiski
examination, first published by Friedrich Kasiski in 1863 (discovered,
but not published, by Charles Babbage in 1846):
1. Find repeated sequences of 3 or more characters in the ciphertext
   and the distances between their occurrences. The key letters can
   line up in the same way with the same words, so those distances tend
   to be multiples of the keyword length.
2. Rank the common factors of the distances: these are the likely key
   lengths.
3. For each likely length, split the ciphertext into that many groups
   of letters; each group is a plain Caesar cipher. Rank each group's
   candidate key letters by frequency analysis, and test combinations
   of the best candidates against an English detector.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullInteraction;

    #[test]
    fn test_translate_known_vector() {
        let ciphertext = translate("ATTACKATDAWN", "LEMON", Mode::Encrypt).unwrap();
        assert_eq!(ciphertext, "LXFOPVEFRNHR");
    }

    #[test]
    fn test_translate_preserves_case_and_skips_non_letters() {
        let ciphertext = translate("Attack at dawn!", "LeMoN", Mode::Encrypt).unwrap();
        assert_eq!(ciphertext, "Lxfopv ef rnhr!");
        let plaintext = translate(&ciphertext, "lemon", Mode::Decrypt).unwrap();
        assert_eq!(plaintext, "Attack at dawn!");
    }

    #[test]
    fn test_translate_rejects_bad_keys() {
        assert_eq!(
            translate("ABC", "", Mode::Encrypt),
            Err(ClassiCryptError::NonAlphabeticKey)
        );
        assert_eq!(
            translate("ABC", "K3Y", Mode::Encrypt),
            Err(ClassiCryptError::NonAlphabeticKey)
        );
    }

    #[test]
    fn test_roundtrip_with_punctuation() {
        let text = "The map is not the territory, but you cannot fold a territory.";
        let ciphertext = translate(text, "cipher", Mode::Encrypt).unwrap();
        let plaintext = translate(&ciphertext, "cipher", Mode::Decrypt).unwrap();
        assert_eq!(plaintext, text);
    }

    #[test]
    fn test_subkey_letters_cyclic_extraction() {
        // Letters-only text "ABCDEFGH", length 3: position 1 takes A, D, G.
        assert_eq!(subkey_letters(1, 3, "AB CD-EF GH"), "ADG");
        assert_eq!(subkey_letters(2, 3, "AB CD-EF GH"), "BEH");
        assert_eq!(subkey_letters(3, 3, "AB CD-EF GH"), "CF");
    }

    #[test]
    fn test_restore_case_pattern() {
        assert_eq!(restore_case("AbC dEf", "xyz qrs"), "XyZ qRs");
    }

    #[test]
    fn test_key_combinations_order_and_count() {
        let mut combinations = KeyCombinations::new(2, 3);
        let mut seen = Vec::new();
        while let Some(indexes) = combinations.advance() {
            seen.push(indexes);
        }
        assert_eq!(seen.len(), 9);
        assert_eq!(seen[0], vec![0, 0]);
        assert_eq!(seen[1], vec![0, 1]);
        assert_eq!(seen[3], vec![1, 0]);
        assert_eq!(seen[8], vec![2, 2]);
    }

    #[test]
    fn test_attack_gives_up_without_fallback_consent() {
        let detector = EnglishDetector::new();
        // Repeats rank a key length, but nothing decrypts to English and
        // NullInteraction declines the exhaustive fallback.
        let keys = attack("XYZXYZ", 5, &detector, &mut NullInteraction);
        assert!(keys.is_empty());
    }

    #[test]
    fn test_machine_repeats_pause_until_answered() {
        let detector = EnglishDetector::new();
        let mut machine = VigenereAttack::new("QQQQQQQQ", 3);
        let first = machine.run(&detector, &mut NullInteraction);
        assert_eq!(first, AttackStep::Paused(Pause::ExhaustiveFallback));
        let second = machine.run(&detector, &mut NullInteraction);
        assert_eq!(second, AttackStep::Paused(Pause::ExhaustiveFallback));
        let finished = machine.resume(Decision::No, &detector, &mut NullInteraction);
        assert_eq!(finished, AttackStep::Finished(Vec::new()));
    }

    #[test]
    fn test_manual_is_not_empty() {
        assert!(manual().contains("VIGENERE CIPHER MANUAL"));
    }
}
