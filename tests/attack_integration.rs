//! End-to-end attacks against texts enciphered by this crate.
//!
//! The Vigenère cases run the full pipeline: Kasiski examination, per
//! position frequency ranking and the combination search, driven both
//! through the blocking wrapper and through the raw state machine.

use classicrypt::progress::{AttackEvent, AttackInteraction, Candidate, Decision};
use classicrypt::vigenere::{AttackStep, Pause, VigenereAttack};
use classicrypt::{caesar, kasiski, transposition, vigenere, EnglishDetector, Mode, NullInteraction};

/// Long enough to give every Vigenère subgroup a solid letter
/// distribution, with plenty of repeated words for the Kasiski step.
const PASSAGE: &str = "The house stood at the end of the road and the garden \
behind it ran down to the river. In the morning the light came over the \
water and the birds began to sing in the trees. The old man walked along \
the path to the gate and looked out at the fields. He could see the smoke \
rise from the farm across the valley and hear the sound of the wind in the \
leaves. Every day he took the same walk down the road past the church and \
over the bridge and every day he stopped to watch the river run under the \
stones. The children from the village came to play near the mill in the \
afternoon and their voices carried far over the quiet land.";

/// Answers the attack's questions like a patient operator: accept the
/// first candidate, opt into the exhaustive fallback, remember everything
/// seen on the way.
struct RecordingInteraction {
    events: usize,
    ranked_lengths: Vec<usize>,
    candidates: Vec<Candidate>,
}

impl RecordingInteraction {
    fn new() -> Self {
        RecordingInteraction {
            events: 0,
            ranked_lengths: Vec::new(),
            candidates: Vec::new(),
        }
    }
}

impl AttackInteraction for RecordingInteraction {
    fn on_event(&mut self, event: AttackEvent<'_>) {
        self.events += 1;
        if let AttackEvent::KeyLengthsRanked { lengths } = event {
            self.ranked_lengths = lengths.to_vec();
        }
    }

    fn continue_cryptanalysis(&mut self, candidate: &Candidate) -> Decision {
        self.candidates.push(candidate.clone());
        Decision::No
    }

    fn start_exhaustive_search(&mut self) -> Decision {
        Decision::Yes
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Caesar
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn caesar_attack_recovers_boundary_keys() {
    let detector = EnglishDetector::new();
    for key in [1, 12, 25] {
        let ciphertext =
            caesar::translate("The quick brown fox jumps over the lazy dog", key, Mode::Encrypt)
                .unwrap();
        let keys = caesar::attack(&ciphertext, &detector, &mut NullInteraction);
        assert!(keys.contains(&key), "key {} not recovered", key);
    }
}

#[test]
fn caesar_attack_emits_one_event_per_key() {
    struct TrialCounter(usize);
    impl AttackInteraction for TrialCounter {
        fn on_event(&mut self, event: AttackEvent<'_>) {
            if matches!(event, AttackEvent::KeyTried { .. }) {
                self.0 += 1;
            }
        }
    }

    let detector = EnglishDetector::new();
    let mut counter = TrialCounter(0);
    caesar::attack("Uryyb gurer", &detector, &mut counter);
    assert_eq!(counter.0, 25);
}

// ═══════════════════════════════════════════════════════════════════════
// Transposition
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn transposition_attack_recovers_key() {
    let detector = EnglishDetector::new();
    let text = "the old man sat by the door and read his book";
    for key in [2, 7, 13] {
        let ciphertext = transposition::translate(text, key, Mode::Encrypt).unwrap();
        let keys = transposition::attack(&ciphertext, &detector, &mut NullInteraction);
        assert!(keys.contains(&key), "key {} not recovered", key);
    }
}

#[test]
fn transposition_attack_rejects_noise() {
    let detector = EnglishDetector::new();
    let keys = transposition::attack("zzqzzqzzqzzqzzq", &detector, &mut NullInteraction);
    assert!(keys.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════
// Kasiski examination
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn kasiski_ranks_true_key_length_near_top() {
    let ciphertext = vigenere::translate(PASSAGE, "CAT", Mode::Encrypt).unwrap();
    let ranked = kasiski::rank_key_lengths(&ciphertext, 6);
    assert!(
        ranked.iter().take(3).any(|&length| length == 3),
        "length 3 not in top candidates: {:?}",
        ranked
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Vigenère attack
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn vigenere_attack_recovers_keyword() {
    let detector = EnglishDetector::new();
    let ciphertext = vigenere::translate(PASSAGE, "CAT", Mode::Encrypt).unwrap();
    let mut interaction = RecordingInteraction::new();
    let keys = vigenere::attack(&ciphertext, 6, &detector, &mut interaction);
    assert_eq!(keys, vec!["CAT".to_string()]);
    assert!(!interaction.ranked_lengths.is_empty());
    assert!(interaction.events > 0);
}

#[test]
fn vigenere_attack_candidate_restores_casing() {
    let detector = EnglishDetector::new();
    let ciphertext = vigenere::translate(PASSAGE, "CAT", Mode::Encrypt).unwrap();
    let mut interaction = RecordingInteraction::new();
    let keys = vigenere::attack(&ciphertext, 6, &detector, &mut interaction);
    assert_eq!(keys.len(), 1);
    // The accepted candidate carries the ciphertext's casing pattern,
    // which is the plaintext's own casing: decryption restores the text.
    assert_eq!(interaction.candidates.last().map(|c| c.plaintext.as_str()), Some(PASSAGE));
}

#[test]
fn vigenere_attack_gives_up_when_fallback_declined() {
    let detector = EnglishDetector::new();
    // Repeats rank candidate lengths, but nothing decrypts to English.
    let keys = vigenere::attack("XYZXYZXYZQQJ", 4, &detector, &mut NullInteraction);
    assert!(keys.is_empty());
}

#[test]
fn vigenere_state_machine_pause_and_resume() {
    let detector = EnglishDetector::new();
    let ciphertext = vigenere::translate(PASSAGE, "CAT", Mode::Encrypt).unwrap();
    let mut machine = VigenereAttack::new(&ciphertext, 6);
    let mut observer = NullInteraction;

    let mut step = machine.run(&detector, &mut observer);
    let mut pauses = 0;
    let finished = loop {
        match step {
            AttackStep::Finished(keys) => break keys,
            AttackStep::Paused(Pause::CandidateFound(_)) => {
                pauses += 1;
                step = machine.resume(Decision::No, &detector, &mut observer);
            }
            AttackStep::Paused(Pause::ExhaustiveFallback) => {
                pauses += 1;
                step = machine.resume(Decision::Yes, &detector, &mut observer);
            }
        }
        assert!(pauses < 64, "state machine failed to settle");
    };
    assert_eq!(finished, vec!["CAT".to_string()]);
}

#[test]
fn vigenere_state_machine_continue_keeps_searching() {
    let detector = EnglishDetector::new();
    let ciphertext = vigenere::translate(PASSAGE, "CAT", Mode::Encrypt).unwrap();
    let mut machine = VigenereAttack::new(&ciphertext, 6);
    let mut observer = NullInteraction;

    let mut step = machine.run(&detector, &mut observer);
    let mut first_candidate: Option<Candidate> = None;
    let finished = loop {
        match step {
            AttackStep::Finished(keys) => break keys,
            AttackStep::Paused(Pause::CandidateFound(candidate)) => {
                let decision = if first_candidate.is_none() {
                    // Ask the machine to keep searching once, then accept.
                    first_candidate = Some(candidate);
                    Decision::Yes
                } else {
                    Decision::No
                };
                step = machine.resume(decision, &detector, &mut observer);
            }
            AttackStep::Paused(Pause::ExhaustiveFallback) => {
                step = machine.resume(Decision::Yes, &detector, &mut observer);
            }
        }
    };
    assert!(first_candidate.is_some());
    // Continuing past the first candidate must not loop forever; whatever
    // the machine settles on afterwards is zero or one keys.
    assert!(finished.len() <= 1);
}
