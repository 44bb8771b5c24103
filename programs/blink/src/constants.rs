// Centralized Protocol Constants

/// Anchor account discriminator prefix, added on top of `INIT_SPACE`.
pub const ANCHOR_DISCRIMINATOR: usize = 8;

// Round Text Limits
// =================

/// Maximum question length in bytes.
pub const MAX_QUESTION_LEN: usize = 200;

/// Maximum length of a single option label in bytes.
pub const MAX_OPTION_LEN: usize = 100;

// Options & Answers
// =================

/// A round offers between 1 and `MAX_OPTIONS` answers.
pub const MAX_OPTIONS: usize = 4;

/// Option ids are 1-based.
pub const FIRST_OPTION: u8 = 1;

/// `RoundState::target_answer` before the creator reveals it.
pub const UNSET_ANSWER: u8 = 0;
