use anchor_lang::prelude::*;

#[error_code]
pub enum BlinkError {
    #[msg("Unauthorized")]
    Unauthorized,

    // -----------------
    // Record lifecycle
    // -----------------
    #[msg("Round already exists at this index")]
    AlreadyExists,
    #[msg("Record not found")]
    NotFound,

    // -----------------
    // Round lifecycle
    // -----------------
    #[msg("Round already closed")]
    AlreadyClosed,
    #[msg("Round not closed")]
    NotClosed,

    // -----------------
    // Time window
    // -----------------
    #[msg("Submission window has not elapsed")]
    WindowNotElapsed,
    #[msg("Submission window is closed or not open yet")]
    WindowClosedOrNotOpen,
    #[msg("Invalid window (duration must be > 0)")]
    InvalidWindow,
    #[msg("Window cannot open in the past")]
    InvalidOpenTime,

    // -----------------
    // Submissions / claims
    // -----------------
    #[msg("Invalid option")]
    InvalidOption,
    #[msg("Participant already submitted for this round")]
    DuplicateSubmission,
    #[msg("Already claimed")]
    AlreadyClaimed,
    #[msg("Submitted option is not the target answer")]
    WrongAnswer,
    #[msg("Insufficient funds")]
    InsufficientFunds,

    // -----------------
    // Input validation
    // -----------------
    #[msg("Deposit amount must be > 0")]
    InvalidAmount,
    #[msg("A round needs between 1 and 4 options")]
    InvalidOptionCount,
    #[msg("Question too long (max 200 bytes)")]
    QuestionTooLong,
    #[msg("Option too long (max 100 bytes)")]
    OptionTooLong,

    // -----------------
    // Addressing / plumbing
    // -----------------
    #[msg("Account does not match its derived address")]
    AddressMismatch,
    #[msg("Cannot allocate an address for these seeds")]
    AddressExhausted,
    #[msg("Token account mint does not match the round")]
    MintMismatch,
    #[msg("Failed to borrow account data")]
    AccountBorrowFailed,
    #[msg("Math overflow")]
    MathOverflow,
}

/// Custom error number carried by `err`, if it is one of ours.
#[cfg(test)]
pub(crate) fn error_code(err: &Error) -> Option<u32> {
    match err {
        Error::AnchorError(e) => Some(e.error_code_number),
        Error::ProgramError(_) => None,
    }
}

/// Asserts that `res` failed with exactly `expected`.
#[cfg(test)]
pub(crate) fn assert_blink_err<T: std::fmt::Debug>(res: Result<T>, expected: BlinkError) {
    let err = res.expect_err("operation should fail");
    assert_eq!(error_code(&err), Some(u32::from(expected)), "got {err:?}");
}
