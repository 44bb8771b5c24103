use anchor_lang::prelude::*;

#[event]
pub struct WindowUpdated {
    pub owner: Pubkey,
    pub open_at: i64,
    pub duration: i64,
}

#[event]
pub struct RoundInitialized {
    pub index: u16,
    pub creator: Pubkey,
    pub token_mint: Pubkey,
    pub vault: Pubkey,
    pub deposit_amount: u64,
    pub option_count: u8,
}

#[event]
pub struct AnswerSubmitted {
    pub index: u16,
    pub participant: Pubkey,
    pub chosen_option: u8,
    pub tally: [u64; 4],
}

#[event]
pub struct RoundClosed {
    pub index: u16,
    pub target_answer: u8,
    pub winners: u64,
    pub reward_per_winner: u64,
    pub dust: u64,
}

#[event]
pub struct RewardClaimed {
    pub index: u16,
    pub participant: Pubkey,
    pub amount: u64,
}
