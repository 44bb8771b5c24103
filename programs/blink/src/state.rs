use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::BlinkError;
use crate::utils::reward_share;

/// Global submission window shared by every round. Seeds: ["time_seed"]
#[account]
#[derive(InitSpace, Debug)]
pub struct TimeWindow {
    pub owner: Pubkey,
    pub open_at: i64,
    pub duration: i64,
    pub bump: u8,
}

impl TimeWindow {
    pub fn close_at(&self) -> i64 {
        self.open_at.saturating_add(self.duration)
    }

    /// `open_at <= now < open_at + duration`
    pub fn is_open(&self, now: i64) -> bool {
        self.open_at <= now && now < self.close_at()
    }

    pub fn has_elapsed(&self, now: i64) -> bool {
        now >= self.close_at()
    }

    /// Freshly created by `init_if_needed`, nobody owns it yet.
    pub fn is_unowned(&self) -> bool {
        self.owner == Pubkey::default()
    }

    /// The first caller becomes owner; afterwards only the owner may move the window.
    /// A window may not be scheduled to open before `now`.
    pub fn set(&mut self, caller: Pubkey, open_at: i64, duration: i64, now: i64) -> Result<()> {
        if !self.is_unowned() {
            require_keys_eq!(self.owner, caller, BlinkError::Unauthorized);
        }
        require!(duration > 0, BlinkError::InvalidWindow);
        require!(open_at >= now, BlinkError::InvalidOpenTime);

        if self.is_unowned() {
            self.owner = caller;
        }
        self.open_at = open_at;
        self.duration = duration;

        Ok(())
    }
}

/// Immutable round metadata. Seeds: ["config_seed", index]
#[account]
#[derive(InitSpace, Debug)]
pub struct RoundConfig {
    pub index: u16,
    pub creator: Pubkey,

    #[max_len(200)]
    pub question: String,

    #[max_len(4, 100)]
    pub options: Vec<String>,

    pub bump: u8,
}

impl RoundConfig {
    pub fn new(
        index: u16,
        creator: Pubkey,
        question: String,
        options: Vec<String>,
        bump: u8,
    ) -> Result<Self> {
        require!(question.len() <= MAX_QUESTION_LEN, BlinkError::QuestionTooLong);
        require!(
            !options.is_empty() && options.len() <= MAX_OPTIONS,
            BlinkError::InvalidOptionCount
        );
        require!(
            options.iter().all(|o| o.len() <= MAX_OPTION_LEN),
            BlinkError::OptionTooLong
        );

        Ok(Self {
            index,
            creator,
            question,
            options,
            bump,
        })
    }

    pub fn option_count(&self) -> u8 {
        self.options.len() as u8
    }

    pub fn is_valid_option(&self, option: u8) -> bool {
        (FIRST_OPTION..=self.option_count()).contains(&option)
    }
}

/// Mutable round state. Seeds: ["blink_seed", index]
#[account]
#[derive(InitSpace, Debug)]
pub struct RoundState {
    pub index: u16,
    pub creator: Pubkey,
    pub token_mint: Pubkey,

    pub deposit_amount: u64,

    // UNSET_ANSWER until close
    pub target_answer: u8,

    // submissions per option, slot 0 = option 1
    pub tally: [u64; 4],

    pub closed: bool,

    // only meaningful once closed
    pub reward_per_winner: u64,

    pub bump: u8,
    pub vault_bump: u8,
}

impl RoundState {
    pub fn new(
        index: u16,
        creator: Pubkey,
        token_mint: Pubkey,
        deposit_amount: u64,
        bump: u8,
        vault_bump: u8,
    ) -> Self {
        Self {
            index,
            creator,
            token_mint,
            deposit_amount,
            target_answer: UNSET_ANSWER,
            tally: [0; MAX_OPTIONS],
            closed: false,
            reward_per_winner: 0,
            bump,
            vault_bump,
        }
    }

    fn slot(option: u8) -> usize {
        (option - FIRST_OPTION) as usize
    }

    pub fn total_submissions(&self) -> u64 {
        self.tally.iter().fold(0u64, |acc, n| acc.saturating_add(*n))
    }

    /// Number of submissions matching the target answer; zero while open.
    pub fn winners(&self) -> u64 {
        if self.target_answer == UNSET_ANSWER {
            return 0;
        }
        self.tally[Self::slot(self.target_answer)]
    }

    /// Part of the deposit no winner can claim (division remainder, or all of it).
    pub fn dust(&self) -> u64 {
        let paid = self.reward_per_winner.saturating_mul(self.winners());
        self.deposit_amount.saturating_sub(paid)
    }

    /// Submit preconditions, in order: window, closed flag, option range.
    pub fn ensure_accepting(
        &self,
        window: &TimeWindow,
        config: &RoundConfig,
        option: u8,
        now: i64,
    ) -> Result<()> {
        require!(window.is_open(now), BlinkError::WindowClosedOrNotOpen);
        require!(!self.closed, BlinkError::AlreadyClosed);
        require!(config.is_valid_option(option), BlinkError::InvalidOption);
        Ok(())
    }

    pub fn record_submission(&mut self, option: u8) -> Result<()> {
        require!(
            (FIRST_OPTION..=MAX_OPTIONS as u8).contains(&option),
            BlinkError::InvalidOption
        );
        let count = &mut self.tally[Self::slot(option)];
        *count = count.checked_add(1).ok_or(BlinkError::MathOverflow)?;
        Ok(())
    }

    /// Reveals the target answer and fixes the per-winner reward. Returns that reward.
    pub fn close(
        &mut self,
        window: &TimeWindow,
        config: &RoundConfig,
        caller: &Pubkey,
        target_answer: u8,
        now: i64,
    ) -> Result<u64> {
        require!(!self.closed, BlinkError::AlreadyClosed);
        require!(window.has_elapsed(now), BlinkError::WindowNotElapsed);
        require_keys_eq!(self.creator, *caller, BlinkError::Unauthorized);
        require!(config.is_valid_option(target_answer), BlinkError::InvalidOption);

        let winners = self.tally[Self::slot(target_answer)];
        let reward = reward_share(self.deposit_amount, winners);

        self.target_answer = target_answer;
        self.closed = true;
        self.reward_per_winner = reward;

        Ok(reward)
    }
}

/// One answer per (round, participant). Seeds: ["submit_seed", index, participant]
#[account]
#[derive(InitSpace, Debug)]
pub struct Submission {
    pub index: u16,
    pub participant: Pubkey,
    pub chosen_option: u8,
    pub claimed: bool,
    pub bump: u8,
}

impl Submission {
    pub fn new(index: u16, participant: Pubkey, chosen_option: u8, bump: u8) -> Self {
        Self {
            index,
            participant,
            chosen_option,
            claimed: false,
            bump,
        }
    }

    /// Claim preconditions; returns the amount owed. Does not mutate.
    pub fn claimable_reward(&self, round: &RoundState) -> Result<u64> {
        require!(self.index == round.index, BlinkError::AddressMismatch);
        require!(round.closed, BlinkError::NotClosed);
        require!(
            self.chosen_option == round.target_answer,
            BlinkError::WrongAnswer
        );
        require!(!self.claimed, BlinkError::AlreadyClaimed);
        Ok(round.reward_per_winner)
    }
}
