use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

pub use constants::*;
pub use contexts::*;
pub use errors::*;
pub use events::*;
pub use instructions::*;
pub use state::*;
pub use utils::*;

declare_id!("BAFSUnhrUETfEd8AitHGBgPxBaNrAvXyq9x184HKLuYp");

#[program]
pub mod blink {
    use super::*;
    use crate::instructions::{admin, lifecycle, reward, submit as submission};

    // ----------------------------
    // Window admin
    // ----------------------------
    pub fn set_window(ctx: Context<SetWindow>, open_at: i64, duration: i64) -> Result<()> {
        admin::set_window(ctx, open_at, duration)
    }

    // ----------------------------
    // Round lifecycle
    // ----------------------------
    pub fn initialize(
        ctx: Context<Initialize>,
        index: u16,
        deposit_amount: u64,
        question: String,
        options: Vec<String>,
    ) -> Result<()> {
        lifecycle::initialize(ctx, index, deposit_amount, question, options)
    }

    pub fn submit(ctx: Context<Submit>, index: u16, chosen_option: u8) -> Result<()> {
        submission::submit(ctx, index, chosen_option)
    }

    pub fn close(ctx: Context<Close>, index: u16, target_answer: u8) -> Result<()> {
        lifecycle::close(ctx, index, target_answer)
    }

    pub fn claim(ctx: Context<Claim>, index: u16) -> Result<()> {
        reward::claim(ctx, index)
    }
}
