// programs/blink/src/contexts.rs

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::ANCHOR_DISCRIMINATOR;
use crate::errors::BlinkError;
use crate::state::TimeWindow;

#[derive(Accounts)]
pub struct SetWindow<'info> {
    #[account(
        init_if_needed,
        payer = owner,
        space = ANCHOR_DISCRIMINATOR + TimeWindow::INIT_SPACE,
        seeds = [crate::TIME_SEED],
        bump
    )]
    pub time_window: Account<'info, TimeWindow>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    /// CHECK: program authority PDA, token authority of every round vault. Address enforced by seeds/bump.
    #[account(seeds = [crate::AUTH_SEED], bump)]
    pub authority: UncheckedAccount<'info>,

    /// CHECK: created in the handler so an existing round surfaces as AlreadyExists.
    /// Address checked against the derived location there.
    #[account(mut)]
    pub round_config: UncheckedAccount<'info>,

    /// CHECK: created in the handler, same as round_config.
    #[account(mut)]
    pub round_state: UncheckedAccount<'info>,

    pub token_mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = creator_token.mint == token_mint.key() @ BlinkError::MintMismatch,
        constraint = creator_token.owner == creator.key() @ BlinkError::Unauthorized
    )]
    pub creator_token: Account<'info, TokenAccount>,

    // per-round SPL vault; init_if_needed so a re-used index reaches the AlreadyExists check
    #[account(
        init_if_needed,
        payer = creator,
        seeds = [crate::BLINK_VAULT_SEED, round_state.key().as_ref(), token_mint.key().as_ref()],
        bump,
        token::mint = token_mint,
        token::authority = authority
    )]
    pub vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
#[instruction(index: u16)]
pub struct Submit<'info> {
    #[account(mut)]
    pub participant: Signer<'info>,

    #[account(
        seeds = [crate::TIME_SEED],
        bump = time_window.bump
    )]
    pub time_window: Account<'info, TimeWindow>,

    /// CHECK: loaded in the handler; a missing round reports NotFound.
    #[account(
        seeds = [crate::CONFIG_SEED, index.to_le_bytes().as_ref()],
        bump
    )]
    pub round_config: UncheckedAccount<'info>,

    /// CHECK: loaded and written back in the handler.
    #[account(
        mut,
        seeds = [crate::BLINK_SEED, index.to_le_bytes().as_ref()],
        bump
    )]
    pub round_state: UncheckedAccount<'info>,

    /// CHECK: created in the handler; an existing record reports DuplicateSubmission.
    #[account(mut)]
    pub submission: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(index: u16)]
pub struct Close<'info> {
    pub creator: Signer<'info>,

    #[account(
        seeds = [crate::TIME_SEED],
        bump = time_window.bump
    )]
    pub time_window: Account<'info, TimeWindow>,

    /// CHECK: loaded in the handler.
    #[account(
        seeds = [crate::CONFIG_SEED, index.to_le_bytes().as_ref()],
        bump
    )]
    pub round_config: UncheckedAccount<'info>,

    /// CHECK: loaded and written back in the handler.
    #[account(
        mut,
        seeds = [crate::BLINK_SEED, index.to_le_bytes().as_ref()],
        bump
    )]
    pub round_state: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(index: u16)]
pub struct Claim<'info> {
    #[account(mut)]
    pub participant: Signer<'info>,

    /// CHECK: loaded in the handler.
    #[account(
        seeds = [crate::BLINK_SEED, index.to_le_bytes().as_ref()],
        bump
    )]
    pub round_state: UncheckedAccount<'info>,

    /// CHECK: loaded and written back in the handler; seeds bind it to the signer.
    #[account(
        mut,
        seeds = [
            crate::SUBMIT_SEED,
            index.to_le_bytes().as_ref(),
            participant.key().as_ref(),
        ],
        bump
    )]
    pub submission: UncheckedAccount<'info>,

    /// CHECK: program authority PDA, signs vault transfers.
    #[account(seeds = [crate::AUTH_SEED], bump)]
    pub authority: UncheckedAccount<'info>,

    pub token_mint: Account<'info, Mint>,

    /// CHECK: loaded after the round, so a missing round reports NotFound rather than an
    /// uninitialized vault. Address re-derived from the round's stored vault bump.
    #[account(mut)]
    pub vault: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = participant_token.mint == token_mint.key() @ BlinkError::MintMismatch,
        constraint = participant_token.owner == participant.key() @ BlinkError::Unauthorized
    )]
    pub participant_token: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}
