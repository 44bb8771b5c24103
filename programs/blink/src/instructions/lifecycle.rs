use anchor_lang::prelude::*;
use anchor_spl::token::{self, TransferChecked};

use crate::errors::BlinkError;
use crate::events::{RoundClosed, RoundInitialized};
use crate::state::{RoundConfig, RoundState, TimeWindow};
use crate::utils::{create_record, is_vacant, load_record, store_record, try_locate, Role};
use crate::{Close, Initialize};

pub fn initialize(
    ctx: Context<Initialize>,
    index: u16,
    deposit_amount: u64,
    question: String,
    options: Vec<String>,
) -> Result<()> {
    require!(deposit_amount > 0, BlinkError::InvalidAmount);

    let program_id = ctx.program_id;
    let creator = ctx.accounts.creator.key();

    let config_role = Role::RoundConfig { index };
    let state_role = Role::RoundState { index };
    let (config_address, config_bump) = try_locate(&config_role, program_id)?;
    let (state_address, state_bump) = try_locate(&state_role, program_id)?;
    require_keys_eq!(
        ctx.accounts.round_config.key(),
        config_address,
        BlinkError::AddressMismatch
    );
    require_keys_eq!(
        ctx.accounts.round_state.key(),
        state_address,
        BlinkError::AddressMismatch
    );

    let config = RoundConfig::new(index, creator, question, options, config_bump)?;

    let config_info = ctx.accounts.round_config.to_account_info();
    let state_info = ctx.accounts.round_state.to_account_info();
    require!(
        is_vacant(&config_info, program_id) && is_vacant(&state_info, program_id),
        BlinkError::AlreadyExists
    );

    require!(
        ctx.accounts.creator_token.amount >= deposit_amount,
        BlinkError::InsufficientFunds
    );

    let round = RoundState::new(
        index,
        creator,
        ctx.accounts.token_mint.key(),
        deposit_amount,
        state_bump,
        ctx.bumps.vault,
    );

    let payer = ctx.accounts.creator.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    create_record(
        &config_info,
        &payer,
        &system_program,
        program_id,
        &config_role,
        config_bump,
        &config,
        BlinkError::AlreadyExists,
    )?;
    create_record(
        &state_info,
        &payer,
        &system_program,
        program_id,
        &state_role,
        state_bump,
        &round,
        BlinkError::AlreadyExists,
    )?;

    token::transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.creator_token.to_account_info(),
                mint: ctx.accounts.token_mint.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: payer,
            },
        ),
        deposit_amount,
        ctx.accounts.token_mint.decimals,
    )?;

    msg!(
        "blink: round {} opened by {} with {} options, deposit {}",
        index,
        creator,
        config.option_count(),
        deposit_amount
    );
    emit!(RoundInitialized {
        index,
        creator,
        token_mint: round.token_mint,
        vault: ctx.accounts.vault.key(),
        deposit_amount,
        option_count: config.option_count(),
    });

    Ok(())
}

pub fn close(ctx: Context<Close>, index: u16, target_answer: u8) -> Result<()> {
    let state_info = ctx.accounts.round_state.to_account_info();
    let mut round: RoundState = load_record(&state_info)?;
    let config: RoundConfig = load_record(&ctx.accounts.round_config.to_account_info())?;
    require!(
        round.index == index && config.index == index,
        BlinkError::AddressMismatch
    );

    let window: &TimeWindow = &ctx.accounts.time_window;
    let now = Clock::get()?.unix_timestamp;
    let reward = round.close(
        window,
        &config,
        &ctx.accounts.creator.key(),
        target_answer,
        now,
    )?;

    store_record(&state_info, &round)?;

    msg!(
        "blink: round {} closed, answer {}, {} winner(s) at {}",
        index,
        target_answer,
        round.winners(),
        reward
    );
    emit!(RoundClosed {
        index,
        target_answer,
        winners: round.winners(),
        reward_per_winner: reward,
        dust: round.dust(),
    });

    Ok(())
}
