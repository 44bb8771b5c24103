use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount, TransferChecked};

use crate::errors::BlinkError;
use crate::events::RewardClaimed;
use crate::state::{RoundState, Submission};
use crate::utils::{load_record, locate_with_bump, store_record, Role};
use crate::Claim;

pub fn claim(ctx: Context<Claim>, index: u16) -> Result<()> {
    let round_key = ctx.accounts.round_state.key();
    let round: RoundState = load_record(&ctx.accounts.round_state.to_account_info())?;
    let submission_info = ctx.accounts.submission.to_account_info();
    let mut submission: Submission = load_record(&submission_info)?;

    require!(round.index == index, BlinkError::AddressMismatch);
    require_keys_eq!(
        submission.participant,
        ctx.accounts.participant.key(),
        BlinkError::Unauthorized
    );
    require_keys_eq!(
        round.token_mint,
        ctx.accounts.token_mint.key(),
        BlinkError::MintMismatch
    );

    // vault is only trusted once it matches the bump recorded at initialize
    let vault_role = Role::Vault {
        round_state: round_key,
        mint: round.token_mint,
    };
    let vault_address = locate_with_bump(&vault_role, round.vault_bump, ctx.program_id)?;
    let vault_info = ctx.accounts.vault.to_account_info();
    require_keys_eq!(vault_info.key(), vault_address, BlinkError::AddressMismatch);
    let vault: TokenAccount = load_record(&vault_info)?;
    require_keys_eq!(vault.mint, round.token_mint, BlinkError::MintMismatch);
    require_keys_eq!(
        vault.owner,
        ctx.accounts.authority.key(),
        BlinkError::Unauthorized
    );

    let reward = submission.claimable_reward(&round)?;
    require!(vault.amount >= reward, BlinkError::InsufficientFunds);

    // deposit smaller than the winner count: nothing to move, still consumes the claim
    if reward > 0 {
        let signer_seeds: &[&[&[u8]]] = &[&[crate::AUTH_SEED, &[ctx.bumps.authority]]];

        token::transfer_checked(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                TransferChecked {
                    from: vault_info,
                    mint: ctx.accounts.token_mint.to_account_info(),
                    to: ctx.accounts.participant_token.to_account_info(),
                    authority: ctx.accounts.authority.to_account_info(),
                },
                signer_seeds,
            ),
            reward,
            ctx.accounts.token_mint.decimals,
        )?;
    }

    submission.claimed = true;
    store_record(&submission_info, &submission)?;

    msg!(
        "blink: {} claimed {} from round {}",
        submission.participant,
        reward,
        index
    );
    emit!(RewardClaimed {
        index,
        participant: submission.participant,
        amount: reward,
    });

    Ok(())
}
