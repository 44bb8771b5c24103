use anchor_lang::prelude::*;

use crate::errors::BlinkError;
use crate::events::AnswerSubmitted;
use crate::state::{RoundConfig, RoundState, Submission};
use crate::utils::{create_record, load_record, store_record, try_locate, Role};
use crate::Submit;

pub fn submit(ctx: Context<Submit>, index: u16, chosen_option: u8) -> Result<()> {
    let program_id = ctx.program_id;
    let participant = ctx.accounts.participant.key();

    let state_info = ctx.accounts.round_state.to_account_info();
    let mut round: RoundState = load_record(&state_info)?;
    let config: RoundConfig = load_record(&ctx.accounts.round_config.to_account_info())?;

    let now = Clock::get()?.unix_timestamp;
    round.ensure_accepting(&ctx.accounts.time_window, &config, chosen_option, now)?;

    let role = Role::Submission { index, participant };
    let (address, bump) = try_locate(&role, program_id)?;
    let submission_info = ctx.accounts.submission.to_account_info();
    require_keys_eq!(submission_info.key(), address, BlinkError::AddressMismatch);

    // the record's existence is the one-answer-per-participant guard
    create_record(
        &submission_info,
        &ctx.accounts.participant.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
        program_id,
        &role,
        bump,
        &Submission::new(index, participant, chosen_option, bump),
        BlinkError::DuplicateSubmission,
    )?;

    round.record_submission(chosen_option)?;
    store_record(&state_info, &round)?;

    emit!(AnswerSubmitted {
        index,
        participant,
        chosen_option,
        tally: round.tally,
    });

    Ok(())
}
