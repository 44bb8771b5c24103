use anchor_lang::prelude::*;

use crate::events::WindowUpdated;
use crate::SetWindow;

pub fn set_window(ctx: Context<SetWindow>, open_at: i64, duration: i64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let window = &mut ctx.accounts.time_window;
    window.set(ctx.accounts.owner.key(), open_at, duration, now)?;
    window.bump = ctx.bumps.time_window;

    msg!(
        "blink: window [{}, {}) set by {}",
        window.open_at,
        window.close_at(),
        window.owner
    );
    emit!(WindowUpdated {
        owner: window.owner,
        open_at: window.open_at,
        duration: window.duration,
    });

    Ok(())
}
