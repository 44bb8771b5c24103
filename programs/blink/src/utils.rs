use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};
use anchor_lang::{Owner, Space};

use crate::constants::ANCHOR_DISCRIMINATOR;
use crate::errors::BlinkError;

// -----------------
// Seeds
// -----------------
pub const AUTH_SEED: &[u8] = b"auth_seed";
pub const TIME_SEED: &[u8] = b"time_seed";
pub const CONFIG_SEED: &[u8] = b"config_seed";
pub const BLINK_SEED: &[u8] = b"blink_seed";
pub const SUBMIT_SEED: &[u8] = b"submit_seed";
pub const BLINK_VAULT_SEED: &[u8] = b"blink_vault_seed";

// -------------------------
// Address derivation
// -------------------------

/// Every record the program owns or controls, with the seeds that locate it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Authority,
    TimeWindow,
    RoundConfig { index: u16 },
    RoundState { index: u16 },
    Submission { index: u16, participant: Pubkey },
    Vault { round_state: Pubkey, mint: Pubkey },
}

impl Role {
    pub fn tag(&self) -> &'static [u8] {
        match self {
            Role::Authority => AUTH_SEED,
            Role::TimeWindow => TIME_SEED,
            Role::RoundConfig { .. } => CONFIG_SEED,
            Role::RoundState { .. } => BLINK_SEED,
            Role::Submission { .. } => SUBMIT_SEED,
            Role::Vault { .. } => BLINK_VAULT_SEED,
        }
    }

    /// Seeds in derivation order, tag first. Round indices are u16 LE.
    pub fn seeds(&self) -> Vec<Vec<u8>> {
        let mut seeds = vec![self.tag().to_vec()];
        match self {
            Role::Authority | Role::TimeWindow => {}
            Role::RoundConfig { index } | Role::RoundState { index } => {
                seeds.push(index.to_le_bytes().to_vec());
            }
            Role::Submission { index, participant } => {
                seeds.push(index.to_le_bytes().to_vec());
                seeds.push(participant.to_bytes().to_vec());
            }
            Role::Vault { round_state, mint } => {
                seeds.push(round_state.to_bytes().to_vec());
                seeds.push(mint.to_bytes().to_vec());
            }
        }
        seeds
    }
}

/// Derives the record address and bump for `role`.
/// Fails only when no bump yields an off-curve address; not retryable.
pub fn try_locate(role: &Role, program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    let seeds = role.seeds();
    let seed_refs: Vec<&[u8]> = seeds.iter().map(Vec::as_slice).collect();
    Pubkey::try_find_program_address(&seed_refs, program_id)
        .ok_or_else(|| error!(BlinkError::AddressExhausted))
}

/// Re-derives the address for `role` from a bump stored in a record.
/// A bump that does not produce the canonical address is `AddressMismatch`.
pub fn locate_with_bump(role: &Role, bump: u8, program_id: &Pubkey) -> Result<Pubkey> {
    let mut seeds = role.seeds();
    seeds.push(vec![bump]);
    let seed_refs: Vec<&[u8]> = seeds.iter().map(Vec::as_slice).collect();
    Pubkey::create_program_address(&seed_refs, program_id)
        .map_err(|_| error!(BlinkError::AddressMismatch))
}

/// Off-chain convenience over `try_locate` for the default program id.
pub fn locate(role: &Role) -> Result<Pubkey> {
    try_locate(role, &crate::ID).map(|(address, _)| address)
}

pub fn authority_address() -> Result<Pubkey> {
    locate(&Role::Authority)
}

pub fn time_window_address() -> Result<Pubkey> {
    locate(&Role::TimeWindow)
}

pub fn round_config_address(index: u16) -> Result<Pubkey> {
    locate(&Role::RoundConfig { index })
}

pub fn round_state_address(index: u16) -> Result<Pubkey> {
    locate(&Role::RoundState { index })
}

pub fn submission_address(index: u16, participant: &Pubkey) -> Result<Pubkey> {
    locate(&Role::Submission {
        index,
        participant: *participant,
    })
}

pub fn vault_address(index: u16, mint: &Pubkey) -> Result<Pubkey> {
    locate(&Role::Vault {
        round_state: round_state_address(index)?,
        mint: *mint,
    })
}

// -------------------------
// Reward math
// -------------------------

/// Even split of `deposit` across `winners`, remainder stays in the vault.
/// No winners means no share rather than an error.
pub fn reward_share(deposit: u64, winners: u64) -> u64 {
    deposit.checked_div(winners).unwrap_or(0)
}

// -------------------------
// Record plumbing
// -------------------------

/// True while nothing has been written at this address by the program.
pub fn is_vacant(record: &AccountInfo, program_id: &Pubkey) -> bool {
    record.owner != program_id && record.data_is_empty()
}

/// Deserializes a program record; a missing or foreign account is `NotFound`.
pub fn load_record<T: AccountDeserialize + Owner>(record: &AccountInfo) -> Result<T> {
    require!(
        record.owner == &T::owner() && !record.data_is_empty(),
        BlinkError::NotFound
    );
    let data = record
        .try_borrow_data()
        .map_err(|_| error!(BlinkError::AccountBorrowFailed))?;
    let mut slice: &[u8] = &data;
    T::try_deserialize(&mut slice)
}

pub fn store_record<T: AccountSerialize>(record: &AccountInfo, value: &T) -> Result<()> {
    let mut data = record
        .try_borrow_mut_data()
        .map_err(|_| error!(BlinkError::AccountBorrowFailed))?;
    let mut w = std::io::Cursor::new(&mut data[..]);
    value.try_serialize(&mut w)
}

/// Creates the PDA for `role` and writes `value` into it.
/// The address being taken already is reported as `exists`, so the creation
/// itself is the uniqueness check.
#[allow(clippy::too_many_arguments)]
pub fn create_record<'info, T: AccountSerialize + Space>(
    record: &AccountInfo<'info>,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    program_id: &Pubkey,
    role: &Role,
    bump: u8,
    value: &T,
    exists: BlinkError,
) -> Result<()> {
    if !is_vacant(record, program_id) {
        return Err(exists.into());
    }

    let space = ANCHOR_DISCRIMINATOR + T::INIT_SPACE;
    let lamports = Rent::get()?.minimum_balance(space);

    let mut seeds = role.seeds();
    seeds.push(vec![bump]);
    let seed_refs: Vec<&[u8]> = seeds.iter().map(Vec::as_slice).collect();
    let signer: &[&[&[u8]]] = &[seed_refs.as_slice()];

    let current = record.lamports();
    if current == 0 {
        system_program::create_account(
            CpiContext::new_with_signer(
                system_program.clone(),
                CreateAccount {
                    from: payer.clone(),
                    to: record.clone(),
                },
                signer,
            ),
            lamports,
            space as u64,
            program_id,
        )?;
    } else {
        // someone pre-funded the address; top up, then allocate + assign
        let top_up = lamports.saturating_sub(current);
        if top_up > 0 {
            system_program::transfer(
                CpiContext::new(
                    system_program.clone(),
                    Transfer {
                        from: payer.clone(),
                        to: record.clone(),
                    },
                ),
                top_up,
            )?;
        }
        system_program::allocate(
            CpiContext::new_with_signer(
                system_program.clone(),
                Allocate {
                    account_to_allocate: record.clone(),
                },
                signer,
            ),
            space as u64,
        )?;
        system_program::assign(
            CpiContext::new_with_signer(
                system_program.clone(),
                Assign {
                    account_to_assign: record.clone(),
                },
                signer,
            ),
            program_id,
        )?;
    }

    store_record(record, value)
}
