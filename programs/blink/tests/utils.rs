// Test utilities for the blink program

#![allow(dead_code)]

use std::path::PathBuf;

use anchor_lang::{AccountDeserialize, InstructionData};
use blink::BlinkError;
use litesvm::types::TransactionResult;
use litesvm::LiteSVM;
use litesvm_token::{CreateAssociatedTokenAccount, CreateMint, MintTo};
use solana_sdk::{
    clock::Clock,
    instruction::{AccountMeta, Instruction},
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use solana_system_interface::program::ID as SYSTEM_PROGRAM_ID;

// Program ID matching declare_id!
pub const PROGRAM_ID: Pubkey = Pubkey::new_from_array(blink::ID.to_bytes());
pub const TOKEN_PROGRAM_ID: Pubkey = Pubkey::new_from_array(anchor_spl::token::ID.to_bytes());
pub const RENT_SYSVAR_ID: Pubkey =
    Pubkey::new_from_array(anchor_lang::solana_program::sysvar::rent::ID.to_bytes());

pub const DECIMALS: u8 = 6;

// Clock layout used by every test: window opens a minute after setup
pub const START: i64 = 1_700_000_000;
pub const OPEN_AT: i64 = START + 60;
pub const DURATION: i64 = 300;
pub const CLOSE_AT: i64 = OPEN_AT + DURATION;

// Compiled program: $SBF_OUT_DIR/blink.so, else <workspace>/target/deploy/blink.so
fn program_path() -> PathBuf {
    let dir = std::env::var("SBF_OUT_DIR").map(PathBuf::from).unwrap_or_else(|_| {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/deploy")
    });
    dir.join("blink.so")
}

pub fn setup_svm() -> LiteSVM {
    let mut svm = LiteSVM::new();
    let path = program_path();
    svm.add_program_from_file(PROGRAM_ID, &path)
        .unwrap_or_else(|e| panic!("cannot load {} ({e:?}); run `anchor build` first", path.display()));
    set_time(&mut svm, START);
    svm
}

pub fn set_time(svm: &mut LiteSVM, unix_timestamp: i64) {
    let mut clock = svm.get_sysvar::<Clock>();
    clock.unix_timestamp = unix_timestamp;
    svm.set_sysvar::<Clock>(&clock);
}

pub fn create_funded_account(svm: &mut LiteSVM, lamports: u64) -> Keypair {
    let keypair = Keypair::new();
    svm.airdrop(&keypair.pubkey(), lamports)
        .expect("Airdrop should succeed");
    keypair
}

// -----------------
// Addresses
// -----------------

fn pda(seeds: &[&[u8]]) -> Pubkey {
    Pubkey::find_program_address(seeds, &PROGRAM_ID).0
}

pub fn authority() -> Pubkey {
    pda(&[blink::AUTH_SEED])
}

pub fn time_window() -> Pubkey {
    pda(&[blink::TIME_SEED])
}

pub fn round_config(index: u16) -> Pubkey {
    pda(&[blink::CONFIG_SEED, &index.to_le_bytes()])
}

pub fn round_state(index: u16) -> Pubkey {
    pda(&[blink::BLINK_SEED, &index.to_le_bytes()])
}

pub fn submission(index: u16, participant: &Pubkey) -> Pubkey {
    pda(&[blink::SUBMIT_SEED, &index.to_le_bytes(), participant.as_ref()])
}

pub fn vault(index: u16, mint: &Pubkey) -> Pubkey {
    pda(&[blink::BLINK_VAULT_SEED, round_state(index).as_ref(), mint.as_ref()])
}

// -----------------
// Instructions
// -----------------

fn blink_ix(accounts: Vec<AccountMeta>, args: impl InstructionData) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts,
        data: args.data(),
    }
}

pub fn build_set_window_ix(owner: &Pubkey, open_at: i64, duration: i64) -> Instruction {
    blink_ix(
        vec![
            AccountMeta::new(time_window(), false),
            AccountMeta::new(*owner, true),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        blink::instruction::SetWindow { open_at, duration },
    )
}

pub fn build_initialize_ix(
    creator: &Pubkey,
    mint: &Pubkey,
    creator_token: &Pubkey,
    index: u16,
    deposit_amount: u64,
    question: &str,
    options: &[&str],
) -> Instruction {
    blink_ix(
        vec![
            AccountMeta::new(*creator, true),
            AccountMeta::new_readonly(authority(), false),
            AccountMeta::new(round_config(index), false),
            AccountMeta::new(round_state(index), false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(*creator_token, false),
            AccountMeta::new(vault(index, mint), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
        ],
        blink::instruction::Initialize {
            index,
            deposit_amount,
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        },
    )
}

pub fn build_submit_ix(participant: &Pubkey, index: u16, chosen_option: u8) -> Instruction {
    blink_ix(
        vec![
            AccountMeta::new(*participant, true),
            AccountMeta::new_readonly(time_window(), false),
            AccountMeta::new_readonly(round_config(index), false),
            AccountMeta::new(round_state(index), false),
            AccountMeta::new(submission(index, participant), false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        blink::instruction::Submit {
            index,
            chosen_option,
        },
    )
}

pub fn build_close_ix(creator: &Pubkey, index: u16, target_answer: u8) -> Instruction {
    blink_ix(
        vec![
            AccountMeta::new_readonly(*creator, true),
            AccountMeta::new_readonly(time_window(), false),
            AccountMeta::new_readonly(round_config(index), false),
            AccountMeta::new(round_state(index), false),
        ],
        blink::instruction::Close {
            index,
            target_answer,
        },
    )
}

pub fn build_claim_ix(
    participant: &Pubkey,
    mint: &Pubkey,
    participant_token: &Pubkey,
    index: u16,
) -> Instruction {
    blink_ix(
        vec![
            AccountMeta::new(*participant, true),
            AccountMeta::new_readonly(round_state(index), false),
            AccountMeta::new(submission(index, participant), false),
            AccountMeta::new_readonly(authority(), false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(vault(index, mint), false),
            AccountMeta::new(*participant_token, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        blink::instruction::Claim { index },
    )
}

// -----------------
// Transactions
// -----------------

pub fn send(svm: &mut LiteSVM, ix: Instruction, signer: &Keypair) -> TransactionResult {
    // fresh blockhash so a repeated instruction is not deduplicated
    svm.expire_blockhash();
    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&signer.pubkey()),
        &[signer],
        svm.latest_blockhash(),
    );
    svm.send_transaction(tx)
}

pub fn assert_ok(result: TransactionResult) {
    if let Err(failed) = result {
        panic!(
            "transaction failed: {:?}\n{}",
            failed.err,
            failed.meta.logs.join("\n")
        );
    }
}

/// Asserts the transaction failed with exactly `expected`, read from the program log.
pub fn assert_blink_err(result: TransactionResult, expected: BlinkError) {
    let name = format!("{expected:?}");
    let needle = format!("Error Number: {}.", u32::from(expected));
    match result {
        Ok(_) => panic!("expected {name}, transaction succeeded"),
        Err(failed) => assert!(
            failed.meta.logs.iter().any(|line| line.contains(&needle)),
            "expected {name}, got {:?}\n{}",
            failed.err,
            failed.meta.logs.join("\n")
        ),
    }
}

// -----------------
// Tokens & records
// -----------------

pub fn create_mint(svm: &mut LiteSVM, authority: &Keypair) -> Pubkey {
    CreateMint::new(svm, authority)
        .authority(&authority.pubkey())
        .decimals(DECIMALS)
        .send()
        .expect("Failed to create mint")
}

pub fn create_token_account(svm: &mut LiteSVM, payer: &Keypair, mint: &Pubkey) -> Pubkey {
    CreateAssociatedTokenAccount::new(svm, payer, mint)
        .owner(&payer.pubkey())
        .send()
        .expect("Failed to create token account")
}

pub fn mint_tokens(svm: &mut LiteSVM, authority: &Keypair, mint: &Pubkey, to: &Pubkey, amount: u64) {
    MintTo::new(svm, authority, mint, to, amount)
        .owner(authority)
        .send()
        .expect("Failed to mint");
}

pub fn fetch<T: AccountDeserialize>(svm: &LiteSVM, address: &Pubkey) -> T {
    let account = svm.get_account(address).expect("account should exist");
    T::try_deserialize(&mut account.data.as_slice()).expect("account should deserialize")
}

pub fn token_balance(svm: &LiteSVM, address: &Pubkey) -> u64 {
    fetch::<anchor_spl::token::TokenAccount>(svm, address).amount
}

// -----------------
// Round fixture
// -----------------

pub struct Player {
    pub keypair: Keypair,
    pub token: Pubkey,
}

impl Player {
    pub fn key(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

/// One funded, initialized round with the shared window set and the clock before it opens.
pub struct Round {
    pub svm: LiteSVM,
    pub creator: Keypair,
    pub creator_token: Pubkey,
    pub mint: Pubkey,
    pub index: u16,
}

impl Round {
    pub fn open(index: u16, deposit: u64, options: &[&str]) -> Self {
        let mut svm = setup_svm();
        let creator = create_funded_account(&mut svm, 10 * LAMPORTS_PER_SOL);
        let mint = create_mint(&mut svm, &creator);
        let creator_token = create_token_account(&mut svm, &creator, &mint);
        mint_tokens(&mut svm, &creator, &mint, &creator_token, deposit);

        let ix = build_set_window_ix(&creator.pubkey(), OPEN_AT, DURATION);
        assert_ok(send(&mut svm, ix, &creator));

        let ix = build_initialize_ix(
            &creator.pubkey(),
            &mint,
            &creator_token,
            index,
            deposit,
            "Which way does it go?",
            options,
        );
        assert_ok(send(&mut svm, ix, &creator));

        Self {
            svm,
            creator,
            creator_token,
            mint,
            index,
        }
    }

    pub fn join(&mut self) -> Player {
        let keypair = create_funded_account(&mut self.svm, LAMPORTS_PER_SOL);
        let token = create_token_account(&mut self.svm, &keypair, &self.mint);
        Player { keypair, token }
    }

    pub fn at(&mut self, unix_timestamp: i64) {
        set_time(&mut self.svm, unix_timestamp);
    }

    pub fn submit(&mut self, player: &Player, option: u8) -> TransactionResult {
        let ix = build_submit_ix(&player.key(), self.index, option);
        send(&mut self.svm, ix, &player.keypair)
    }

    pub fn close(&mut self, target_answer: u8) -> TransactionResult {
        let ix = build_close_ix(&self.creator.pubkey(), self.index, target_answer);
        send(&mut self.svm, ix, &self.creator)
    }

    pub fn claim(&mut self, player: &Player) -> TransactionResult {
        let ix = build_claim_ix(&player.key(), &self.mint, &player.token, self.index);
        send(&mut self.svm, ix, &player.keypair)
    }

    pub fn state(&self) -> blink::RoundState {
        fetch(&self.svm, &round_state(self.index))
    }

    pub fn vault_balance(&self) -> u64 {
        token_balance(&self.svm, &vault(self.index, &self.mint))
    }

    pub fn balance(&self, player: &Player) -> u64 {
        token_balance(&self.svm, &player.token)
    }
}
