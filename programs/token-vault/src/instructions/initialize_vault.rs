//! # Initialize Vault Instruction
//!
//! Creates the ledger and the custody token account for one (owner, mint)
//! pair. Both live at PDAs, so a client can compute every address with
//! [`crate::state::VaultAddresses::derive`] before sending the transaction.
//!
//! ## Account Diagram:
//!
//! ```text
//! BEFORE:                          AFTER:
//!
//! Owner Wallet                     Owner Wallet
//! └── Has SOL for fees             └── Has SOL for fees (minus rent)
//!
//!                                  VaultState PDA (created)
//!                                  ├── owner: Owner
//!                                  ├── mint: Asset
//!                                  ├── amount_locked: 0
//!                                  └── ...
//!
//!                                  Custody Token Account PDA (created)
//!                                  ├── authority: Vault Authority PDA
//!                                  └── balance: 0
//! ```
//!
//! ## Uniqueness:
//!
//! The ledger address is derived from `owner` and `mint`, so there is
//! exactly one possible ledger per pair. The accounts use `init_if_needed`
//! so that a repeated call reaches the handler and fails with
//! `AlreadyInitialized`, instead of a generic "account in use" error from
//! the System Program.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::errors::VaultError;
use crate::events::VaultInitializedEvent;
use crate::state::{VaultBumps, VaultState};

/// # initialize_vault
///
/// ## Arguments
///
/// * `ctx` - The context containing all accounts needed for this instruction
/// * `lock_duration` - Seconds each deposit keeps the vault locked
///                     (0 allows immediate withdrawal)
///
/// ## Errors
///
/// * `AlreadyInitialized` - A vault already exists for this owner and mint
/// * `InvalidLockDuration` - Negative or above `VaultState::MAX_LOCK_DURATION`
/// * `InvalidAsset` - Mint is not owned by the supplied token program
///
/// ## Example Usage (from client):
///
/// ```typescript
/// await program.methods
///     .initializeVault(new BN(0))
///     .accounts({
///         owner: wallet.publicKey,
///         tokenMint: mint,
///         tokenProgram: TOKEN_PROGRAM_ID,
///     })
///     .rpc();
/// ```
pub fn initialize_vault(ctx: Context<InitializeVault>, lock_duration: i64) -> Result<()> {
    let clock = Clock::get()?;

    let vault_key = ctx.accounts.vault_state.key();
    let owner = ctx.accounts.owner.key();
    let mint = ctx.accounts.token_mint.key();
    let vault_token_account = ctx.accounts.vault_token_account.key();

    let vault_state = &mut ctx.accounts.vault_state;
    vault_state.initialize(
        owner,
        mint,
        vault_token_account,
        lock_duration,
        VaultBumps {
            ledger: ctx.bumps.vault_state,
            authority: ctx.bumps.vault_authority,
            custody: ctx.bumps.vault_token_account,
        },
    )?;

    emit!(VaultInitializedEvent {
        owner,
        vault: vault_key,
        mint,
        vault_token_account,
        lock_duration,
        timestamp: clock.unix_timestamp,
    });

    msg!("Vault initialized for mint: {}", mint);
    msg!("Lock duration: {} seconds", lock_duration);

    Ok(())
}

/// # InitializeVault Accounts
///
/// If ANY constraint fails, the instruction is rejected before running.
#[derive(Accounts)]
pub struct InitializeVault<'info> {
    /// The prospective owner. Pays rent for both new accounts.
    #[account(mut)]
    pub owner: Signer<'info>,

    /// The ledger PDA.
    ///
    /// ### `seeds = [b"vault-state", owner, mint]`
    /// One ledger per owner/mint pair.
    #[account(
        init_if_needed,
        payer = owner,
        space = VaultState::LEN,
        seeds = [VaultState::SEED_PREFIX, owner.key().as_ref(), token_mint.key().as_ref()],
        bump
    )]
    pub vault_state: Account<'info, VaultState>,

    /// CHECK: Signer PDA for the custody account. Holds no data; only its
    /// address and bump are used.
    #[account(
        seeds = [VaultState::AUTHORITY_SEED, owner.key().as_ref(), token_mint.key().as_ref()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// The custody token account.
    ///
    /// ### `token::authority = vault_authority`
    /// The vault authority PDA, not the owner, controls these tokens.
    #[account(
        init_if_needed,
        payer = owner,
        seeds = [VaultState::CUSTODY_SEED, vault_state.key().as_ref()],
        bump,
        token::mint = token_mint,
        token::authority = vault_authority,
        token::token_program = token_program,
    )]
    pub vault_token_account: InterfaceAccount<'info, TokenAccount>,

    /// The asset mint. Works with both SPL Token and Token-2022 mints.
    #[account(
        constraint = *token_mint.to_account_info().owner == token_program.key() @ VaultError::InvalidAsset
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}
