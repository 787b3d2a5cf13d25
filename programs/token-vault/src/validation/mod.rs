//! # Validation Module
//!
//! Precondition checks shared by the instruction handlers.
//!
//! Each handler copies the facts it needs out of its accounts into a
//! request struct and runs the matching `validate_*` function before any
//! CPI or ledger write:
//!
//! ```text
//! accounts ──> DepositRequest ──> validate_deposit ──> transfer_checked ──> settle_deposit
//!                                      │                                         │
//!                                      └── Err: nothing moved         check_custody_credit + record_deposit
//! ```
//!
//! The post-transfer half (`settle_*`) lives here too, so the handlers and
//! the tests below run the same sequence. Keeping it away from `Context`
//! lets it be unit tested without a validator.

use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::state::VaultState;

/// Facts a deposit is checked against.
#[derive(Clone, Debug)]
pub struct DepositRequest {
    pub amount: u64,
    /// Mint account supplied with the call
    pub mint: Pubkey,
    /// Depositor's token account
    pub source: Pubkey,
    pub source_mint: Pubkey,
    pub source_balance: u64,
    /// Custody account supplied with the call
    pub custody: Pubkey,
    pub custody_balance: u64,
}

/// Facts a withdrawal is checked against.
#[derive(Clone, Debug)]
pub struct WithdrawRequest {
    pub amount: u64,
    pub signer: Pubkey,
    /// Vault authority account supplied with the call
    pub authority: Pubkey,
    pub mint: Pubkey,
    pub destination: Pubkey,
    pub destination_mint: Pubkey,
    pub custody: Pubkey,
    pub custody_balance: u64,
    /// Current Unix timestamp
    pub now: i64,
}

#[derive(Clone, Debug)]
pub struct CloseRequest {
    pub signer: Pubkey,
    pub authority: Pubkey,
    pub mint: Pubkey,
    /// Receives whatever custody still holds
    pub destination: Pubkey,
    pub destination_mint: Pubkey,
    pub custody: Pubkey,
    pub custody_balance: u64,
}

pub fn validate_deposit(vault: &VaultState, req: &DepositRequest) -> Result<()> {
    require!(req.amount > 0, VaultError::ZeroAmount);
    vault.ensure_initialized()?;

    check_custody(vault, &req.custody)?;
    check_asset(vault, &req.mint)?;
    check_asset(vault, &req.source_mint)?;
    require_keys_neq!(req.source, req.custody, VaultError::AccountMismatch);

    vault.check_solvency(req.custody_balance)?;
    require!(
        req.source_balance >= req.amount,
        VaultError::InsufficientSourceBalance
    );
    vault
        .amount_locked
        .checked_add(req.amount)
        .ok_or(VaultError::Overflow)?;
    Ok(())
}

/// Owner check comes first: a stranger learns nothing about balances or
/// lock state from the error they get back.
pub fn validate_withdraw(
    vault: &VaultState,
    program_id: &Pubkey,
    req: &WithdrawRequest,
) -> Result<()> {
    vault.ensure_initialized()?;
    check_owner(vault, &req.signer)?;
    require!(req.amount > 0, VaultError::ZeroAmount);
    check_authority(vault, program_id, &req.authority)?;

    check_custody(vault, &req.custody)?;
    check_asset(vault, &req.mint)?;
    check_asset(vault, &req.destination_mint)?;
    require_keys_neq!(req.destination, req.custody, VaultError::AccountMismatch);

    vault.check_solvency(req.custody_balance)?;
    require!(
        req.amount <= vault.amount_locked,
        VaultError::InsufficientLockedBalance
    );
    require!(
        vault.is_unlocked_at(req.now)?,
        VaultError::TokensStillLocked
    );
    Ok(())
}

/// Returns the number of tokens to sweep out of custody before it is closed.
///
/// Only the ledger has to be empty. Tokens sent straight to custody were
/// never credited, so they belong to no one's balance and go to the owner's
/// `destination` rather than blocking the close.
pub fn validate_close(vault: &VaultState, program_id: &Pubkey, req: &CloseRequest) -> Result<u64> {
    vault.ensure_initialized()?;
    check_owner(vault, &req.signer)?;
    check_authority(vault, program_id, &req.authority)?;
    check_custody(vault, &req.custody)?;
    require!(vault.amount_locked == 0, VaultError::VaultNotEmpty);

    check_asset(vault, &req.mint)?;
    check_asset(vault, &req.destination_mint)?;
    require_keys_neq!(req.destination, req.custody, VaultError::AccountMismatch);
    Ok(req.custody_balance)
}

/// Credit a deposit once the transfer into custody has landed.
///
/// Only the owner's own deposits restart the lock. Anyone else can add to
/// the vault but cannot push the owner's unlock time back.
pub fn settle_deposit(
    vault: &mut VaultState,
    depositor: &Pubkey,
    custody_before: u64,
    custody_after: u64,
    amount: u64,
    now: i64,
) -> Result<u64> {
    check_custody_credit(custody_before, custody_after, amount)?;
    let restarts_lock = *depositor == vault.owner;
    vault.record_deposit(amount, now, restarts_lock)
}

/// Debit a withdrawal once the transfer out of custody has landed.
pub fn settle_withdrawal(
    vault: &mut VaultState,
    custody_before: u64,
    custody_after: u64,
    amount: u64,
) -> Result<u64> {
    check_custody_debit(custody_before, custody_after, amount)?;
    vault.record_withdrawal(amount)
}

pub fn check_owner(vault: &VaultState, signer: &Pubkey) -> Result<()> {
    require_keys_eq!(vault.owner, *signer, VaultError::Unauthorized);
    Ok(())
}

pub fn check_asset(vault: &VaultState, mint: &Pubkey) -> Result<()> {
    require_keys_eq!(vault.mint, *mint, VaultError::AssetMismatch);
    Ok(())
}

/// Stops a caller from swapping in a token account of their own as "custody".
pub fn check_custody(vault: &VaultState, custody: &Pubkey) -> Result<()> {
    require_keys_eq!(
        vault.vault_token_account,
        *custody,
        VaultError::AccountMismatch
    );
    Ok(())
}

pub fn check_authority(vault: &VaultState, program_id: &Pubkey, authority: &Pubkey) -> Result<()> {
    require!(
        vault.is_vault_authority(program_id, authority),
        VaultError::Unauthorized
    );
    Ok(())
}

/// After a deposit CPI the custody balance must have grown by exactly `amount`.
pub fn check_custody_credit(before: u64, after: u64, amount: u64) -> Result<()> {
    let expected = before.checked_add(amount).ok_or(VaultError::Overflow)?;
    require!(after == expected, VaultError::BalanceMismatch);
    Ok(())
}

/// After a withdrawal CPI the custody balance must have shrunk by exactly `amount`.
pub fn check_custody_debit(before: u64, after: u64, amount: u64) -> Result<()> {
    let expected = before
        .checked_sub(amount)
        .ok_or(VaultError::BalanceMismatch)?;
    require!(after == expected, VaultError::BalanceMismatch);
    Ok(())
}
