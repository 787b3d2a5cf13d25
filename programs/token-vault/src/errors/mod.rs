//! # Error Handling Module
//!
//! All custom errors the Token Vault program can return.
//!
//! Every error is raised during the precondition phase of an instruction,
//! before any token transfer or ledger write. Solana reverts the whole
//! transaction on error, so a failed call never leaves partial effects.
//!
//! ## Error Codes:
//! Anchor assigns codes starting from 6000 (0x1770), one per variant in
//! declaration order.

use anchor_lang::prelude::*;

/// # VaultError
///
/// | Category | Variants |
/// |----------|----------|
/// | Lifecycle | `AlreadyInitialized`, `NotInitialized`, `VaultNotEmpty` |
/// | Input Validation | `ZeroAmount`, `InvalidAsset`, `InvalidLockDuration` |
/// | Account Matching | `AssetMismatch`, `AccountMismatch` |
/// | Balance | `InsufficientSourceBalance`, `InsufficientLockedBalance`, `BalanceMismatch` |
/// | Authorization | `Unauthorized`, `TokensStillLocked` |
/// | Math / Derivation | `Overflow`, `AuthorityDerivationFailed` |
#[error_code]
pub enum VaultError {
    // ============================================
    // LIFECYCLE ERRORS
    // ============================================

    /// A ledger already exists at the derived vault address.
    ///
    /// ## When this occurs:
    /// - `initialize_vault` is called a second time for the same owner/mint pair
    #[msg("Vault already initialized for this owner and mint")]
    AlreadyInitialized,

    /// The ledger account holds no vault record.
    #[msg("Vault is not initialized")]
    NotInitialized,

    /// The vault still holds tokens and cannot be closed.
    #[msg("Vault must be empty before it can be closed")]
    VaultNotEmpty,

    // ============================================
    // INPUT VALIDATION ERRORS
    // ============================================

    /// Deposits and withdrawals must move at least one base unit.
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    /// The mint is not usable as a vault asset.
    ///
    /// ## When this occurs:
    /// - The mint is not owned by the token program supplied with the call
    #[msg("Invalid asset mint")]
    InvalidAsset,

    /// Lock duration is negative or longer than `VaultState::MAX_LOCK_DURATION`.
    #[msg("Lock duration is out of range")]
    InvalidLockDuration,

    // ============================================
    // ACCOUNT MATCHING ERRORS
    // ============================================

    /// A token account or mint does not carry the vault's asset.
    #[msg("Token mint does not match the vault asset")]
    AssetMismatch,

    /// An account supplied to the call is not the one the ledger records,
    /// or the custody account was offered as the counterparty of its own transfer.
    #[msg("Account does not match the vault record")]
    AccountMismatch,

    // ============================================
    // BALANCE ERRORS
    // ============================================

    /// The depositor's token account holds less than the deposit amount.
    #[msg("Source account balance is insufficient for this deposit")]
    InsufficientSourceBalance,

    /// Withdrawal exceeds `amount_locked`.
    ///
    /// ## Example:
    /// ```text
    /// amount_locked: 175
    /// withdraw(200) → ERROR, ledger unchanged
    /// ```
    #[msg("Cannot withdraw more than the locked amount")]
    InsufficientLockedBalance,

    /// The custody balance disagrees with the ledger.
    ///
    /// ## When this occurs:
    /// - Custody holds less than `amount_locked` before an operation
    /// - A transfer moved a different amount than requested (e.g. transfer-fee mints)
    ///
    /// ## This is a critical error:
    /// The conservation invariant would break if the call went through.
    #[msg("Custody balance does not match the vault ledger")]
    BalanceMismatch,

    // ============================================
    // AUTHORIZATION ERRORS
    // ============================================

    /// Caller is not the vault owner, or the presented vault authority
    /// is not the one derived for this vault.
    #[msg("You are not authorized to perform this action on this vault")]
    Unauthorized,

    /// The lock window opened by the latest deposit has not elapsed.
    #[msg("Tokens are still locked")]
    TokensStillLocked,

    // ============================================
    // MATH / DERIVATION ERRORS
    // ============================================

    /// Checked arithmetic refused to wrap.
    #[msg("Arithmetic overflow")]
    Overflow,

    /// No bump produced an off-curve address for the vault seeds.
    #[msg("Could not derive the vault authority address")]
    AuthorityDerivationFailed,
}
