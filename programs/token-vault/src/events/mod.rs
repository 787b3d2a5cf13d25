//! # Events Module
//!
//! Events emitted by the Token Vault program on every state transition.
//! They are written to the transaction logs and never affect program state.
//!
//! ## Event Flow:
//! ```text
//! Depositor calls deposit_tokens
//!        ↓
//! Program emits DepositEvent
//!        ↓
//! Event stored in transaction logs
//!        ↓
//! Indexers / clients decode it with the program IDL
//! ```
//!
//! All amounts are in the asset's base units. Decimal presentation is left
//! to whoever reads the event.

use anchor_lang::prelude::*;

/// # VaultInitializedEvent
///
/// Emitted when a ledger and custody account are created.
#[event]
pub struct VaultInitializedEvent {
    /// The owner of the new vault
    pub owner: Pubkey,
    /// The vault ledger PDA address
    pub vault: Pubkey,
    /// The asset mint held in custody
    pub mint: Pubkey,
    /// The custody token account
    pub vault_token_account: Pubkey,
    /// Seconds a deposit stays locked
    pub lock_duration: i64,
    /// Unix timestamp of creation
    pub timestamp: i64,
}

/// # DepositEvent
///
/// ## Example Log:
/// ```text
/// DepositEvent {
///     depositor: "7xKt9Fj2...",
///     vault: "9Yht3Mk7...",
///     amount: 125,
///     amount_locked: 175,
///     unlock_at: 1699127056,
///     timestamp: 1699123456
/// }
/// ```
#[event]
pub struct DepositEvent {
    /// The signer who funded the deposit
    pub depositor: Pubkey,
    /// The vault ledger PDA address
    pub vault: Pubkey,
    /// Amount deposited
    pub amount: u64,
    /// Locked amount after the deposit
    pub amount_locked: u64,
    /// Earliest time a withdrawal is accepted
    pub unlock_at: i64,
    /// Unix timestamp of the deposit
    pub timestamp: i64,
}

/// # WithdrawEvent
#[event]
pub struct WithdrawEvent {
    /// The vault owner who authorized the withdrawal
    pub owner: Pubkey,
    /// The vault ledger PDA address
    pub vault: Pubkey,
    /// The token account that received the tokens
    pub destination: Pubkey,
    /// Amount withdrawn
    pub amount: u64,
    /// Locked amount remaining after the withdrawal
    pub amount_locked: u64,
    /// Unix timestamp of the withdrawal
    pub timestamp: i64,
}

/// # VaultClosedEvent
///
/// Emitted when an empty vault is torn down and its rent returned.
/// `swept` counts uncredited tokens moved out of custody first.
#[event]
pub struct VaultClosedEvent {
    pub owner: Pubkey,
    pub vault: Pubkey,
    pub swept: u64,
    pub timestamp: i64,
}
