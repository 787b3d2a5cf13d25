// Suppress warnings from Anchor/Solana version mismatches
#![allow(unexpected_cfgs)]
#![allow(ambiguous_glob_reexports)]

//! # Token Vault
//!
//! A Solana program (Anchor) that locks a fungible token on behalf of its
//! owner and keeps a ledger of how much is locked.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       TOKEN VAULT PROGRAM                        │
//! │                                                                  │
//! │  ┌────────────────────┐        ┌────────────────────────────┐   │
//! │  │ VaultState (PDA)   │records │ Custody Token Account (PDA)│   │
//! │  │ owner, mint,       │───────>│ authority = Vault Authority│   │
//! │  │ amount_locked, ... │        │ balance == amount_locked   │   │
//! │  └────────────────────┘        └────────────────────────────┘   │
//! │        one per (owner, mint)        signs only via seeds         │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                              │ CPI (transfer_checked / close_account)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 SPL TOKEN / TOKEN-2022 PROGRAM                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Model
//!
//! 1. **PDA Custody**: the custody account's authority has no private key
//! 2. **Owner Verification**: only the vault owner can withdraw or close
//! 3. **Reference Checks**: custody, mint and counterparty accounts are
//!    compared with the ledger before any transfer
//! 4. **Conservation**: custody balance deltas are re-read after every CPI
//! 5. **Overflow Protection**: all arithmetic uses checked operations
//!
//! ## Instructions Summary
//!
//! | Instruction | Who Can Call | Description |
//! |-------------|--------------|-------------|
//! | `initialize_vault` | Any user | Create vault for an owner/mint pair |
//! | `deposit_tokens` | Any token holder | Lock tokens in custody |
//! | `withdraw_tokens` | Vault owner | Release tokens after the lock window |
//! | `close_vault` | Vault owner | Close a vault with an empty ledger |
//! | `get_vault_state` | Anyone | Read-only snapshot |

use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod validation;

#[cfg(test)]
mod test_utils;

pub use errors::*;
pub use events::*;
pub use instructions::*;
pub use state::*;

declare_id!("EwFjrUDfLEDRA3VHNmGMiG9g4caVraHt47fRiyUP7xuE");

#[program]
pub mod token_vault {
    use super::*;

    // ========================================
    // VAULT LIFECYCLE
    // ========================================

    /// Create the ledger and custody account for the signer and `token_mint`.
    ///
    /// ## Arguments:
    /// - `lock_duration`: seconds each deposit keeps the vault locked
    ///
    /// ## Errors:
    /// - `AlreadyInitialized`: a vault exists for this owner and mint
    /// - `InvalidLockDuration`: out of range
    /// - `InvalidAsset`: mint not owned by the supplied token program
    pub fn initialize_vault(ctx: Context<InitializeVault>, lock_duration: i64) -> Result<()> {
        instructions::initialize_vault(ctx, lock_duration)
    }

    /// Close a vault whose ledger is empty, sweeping any uncredited custody
    /// tokens to `destination` and returning rent to the owner.
    pub fn close_vault(ctx: Context<CloseVault>) -> Result<()> {
        instructions::close_vault(ctx)
    }

    // ========================================
    // TOKEN MOVEMENT
    // ========================================

    /// Lock `amount` base units in custody.
    pub fn deposit_tokens(ctx: Context<DepositTokens>, amount: u64) -> Result<()> {
        instructions::deposit_tokens(ctx, amount)
    }

    /// Release `amount` base units from custody to the owner's chosen account.
    pub fn withdraw_tokens(ctx: Context<WithdrawTokens>, amount: u64) -> Result<()> {
        instructions::withdraw_tokens(ctx, amount)
    }

    // ========================================
    // INTROSPECTION
    // ========================================

    /// Return the ledger together with the live custody balance.
    pub fn get_vault_state(ctx: Context<GetVaultState>) -> Result<VaultSnapshot> {
        instructions::get_vault_state(ctx)
    }
}
