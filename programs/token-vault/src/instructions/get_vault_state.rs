//! # Get Vault State Instruction
//!
//! Read-only view of a vault. Returns a [`VaultSnapshot`] as instruction
//! return data, so it can be simulated without signing or paying fees:
//!
//! ```typescript
//! const snapshot = await program.methods
//!     .getVaultState()
//!     .accounts({ vaultState, vaultTokenAccount })
//!     .view();
//! ```
//!
//! No account is marked `mut`, so nothing is written back.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;

use crate::state::{VaultSnapshot, VaultState};
use crate::validation;

pub fn get_vault_state(ctx: Context<GetVaultState>) -> Result<VaultSnapshot> {
    let vault_state = &ctx.accounts.vault_state;
    vault_state.ensure_initialized()?;
    validation::check_custody(vault_state, &ctx.accounts.vault_token_account.key())?;

    vault_state.snapshot(ctx.accounts.vault_token_account.amount)
}

#[derive(Accounts)]
pub struct GetVaultState<'info> {
    #[account(
        seeds = [VaultState::SEED_PREFIX, vault_state.owner.as_ref(), vault_state.mint.as_ref()],
        bump = vault_state.bump
    )]
    pub vault_state: Account<'info, VaultState>,

    pub vault_token_account: InterfaceAccount<'info, TokenAccount>,
}
