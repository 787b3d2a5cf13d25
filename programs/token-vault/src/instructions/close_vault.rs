//! # Close Vault Instruction
//!
//! Tears down a vault whose ledger is empty: any tokens still sitting in
//! custody are swept to the owner's `destination`, the custody token account
//! is closed through an authority-signed CPI, then Anchor's `close = owner`
//! zeroes the ledger and returns both rent deposits to the owner.
//!
//! ```text
//! amount_locked > 0  ──> VaultNotEmpty
//! custody balance 0  ──> close_account
//! custody balance n  ──> transfer_checked(n) to destination ──> close_account
//! ```
//!
//! Custody can only hold more than `amount_locked` when someone transferred
//! tokens straight into it. Those tokens were never credited, so the sweep
//! keeps them from pinning the vault open.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    close_account, transfer_checked, CloseAccount, Mint, TokenAccount, TokenInterface,
    TransferChecked,
};

use crate::events::VaultClosedEvent;
use crate::state::VaultState;
use crate::validation::{self, CloseRequest};

/// # close_vault
///
/// ## Errors
///
/// * `Unauthorized` - signer is not the owner, or the vault authority was substituted
/// * `VaultNotEmpty` - `amount_locked > 0`
/// * `AccountMismatch` / `AssetMismatch` - wrong custody, mint or destination
/// * `BalanceMismatch` - custody did not end empty after the sweep
pub fn close_vault(ctx: Context<CloseVault>) -> Result<()> {
    // ===================================
    // STEP 1: Validate
    // ===================================

    let swept = validation::validate_close(
        &ctx.accounts.vault_state,
        ctx.program_id,
        &CloseRequest {
            signer: ctx.accounts.owner.key(),
            authority: ctx.accounts.vault_authority.key(),
            mint: ctx.accounts.token_mint.key(),
            destination: ctx.accounts.destination.key(),
            destination_mint: ctx.accounts.destination.mint,
            custody: ctx.accounts.vault_token_account.key(),
            custody_balance: ctx.accounts.vault_token_account.amount,
        },
    )?;

    let seeds = ctx.accounts.vault_state.authority_seeds();
    let signer_seeds = &[&seeds[..]];

    // ===================================
    // STEP 2: Sweep uncredited tokens (CPI with PDA signing)
    // ===================================

    if swept > 0 {
        transfer_checked(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                TransferChecked {
                    from: ctx.accounts.vault_token_account.to_account_info(),
                    mint: ctx.accounts.token_mint.to_account_info(),
                    to: ctx.accounts.destination.to_account_info(),
                    authority: ctx.accounts.vault_authority.to_account_info(),
                },
                signer_seeds,
            ),
            swept,
            ctx.accounts.token_mint.decimals,
        )?;

        ctx.accounts.vault_token_account.reload()?;
        msg!("Swept {} uncredited tokens from custody", swept);
    }
    validation::check_custody_debit(swept, ctx.accounts.vault_token_account.amount, swept)?;

    // ===================================
    // STEP 3: Close custody
    // ===================================

    close_account(CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        CloseAccount {
            account: ctx.accounts.vault_token_account.to_account_info(),
            destination: ctx.accounts.owner.to_account_info(),
            authority: ctx.accounts.vault_authority.to_account_info(),
        },
        signer_seeds,
    ))?;

    emit!(VaultClosedEvent {
        owner: ctx.accounts.owner.key(),
        vault: ctx.accounts.vault_state.key(),
        swept,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Vault closed. Rent returned to owner.");

    Ok(())
}

#[derive(Accounts)]
pub struct CloseVault<'info> {
    /// Vault owner. Receives the rent of both accounts.
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [VaultState::SEED_PREFIX, vault_state.owner.as_ref(), vault_state.mint.as_ref()],
        bump = vault_state.bump,
        close = owner
    )]
    pub vault_state: Account<'info, VaultState>,

    /// CHECK: Verified against the ledger's seeds in `validation::validate_close`.
    pub vault_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub vault_token_account: InterfaceAccount<'info, TokenAccount>,

    /// Receives any tokens left in custody. Any account holding the vault's asset.
    #[account(mut)]
    pub destination: InterfaceAccount<'info, TokenAccount>,

    pub token_mint: InterfaceAccount<'info, Mint>,

    pub token_program: Interface<'info, TokenInterface>,
}
