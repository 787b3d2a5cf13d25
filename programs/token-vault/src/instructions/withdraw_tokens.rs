//! # Withdraw Instruction
//!
//! Releases tokens from custody to a destination account chosen by the
//! vault owner, once the lock window of the latest deposit has passed.
//!
//! ## Key Differences from Deposit:
//!
//! 1. **Direction**: tokens flow FROM custody TO the destination
//! 2. **Authority**: the vault authority PDA signs the transfer, not a wallet
//! 3. **Validation**: owner only, bounded by `amount_locked` and the time lock
//!
//! ## PDA Signing:
//!
//! ```text
//! Normal Transaction:
//!     User signs with private key → Wallet authorizes
//!
//! PDA Transaction:
//!     Program provides ["vault", owner, mint, bump] → runtime re-derives → PDA authorizes
//! ```
//!
//! No wallet can produce that signature, so custody funds only leave
//! through this instruction.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::events::WithdrawEvent;
use crate::state::VaultState;
use crate::validation::{self, WithdrawRequest};

/// # withdraw_tokens
///
/// ## Arguments
///
/// * `ctx` - Context containing all required accounts
/// * `amount` - Base units to withdraw
///
/// ## Errors
///
/// * `Unauthorized` - signer is not the owner, or the vault authority was substituted
/// * `ZeroAmount` - amount is 0
/// * `AccountMismatch` / `AssetMismatch` - wrong custody, mint or destination
/// * `InsufficientLockedBalance` - amount exceeds `amount_locked`
/// * `TokensStillLocked` - `locked_at + lock_duration` is still in the future
/// * `BalanceMismatch` - custody did not shrink by exactly `amount`
pub fn withdraw_tokens(ctx: Context<WithdrawTokens>, amount: u64) -> Result<()> {
    // ===================================
    // STEP 1: Validate
    // ===================================

    let clock = Clock::get()?;
    let custody_before = ctx.accounts.vault_token_account.amount;

    validation::validate_withdraw(
        &ctx.accounts.vault_state,
        ctx.program_id,
        &WithdrawRequest {
            amount,
            signer: ctx.accounts.user_authority.key(),
            authority: ctx.accounts.vault_authority.key(),
            mint: ctx.accounts.token_mint.key(),
            destination: ctx.accounts.user_token_account.key(),
            destination_mint: ctx.accounts.user_token_account.mint,
            custody: ctx.accounts.vault_token_account.key(),
            custody_balance: custody_before,
            now: clock.unix_timestamp,
        },
    )?;

    // ===================================
    // STEP 2: Transfer out of custody (CPI with PDA signing)
    // ===================================

    {
        let seeds = ctx.accounts.vault_state.authority_seeds();
        let signer_seeds = &[&seeds[..]];

        let cpi_context = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.vault_token_account.to_account_info(),
                mint: ctx.accounts.token_mint.to_account_info(),
                to: ctx.accounts.user_token_account.to_account_info(),
                authority: ctx.accounts.vault_authority.to_account_info(),
            },
            signer_seeds,
        );
        transfer_checked(cpi_context, amount, ctx.accounts.token_mint.decimals)?;
    }

    ctx.accounts.vault_token_account.reload()?;
    let custody_after = ctx.accounts.vault_token_account.amount;

    // ===================================
    // STEP 3: Update ledger
    // ===================================

    let vault_key = ctx.accounts.vault_state.key();
    let owner = ctx.accounts.user_authority.key();
    let destination = ctx.accounts.user_token_account.key();

    let vault_state = &mut ctx.accounts.vault_state;
    let amount_locked =
        validation::settle_withdrawal(vault_state, custody_before, custody_after, amount)?;

    emit!(WithdrawEvent {
        owner,
        vault: vault_key,
        destination,
        amount,
        amount_locked,
        timestamp: clock.unix_timestamp,
    });

    if amount_locked == 0 {
        msg!("Vault is now UNLOCKED - all tokens withdrawn");
    }
    msg!("Withdrawn {} tokens from vault", amount);

    Ok(())
}

/// # WithdrawTokens Accounts
#[derive(Accounts)]
pub struct WithdrawTokens<'info> {
    #[account(
        mut,
        seeds = [VaultState::SEED_PREFIX, vault_state.owner.as_ref(), vault_state.mint.as_ref()],
        bump = vault_state.bump
    )]
    pub vault_state: Account<'info, VaultState>,

    /// CHECK: Compared against the authority re-derived from the ledger's
    /// seeds and stored bump in `validation::validate_withdraw`.
    pub vault_authority: UncheckedAccount<'info>,

    /// Custody (source).
    #[account(mut)]
    pub vault_token_account: InterfaceAccount<'info, TokenAccount>,

    /// Destination token account. Any account holding the vault's asset.
    #[account(mut)]
    pub user_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_mint: InterfaceAccount<'info, Mint>,

    /// Must be the vault owner.
    pub user_authority: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}
