//! # Deposit Instruction
//!
//! Moves tokens from a depositor's token account into custody and credits
//! the ledger by the same amount.
//!
//! ## What Happens During a Deposit:
//!
//! ```text
//! BEFORE:                              AFTER:
//!
//! Depositor Token Account              Depositor Token Account
//! └── balance: 1000                    └── balance: 950 (-50)
//!
//! VaultState PDA                       VaultState PDA
//! └── amount_locked: 125               └── amount_locked: 175 (+50)
//!
//! Custody Token Account                Custody Token Account
//! └── balance: 125                     └── balance: 175 (+50)
//! ```
//!
//! ## Base Units:
//!
//! `amount` is in the mint's smallest unit. The program never scales by
//! decimals; `transfer_checked` only uses the mint's decimals to confirm
//! the client and the mint agree.
//!
//! Anyone may deposit into a vault. Only the owner may take tokens out, and
//! only the owner's own deposits restart the time lock.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::events::DepositEvent;
use crate::state::VaultState;
use crate::validation::{self, DepositRequest};

/// # deposit_tokens
///
/// ## Arguments
///
/// * `ctx` - Context containing all required accounts
/// * `amount` - Base units to deposit
///
/// ## Errors
///
/// * `ZeroAmount` - amount is 0
/// * `AccountMismatch` - custody account is not the one on record, or is also the source
/// * `AssetMismatch` - mint or source account holds a different asset
/// * `InsufficientSourceBalance` - source holds less than `amount`
/// * `Overflow` - `amount_locked + amount` exceeds `u64::MAX`
/// * `BalanceMismatch` - custody did not grow by exactly `amount`
///
/// ## Example (TypeScript client):
///
/// ```typescript
/// await program.methods
///     .depositTokens(new BN(50))
///     .accounts({
///         vaultState,
///         vaultTokenAccount,
///         userTokenAccount,
///         tokenMint,
///         userAuthority: wallet.publicKey,
///         tokenProgram: TOKEN_PROGRAM_ID,
///     })
///     .rpc();
/// ```
pub fn deposit_tokens(ctx: Context<DepositTokens>, amount: u64) -> Result<()> {
    // ===================================
    // STEP 1: Validate
    // ===================================

    let custody_before = ctx.accounts.vault_token_account.amount;

    validation::validate_deposit(
        &ctx.accounts.vault_state,
        &DepositRequest {
            amount,
            mint: ctx.accounts.token_mint.key(),
            source: ctx.accounts.user_token_account.key(),
            source_mint: ctx.accounts.user_token_account.mint,
            source_balance: ctx.accounts.user_token_account.amount,
            custody: ctx.accounts.vault_token_account.key(),
            custody_balance: custody_before,
        },
    )?;

    // ===================================
    // STEP 2: Transfer into custody (CPI)
    // ===================================

    let cpi_context = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        TransferChecked {
            from: ctx.accounts.user_token_account.to_account_info(),
            mint: ctx.accounts.token_mint.to_account_info(),
            to: ctx.accounts.vault_token_account.to_account_info(),
            // The depositor signed the transaction
            authority: ctx.accounts.user_authority.to_account_info(),
        },
    );
    transfer_checked(cpi_context, amount, ctx.accounts.token_mint.decimals)?;

    ctx.accounts.vault_token_account.reload()?;
    let custody_after = ctx.accounts.vault_token_account.amount;

    // ===================================
    // STEP 3: Update ledger
    // ===================================

    let vault_key = ctx.accounts.vault_state.key();
    let depositor = ctx.accounts.user_authority.key();
    let clock = Clock::get()?;

    let vault_state = &mut ctx.accounts.vault_state;
    let amount_locked = validation::settle_deposit(
        vault_state,
        &depositor,
        custody_before,
        custody_after,
        amount,
        clock.unix_timestamp,
    )?;
    let unlock_at = vault_state.unlock_at()?;

    emit!(DepositEvent {
        depositor,
        vault: vault_key,
        amount,
        amount_locked,
        unlock_at,
        timestamp: clock.unix_timestamp,
    });

    msg!("Deposited {} tokens to vault", amount);
    msg!("Vault is locked until: {}", unlock_at);

    Ok(())
}

/// # DepositTokens Accounts
///
/// ```text
/// user_authority (Signer)
///   │
///   └── controls ──> user_token_account ──(tokens)──> vault_token_account
///                                                         │
///                       vault_state ── records ───────────┘
/// ```
///
/// Account identity checks (custody, mint, source asset) run in the handler
/// through `validation::validate_deposit` so every failure carries a
/// `VaultError`.
#[derive(Accounts)]
pub struct DepositTokens<'info> {
    /// The ledger. Seeds pin it to its own owner/mint pair.
    #[account(
        mut,
        seeds = [VaultState::SEED_PREFIX, vault_state.owner.as_ref(), vault_state.mint.as_ref()],
        bump = vault_state.bump
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Custody (destination). Must be the account recorded in the ledger.
    #[account(mut)]
    pub vault_token_account: InterfaceAccount<'info, TokenAccount>,

    /// Depositor's token account (source).
    #[account(mut)]
    pub user_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_mint: InterfaceAccount<'info, Mint>,

    /// Owner or delegate of `user_token_account`.
    pub user_authority: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}
