//! # Vault Ledger Account Structure
//!
//! This file defines the ledger account that tracks how many tokens a vault
//! holds in custody. One ledger exists per (owner, mint) pair, at a PDA
//! derived from those two keys.
//!
//! ## Real-World Analogy:
//! The custody token account is the safe; this record is the card taped to
//! its door saying who owns the safe, what currency it holds, how much is in
//! it, and when it may next be opened.
//!
//! ## Conservation:
//! Between instructions `amount_locked` equals the custody account balance.
//! Every method here computes the new value first and only then writes it,
//! so a rejected call leaves the record untouched.

use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::state::VaultAuthority;

/// # VaultState
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | owner | Pubkey | Wallet that created the vault and may withdraw |
/// | mint | Pubkey | Asset held in custody (immutable) |
/// | vault_token_account | Pubkey | Custody token account |
/// | amount_locked | u64 | Base units the ledger holds in custody |
/// | lock_duration | i64 | Seconds each deposit keeps the vault locked |
/// | locked_at | i64 | Timestamp of the owner's latest deposit |
/// | is_locked | bool | Whether the vault currently holds a locked balance |
/// | vault_bump | u8 | Bump of the vault authority PDA |
/// | bump | u8 | Bump of this ledger PDA |
/// | custody_bump | u8 | Bump of the custody token account PDA |
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct VaultState {
    /// Only this address can withdraw or close the vault.
    pub owner: Pubkey,

    /// The fungible asset this vault custodies.
    pub mint: Pubkey,

    /// The custody token account. Its SPL authority is the vault authority
    /// PDA, so no private key can move funds out of it.
    pub vault_token_account: Pubkey,

    /// Tokens held in custody, in the asset's smallest unit.
    pub amount_locked: u64,

    /// Seconds that must pass after `locked_at` before a withdrawal.
    pub lock_duration: i64,

    /// Unix timestamp of the owner's latest deposit (0 until the first one).
    pub locked_at: i64,

    pub is_locked: bool,

    /// Bump for `[b"vault", owner, mint]`. Used to sign custody transfers.
    pub vault_bump: u8,

    pub bump: u8,

    pub custody_bump: u8,
}

/// PDA bumps recorded at initialization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VaultBumps {
    pub ledger: u8,
    pub authority: u8,
    pub custody: u8,
}

impl VaultState {
    /// ## Calculation:
    /// - 8 bytes: Anchor discriminator
    /// - 32 × 3: owner, mint, vault_token_account
    /// - 8 × 3: amount_locked, lock_duration, locked_at
    /// - 1 × 4: is_locked, vault_bump, bump, custody_bump
    ///
    /// Total: 8 + 96 + 24 + 4 = 132 bytes
    pub const LEN: usize = 8 + 32 + 32 + 32 + 8 + 8 + 8 + 1 + 1 + 1 + 1;

    /// Seed prefix of the ledger PDA: `[b"vault-state", owner, mint]`.
    pub const SEED_PREFIX: &'static [u8] = b"vault-state";

    /// Seed prefix of the vault authority PDA: `[b"vault", owner, mint]`.
    pub const AUTHORITY_SEED: &'static [u8] = b"vault";

    /// Seed prefix of the custody token account PDA: `[b"custody", ledger]`.
    pub const CUSTODY_SEED: &'static [u8] = b"custody";

    /// Ten years, in seconds.
    pub const MAX_LOCK_DURATION: i64 = 10 * 365 * 24 * 60 * 60;

    /// Fill a freshly allocated ledger.
    ///
    /// ## Errors
    /// * `AlreadyInitialized` - the record already names an owner
    /// * `InvalidLockDuration` - negative or above `MAX_LOCK_DURATION`
    pub fn initialize(
        &mut self,
        owner: Pubkey,
        mint: Pubkey,
        vault_token_account: Pubkey,
        lock_duration: i64,
        bumps: VaultBumps,
    ) -> Result<()> {
        require!(!self.is_initialized(), VaultError::AlreadyInitialized);
        require!(
            (0..=Self::MAX_LOCK_DURATION).contains(&lock_duration),
            VaultError::InvalidLockDuration
        );

        *self = Self {
            owner,
            mint,
            vault_token_account,
            amount_locked: 0,
            lock_duration,
            locked_at: 0,
            is_locked: false,
            vault_bump: bumps.authority,
            bump: bumps.ledger,
            custody_bump: bumps.custody,
        };
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default() && self.vault_token_account != Pubkey::default()
    }

    pub fn ensure_initialized(&self) -> Result<()> {
        require!(self.is_initialized(), VaultError::NotInitialized);
        Ok(())
    }

    /// Credit a deposit. Returns the new `amount_locked`.
    ///
    /// `restarts_lock` is true only for the owner's own deposits; anyone
    /// else may add tokens but cannot push the unlock time back.
    pub fn record_deposit(&mut self, amount: u64, now: i64, restarts_lock: bool) -> Result<u64> {
        require!(amount > 0, VaultError::ZeroAmount);

        let amount_locked = self
            .amount_locked
            .checked_add(amount)
            .ok_or(VaultError::Overflow)?;

        self.amount_locked = amount_locked;
        if restarts_lock {
            self.locked_at = now;
        }
        self.is_locked = true;
        Ok(amount_locked)
    }

    /// Debit a withdrawal. Returns the remaining `amount_locked`.
    ///
    /// The time lock is checked by the caller (see `validation`), this only
    /// guards the arithmetic.
    pub fn record_withdrawal(&mut self, amount: u64) -> Result<u64> {
        require!(amount > 0, VaultError::ZeroAmount);

        let amount_locked = self
            .amount_locked
            .checked_sub(amount)
            .ok_or(VaultError::InsufficientLockedBalance)?;

        self.amount_locked = amount_locked;
        if amount_locked == 0 {
            self.is_locked = false;
        }
        Ok(amount_locked)
    }

    /// Earliest timestamp at which a withdrawal is accepted.
    pub fn unlock_at(&self) -> Result<i64> {
        self.locked_at
            .checked_add(self.lock_duration)
            .ok_or_else(|| error!(VaultError::Overflow))
    }

    pub fn is_unlocked_at(&self, now: i64) -> Result<bool> {
        Ok(now >= self.unlock_at()?)
    }

    /// Signer seeds of the vault authority PDA.
    ///
    /// ```rust,ignore
    /// let seeds = vault_state.authority_seeds();
    /// let signer = &[&seeds[..]];
    /// CpiContext::new_with_signer(program, accounts, signer);
    /// ```
    pub fn authority_seeds(&self) -> [&[u8]; 4] {
        [
            Self::AUTHORITY_SEED,
            self.owner.as_ref(),
            self.mint.as_ref(),
            std::slice::from_ref(&self.vault_bump),
        ]
    }

    /// Whether `candidate` is the vault authority PDA of this ledger under
    /// `program_id`. Uses the stored bump, so a non-canonical bump or a
    /// substituted account never matches.
    pub fn is_vault_authority(&self, program_id: &Pubkey, candidate: &Pubkey) -> bool {
        VaultAuthority::verify(program_id, &self.owner, &self.mint, self.vault_bump, candidate)
    }

    /// Custody must hold at least what the ledger claims.
    pub fn check_solvency(&self, custody_balance: u64) -> Result<()> {
        require!(
            custody_balance >= self.amount_locked,
            VaultError::BalanceMismatch
        );
        Ok(())
    }

    /// Read-only view for clients and tests.
    pub fn snapshot(&self, custody_balance: u64) -> Result<VaultSnapshot> {
        Ok(VaultSnapshot {
            owner: self.owner,
            mint: self.mint,
            vault_token_account: self.vault_token_account,
            amount_locked: self.amount_locked,
            custody_balance,
            lock_duration: self.lock_duration,
            locked_at: self.locked_at,
            unlock_at: self.unlock_at()?,
            is_locked: self.is_locked,
        })
    }
}

/// # VaultSnapshot
///
/// Returned by `get_vault_state` as instruction return data.
/// `custody_balance` is read from the custody token account in the same
/// call, so clients can check `amount_locked == custody_balance` directly.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct VaultSnapshot {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub vault_token_account: Pubkey,
    pub amount_locked: u64,
    pub custody_balance: u64,
    pub lock_duration: i64,
    pub locked_at: i64,
    pub unlock_at: i64,
    pub is_locked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_vault_error;

    fn bumps() -> VaultBumps {
        VaultBumps {
            ledger: 254,
            authority: 253,
            custody: 255,
        }
    }

    fn initialized(lock_duration: i64) -> VaultState {
        let mut vault = VaultState::default();
        vault
            .initialize(
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                lock_duration,
                bumps(),
            )
            .unwrap();
        vault
    }

    #[test]
    fn test_len_matches_serialized_size() {
        let vault = initialized(60);
        let mut data = Vec::new();
        vault.try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), VaultState::LEN);
    }

    #[test]
    fn test_initialize_sets_empty_ledger() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let custody = Pubkey::new_unique();
        let mut vault = VaultState::default();

        vault.initialize(owner, mint, custody, 3600, bumps()).unwrap();

        assert_eq!(vault.owner, owner);
        assert_eq!(vault.mint, mint);
        assert_eq!(vault.vault_token_account, custody);
        assert_eq!(vault.amount_locked, 0);
        assert_eq!(vault.locked_at, 0);
        assert!(!vault.is_locked);
        assert_eq!(vault.vault_bump, 253);
        assert_eq!(vault.bump, 254);
        assert_eq!(vault.custody_bump, 255);
    }

    #[test]
    fn test_second_initialize_keeps_first_parameters() {
        let mut vault = initialized(60);
        let before = vault.clone();

        let res = vault.initialize(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            0,
            VaultBumps::default(),
        );

        assert_vault_error(res, VaultError::AlreadyInitialized);
        assert_eq!(vault, before);
    }

    #[test]
    fn test_initialize_rejects_bad_lock_duration() {
        let mut vault = VaultState::default();
        let res = vault.initialize(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            -1,
            bumps(),
        );
        assert_vault_error(res, VaultError::InvalidLockDuration);

        let res = vault.initialize(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            VaultState::MAX_LOCK_DURATION + 1,
            bumps(),
        );
        assert_vault_error(res, VaultError::InvalidLockDuration);
        assert_eq!(vault, VaultState::default());
    }

    #[test]
    fn test_default_ledger_is_not_initialized() {
        assert_vault_error(
            VaultState::default().ensure_initialized(),
            VaultError::NotInitialized,
        );
        assert!(initialized(0).ensure_initialized().is_ok());
    }

    #[test]
    fn test_deposit_accumulates_and_restarts_lock() {
        let mut vault = initialized(100);

        assert_eq!(vault.record_deposit(50, 1_000, true).unwrap(), 50);
        assert_eq!(vault.unlock_at().unwrap(), 1_100);
        assert_eq!(vault.record_deposit(125, 1_050, true).unwrap(), 175);
        assert_eq!(vault.locked_at, 1_050);
        assert_eq!(vault.unlock_at().unwrap(), 1_150);
        assert!(vault.is_locked);
    }

    #[test]
    fn test_deposit_overflow_leaves_state_unchanged() {
        let mut vault = initialized(0);
        vault.record_deposit(u64::MAX - 1, 10, true).unwrap();
        let before = vault.clone();

        assert_vault_error(vault.record_deposit(2, 20, true), VaultError::Overflow);
        assert_eq!(vault, before);
    }

    #[test]
    fn test_zero_amounts_rejected() {
        let mut vault = initialized(0);
        assert_vault_error(vault.record_deposit(0, 1, true), VaultError::ZeroAmount);
        assert_vault_error(vault.record_withdrawal(0), VaultError::ZeroAmount);
        assert_eq!(vault.amount_locked, 0);
    }

    #[test]
    fn test_withdrawal_never_goes_negative() {
        let mut vault = initialized(0);
        vault.record_deposit(175, 1, true).unwrap();
        let before = vault.clone();

        assert_vault_error(
            vault.record_withdrawal(200),
            VaultError::InsufficientLockedBalance,
        );
        assert_eq!(vault, before);

        assert_eq!(vault.record_withdrawal(75).unwrap(), 100);
        assert!(vault.is_locked);
        assert_eq!(vault.record_withdrawal(100).unwrap(), 0);
        assert!(!vault.is_locked);
    }

    #[test]
    fn test_unlock_window() {
        let mut vault = initialized(60);
        vault.record_deposit(10, 1_000, true).unwrap();

        assert!(!vault.is_unlocked_at(1_059).unwrap());
        assert!(vault.is_unlocked_at(1_060).unwrap());
    }

    #[test]
    fn test_unlock_at_overflow_is_an_error() {
        let mut vault = initialized(VaultState::MAX_LOCK_DURATION);
        vault.record_deposit(1, i64::MAX, true).unwrap();
        assert_vault_error(vault.unlock_at(), VaultError::Overflow);
    }

    #[test]
    fn test_snapshot_overflow_matches_unlock_at() {
        let mut vault = initialized(VaultState::MAX_LOCK_DURATION);
        vault.record_deposit(1, i64::MAX, true).unwrap();
        assert_vault_error(vault.snapshot(1), VaultError::Overflow);
    }

    #[test]
    fn test_third_party_deposit_keeps_unlock_time() {
        let mut vault = initialized(3_600);
        vault.record_deposit(100, 1_000, true).unwrap();

        assert_eq!(vault.record_deposit(1, 4_599, false).unwrap(), 101);
        assert_eq!(vault.locked_at, 1_000);
        assert_eq!(vault.unlock_at().unwrap(), 4_600);
        assert!(vault.is_unlocked_at(4_600).unwrap());
    }

    #[test]
    fn test_solvency() {
        let mut vault = initialized(0);
        vault.record_deposit(40, 1, true).unwrap();

        assert!(vault.check_solvency(40).is_ok());
        assert!(vault.check_solvency(41).is_ok());
        assert_vault_error(vault.check_solvency(39), VaultError::BalanceMismatch);
    }

    #[test]
    fn test_authority_seeds_verify_only_the_derived_address() {
        let program_id = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let (authority, authority_bump) = Pubkey::find_program_address(
            &[VaultState::AUTHORITY_SEED, owner.as_ref(), mint.as_ref()],
            &program_id,
        );

        let mut vault = VaultState::default();
        vault
            .initialize(
                owner,
                mint,
                Pubkey::new_unique(),
                0,
                VaultBumps {
                    authority: authority_bump,
                    ..bumps()
                },
            )
            .unwrap();

        assert!(vault.is_vault_authority(&program_id, &authority));
        assert!(!vault.is_vault_authority(&program_id, &owner));
        assert!(!vault.is_vault_authority(&Pubkey::new_unique(), &authority));
    }

    #[test]
    fn test_snapshot_reports_ledger_and_custody() {
        let mut vault = initialized(30);
        vault.record_deposit(500, 70, true).unwrap();

        let snapshot = vault.snapshot(500).unwrap();

        assert_eq!(snapshot.owner, vault.owner);
        assert_eq!(snapshot.mint, vault.mint);
        assert_eq!(snapshot.vault_token_account, vault.vault_token_account);
        assert_eq!(snapshot.amount_locked, 500);
        assert_eq!(snapshot.custody_balance, 500);
        assert_eq!(snapshot.unlock_at, 100);
        assert!(snapshot.is_locked);
    }
}
