//! # Vault Authority Derivation
//!
//! The vault authority is a PDA (Program Derived Address): an address with
//! no private key, derived from the program ID and the vault's seeds. The
//! custody token account names it as its SPL authority, so the only way to
//! move tokens out of custody is for this program to sign with the seeds.
//!
//! ## Derivation:
//! ```text
//! Seeds: ["vault", owner, mint] + bump
//!                    ↓
//!         SHA256(seeds || program_id || "ProgramDerivedAddress")
//!                    ↓
//!         Off-curve address (bump walks 255, 254, ... until it is)
//! ```
//!
//! Clients link this crate with `features = ["no-entrypoint"]` and call
//! [`VaultAddresses::derive`] to learn every address of a vault before
//! sending `initialize_vault`.

use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::state::{VaultBumps, VaultState};

/// A derived vault authority and the canonical bump that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VaultAuthority {
    pub address: Pubkey,
    pub bump: u8,
}

impl VaultAuthority {
    /// Derive the vault authority for `(owner, mint)` under `program_id`.
    ///
    /// Pure and total: the same inputs always give the same address.
    ///
    /// ## Errors
    /// * `AuthorityDerivationFailed` - every bump landed on the curve. This
    ///   is a configuration error and is not retried.
    pub fn derive(program_id: &Pubkey, owner: &Pubkey, mint: &Pubkey) -> Result<Self> {
        let (address, bump) = derive_address(
            &[VaultState::AUTHORITY_SEED, owner.as_ref(), mint.as_ref()],
            program_id,
        )?;
        Ok(Self { address, bump })
    }

    /// Check `candidate` against the authority re-derived with `bump`.
    pub fn verify(
        program_id: &Pubkey,
        owner: &Pubkey,
        mint: &Pubkey,
        bump: u8,
        candidate: &Pubkey,
    ) -> bool {
        Pubkey::create_program_address(
            &[
                VaultState::AUTHORITY_SEED,
                owner.as_ref(),
                mint.as_ref(),
                &[bump],
            ],
            program_id,
        )
        .map(|address| address == *candidate)
        .unwrap_or(false)
    }
}

/// Every address belonging to one vault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VaultAddresses {
    /// Ledger PDA: `["vault-state", owner, mint]`
    pub vault_state: Pubkey,
    /// Custody signer PDA: `["vault", owner, mint]`
    pub vault_authority: Pubkey,
    /// Custody token account PDA: `["custody", vault_state]`
    pub custody: Pubkey,
    pub bumps: VaultBumps,
}

impl VaultAddresses {
    pub fn derive(program_id: &Pubkey, owner: &Pubkey, mint: &Pubkey) -> Result<Self> {
        let (vault_state, ledger_bump) = derive_address(
            &[VaultState::SEED_PREFIX, owner.as_ref(), mint.as_ref()],
            program_id,
        )?;
        let authority = VaultAuthority::derive(program_id, owner, mint)?;
        let (custody, custody_bump) =
            derive_address(&[VaultState::CUSTODY_SEED, vault_state.as_ref()], program_id)?;

        Ok(Self {
            vault_state,
            vault_authority: authority.address,
            custody,
            bumps: VaultBumps {
                ledger: ledger_bump,
                authority: authority.bump,
                custody: custody_bump,
            },
        })
    }
}

fn derive_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    Pubkey::try_find_program_address(seeds, program_id)
        .ok_or_else(|| error!(VaultError::AuthorityDerivationFailed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic() {
        let program_id = crate::ID;
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let first = VaultAuthority::derive(&program_id, &owner, &mint).unwrap();
        let second = VaultAuthority::derive(&program_id, &owner, &mint).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            (first.address, first.bump),
            Pubkey::find_program_address(
                &[VaultState::AUTHORITY_SEED, owner.as_ref(), mint.as_ref()],
                &program_id,
            )
        );
    }

    #[test]
    fn test_distinct_vaults_get_distinct_authorities() {
        let program_id = crate::ID;
        let owner = Pubkey::new_unique();
        let mint_a = Pubkey::new_unique();
        let mint_b = Pubkey::new_unique();

        let a = VaultAuthority::derive(&program_id, &owner, &mint_a).unwrap();
        let b = VaultAuthority::derive(&program_id, &owner, &mint_b).unwrap();
        let other_owner =
            VaultAuthority::derive(&program_id, &Pubkey::new_unique(), &mint_a).unwrap();

        assert_ne!(a.address, b.address);
        assert_ne!(a.address, other_owner.address);
    }

    #[test]
    fn test_verify_rejects_substitutes() {
        let program_id = crate::ID;
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let authority = VaultAuthority::derive(&program_id, &owner, &mint).unwrap();

        assert!(VaultAuthority::verify(
            &program_id,
            &owner,
            &mint,
            authority.bump,
            &authority.address
        ));
        // a human-held key is never the authority
        assert!(!VaultAuthority::verify(
            &program_id,
            &owner,
            &mint,
            authority.bump,
            &owner
        ));
        // the right seeds under another program
        assert!(!VaultAuthority::verify(
            &Pubkey::new_unique(),
            &owner,
            &mint,
            authority.bump,
            &authority.address
        ));
        // another vault's authority
        let other = VaultAuthority::derive(&program_id, &owner, &Pubkey::new_unique()).unwrap();
        assert!(!VaultAuthority::verify(
            &program_id,
            &owner,
            &mint,
            authority.bump,
            &other.address
        ));
    }

    #[test]
    fn test_vault_addresses_chain_custody_to_ledger() {
        let program_id = crate::ID;
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let addresses = VaultAddresses::derive(&program_id, &owner, &mint).unwrap();

        let (vault_state, ledger_bump) = Pubkey::find_program_address(
            &[VaultState::SEED_PREFIX, owner.as_ref(), mint.as_ref()],
            &program_id,
        );
        let (custody, custody_bump) = Pubkey::find_program_address(
            &[VaultState::CUSTODY_SEED, vault_state.as_ref()],
            &program_id,
        );

        assert_eq!(addresses.vault_state, vault_state);
        assert_eq!(addresses.custody, custody);
        assert_eq!(addresses.bumps.ledger, ledger_bump);
        assert_eq!(addresses.bumps.custody, custody_bump);
        assert_ne!(addresses.vault_state, addresses.vault_authority);
        assert_eq!(
            addresses.vault_authority,
            VaultAuthority::derive(&program_id, &owner, &mint).unwrap().address
        );
    }
}
