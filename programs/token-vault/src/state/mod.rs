//! # State Module
//!
//! Account structures stored on-chain, plus the address derivation that
//! ties them together.
//!
//! ```text
//! VaultState (PDA: ["vault-state", owner, mint])
//!     │ records
//!     ▼
//! Custody token account (PDA: ["custody", vault_state])
//!     │ SPL authority
//!     ▼
//! Vault authority (PDA: ["vault", owner, mint], no data, no private key)
//! ```

pub mod vault_authority;
pub mod vault_state;

pub use vault_authority::*;
pub use vault_state::*;
