//! # Instructions Module
//!
//! ## Available Instructions:
//!
//! | Instruction | Who Can Call | Description |
//! |-------------|--------------|-------------|
//! | `initialize_vault` | Any user | Create the ledger and custody account (once per mint) |
//! | `deposit_tokens` | Any token holder | Move tokens into custody |
//! | `withdraw_tokens` | Vault owner | Move tokens out of custody after the lock window |
//! | `close_vault` | Vault owner | Close a vault with an empty ledger and reclaim rent |
//! | `get_vault_state` | Anyone (simulation) | Read the ledger and custody balance |
//!
//! ## Instruction Flow:
//!
//! ```text
//! 1. Owner creates vault:     initialize_vault
//!                                   ↓
//! 2. Tokens are locked:       deposit_tokens (any number of times)
//!                                   ↓
//! 3. Lock window passes:      withdraw_tokens (any number of times)
//!                                   ↓
//! 4. Optional teardown:       close_vault (amount_locked == 0)
//! ```

pub mod close_vault;
pub mod deposit_tokens;
pub mod get_vault_state;
pub mod initialize_vault;
pub mod withdraw_tokens;

pub use close_vault::*;
pub use deposit_tokens::*;
pub use get_vault_state::*;
pub use initialize_vault::*;
pub use withdraw_tokens::*;
