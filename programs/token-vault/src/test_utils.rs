use anchor_lang::error::Error;

use crate::errors::VaultError;

/// Assert that `res` failed with exactly `expected`.
pub fn assert_vault_error<T: std::fmt::Debug>(res: anchor_lang::Result<T>, expected: VaultError) {
    match res {
        Err(Error::AnchorError(err)) => assert_eq!(
            err.error_code_number,
            u32::from(expected),
            "expected {}, got {}",
            expected,
            err.error_name
        ),
        other => panic!("expected {}, got {:?}", expected, other),
    }
}
