//! Share password helpers
//!
//! Share passwords are six ASCII digits, or empty for an open share.

use rand::Rng;

use crate::error::{CoreError, CoreResult};

/// Share password length
pub const SHARE_PASSWORD_LEN: usize = 6;

/// Random six-digit password
pub fn generate_share_password() -> String {
    let mut rng = rand::rng();
    (0..SHARE_PASSWORD_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Accepts an empty password or exactly six ASCII digits.
pub fn validate_share_password(password: &str) -> CoreResult<()> {
    if password.is_empty()
        || (password.len() == SHARE_PASSWORD_LEN && password.bytes().all(|b| b.is_ascii_digit()))
    {
        Ok(())
    } else {
        Err(CoreError::ValidationError(format!(
            "Share password must be {SHARE_PASSWORD_LEN} digits"
        )))
    }
}

/// Left-pads a stored password with zeros to six characters for display,
/// truncating anything longer. Empty stays empty.
pub fn pad_share_password(password: &str) -> String {
    if password.is_empty() {
        return String::new();
    }
    format!("{password:0>width$}", width = SHARE_PASSWORD_LEN)
        .chars()
        .take(SHARE_PASSWORD_LEN)
        .collect()
}
