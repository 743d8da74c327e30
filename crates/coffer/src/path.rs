//! Wallet/account path handling

use coffer_types::{CofferError, Result};

/// Split a combined `wallet/account` identifier
///
/// The account is everything after the first `/`, verbatim, so it may
/// itself contain separators; a single trailing separator is dropped.
/// Empty input or a leading separator is an invalid format.
pub fn split_wallet_account(path: &str) -> Result<(&str, &str)> {
    if path.is_empty() {
        return Err(CofferError::InvalidPath);
    }
    match path.find('/') {
        None => Ok((path, "")),
        Some(0) => Err(CofferError::InvalidPath),
        Some(index) => Ok((&path[..index], &path[index + 1..])),
    }
}
