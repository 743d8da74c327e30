//! Shared plumbing for the kind modules

use serde_json::Value;

use coffer_types::{CofferError, Encryptor, Result, Store, WalletEnvelope, WalletExport};

/// Fail with `AlreadyExists` when `name` is taken in `store`
pub(crate) async fn ensure_absent(store: &dyn Store, name: &str) -> Result<()> {
    match store.retrieve(name).await {
        Ok(_) => Err(CofferError::AlreadyExists {
            name: name.to_string(),
        }),
        Err(CofferError::NotFound { .. }) => Ok(()),
        Err(e) => Err(e),
    }
}

/// Seal an envelope record into the encrypted `{"wallet": ...}` export blob
pub(crate) fn seal_export(
    record: Value,
    passphrase: &[u8],
    encryptor: &dyn Encryptor,
) -> Result<Vec<u8>> {
    let wrapper = WalletExport { wallet: record };
    let plain = serde_json::to_vec(&wrapper)?;
    encryptor.encrypt(&plain, passphrase)
}

/// Open an export blob and hand back the wrapped envelope record
pub(crate) fn unseal_export(
    blob: &[u8],
    passphrase: &[u8],
    encryptor: &dyn Encryptor,
) -> Result<WalletEnvelope> {
    let plain = encryptor
        .decrypt(blob, passphrase)
        .map_err(|e| CofferError::decrypt(e.to_string()))?;
    let wrapper: WalletExport =
        serde_json::from_slice(&plain).map_err(|e| CofferError::import(e.to_string()))?;
    serde_json::from_value(wrapper.wallet).map_err(|e| CofferError::import(e.to_string()))
}
