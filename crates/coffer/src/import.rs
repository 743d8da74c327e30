//! Decrypt-then-dispatch wallet import

use coffer_kinds::{distributed, hd, keystore, nd};
use coffer_types::{
    CofferError, Encryptor, Result, Store, WalletEnvelope, WalletExport, WalletHandle, WalletKind,
};

use crate::codec;
use crate::options::WalletOptions;
use crate::registry::Coffer;
use crate::wallet::bounded;

impl Coffer {
    /// Import a wallet from its encrypted export
    ///
    /// The blob is decrypted here only to discover the wallet's kind; the
    /// kind's own import routine re-derives key material from the original
    /// blob and persists the envelope into the resolved store.
    pub async fn import_wallet(
        &self,
        blob: &[u8],
        passphrase: &[u8],
        options: WalletOptions,
    ) -> Result<WalletHandle> {
        let resolved = options.resolve(self)?;
        let plain = resolved
            .encryptor
            .decrypt(blob, passphrase)
            .map_err(|e| CofferError::decrypt(e.to_string()))?;
        let wrapper: WalletExport =
            serde_json::from_slice(&plain).map_err(|e| CofferError::import(e.to_string()))?;
        let envelope: WalletEnvelope = serde_json::from_value(wrapper.wallet)
            .map_err(|e| CofferError::import(e.to_string()))?;
        let kind = codec::kind_of(&envelope)?;
        tracing::debug!(kind = %kind, store = resolved.store.name(), "importing wallet");

        match kind {
            WalletKind::NonDeterministic => {
                bounded(nd::import(
                    blob,
                    passphrase,
                    resolved.store,
                    resolved.encryptor,
                ))
                .await
            }
            WalletKind::HierarchicalDeterministic => {
                bounded(hd::import(
                    blob,
                    passphrase,
                    resolved.store,
                    resolved.encryptor,
                ))
                .await
            }
            WalletKind::Distributed => {
                bounded(distributed::import(
                    blob,
                    passphrase,
                    resolved.store,
                    resolved.encryptor,
                ))
                .await
            }
            WalletKind::Keystore => {
                bounded(keystore::import(
                    blob,
                    passphrase,
                    resolved.store,
                    resolved.encryptor,
                ))
                .await
            }
        }
    }
}
