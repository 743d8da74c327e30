//! Keystore wallets
//!
//! A single keystore file promoted to a wallet. The file's own crypto
//! section belongs to the account it holds; the wallet envelope is the
//! plain identifying record.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use coffer_types::{
    CofferError, Encryptor, Result, Store, Wallet, WalletEnvelope, WalletHandle, WalletKind,
};

use crate::support;

/// A keystore wallet handle
pub struct KeystoreWallet {
    envelope: WalletEnvelope,
    store: Arc<dyn Store>,
    encryptor: Arc<dyn Encryptor>,
}

impl KeystoreWallet {
    fn from_envelope(
        envelope: WalletEnvelope,
        store: Arc<dyn Store>,
        encryptor: Arc<dyn Encryptor>,
    ) -> Result<Self> {
        if envelope.wallet_kind() != Some(WalletKind::Keystore) {
            return Err(CofferError::UnsupportedKind {
                kind: envelope.kind,
            });
        }
        Ok(Self {
            envelope,
            store,
            encryptor,
        })
    }

    /// The store this wallet persists through
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }
}

#[async_trait]
impl Wallet for KeystoreWallet {
    fn id(&self) -> Uuid {
        self.envelope.id
    }

    fn name(&self) -> &str {
        &self.envelope.name
    }

    fn kind(&self) -> WalletKind {
        WalletKind::Keystore
    }

    async fn export(&self, passphrase: &[u8]) -> Result<Vec<u8>> {
        support::seal_export(
            serde_json::to_value(&self.envelope)?,
            passphrase,
            self.encryptor.as_ref(),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Create a wallet, failing if `name` is already taken in `store`
pub async fn create(
    name: &str,
    store: Arc<dyn Store>,
    encryptor: Arc<dyn Encryptor>,
) -> Result<WalletHandle> {
    support::ensure_absent(store.as_ref(), name).await?;
    let envelope = WalletEnvelope::new(name, WalletKind::Keystore);
    store
        .save(envelope.id, &envelope.name, &envelope.to_bytes()?)
        .await?;
    tracing::debug!(name, id = %envelope.id, "created keystore wallet");
    Ok(Box::new(KeystoreWallet::from_envelope(
        envelope, store, encryptor,
    )?))
}

/// Rebuild a handle from an already-parsed envelope record
pub async fn deserialize(
    envelope: WalletEnvelope,
    store: Arc<dyn Store>,
    encryptor: Arc<dyn Encryptor>,
) -> Result<WalletHandle> {
    Ok(Box::new(KeystoreWallet::from_envelope(
        envelope, store, encryptor,
    )?))
}

/// Import an exported wallet, persisting it into `store`
pub async fn import(
    blob: &[u8],
    passphrase: &[u8],
    store: Arc<dyn Store>,
    encryptor: Arc<dyn Encryptor>,
) -> Result<WalletHandle> {
    let envelope = support::unseal_export(blob, passphrase, encryptor.as_ref())?;
    support::ensure_absent(store.as_ref(), &envelope.name).await?;
    store
        .save(envelope.id, &envelope.name, &envelope.to_bytes()?)
        .await?;
    Ok(Box::new(KeystoreWallet::from_envelope(
        envelope, store, encryptor,
    )?))
}
