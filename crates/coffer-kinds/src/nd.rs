//! Non-deterministic wallets
//!
//! Keys are generated independently at random, so the envelope carries no
//! key material of its own; accounts own theirs.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use coffer_types::{
    CofferError, Encryptor, Result, Store, Wallet, WalletEnvelope, WalletHandle, WalletKind,
};

use crate::support;

/// A non-deterministic wallet handle
pub struct NdWallet {
    envelope: WalletEnvelope,
    store: Arc<dyn Store>,
    encryptor: Arc<dyn Encryptor>,
}

impl NdWallet {
    fn from_envelope(
        envelope: WalletEnvelope,
        store: Arc<dyn Store>,
        encryptor: Arc<dyn Encryptor>,
    ) -> Result<Self> {
        if envelope.wallet_kind() != Some(WalletKind::NonDeterministic) {
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

    /// The encryptor protecting this wallet's material
    pub fn encryptor(&self) -> &dyn Encryptor {
        self.encryptor.as_ref()
    }
}

#[async_trait]
impl Wallet for NdWallet {
    fn id(&self) -> Uuid {
        self.envelope.id
    }

    fn name(&self) -> &str {
        &self.envelope.name
    }

    fn kind(&self) -> WalletKind {
        WalletKind::NonDeterministic
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
    let envelope = WalletEnvelope::new(name, WalletKind::NonDeterministic);
    store
        .save(envelope.id, &envelope.name, &envelope.to_bytes()?)
        .await?;
    tracing::debug!(name, id = %envelope.id, "created non-deterministic wallet");
    Ok(Box::new(NdWallet::from_envelope(envelope, store, encryptor)?))
}

/// Rebuild a handle from an already-parsed envelope record
pub async fn deserialize(
    envelope: WalletEnvelope,
    store: Arc<dyn Store>,
    encryptor: Arc<dyn Encryptor>,
) -> Result<WalletHandle> {
    Ok(Box::new(NdWallet::from_envelope(envelope, store, encryptor)?))
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
    Ok(Box::new(NdWallet::from_envelope(envelope, store, encryptor)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use coffer_encryptors::AeadEncryptor;
    use coffer_stores::MemoryStore;
    use serde_json::Value;

    fn plugins() -> (Arc<dyn Store>, Arc<dyn Encryptor>, MemoryStore) {
        let store = MemoryStore::new();
        (
            Arc::new(store.clone()),
            Arc::new(AeadEncryptor::new()),
            store,
        )
    }

    #[tokio::test]
    async fn test_create_persists_envelope() {
        let (store, encryptor, raw) = plugins();
        let wallet = create("Test", store.clone(), encryptor).await.unwrap();
        assert_eq!(wallet.name(), "Test");
        assert_eq!(wallet.kind(), WalletKind::NonDeterministic);
        assert_eq!(raw.len(), 1);

        let data = store.retrieve("Test").await.unwrap();
        let value: Value = serde_json::from_slice(&data).unwrap();
        assert_eq!(value["type"], "non-deterministic");
        assert_eq!(value["version"], 1);
    }

    #[tokio::test]
    async fn test_create_detects_collision() {
        let (store, encryptor, _) = plugins();
        create("Test", store.clone(), encryptor.clone())
            .await
            .unwrap();
        let err = create("Test", store, encryptor).await.unwrap_err();
        assert!(matches!(err, CofferError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_export_import_round_trip() {
        let (store, encryptor, _) = plugins();
        let wallet = create("Roaming", store, encryptor).await.unwrap();
        let blob = wallet.export(b"pass").await.unwrap();

        let (other_store, other_encryptor, raw) = plugins();
        let imported = import(&blob, b"pass", other_store, other_encryptor)
            .await
            .unwrap();
        assert_eq!(imported.name(), "Roaming");
        assert_eq!(imported.id(), wallet.id());
        assert_eq!(raw.len(), 1);
    }

    #[tokio::test]
    async fn test_deserialize_rejects_foreign_kind() {
        let (store, encryptor, _) = plugins();
        let envelope: WalletEnvelope = serde_json::from_str(
            r#"{"uuid":"e45d4f2c-00e9-44ee-98b3-ea12d4d937a9","name":"X","type":"distributed","version":1}"#,
        )
        .unwrap();
        let err = deserialize(envelope, store, encryptor).await.unwrap_err();
        assert!(matches!(err, CofferError::UnsupportedKind { .. }));
    }
}
