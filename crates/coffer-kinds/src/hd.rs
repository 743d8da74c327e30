//! Hierarchical-deterministic wallets
//!
//! The envelope carries the seed, wrapped by the injected encryptor and
//! hex-coded into the `crypto` field, plus the `nextaccount` counter for
//! indexed derivation. Path walking itself happens at account level, not
//! here.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use coffer_types::{
    CofferError, Encryptor, Result, Store, Wallet, WalletEnvelope, WalletHandle, WalletKind,
    ENVELOPE_VERSION,
};

use crate::support;

/// Stored envelope for a hierarchical-deterministic wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HdRecord {
    #[serde(rename = "uuid")]
    id: Uuid,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    version: u32,
    /// Hex of the encryptor-wrapped seed
    crypto: String,
    /// Index the next derived account will use
    nextaccount: u32,
}

/// A hierarchical-deterministic wallet handle
pub struct HdWallet {
    record: HdRecord,
    store: Arc<dyn Store>,
    encryptor: Arc<dyn Encryptor>,
}

impl HdWallet {
    fn from_record(
        record: HdRecord,
        store: Arc<dyn Store>,
        encryptor: Arc<dyn Encryptor>,
    ) -> Result<Self> {
        if WalletKind::from_tag(&record.kind) != Some(WalletKind::HierarchicalDeterministic) {
            return Err(CofferError::UnsupportedKind { kind: record.kind });
        }
        Ok(Self {
            record,
            store,
            encryptor,
        })
    }

    /// Index the next derived account will use
    pub fn next_account(&self) -> u32 {
        self.record.nextaccount
    }

    /// Recover the seed by unwrapping the `crypto` field with `passphrase`
    pub fn seed(&self, passphrase: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let sealed = hex::decode(&self.record.crypto)
            .map_err(|e| CofferError::decode(format!("bad crypto field: {e}")))?;
        let seed = self
            .encryptor
            .decrypt(&sealed, passphrase)
            .map_err(|e| CofferError::decrypt(e.to_string()))?;
        Ok(Zeroizing::new(seed))
    }

    /// The store this wallet persists through
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }
}

#[async_trait]
impl Wallet for HdWallet {
    fn id(&self) -> Uuid {
        self.record.id
    }

    fn name(&self) -> &str {
        &self.record.name
    }

    fn kind(&self) -> WalletKind {
        WalletKind::HierarchicalDeterministic
    }

    async fn export(&self, passphrase: &[u8]) -> Result<Vec<u8>> {
        support::seal_export(
            serde_json::to_value(&self.record)?,
            passphrase,
            self.encryptor.as_ref(),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Create a wallet from `seed`, failing if `name` is already taken
///
/// The seed is wrapped under `passphrase` by the injected encryptor before
/// it is persisted; the plaintext seed never reaches the store.
pub async fn create(
    name: &str,
    passphrase: &[u8],
    seed: &[u8],
    store: Arc<dyn Store>,
    encryptor: Arc<dyn Encryptor>,
) -> Result<WalletHandle> {
    support::ensure_absent(store.as_ref(), name).await?;
    let sealed = encryptor.encrypt(seed, passphrase)?;
    let record = HdRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
        kind: WalletKind::HierarchicalDeterministic.as_tag().to_string(),
        version: ENVELOPE_VERSION,
        crypto: hex::encode(sealed),
        nextaccount: 0,
    };
    store
        .save(record.id, &record.name, &serde_json::to_vec(&record)?)
        .await?;
    tracing::debug!(name, id = %record.id, "created hierarchical-deterministic wallet");
    Ok(Box::new(HdWallet::from_record(record, store, encryptor)?))
}

/// Rebuild a handle from an already-parsed envelope record
pub async fn deserialize(
    envelope: WalletEnvelope,
    store: Arc<dyn Store>,
    encryptor: Arc<dyn Encryptor>,
) -> Result<WalletHandle> {
    let record: HdRecord = envelope.decode_as()?;
    Ok(Box::new(HdWallet::from_record(record, store, encryptor)?))
}

/// Import an exported wallet, persisting it into `store`
///
/// The wrapped seed travels inside the envelope, so the re-persisted wallet
/// can derive again under the same passphrase.
pub async fn import(
    blob: &[u8],
    passphrase: &[u8],
    store: Arc<dyn Store>,
    encryptor: Arc<dyn Encryptor>,
) -> Result<WalletHandle> {
    let envelope = support::unseal_export(blob, passphrase, encryptor.as_ref())?;
    let record: HdRecord = envelope.decode_as()?;
    support::ensure_absent(store.as_ref(), &record.name).await?;
    store
        .save(record.id, &record.name, &serde_json::to_vec(&record)?)
        .await?;
    Ok(Box::new(HdWallet::from_record(record, store, encryptor)?))
}
