//! Envelope decoding and kind dispatch
//!
//! Raw bytes are parsed exactly once into the generic envelope record; the
//! `type` tag selects the kind-specific deserializer, which decodes its
//! payload from the already-parsed record.

use std::sync::Arc;

use coffer_kinds::{distributed, hd, keystore, nd};
use coffer_types::{CofferError, Encryptor, Result, Store, WalletEnvelope, WalletHandle, WalletKind};

/// Decode one stored envelope into a wallet handle
pub(crate) async fn decode_wallet(
    data: &[u8],
    store: Arc<dyn Store>,
    encryptor: Arc<dyn Encryptor>,
) -> Result<WalletHandle> {
    let envelope: WalletEnvelope = serde_json::from_slice(data)?;
    dispatch_envelope(envelope, store, encryptor).await
}

/// Dispatch an already-parsed envelope to its kind's deserializer
pub(crate) async fn dispatch_envelope(
    envelope: WalletEnvelope,
    store: Arc<dyn Store>,
    encryptor: Arc<dyn Encryptor>,
) -> Result<WalletHandle> {
    match kind_of(&envelope)? {
        WalletKind::NonDeterministic => nd::deserialize(envelope, store, encryptor).await,
        WalletKind::HierarchicalDeterministic => hd::deserialize(envelope, store, encryptor).await,
        WalletKind::Distributed => distributed::deserialize(envelope, store, encryptor).await,
        WalletKind::Keystore => keystore::deserialize(envelope, store, encryptor).await,
    }
}

/// Canonicalize an envelope's `type` tag
pub(crate) fn kind_of(envelope: &WalletEnvelope) -> Result<WalletKind> {
    envelope
        .wallet_kind()
        .ok_or_else(|| CofferError::UnsupportedKind {
            kind: envelope.kind.clone(),
        })
}
