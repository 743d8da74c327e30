//! Export/import round trips through the facade

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use coffer::{Coffer, CofferError, Encryptor, Wallet, WalletKind, WalletOptions};
use coffer_encryptors::AeadEncryptor;
use coffer_stores::MemoryStore;

const SEED: [u8; 64] = [0u8; 64];

fn test_coffer() -> (Coffer, MemoryStore) {
    let store = MemoryStore::new();
    let coffer = Coffer::with_plugins(Arc::new(store.clone()), Arc::new(AeadEncryptor::new()));
    (coffer, store)
}

fn create_options(kind: WalletKind) -> WalletOptions {
    let options = WalletOptions::new().with_kind(kind.as_tag());
    match kind {
        WalletKind::HierarchicalDeterministic => {
            options.with_passphrase(b"secret").with_seed(&SEED)
        }
        _ => options,
    }
}

#[tokio::test]
async fn test_round_trip_every_kind() {
    for kind in WalletKind::ALL {
        let (source, _) = test_coffer();
        let wallet = source
            .create_wallet("Roaming", create_options(kind))
            .await
            .unwrap();
        let blob = wallet.export(b"pass").await.unwrap();

        let (target, target_store) = test_coffer();
        let imported = target
            .import_wallet(&blob, b"pass", WalletOptions::new())
            .await
            .unwrap();
        assert_eq!(imported.kind(), kind, "kind {kind} did not survive");
        assert_eq!(imported.name(), "Roaming");
        assert_eq!(imported.id(), wallet.id());
        assert_eq!(target_store.len(), 1);

        let opened = target
            .open_wallet("Roaming", WalletOptions::new())
            .await
            .unwrap();
        assert_eq!(opened.kind(), kind);
    }
}

#[tokio::test]
async fn test_wrong_passphrase_creates_no_entry() {
    let (source, _) = test_coffer();
    let wallet = source
        .create_wallet("Sealed", WalletOptions::new())
        .await
        .unwrap();
    let blob = wallet.export(b"pass").await.unwrap();

    let (target, target_store) = test_coffer();
    let err = target
        .import_wallet(&blob, b"incorrect", WalletOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, CofferError::Decrypt { .. }));
    assert!(err.to_string().starts_with("failed to decrypt wallet: "));
    assert!(target_store.is_empty());
}

#[tokio::test]
async fn test_truncated_blob_is_a_decrypt_error() {
    let (coffer, _) = test_coffer();
    let err = coffer
        .import_wallet(b"short", b"pass", WalletOptions::new())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to decrypt wallet: encrypted data must be at least 45 bytes"
    );
}

#[tokio::test]
async fn test_unknown_kind_tag_in_export_is_named() {
    let (coffer, store) = test_coffer();
    let wrapper = json!({
        "wallet": {
            "uuid": Uuid::new_v4(),
            "name": "Odd",
            "type": "unknown",
            "version": 1,
        }
    });
    let blob = AeadEncryptor::new()
        .encrypt(&serde_json::to_vec(&wrapper).unwrap(), b"pass")
        .unwrap();

    let err = coffer
        .import_wallet(&blob, b"pass", WalletOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "unsupported wallet type \"unknown\"");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_missing_wrapper_is_an_import_error() {
    let (coffer, _) = test_coffer();
    // A bare envelope without the {"wallet": ...} framing.
    let bare = json!({
        "uuid": Uuid::new_v4(),
        "name": "Bare",
        "type": "non-deterministic",
        "version": 1,
    });
    let blob = AeadEncryptor::new()
        .encrypt(&serde_json::to_vec(&bare).unwrap(), b"pass")
        .unwrap();

    let err = coffer
        .import_wallet(&blob, b"pass", WalletOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, CofferError::Import { .. }));
    assert!(err.to_string().starts_with("failed to import wallet: "));
}

#[tokio::test]
async fn test_import_collides_with_existing_name() {
    let (coffer, _) = test_coffer();
    let wallet = coffer
        .create_wallet("Resident", WalletOptions::new())
        .await
        .unwrap();
    let blob = wallet.export(b"pass").await.unwrap();

    let err = coffer
        .import_wallet(&blob, b"pass", WalletOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, CofferError::AlreadyExists { .. }));
}
