//! Facade-level create/open behavior

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::BoxStream;
use uuid::Uuid;

use coffer::{Coffer, CofferError, Result, Store, Wallet, WalletKind, WalletOptions};
use coffer_encryptors::AeadEncryptor;
use coffer_kinds::HdWallet;
use coffer_stores::{FilesystemStore, MemoryStore};

const SEED: [u8; 64] = [0u8; 64];

fn test_coffer() -> (Coffer, MemoryStore) {
    let store = MemoryStore::new();
    let coffer = Coffer::with_plugins(Arc::new(store.clone()), Arc::new(AeadEncryptor::new()));
    (coffer, store)
}

#[tokio::test]
async fn test_create_defaults_to_non_deterministic() {
    let (coffer, _) = test_coffer();
    let wallet = coffer
        .create_wallet("Default", WalletOptions::new())
        .await
        .unwrap();
    assert_eq!(wallet.name(), "Default");
    assert_eq!(wallet.kind(), WalletKind::NonDeterministic);
}

#[tokio::test]
async fn test_create_accepts_both_aliases_per_kind() {
    let (coffer, _) = test_coffer();
    let cases = [
        ("nd", WalletKind::NonDeterministic),
        ("non-deterministic", WalletKind::NonDeterministic),
        ("distributed", WalletKind::Distributed),
        ("keystore", WalletKind::Keystore),
    ];
    for (i, (tag, kind)) in cases.into_iter().enumerate() {
        let wallet = coffer
            .create_wallet(&format!("Wallet{i}"), WalletOptions::new().with_kind(tag))
            .await
            .unwrap();
        assert_eq!(wallet.kind(), kind);
    }

    for (i, tag) in ["hd", "hierarchical deterministic"].into_iter().enumerate() {
        let wallet = coffer
            .create_wallet(
                &format!("Hd{i}"),
                WalletOptions::new()
                    .with_kind(tag)
                    .with_passphrase(b"secret")
                    .with_seed(&SEED),
            )
            .await
            .unwrap();
        assert_eq!(wallet.kind(), WalletKind::HierarchicalDeterministic);
    }
}

#[tokio::test]
async fn test_create_hd_without_seed_fails() {
    let (coffer, store) = test_coffer();
    let err = coffer
        .create_wallet(
            "Seedless",
            WalletOptions::new()
                .with_kind("hd")
                .with_passphrase(b"secret"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "no seed specified");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_create_unknown_kind_leaves_store_unmodified() {
    let (coffer, store) = test_coffer();
    let err = coffer
        .create_wallet("Odd", WalletOptions::new().with_kind("unknown"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "unsupported wallet type \"unknown\"");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_create_on_empty_registry_fails_validation() {
    let coffer = Coffer::new();
    let err = coffer
        .create_wallet("NoPlugins", WalletOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, CofferError::NoStore));

    let err = coffer
        .create_wallet(
            "StoreOnly",
            WalletOptions::new().with_store(Arc::new(MemoryStore::new())),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CofferError::NoEncryptor));
}

#[tokio::test]
async fn test_create_duplicate_name_fails() {
    let (coffer, _) = test_coffer();
    coffer
        .create_wallet("Taken", WalletOptions::new())
        .await
        .unwrap();
    let err = coffer
        .create_wallet("Taken", WalletOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, CofferError::AlreadyExists { .. }));
}

#[tokio::test]
async fn test_open_returns_the_created_wallet() {
    let (coffer, _) = test_coffer();
    let created = coffer
        .create_wallet(
            "Primary",
            WalletOptions::new()
                .with_kind("hd")
                .with_passphrase(b"secret")
                .with_seed(&SEED),
        )
        .await
        .unwrap();

    let opened = coffer
        .open_wallet("Primary", WalletOptions::new())
        .await
        .unwrap();
    assert_eq!(opened.name(), "Primary");
    assert_eq!(opened.kind(), WalletKind::HierarchicalDeterministic);
    assert_eq!(opened.id(), created.id());

    let hd = opened.as_any().downcast_ref::<HdWallet>().unwrap();
    assert_eq!(hd.next_account(), 0);
    assert_eq!(hd.seed(b"secret").unwrap().as_slice(), SEED);
}

#[tokio::test]
async fn test_open_missing_wallet_surfaces_not_found() {
    let (coffer, _) = test_coffer();
    let err = coffer
        .open_wallet("Absent", WalletOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "wallet \"Absent\" not found");
}

#[tokio::test]
async fn test_options_override_the_registry_store() {
    let (coffer, registry_store) = test_coffer();
    let other = MemoryStore::new();
    coffer
        .create_wallet(
            "Elsewhere",
            WalletOptions::new().with_store(Arc::new(other.clone())),
        )
        .await
        .unwrap();
    assert!(registry_store.is_empty());
    assert_eq!(other.len(), 1);
}

#[tokio::test]
async fn test_concurrent_creates_are_independently_retrievable() {
    let (coffer, _) = test_coffer();
    let (a, b) = tokio::join!(
        coffer.create_wallet("Alpha", WalletOptions::new()),
        coffer.create_wallet("Beta", WalletOptions::new()),
    );
    a.unwrap();
    b.unwrap();

    for name in ["Alpha", "Beta"] {
        let wallet = coffer.open_wallet(name, WalletOptions::new()).await.unwrap();
        assert_eq!(wallet.name(), name);
    }
}

#[tokio::test]
async fn test_filesystem_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let coffer = Coffer::with_plugins(
        Arc::new(FilesystemStore::with_base(dir.path())),
        Arc::new(AeadEncryptor::new()),
    );
    coffer
        .create_wallet("OnDisk", WalletOptions::new())
        .await
        .unwrap();
    let opened = coffer
        .open_wallet("OnDisk", WalletOptions::new())
        .await
        .unwrap();
    assert_eq!(opened.name(), "OnDisk");
    assert_eq!(opened.kind(), WalletKind::NonDeterministic);
}

/// Store whose calls never complete in real time
struct StalledStore;

#[async_trait]
impl Store for StalledStore {
    fn name(&self) -> &str {
        "stalled"
    }

    async fn save(&self, _id: Uuid, _name: &str, _data: &[u8]) -> Result<()> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }

    async fn retrieve(&self, name: &str) -> Result<Vec<u8>> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(CofferError::not_found(name))
    }

    fn stream_all(&self) -> BoxStream<'static, Vec<u8>> {
        Box::pin(futures::stream::empty())
    }
}

#[tokio::test(start_paused = true)]
async fn test_slow_kind_call_surfaces_timeout() {
    let coffer = Coffer::with_plugins(Arc::new(StalledStore), Arc::new(AeadEncryptor::new()));
    let err = coffer
        .create_wallet("Stuck", WalletOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, CofferError::Timeout { .. }));
}
