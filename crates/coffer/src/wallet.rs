//! Create and open operations

use std::future::Future;
use std::time::Duration;

use coffer_kinds::{distributed, hd, keystore, nd};
use coffer_types::{CofferError, Result, Store, WalletHandle, WalletKind};

use crate::codec;
use crate::options::WalletOptions;
use crate::registry::Coffer;

/// Upper bound on a single delegated kind call
pub(crate) const KIND_CALL_TIMEOUT: Duration = Duration::from_secs(15);

/// Kind tag used when creation does not select one
const DEFAULT_CREATE_KIND: &str = "nd";

/// Bound a delegated kind call; expiry surfaces as an error and is never
/// retried here
pub(crate) async fn bounded<F, T>(fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(KIND_CALL_TIMEOUT, fut).await {
        Ok(result) => result,
        Err(_) => Err(CofferError::Timeout {
            seconds: KIND_CALL_TIMEOUT.as_secs(),
        }),
    }
}

impl Coffer {
    /// Create a wallet
    ///
    /// The selected kind's constructor detects name collisions and persists
    /// the new envelope; creation defaults to the non-deterministic kind.
    pub async fn create_wallet(&self, name: &str, options: WalletOptions) -> Result<WalletHandle> {
        let resolved = options.resolve(self)?;
        let tag = resolved.kind.as_deref().unwrap_or(DEFAULT_CREATE_KIND);
        let kind = WalletKind::from_tag(tag).ok_or_else(|| CofferError::UnsupportedKind {
            kind: tag.to_string(),
        })?;
        tracing::debug!(name, kind = %kind, store = resolved.store.name(), "creating wallet");

        match kind {
            WalletKind::NonDeterministic => {
                bounded(nd::create(name, resolved.store, resolved.encryptor)).await
            }
            WalletKind::HierarchicalDeterministic => {
                let Some(seed) = resolved.seed.as_ref() else {
                    return Err(CofferError::NoSeed);
                };
                bounded(hd::create(
                    name,
                    resolved.passphrase_bytes(),
                    seed,
                    resolved.store.clone(),
                    resolved.encryptor.clone(),
                ))
                .await
            }
            WalletKind::Distributed => {
                bounded(distributed::create(name, resolved.store, resolved.encryptor)).await
            }
            WalletKind::Keystore => {
                bounded(keystore::create(name, resolved.store, resolved.encryptor)).await
            }
        }
    }

    /// Open an existing wallet
    ///
    /// An absent name surfaces the store's not-found error unmodified.
    pub async fn open_wallet(&self, name: &str, options: WalletOptions) -> Result<WalletHandle> {
        let resolved = options.resolve(self)?;
        let data = resolved.store.retrieve(name).await?;
        tracing::debug!(name, store = resolved.store.name(), "opening wallet");
        bounded(codec::decode_wallet(
            &data,
            resolved.store,
            resolved.encryptor,
        ))
        .await
    }
}
