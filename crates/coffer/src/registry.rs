//! The plugin registry
//!
//! A [`Coffer`] owns the active store and encryptor and is threaded through
//! every operation explicitly. Plugin swaps take `&mut self`, so a caller
//! cannot race a swap against an in-flight operation without the borrow
//! checker objecting.

use std::sync::Arc;

use coffer_encryptors::AeadEncryptor;
use coffer_stores::{FilesystemStore, MemoryStore};
use coffer_types::{CofferError, Encryptor, Result, Store};

/// The wallet registry: active plugins plus the operations dispatched
/// through them
pub struct Coffer {
    store: Option<Arc<dyn Store>>,
    encryptor: Option<Arc<dyn Encryptor>>,
}

impl Coffer {
    /// An empty registry with no active plugins
    ///
    /// Operations on an empty registry fail validation until a store and
    /// encryptor are installed.
    pub fn new() -> Self {
        Self {
            store: None,
            encryptor: None,
        }
    }

    /// A registry with explicit plugins installed
    pub fn with_plugins(store: Arc<dyn Store>, encryptor: Arc<dyn Encryptor>) -> Self {
        Self {
            store: Some(store),
            encryptor: Some(encryptor),
        }
    }

    /// Install a store, leaving the previous one active on failure
    pub fn use_store(&mut self, store: Option<Arc<dyn Store>>) -> Result<()> {
        match store {
            Some(store) => {
                tracing::debug!(store = store.name(), "installing store");
                self.store = Some(store);
                Ok(())
            }
            None => Err(CofferError::NoStore),
        }
    }

    /// Install an encryptor, leaving the previous one active on failure
    pub fn use_encryptor(&mut self, encryptor: Option<Arc<dyn Encryptor>>) -> Result<()> {
        match encryptor {
            Some(encryptor) => {
                tracing::debug!(encryptor = encryptor.name(), "installing encryptor");
                self.encryptor = Some(encryptor);
                Ok(())
            }
            None => Err(CofferError::NoEncryptor),
        }
    }

    /// Build and install one of the named store kinds
    ///
    /// Recognized names are `"filesystem"` (the passphrase, when non-empty,
    /// encrypts blobs at rest) and `"memory"`. Advanced store configuration
    /// goes through [`use_store`](Self::use_store) instead.
    pub fn set_store(&mut self, name: &str, passphrase: &[u8]) -> Result<()> {
        let store: Arc<dyn Store> = match name {
            "filesystem" => {
                let store = FilesystemStore::new();
                if passphrase.is_empty() {
                    Arc::new(store)
                } else {
                    Arc::new(store.with_passphrase(passphrase))
                }
            }
            "memory" => Arc::new(MemoryStore::new()),
            _ => {
                return Err(CofferError::UnknownStore {
                    name: name.to_string(),
                })
            }
        };
        self.use_store(Some(store))
    }

    /// Name of the active store, for diagnostics
    pub fn store_name(&self) -> Option<&str> {
        self.store.as_deref().map(Store::name)
    }

    /// Name of the active encryptor, for diagnostics
    pub fn encryptor_name(&self) -> Option<&str> {
        self.encryptor.as_deref().map(Encryptor::name)
    }

    pub(crate) fn active_store(&self) -> Option<Arc<dyn Store>> {
        self.store.clone()
    }

    pub(crate) fn active_encryptor(&self) -> Option<Arc<dyn Encryptor>> {
        self.encryptor.clone()
    }
}

impl Default for Coffer {
    /// The conventional setup: filesystem store, AEAD encryptor
    fn default() -> Self {
        Self::with_plugins(
            Arc::new(FilesystemStore::new()),
            Arc::new(AeadEncryptor::new()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use_store_none_keeps_prior_plugin() {
        let mut coffer = Coffer::new();
        coffer
            .use_store(Some(Arc::new(MemoryStore::new())))
            .unwrap();
        assert_eq!(coffer.store_name(), Some("memory"));

        let err = coffer.use_store(None).unwrap_err();
        assert!(matches!(err, CofferError::NoStore));
        assert_eq!(coffer.store_name(), Some("memory"));
    }

    #[test]
    fn test_use_encryptor_none_keeps_prior_plugin() {
        let mut coffer = Coffer::default();
        let err = coffer.use_encryptor(None).unwrap_err();
        assert!(matches!(err, CofferError::NoEncryptor));
        assert_eq!(coffer.encryptor_name(), Some("aead"));
    }

    #[test]
    fn test_set_store_named_kinds() {
        let mut coffer = Coffer::new();
        coffer.set_store("memory", b"").unwrap();
        assert_eq!(coffer.store_name(), Some("memory"));

        let err = coffer.set_store("s3", b"").unwrap_err();
        assert_eq!(err.to_string(), "unknown wallet store \"s3\"");
        // The failed install left the previous store active.
        assert_eq!(coffer.store_name(), Some("memory"));
    }
}
