//! Per-call configuration
//!
//! A plain record with named fields: each setter replaces any earlier value,
//! and resolution against the registry happens once, at call time. The kind
//! stays a raw tag string here; it is canonicalized exactly once, at the
//! dispatch boundary.

use std::sync::Arc;

use zeroize::Zeroizing;

use coffer_types::{CofferError, Encryptor, Result, Store};

use crate::registry::Coffer;

/// Per-call overrides for wallet operations
///
/// Unset fields fall back to the [`Coffer`] the operation is invoked on.
#[derive(Clone, Default)]
pub struct WalletOptions {
    store: Option<Arc<dyn Store>>,
    encryptor: Option<Arc<dyn Encryptor>>,
    kind: Option<String>,
    passphrase: Option<Zeroizing<Vec<u8>>>,
    seed: Option<Zeroizing<Vec<u8>>>,
}

impl WalletOptions {
    /// Options with every field deferring to the registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `store` instead of the registry's active store
    pub fn with_store(mut self, store: Arc<dyn Store>) -> Self {
        self.store = Some(store);
        self
    }

    /// Use `encryptor` instead of the registry's active encryptor
    pub fn with_encryptor(mut self, encryptor: Arc<dyn Encryptor>) -> Self {
        self.encryptor = Some(encryptor);
        self
    }

    /// Select the wallet kind by tag; short and long aliases are accepted
    pub fn with_kind(mut self, tag: impl Into<String>) -> Self {
        self.kind = Some(tag.into());
        self
    }

    /// Passphrase for kind operations that protect key material
    pub fn with_passphrase(mut self, passphrase: &[u8]) -> Self {
        self.passphrase = Some(Zeroizing::new(passphrase.to_vec()));
        self
    }

    /// Seed for hierarchical-deterministic creation
    pub fn with_seed(mut self, seed: &[u8]) -> Self {
        self.seed = Some(Zeroizing::new(seed.to_vec()));
        self
    }

    /// Resolve against `coffer`, validating that a store and encryptor are
    /// present
    pub(crate) fn resolve(self, coffer: &Coffer) -> Result<ResolvedOptions> {
        let store = self
            .store
            .or_else(|| coffer.active_store())
            .ok_or(CofferError::NoStore)?;
        let encryptor = self
            .encryptor
            .or_else(|| coffer.active_encryptor())
            .ok_or(CofferError::NoEncryptor)?;
        Ok(ResolvedOptions {
            store,
            encryptor,
            kind: self.kind,
            passphrase: self.passphrase,
            seed: self.seed,
        })
    }
}

/// Options after registry fallback and presence validation
pub(crate) struct ResolvedOptions {
    pub(crate) store: Arc<dyn Store>,
    pub(crate) encryptor: Arc<dyn Encryptor>,
    pub(crate) kind: Option<String>,
    pub(crate) passphrase: Option<Zeroizing<Vec<u8>>>,
    pub(crate) seed: Option<Zeroizing<Vec<u8>>>,
}

impl std::fmt::Debug for ResolvedOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedOptions")
            .field("kind", &self.kind)
            .field("has_passphrase", &self.passphrase.is_some())
            .field("has_seed", &self.seed.is_some())
            .finish()
    }
}

impl ResolvedOptions {
    pub(crate) fn passphrase_bytes(&self) -> &[u8] {
        self.passphrase.as_ref().map(|p| p.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coffer_encryptors::AeadEncryptor;
    use coffer_stores::MemoryStore;

    #[test]
    fn test_resolution_falls_back_to_registry() {
        let coffer = Coffer::with_plugins(
            Arc::new(MemoryStore::new()),
            Arc::new(AeadEncryptor::new()),
        );
        let resolved = WalletOptions::new().resolve(&coffer).unwrap();
        assert_eq!(resolved.store.name(), "memory");
        assert_eq!(resolved.encryptor.name(), "aead");
    }

    #[test]
    fn test_empty_registry_fails_validation() {
        let coffer = Coffer::new();
        let err = WalletOptions::new().resolve(&coffer).unwrap_err();
        assert!(matches!(err, CofferError::NoStore));

        let err = WalletOptions::new()
            .with_store(Arc::new(MemoryStore::new()))
            .resolve(&coffer)
            .unwrap_err();
        assert!(matches!(err, CofferError::NoEncryptor));
    }

    #[test]
    fn test_later_setter_wins() {
        let coffer = Coffer::new();
        let resolved = WalletOptions::new()
            .with_store(Arc::new(MemoryStore::new()))
            .with_encryptor(Arc::new(AeadEncryptor::new()))
            .with_kind("nd")
            .with_kind("hd")
            .resolve(&coffer)
            .unwrap();
        assert_eq!(resolved.kind.as_deref(), Some("hd"));
    }
}
