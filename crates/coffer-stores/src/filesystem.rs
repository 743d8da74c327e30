//! Wallet envelopes as JSON blobs on disk
//!
//! One file per wallet under a base directory. Filenames are
//! hex(SHA-256(name)) so arbitrary wallet names stay filesystem-safe. With
//! a passphrase set, blobs are wrapped in the AEAD container before they
//! touch disk.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_stream::stream;
use async_trait::async_trait;
use futures::stream::BoxStream;
use sha2::{Digest, Sha256};
use tokio::fs;
use uuid::Uuid;
use zeroize::Zeroizing;

use coffer_encryptors::AeadEncryptor;
use coffer_types::{CofferError, Encryptor, Result, Store};

/// Store keeping one JSON blob per wallet under a base directory
pub struct FilesystemStore {
    base: PathBuf,
    passphrase: Option<Zeroizing<Vec<u8>>>,
}

impl FilesystemStore {
    /// Create a store rooted at the default base directory, `$HOME/.coffer`
    pub fn new() -> Self {
        let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::with_base(home.join(".coffer"))
    }

    /// Create a store rooted at an explicit base directory
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            passphrase: None,
        }
    }

    /// Encrypt blobs at rest under `passphrase`
    pub fn with_passphrase(mut self, passphrase: &[u8]) -> Self {
        self.passphrase = Some(Zeroizing::new(passphrase.to_vec()));
        self
    }

    fn path_for(&self, name: &str) -> PathBuf {
        let digest = Sha256::digest(name.as_bytes());
        self.base.join(format!("{}.json", hex::encode(digest)))
    }

    fn seal(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self.passphrase_bytes() {
            Some(passphrase) => AeadEncryptor::new().encrypt(data, passphrase),
            None => Ok(data.to_vec()),
        }
    }

    fn passphrase_bytes(&self) -> Option<&[u8]> {
        self.passphrase.as_ref().map(|p| p.as_slice())
    }
}

impl Default for FilesystemStore {
    fn default() -> Self {
        Self::new()
    }
}

fn unseal(data: Vec<u8>, passphrase: Option<&[u8]>) -> Result<Vec<u8>> {
    match passphrase {
        Some(passphrase) => AeadEncryptor::new().decrypt(&data, passphrase),
        None => Ok(data),
    }
}

#[async_trait]
impl Store for FilesystemStore {
    fn name(&self) -> &str {
        "filesystem"
    }

    async fn save(&self, _id: Uuid, name: &str, data: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.base)
            .await
            .map_err(|e| CofferError::store(e.to_string()))?;
        let sealed = self.seal(data)?;
        fs::write(self.path_for(name), sealed)
            .await
            .map_err(|e| CofferError::store(e.to_string()))
    }

    async fn retrieve(&self, name: &str) -> Result<Vec<u8>> {
        match fs::read(self.path_for(name)).await {
            Ok(data) => unseal(data, self.passphrase_bytes()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(CofferError::not_found(name)),
            Err(e) => Err(CofferError::store(e.to_string())),
        }
    }

    fn stream_all(&self) -> BoxStream<'static, Vec<u8>> {
        let base = self.base.clone();
        let passphrase = self.passphrase.clone();
        Box::pin(stream! {
            let mut entries = match fs::read_dir(&base).await {
                Ok(entries) => entries,
                // A base directory that was never written to is an empty store.
                Err(_) => return,
            };
            while let Ok(Some(entry)) = entries.next_entry().await {
                let path = entry.path();
                if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                    continue;
                }
                let data = match fs::read(&path).await {
                    Ok(data) => data,
                    Err(e) => {
                        tracing::debug!(path = %path.display(), error = %e, "skipping unreadable wallet file");
                        continue;
                    }
                };
                match unseal(data, passphrase.as_ref().map(|p| p.as_slice())) {
                    Ok(data) => yield data,
                    Err(e) => {
                        tracing::debug!(path = %path.display(), error = %e, "skipping unsealable wallet file");
                    }
                }
            }
        })
    }
}
