//! Passphrase AEAD container
//!
//! # Container layout
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  -----
//!   0       1   Container version: 0x01
//!   1      16   Argon2id salt
//!  17      12   ChaCha20-Poly1305 nonce
//!  29     var   Ciphertext + 16-byte Poly1305 tag
//! ```
//!
//! The version byte and minimum length are checked before any key
//! derivation, so truncated input fails fast.

use argon2::{Algorithm, Argon2, Params, Version};
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Nonce};
use rand::RngCore;
use zeroize::Zeroizing;

use coffer_types::{CofferError, Encryptor, Result};

/// Container format version marker
const CONTAINER_VERSION: u8 = 1;

/// Argon2id salt length in bytes
const SALT_LEN: usize = 16;

/// ChaCha20-Poly1305 nonce length in bytes
const NONCE_LEN: usize = 12;

/// Poly1305 tag length in bytes
const TAG_LEN: usize = 16;

/// Smallest container that can possibly decrypt: version + salt + nonce +
/// the tag of an empty plaintext
const MIN_CONTAINER_LEN: usize = 1 + SALT_LEN + NONCE_LEN + TAG_LEN;

/// Argon2id parameters (19 MiB, t=2, p=1)
const ARGON2_MEMORY_KIB: u32 = 19 * 1024;
const ARGON2_ITERATIONS: u32 = 2;
const ARGON2_PARALLELISM: u32 = 1;

/// Passphrase encryptor: Argon2id key derivation + ChaCha20-Poly1305
#[derive(Debug, Clone, Copy, Default)]
pub struct AeadEncryptor;

impl AeadEncryptor {
    /// Create a new encryptor
    pub fn new() -> Self {
        Self
    }

    fn derive_key(passphrase: &[u8], salt: &[u8]) -> Result<Zeroizing<[u8; 32]>> {
        let params = Params::new(ARGON2_MEMORY_KIB, ARGON2_ITERATIONS, ARGON2_PARALLELISM, Some(32))
            .map_err(|e| CofferError::crypto(format!("bad KDF parameters: {e}")))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut key = Zeroizing::new([0u8; 32]);
        argon2
            .hash_password_into(passphrase, salt, key.as_mut_slice())
            .map_err(|e| CofferError::crypto(format!("key derivation failed: {e}")))?;
        Ok(key)
    }
}

impl Encryptor for AeadEncryptor {
    fn name(&self) -> &str {
        "aead"
    }

    fn version(&self) -> u32 {
        CONTAINER_VERSION as u32
    }

    fn encrypt(&self, data: &[u8], passphrase: &[u8]) -> Result<Vec<u8>> {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);

        let key = Self::derive_key(passphrase, &salt)?;
        let cipher = ChaCha20Poly1305::new_from_slice(key.as_slice())
            .map_err(|_| CofferError::crypto("failed to initialize cipher"))?;
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), data)
            .map_err(|_| CofferError::crypto("encryption failed"))?;

        let mut out = Vec::with_capacity(1 + SALT_LEN + NONCE_LEN + ciphertext.len());
        out.push(CONTAINER_VERSION);
        out.extend_from_slice(&salt);
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn decrypt(&self, data: &[u8], passphrase: &[u8]) -> Result<Vec<u8>> {
        if data.len() < MIN_CONTAINER_LEN {
            return Err(CofferError::crypto(format!(
                "encrypted data must be at least {MIN_CONTAINER_LEN} bytes"
            )));
        }
        if data[0] != CONTAINER_VERSION {
            return Err(CofferError::crypto(format!(
                "unsupported container version {}",
                data[0]
            )));
        }

        let salt = &data[1..1 + SALT_LEN];
        let nonce = &data[1 + SALT_LEN..1 + SALT_LEN + NONCE_LEN];
        let ciphertext = &data[1 + SALT_LEN + NONCE_LEN..];

        let key = Self::derive_key(passphrase, salt)?;
        let cipher = ChaCha20Poly1305::new_from_slice(key.as_slice())
            .map_err(|_| CofferError::crypto("failed to initialize cipher"))?;
        cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CofferError::crypto("invalid passphrase or corrupt data"))
    }
}
