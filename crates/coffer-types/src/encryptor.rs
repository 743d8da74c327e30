//! The pluggable encryption seam

use crate::error::Result;

/// A pluggable symmetric scheme protecting wallet material at rest and
/// during import/export
///
/// Implementations are CPU-bound and synchronous; they own their container
/// format (version marker, minimum-length check) end to end, and the core
/// treats their output as opaque bytes.
pub trait Encryptor: Send + Sync {
    /// Scheme name, for diagnostics
    fn name(&self) -> &str;

    /// Container format version
    fn version(&self) -> u32;

    /// Encrypt `data` under `passphrase`
    fn encrypt(&self, data: &[u8], passphrase: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt a container produced by [`encrypt`](Encryptor::encrypt)
    fn decrypt(&self, data: &[u8], passphrase: &[u8]) -> Result<Vec<u8>>;
}
