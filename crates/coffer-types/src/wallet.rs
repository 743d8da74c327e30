//! The wallet handle seam

use std::any::Any;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::kind::WalletKind;

/// A handle to one wallet, polymorphic over its kind
///
/// Handles are owned exclusively by the caller once returned. The common
/// capability set is name, id, kind, and export; kind-specific operations
/// are reached by downcasting through [`as_any`](Wallet::as_any).
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Wallet id, assigned once at creation
    fn id(&self) -> Uuid;

    /// Wallet name, unique within its store
    fn name(&self) -> &str;

    /// The kind governing this wallet's key management
    fn kind(&self) -> WalletKind;

    /// Produce the encrypted export blob for this wallet
    async fn export(&self, passphrase: &[u8]) -> Result<Vec<u8>>;

    /// Downcast support for kind-specific capabilities
    fn as_any(&self) -> &dyn Any;
}

impl std::fmt::Debug for dyn Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}

/// An owned wallet handle, as returned by the facade operations
pub type WalletHandle = Box<dyn Wallet>;
