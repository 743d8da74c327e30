//! The pluggable persistence seam

use async_trait::async_trait;
use futures::stream::BoxStream;
use uuid::Uuid;

use crate::error::Result;

/// A pluggable persistence backend keyed by wallet name
///
/// Stores hold opaque envelope bytes; they never parse them. Iteration
/// order of [`stream_all`](Store::stream_all) is store-native and carries
/// no cross-call guarantee.
#[async_trait]
pub trait Store: Send + Sync {
    /// Backend name, for diagnostics
    fn name(&self) -> &str;

    /// Persist an envelope under the wallet's name
    async fn save(&self, id: Uuid, name: &str, data: &[u8]) -> Result<()>;

    /// Retrieve the envelope stored under `name`
    ///
    /// Returns [`CofferError::NotFound`](crate::CofferError::NotFound) when
    /// no wallet has that name.
    async fn retrieve(&self, name: &str) -> Result<Vec<u8>>;

    /// Lazily stream every stored envelope
    fn stream_all(&self) -> BoxStream<'static, Vec<u8>>;
}
