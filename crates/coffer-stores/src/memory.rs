//! Ephemeral in-memory store

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use futures::stream::BoxStream;
use uuid::Uuid;

use coffer_types::{CofferError, Result, Store};

/// An ephemeral store backed by a shared in-memory map
///
/// Clones share contents, so a handle can be installed in the registry
/// while the caller keeps its own for inspection. Everything is lost when
/// the last clone drops.
#[derive(Clone, Default)]
pub struct MemoryStore {
    wallets: Arc<DashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored wallets
    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    /// Whether the store holds no wallets
    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn save(&self, _id: Uuid, name: &str, data: &[u8]) -> Result<()> {
        self.wallets.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    async fn retrieve(&self, name: &str) -> Result<Vec<u8>> {
        self.wallets
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| CofferError::not_found(name))
    }

    fn stream_all(&self) -> BoxStream<'static, Vec<u8>> {
        // Snapshot at call time; map-native order.
        let blobs: Vec<Vec<u8>> = self
            .wallets
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        Box::pin(futures::stream::iter(blobs))
    }
}
