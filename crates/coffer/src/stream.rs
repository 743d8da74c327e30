//! Concurrent wallet enumeration
//!
//! One producer task per call walks the store's lazy blob stream and
//! forwards every successful decode over a bounded channel. A full channel
//! suspends the producer until the consumer drains, so memory stays bounded
//! for arbitrarily large stores.

use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use coffer_types::{Store, WalletHandle};

use crate::codec;
use crate::options::WalletOptions;
use crate::registry::Coffer;

/// Capacity of the channel between the producer task and the consumer
const CHANNEL_CAPACITY: usize = 1024;

/// A finite, non-restartable stream of wallet handles
///
/// Undecodable records are dropped rather than surfaced as stream errors;
/// [`skipped`](Self::skipped) reports how many so far. Dropping the stream
/// aborts the producer task, reclaiming it and its store-side cursor even
/// when the enumeration was abandoned half-drained.
pub struct WalletStream {
    rx: mpsc::Receiver<WalletHandle>,
    skipped: Arc<AtomicU64>,
    producer: Option<JoinHandle<()>>,
}

impl WalletStream {
    fn empty() -> Self {
        // Sender dropped immediately: the stream is born closed.
        let (_tx, rx) = mpsc::channel(1);
        Self {
            rx,
            skipped: Arc::new(AtomicU64::new(0)),
            producer: None,
        }
    }

    /// Number of records dropped so far as corrupt or of unrecognized kind
    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }

    /// Receive the next wallet, or `None` once the source is exhausted
    pub async fn recv(&mut self) -> Option<WalletHandle> {
        self.rx.recv().await
    }
}

impl Stream for WalletStream {
    type Item = WalletHandle;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for WalletStream {
    fn drop(&mut self) {
        if let Some(producer) = self.producer.take() {
            producer.abort();
        }
    }
}

impl Coffer {
    /// Enumerate the wallets in the resolved store
    ///
    /// Order equals the store's native iteration order, with no cross-call
    /// guarantee. When no store or encryptor resolves, the returned stream
    /// is already closed and no task is spawned.
    pub fn wallets(&self, options: WalletOptions) -> WalletStream {
        let resolved = match options.resolve(self) {
            Ok(resolved) => resolved,
            Err(_) => return WalletStream::empty(),
        };

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let skipped = Arc::new(AtomicU64::new(0));
        let dropped = skipped.clone();
        let producer = tokio::spawn(async move {
            let mut blobs = resolved.store.stream_all();
            while let Some(data) = blobs.next().await {
                match codec::decode_wallet(&data, resolved.store.clone(), resolved.encryptor.clone())
                    .await
                {
                    Ok(wallet) => {
                        if tx.send(wallet).await.is_err() {
                            // Consumer gone; the Drop impl aborts us first
                            // in the common case.
                            break;
                        }
                    }
                    Err(err) => {
                        dropped.fetch_add(1, Ordering::Relaxed);
                        tracing::debug!(error = %err, "skipping undecodable wallet record");
                    }
                }
            }
        });

        WalletStream {
            rx,
            skipped,
            producer: Some(producer),
        }
    }
}
