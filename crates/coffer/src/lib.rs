//! Coffer - pluggable wallet management
//!
//! This crate is the dispatch layer over pluggable collaborators: it exposes
//! uniform wallet lifecycle operations (create, open, enumerate, import)
//! across several key-management kinds without implementing derivation,
//! encryption, or storage I/O itself.
//!
//! - A [`Coffer`] holds the active [`Store`] and [`Encryptor`] plugins and
//!   threads them into every call; there is no process-wide state.
//! - [`WalletOptions`] carries per-call overrides; unset fields fall back to
//!   the registry.
//! - Decoding reads the envelope's `type` tag and dispatches to the matching
//!   kind's deserializer; unrecognized tags fail naming the tag.
//! - [`Coffer::wallets`] enumerates a store concurrently over a bounded
//!   channel, dropping undecodable records.
//!
//! ```no_run
//! use std::sync::Arc;
//! use coffer::{Coffer, Wallet, WalletOptions};
//! use coffer_stores::MemoryStore;
//!
//! # async fn demo() -> coffer::Result<()> {
//! let mut coffer = Coffer::new();
//! coffer.use_store(Some(Arc::new(MemoryStore::new())))?;
//! coffer.use_encryptor(Some(Arc::new(coffer_encryptors::AeadEncryptor::new())))?;
//!
//! let wallet = coffer.create_wallet("Primary", WalletOptions::new()).await?;
//! assert_eq!(wallet.name(), "Primary");
//! # Ok(())
//! # }
//! ```

mod codec;
mod import;
mod options;
mod path;
mod registry;
mod stream;
mod wallet;

pub use coffer_types::{
    CofferError, Encryptor, Result, Store, Wallet, WalletEnvelope, WalletExport, WalletHandle,
    WalletKind,
};
pub use options::WalletOptions;
pub use path::split_wallet_account;
pub use registry::Coffer;
pub use stream::WalletStream;
