//! Coffer Kinds - the wallet-kind collaborators
//!
//! One module per kind. Each owns its envelope fields and the three routines
//! the dispatch layer consumes:
//!
//! - `create` - construct, detect name collisions, persist the new envelope
//! - `deserialize` - rebuild a handle from an already-parsed envelope record
//! - `import` - decrypt an export blob, collision-check, persist, return
//!
//! Every handle also implements [`Wallet::export`](coffer_types::Wallet),
//! producing the encrypted `{"wallet": ...}` blob `import` reverses.

pub mod distributed;
pub mod hd;
pub mod keystore;
pub mod nd;

mod support;

pub use distributed::DistributedWallet;
pub use hd::HdWallet;
pub use keystore::KeystoreWallet;
pub use nd::NdWallet;
