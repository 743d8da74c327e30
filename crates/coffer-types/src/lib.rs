//! Coffer Types - canonical types and trait seams for wallet management
//!
//! This crate contains the foundational types for Coffer with zero
//! dependencies on other coffer crates. It defines:
//!
//! - The error taxonomy and the workspace-wide [`Result`] alias
//! - The canonical [`WalletKind`] set and its boundary alias table
//! - The storage envelope and export framing
//! - The [`Store`], [`Encryptor`], and [`Wallet`] trait seams that keep
//!   wallet-kind selection decoupled from concrete backends
//!
//! # Architectural Invariants
//!
//! 1. A wallet's id is assigned once at creation and never changes
//! 2. A wallet's name is unique within one store's namespace
//! 3. A wallet's kind is immutable for the wallet's lifetime
//! 4. The core never mutates an envelope after creation; post-creation
//!    mutation (account counters and the like) belongs to the kinds

pub mod encryptor;
pub mod envelope;
pub mod error;
pub mod kind;
pub mod store;
pub mod wallet;

pub use encryptor::*;
pub use envelope::*;
pub use error::*;
pub use kind::*;
pub use store::*;
pub use wallet::*;
