//! Coffer Stores - concrete persistence collaborators
//!
//! Two backends behind the [`Store`](coffer_types::Store) seam:
//!
//! - [`MemoryStore`] - ephemeral shared map, the scratch store tests lean on
//! - [`FilesystemStore`] - one JSON blob per wallet under a base directory,
//!   with optional encryption at rest

pub mod filesystem;
pub mod memory;

pub use filesystem::FilesystemStore;
pub use memory::MemoryStore;
