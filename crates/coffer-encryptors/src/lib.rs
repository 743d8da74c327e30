//! Coffer Encryptors - concrete encryption collaborators
//!
//! The core dispatch layer treats encryption as an injected capability; this
//! crate supplies the default implementation. [`AeadEncryptor`] wraps data in
//! a versioned container using Argon2id key derivation and
//! ChaCha20-Poly1305 authenticated encryption.

pub mod aead;

pub use aead::AeadEncryptor;
