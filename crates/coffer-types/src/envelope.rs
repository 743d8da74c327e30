//! The storage envelope and export framing
//!
//! Every wallet is persisted as one JSON envelope:
//! `{"uuid": ..., "name": ..., "type": ..., "version": ..., <kind fields>}`.
//! The core reads only the common fields; kind-specific fields ride in
//! `extra` and are opaque here. Decoding parses the raw bytes into this
//! generic record exactly once; kind deserializers take their payload from
//! the parsed record, never from the bytes again.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::Result;
use crate::kind::WalletKind;

/// Current envelope schema version
pub const ENVELOPE_VERSION: u32 = 1;

/// The generic view of a stored wallet record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletEnvelope {
    /// Wallet id, assigned once at creation
    #[serde(rename = "uuid")]
    pub id: Uuid,
    /// Wallet name, unique within one store's namespace
    pub name: String,
    /// Kind tag, stored in canonical long form
    #[serde(rename = "type")]
    pub kind: String,
    /// Envelope schema version
    pub version: u32,
    /// Kind-specific fields, opaque to the core
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WalletEnvelope {
    /// Create a fresh envelope for a new wallet
    pub fn new(name: impl Into<String>, kind: WalletKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind: kind.as_tag().to_string(),
            version: ENVELOPE_VERSION,
            extra: Map::new(),
        }
    }

    /// Canonicalize the `type` tag, or `None` for an unrecognized kind
    pub fn wallet_kind(&self) -> Option<WalletKind> {
        WalletKind::from_tag(&self.kind)
    }

    /// Decode the kind-specific record from this already-parsed envelope
    pub fn decode_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(serde_json::to_value(self)?)?)
    }

    /// Serialize to the stored JSON form
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Export framing: the envelope under a `wallet` key, the whole wrapper
/// then sealed by the encryptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletExport {
    /// The exported wallet's envelope record
    pub wallet: Value,
}
