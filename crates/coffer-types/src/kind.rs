//! Wallet kinds and the boundary alias table
//!
//! Internally a wallet's kind is always this enum; raw tag strings exist
//! only at the API and storage boundaries, where [`WalletKind::from_tag`]
//! canonicalizes them.

use std::fmt;

/// The algorithm family governing how a wallet derives and holds keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalletKind {
    /// Keys generated independently at random
    NonDeterministic,
    /// Keys derived from a seed along indexed paths
    HierarchicalDeterministic,
    /// Key shares held across a signing threshold
    Distributed,
    /// A single keystore file promoted to a wallet
    Keystore,
}

impl WalletKind {
    /// Every kind, in dispatch-table order
    pub const ALL: [WalletKind; 4] = [
        WalletKind::NonDeterministic,
        WalletKind::HierarchicalDeterministic,
        WalletKind::Distributed,
        WalletKind::Keystore,
    ];

    /// The canonical tag written into stored envelopes
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::NonDeterministic => "non-deterministic",
            Self::HierarchicalDeterministic => "hierarchical deterministic",
            Self::Distributed => "distributed",
            Self::Keystore => "keystore",
        }
    }

    /// Resolve a boundary tag, accepting the short and long alias per kind
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "nd" | "non-deterministic" => Some(Self::NonDeterministic),
            "hd" | "hierarchical deterministic" => Some(Self::HierarchicalDeterministic),
            "distributed" => Some(Self::Distributed),
            "keystore" => Some(Self::Keystore),
            _ => None,
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}
