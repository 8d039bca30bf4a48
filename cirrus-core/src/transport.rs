//! Transport kinds known to the descriptor layer.
//!
//! Each [`KnownTransport`] owns one slot in every descriptor's
//! [`RawNameCache`](crate::RawNameCache). Indices are fixed at compile time
//! and stable for the life of the process.

use std::fmt;

use crate::cache::RawMethodName;

/// Transport implementations that may cache raw method names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownTransport {
    /// Plain TCP.
    Tcp,
    /// Unix domain sockets.
    Uds,
    /// TLS over TCP.
    Tls,
}

impl KnownTransport {
    /// Number of known transport kinds; the size of every raw name cache.
    pub const COUNT: usize = 3;

    /// Every transport kind, ordered by index.
    pub const ALL: [KnownTransport; Self::COUNT] = [Self::Tcp, Self::Uds, Self::Tls];

    /// Cache slot owned by this transport kind.
    #[inline]
    #[must_use]
    pub const fn index(self) -> TransportIndex {
        TransportIndex(self as usize)
    }

    /// Short lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Uds => "uds",
            Self::Tls => "tls",
        }
    }
}

impl fmt::Display for KnownTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw name cache slot index. Always within `[0, KnownTransport::COUNT)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransportIndex(usize);

impl TransportIndex {
    /// Checked construction from a raw position.
    #[must_use]
    pub const fn new(index: usize) -> Option<Self> {
        if index < KnownTransport::COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// The raw position.
    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Computes a transport's precomputed form of a method name.
///
/// The output must depend only on the full method name so that repeated
/// encodings are interchangeable.
pub trait RawNameEncoder: Send + Sync {
    /// The transport kind whose cache slot this encoder fills.
    fn transport(&self) -> KnownTransport;

    /// Encode a full method name.
    fn encode(&self, full_method_name: &str) -> RawMethodName;
}

/// Encodes the method name as the request path bytes `/<full_method_name>`.
///
/// The cached value is a `Vec<u8>`.
#[derive(Debug, Clone, Copy)]
pub struct PathEncoder {
    transport: KnownTransport,
}

impl PathEncoder {
    /// Create an encoder for the given transport kind.
    #[must_use]
    pub const fn new(transport: KnownTransport) -> Self {
        Self { transport }
    }

    /// The path bytes for a full method name.
    #[must_use]
    pub fn path(full_method_name: &str) -> Vec<u8> {
        let mut path = Vec::with_capacity(full_method_name.len() + 1);
        path.push(b'/');
        path.extend_from_slice(full_method_name.as_bytes());
        path
    }
}

impl RawNameEncoder for PathEncoder {
    fn transport(&self) -> KnownTransport {
        self.transport
    }

    fn encode(&self, full_method_name: &str) -> RawMethodName {
        RawMethodName::new(Self::path(full_method_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_dense() {
        for (i, kind) in KnownTransport::ALL.iter().enumerate() {
            assert_eq!(kind.index().get(), i);
        }
        assert_eq!(KnownTransport::ALL.len(), KnownTransport::COUNT);
    }

    #[test]
    fn test_checked_index() {
        assert_eq!(TransportIndex::new(0), Some(KnownTransport::Tcp.index()));
        assert!(TransportIndex::new(KnownTransport::COUNT).is_none());
    }

    #[test]
    fn test_path_encoder() {
        let encoder = PathEncoder::new(KnownTransport::Uds);
        assert_eq!(encoder.transport(), KnownTransport::Uds);

        let raw = encoder.encode("pkg.Svc/Method");
        assert_eq!(raw.downcast_ref::<Vec<u8>>().unwrap(), b"/pkg.Svc/Method");
    }
}
