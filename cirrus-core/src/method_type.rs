//! Call cardinality of an RPC method.

use std::fmt;

/// The request/response multiplicity of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MethodType {
    /// One request message followed by one response message.
    Unary = 1,

    /// Zero or more request messages followed by one response message.
    ClientStreaming = 2,

    /// One request message followed by zero or more response messages.
    ServerStreaming = 3,

    /// Zero or more request and response messages, arbitrarily interleaved.
    BidiStreaming = 4,

    /// Cardinality is not known.
    ///
    /// Callers should buffer as if the call were bidirectional streaming.
    Unknown = 5,
}

impl MethodType {
    /// Every variant, in declaration order.
    pub const ALL: [MethodType; 5] = [
        MethodType::Unary,
        MethodType::ClientStreaming,
        MethodType::ServerStreaming,
        MethodType::BidiStreaming,
        MethodType::Unknown,
    ];

    /// Whether the client sends exactly one message and then half-closes.
    #[inline]
    #[must_use]
    pub const fn client_sends_one_message(self) -> bool {
        matches!(self, Self::Unary | Self::ServerStreaming)
    }

    /// Whether the server sends exactly one message and then closes.
    #[inline]
    #[must_use]
    pub const fn server_sends_one_message(self) -> bool {
        matches!(self, Self::Unary | Self::ClientStreaming)
    }

    /// Upper-case name used in logs and introspection output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unary => "UNARY",
            Self::ClientStreaming => "CLIENT_STREAMING",
            Self::ServerStreaming => "SERVER_STREAMING",
            Self::BidiStreaming => "BIDI_STREAMING",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for MethodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_count_predicates() {
        let table = [
            (MethodType::Unary, true, true),
            (MethodType::ClientStreaming, false, true),
            (MethodType::ServerStreaming, true, false),
            (MethodType::BidiStreaming, false, false),
            (MethodType::Unknown, false, false),
        ];

        for (ty, client_one, server_one) in table {
            assert_eq!(ty.client_sends_one_message(), client_one, "{ty}");
            assert_eq!(ty.server_sends_one_message(), server_one, "{ty}");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(MethodType::Unary.to_string(), "UNARY");
        assert_eq!(MethodType::BidiStreaming.to_string(), "BIDI_STREAMING");
        assert_eq!(MethodType::ALL.len(), 5);
    }
}
