//! Error types for descriptor construction and marshalling.

/// Errors raised while constructing or addressing a method descriptor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    /// A required field was never set on the builder.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The combination of fields is not allowed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A raw name cache slot outside the known transport range was addressed.
    #[error("transport index {index} out of range (cache size: {len})")]
    IndexOutOfRange {
        /// Requested slot
        index: usize,
        /// Number of slots in the cache
        len: usize,
    },
}

/// Codec errors produced by marshallers.
///
/// Descriptors never construct these themselves; they are returned unchanged
/// from [`Marshaller::stream`](crate::Marshaller::stream) and
/// [`Marshaller::parse`](crate::Marshaller::parse).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Message size exceeds the configured limit
    #[error("message too large: {size} bytes (max: {max})")]
    MessageTooLarge {
        /// Actual message size
        size: usize,
        /// Maximum allowed size
        max: usize,
    },

    /// The value could not be encoded
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The input could not be decoded or failed validation
    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl DescriptorError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Check if this error came from an unset builder field.
    #[must_use]
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField(_))
    }
}

impl CodecError {
    /// Check if the error was raised while decoding input.
    #[must_use]
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Deserialization(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DescriptorError::MissingField("full_method_name");
        assert_eq!(err.to_string(), "missing required field: full_method_name");

        let err = DescriptorError::IndexOutOfRange { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "transport index 7 out of range (cache size: 3)"
        );

        let err = CodecError::MessageTooLarge { size: 10, max: 4 };
        assert_eq!(err.to_string(), "message too large: 10 bytes (max: 4)");
    }

    #[test]
    fn test_classification() {
        assert!(DescriptorError::MissingField("type").is_missing_field());
        assert!(!DescriptorError::invalid("nope").is_missing_field());
        assert!(CodecError::Deserialization("eof".into()).is_decode_error());
        assert!(!CodecError::Serialization("bad".into()).is_decode_error());
        assert!(!CodecError::MessageTooLarge { size: 9, max: 8 }.is_decode_error());
    }
}
