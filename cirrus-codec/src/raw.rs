//! Pass-through marshallers for raw byte payloads and empty messages.

use cirrus_core::{
    CodecError, Marshaller, MessageKind, PrototypeMarshaller, ReflectableMarshaller,
};

use crate::config::MarshallerConfig;

/// Identity marshaller for `Vec<u8>` payloads.
///
/// Useful for proxies and gateways that forward messages without decoding
/// them. The prototype is the empty payload.
#[derive(Debug, Clone, Default)]
pub struct RawBytesMarshaller {
    config: MarshallerConfig,
    empty: Vec<u8>,
}

impl RawBytesMarshaller {
    /// Create a marshaller with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a marshaller with custom limits.
    #[must_use]
    pub fn with_config(config: MarshallerConfig) -> Self {
        Self {
            config,
            empty: Vec::new(),
        }
    }
}

impl Marshaller<Vec<u8>> for RawBytesMarshaller {
    fn stream(&self, value: &Vec<u8>) -> Result<Vec<u8>, CodecError> {
        self.config.check_size(value.len())?;
        Ok(value.clone())
    }

    fn parse(&self, bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
        self.config.check_size(bytes.len())?;
        Ok(bytes.to_vec())
    }

    fn as_reflectable(&self) -> Option<&dyn ReflectableMarshaller<Vec<u8>>> {
        Some(self)
    }

    fn as_prototype(&self) -> Option<&dyn PrototypeMarshaller<Vec<u8>>> {
        Some(self)
    }
}

impl ReflectableMarshaller<Vec<u8>> for RawBytesMarshaller {
    fn message_kind(&self) -> MessageKind {
        MessageKind::of::<Vec<u8>>()
    }
}

impl PrototypeMarshaller<Vec<u8>> for RawBytesMarshaller {
    fn message_prototype(&self) -> Option<&Vec<u8>> {
        Some(&self.empty)
    }
}

/// Marshaller for the empty message.
///
/// Encodes to zero bytes and rejects any non-empty input. Its prototype is
/// `None`, which by contract identifies the void message type.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidMarshaller;

impl Marshaller<()> for VoidMarshaller {
    fn stream(&self, _value: &()) -> Result<Vec<u8>, CodecError> {
        Ok(Vec::new())
    }

    fn parse(&self, bytes: &[u8]) -> Result<(), CodecError> {
        if bytes.is_empty() {
            Ok(())
        } else {
            Err(CodecError::Deserialization(format!(
                "expected empty message, got {} bytes",
                bytes.len()
            )))
        }
    }

    fn as_reflectable(&self) -> Option<&dyn ReflectableMarshaller<()>> {
        Some(self)
    }

    fn as_prototype(&self) -> Option<&dyn PrototypeMarshaller<()>> {
        Some(self)
    }
}

impl ReflectableMarshaller<()> for VoidMarshaller {
    fn message_kind(&self) -> MessageKind {
        MessageKind::of::<()>()
    }
}

impl PrototypeMarshaller<()> for VoidMarshaller {
    fn message_prototype(&self) -> Option<&()> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_bytes_passthrough() {
        let marshaller = RawBytesMarshaller::new();
        let payload = vec![0xde, 0xad, 0xbe, 0xef];
        let bytes = marshaller.stream(&payload).unwrap();
        assert_eq!(bytes, payload);
        assert_eq!(marshaller.parse(&bytes).unwrap(), payload);
    }

    #[test]
    fn test_raw_bytes_limit() {
        let marshaller =
            RawBytesMarshaller::with_config(MarshallerConfig::new().max_message_size(2));
        assert!(marshaller.parse(&[1, 2]).is_ok());
        assert_eq!(
            marshaller.parse(&[1, 2, 3]),
            Err(CodecError::MessageTooLarge { size: 3, max: 2 })
        );
        assert!(marshaller.stream(&vec![0; 3]).is_err());
    }

    #[test]
    fn test_raw_bytes_prototype_is_empty_payload() {
        let marshaller: &dyn Marshaller<Vec<u8>> = &RawBytesMarshaller::new();
        let proto = marshaller.as_prototype().unwrap();
        assert_eq!(proto.message_prototype(), Some(&Vec::new()));
        assert!(proto.message_kind().is::<Vec<u8>>());
    }

    #[test]
    fn test_void() {
        let marshaller = VoidMarshaller;
        assert!(marshaller.stream(&()).unwrap().is_empty());
        assert!(marshaller.parse(&[]).is_ok());
        assert!(marshaller.parse(&[0]).unwrap_err().is_decode_error());
    }

    #[test]
    fn test_void_prototype_is_sentinel() {
        let marshaller: &dyn Marshaller<()> = &VoidMarshaller;
        // Supported, but the prototype is absent: the void message.
        let proto = marshaller.as_prototype().unwrap();
        assert_eq!(proto.message_prototype(), None);
        assert!(proto.message_kind().is::<()>());
    }
}
