//! Marshaller capability traits.
//!
//! A [`Marshaller`] converts between an in-memory value and its byte
//! encoding. Two optional refinements let consumers learn about the message
//! type without parsing a real message:
//!
//! - [`ReflectableMarshaller`] exposes a [`MessageKind`] type handle.
//! - [`PrototypeMarshaller`] additionally exposes a prototype instance.
//!
//! When the concrete marshaller type is known, use the traits as ordinary
//! bounds. Behind `dyn Marshaller<T>` (as stored in a descriptor), query the
//! refinements with [`Marshaller::as_reflectable`] and
//! [`Marshaller::as_prototype`].

use std::any::{self, TypeId};
use std::fmt;

use crate::error::CodecError;

/// Bidirectional codec between `T` and bytes.
///
/// Implementations must satisfy `parse(stream(v)) == v` for every valid `v`,
/// and must return an error rather than a corrupt value on malformed input.
pub trait Marshaller<T>: Send + Sync {
    /// Encode a value.
    fn stream(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Decode a value.
    fn parse(&self, bytes: &[u8]) -> Result<T, CodecError>;

    /// This marshaller as a [`ReflectableMarshaller`], if it is one.
    fn as_reflectable(&self) -> Option<&dyn ReflectableMarshaller<T>> {
        None
    }

    /// This marshaller as a [`PrototypeMarshaller`], if it is one.
    fn as_prototype(&self) -> Option<&dyn PrototypeMarshaller<T>> {
        None
    }
}

/// A marshaller that can name the type it handles.
pub trait ReflectableMarshaller<T>: Marshaller<T> {
    /// Type handle for `T`, or for a common base when `T` is polymorphic.
    fn message_kind(&self) -> MessageKind;
}

/// A marshaller that can hand out a prototype instance of its message.
pub trait PrototypeMarshaller<T>: ReflectableMarshaller<T> {
    /// A prototype message.
    ///
    /// `None` means the message type is the void/empty message, not that
    /// prototypes are unsupported. Marshallers without prototypes simply do
    /// not implement this trait.
    fn message_prototype(&self) -> Option<&T>;
}

/// Runtime type handle for a message type.
#[derive(Clone, Copy)]
pub struct MessageKind {
    id: TypeId,
    name: &'static str,
}

impl MessageKind {
    /// Handle for `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    /// The `TypeId` of the message type.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Diagnostic type name. Not guaranteed stable across compiler versions.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.name
    }

    /// Whether this handle refers to `T`.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for MessageKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MessageKind {}

impl std::hash::Hash for MessageKind {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MessageKind").field(&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Little-endian `u32` codec with a fixed prototype.
    struct U32Marshaller {
        prototype: u32,
    }

    impl Marshaller<u32> for U32Marshaller {
        fn stream(&self, value: &u32) -> Result<Vec<u8>, CodecError> {
            Ok(value.to_le_bytes().to_vec())
        }

        fn parse(&self, bytes: &[u8]) -> Result<u32, CodecError> {
            let raw: [u8; 4] = bytes.try_into().map_err(|_| {
                CodecError::Deserialization(format!("expected 4 bytes, got {}", bytes.len()))
            })?;
            Ok(u32::from_le_bytes(raw))
        }

        fn as_reflectable(&self) -> Option<&dyn ReflectableMarshaller<u32>> {
            Some(self)
        }

        fn as_prototype(&self) -> Option<&dyn PrototypeMarshaller<u32>> {
            Some(self)
        }
    }

    impl ReflectableMarshaller<u32> for U32Marshaller {
        fn message_kind(&self) -> MessageKind {
            MessageKind::of::<u32>()
        }
    }

    impl PrototypeMarshaller<u32> for U32Marshaller {
        fn message_prototype(&self) -> Option<&u32> {
            Some(&self.prototype)
        }
    }

    /// Base capability only.
    struct OpaqueMarshaller;

    impl Marshaller<String> for OpaqueMarshaller {
        fn stream(&self, value: &String) -> Result<Vec<u8>, CodecError> {
            Ok(value.as_bytes().to_vec())
        }

        fn parse(&self, bytes: &[u8]) -> Result<String, CodecError> {
            String::from_utf8(bytes.to_vec())
                .map_err(|e| CodecError::Deserialization(e.to_string()))
        }
    }

    #[test]
    fn test_capability_queries() {
        let full: &dyn Marshaller<u32> = &U32Marshaller { prototype: 9 };
        let kind = full.as_reflectable().unwrap().message_kind();
        assert!(kind.is::<u32>());
        assert_eq!(full.as_prototype().unwrap().message_prototype(), Some(&9));

        let opaque: &dyn Marshaller<String> = &OpaqueMarshaller;
        assert!(opaque.as_reflectable().is_none());
        assert!(opaque.as_prototype().is_none());
    }

    #[test]
    fn test_malformed_input_fails() {
        let m = U32Marshaller { prototype: 0 };
        let bytes = m.stream(&0xdead_beef).unwrap();
        assert_eq!(m.parse(&bytes).unwrap(), 0xdead_beef);
        assert!(m.parse(&bytes[..3]).unwrap_err().is_decode_error());
    }

    #[test]
    fn test_message_kind_identity() {
        assert_eq!(MessageKind::of::<u32>(), MessageKind::of::<u32>());
        assert_ne!(MessageKind::of::<u32>(), MessageKind::of::<u64>());
        assert!(MessageKind::of::<String>().type_name().contains("String"));
    }
}
