//! rkyv-backed marshaller.

use std::marker::PhantomData;

use cirrus_core::{
    CodecError, Marshaller, MessageKind, PrototypeMarshaller, ReflectableMarshaller,
};
use rkyv::api::high::{HighDeserializer, HighSerializer, HighValidator};
use rkyv::bytecheck::CheckBytes;
use rkyv::rancor;
use rkyv::ser::allocator::ArenaHandle;
use rkyv::util::AlignedVec;
use rkyv::{Archive, Deserialize, Serialize};

use crate::config::MarshallerConfig;

/// Marshaller that encodes `T` in the rkyv archive format.
///
/// Parsing validates the archive before deserializing, so malformed input
/// yields [`CodecError::Deserialization`] rather than a corrupt value.
///
/// ## Example
///
/// ```rust
/// use cirrus_codec::RkyvMarshaller;
/// use cirrus_core::Marshaller;
/// use rkyv::{Archive, Deserialize, Serialize};
///
/// #[derive(Archive, Serialize, Deserialize, Debug, PartialEq)]
/// struct Greeting {
///     name: String,
/// }
///
/// let marshaller = RkyvMarshaller::<Greeting>::new();
/// let bytes = marshaller.stream(&Greeting { name: "ferris".into() }).unwrap();
/// let parsed = marshaller.parse(&bytes).unwrap();
/// assert_eq!(parsed.name, "ferris");
/// ```
pub struct RkyvMarshaller<T> {
    config: MarshallerConfig,
    prototype: Option<T>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RkyvMarshaller<T> {
    /// Create a marshaller with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MarshallerConfig::default())
    }

    /// Create a marshaller with custom limits.
    #[must_use]
    pub fn with_config(config: MarshallerConfig) -> Self {
        Self {
            config,
            prototype: None,
            _marker: PhantomData,
        }
    }

    /// Advertise `prototype` through [`PrototypeMarshaller`].
    #[must_use]
    pub fn with_prototype(mut self, prototype: T) -> Self {
        self.prototype = Some(prototype);
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &MarshallerConfig {
        &self.config
    }
}

impl<T> Default for RkyvMarshaller<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for RkyvMarshaller<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RkyvMarshaller")
            .field("type", &std::any::type_name::<T>())
            .field("config", &self.config)
            .field("prototype", &self.prototype.is_some())
            .finish()
    }
}

impl<T> Marshaller<T> for RkyvMarshaller<T>
where
    T: Archive
        + for<'a> Serialize<HighSerializer<AlignedVec, ArenaHandle<'a>, rancor::Error>>
        + Send
        + Sync
        + 'static,
    T::Archived: for<'a> CheckBytes<HighValidator<'a, rancor::Error>>
        + Deserialize<T, HighDeserializer<rancor::Error>>,
{
    fn stream(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let bytes = rkyv::to_bytes::<rancor::Error>(value)
            .map_err(|e| CodecError::Serialization(e.to_string()))?;
        self.config.check_size(bytes.len())?;
        Ok(bytes.to_vec())
    }

    fn parse(&self, bytes: &[u8]) -> Result<T, CodecError> {
        self.config.check_size(bytes.len())?;

        // Archives must be read from an aligned buffer.
        let mut aligned = AlignedVec::<16>::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);

        rkyv::from_bytes::<T, rancor::Error>(&aligned)
            .map_err(|e| CodecError::Deserialization(e.to_string()))
    }

    fn as_reflectable(&self) -> Option<&dyn ReflectableMarshaller<T>> {
        Some(self)
    }

    fn as_prototype(&self) -> Option<&dyn PrototypeMarshaller<T>> {
        self.prototype.as_ref().map(|_| self as &dyn PrototypeMarshaller<T>)
    }
}

impl<T> ReflectableMarshaller<T> for RkyvMarshaller<T>
where
    Self: Marshaller<T>,
    T: 'static,
{
    fn message_kind(&self) -> MessageKind {
        MessageKind::of::<T>()
    }
}

impl<T> PrototypeMarshaller<T> for RkyvMarshaller<T>
where
    Self: ReflectableMarshaller<T>,
{
    fn message_prototype(&self) -> Option<&T> {
        self.prototype.as_ref()
    }
}
