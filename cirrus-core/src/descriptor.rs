//! The immutable description of one RPC method.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::builder::Builder;
use crate::cache::{RawMethodName, RawNameCache};
use crate::error::CodecError;
use crate::marshaller::Marshaller;
use crate::method_type::MethodType;
use crate::names;
use crate::transport::{RawNameEncoder, TransportIndex};

/// Consumer-defined schema payload attached to a descriptor.
///
/// The producer and consumer agree on the concrete type out of band; read it
/// back with [`MethodDescriptor::schema_descriptor`].
pub type SchemaDescriptor = Arc<dyn Any + Send + Sync>;

/// Description of a single RPC method and how its messages are marshalled.
///
/// Built once through a [`Builder`] and then shared, usually behind an
/// `Arc`, by every client stub and server dispatch table that handles the
/// method. All fields are fixed at construction. The only interior
/// mutability is the per-transport [`RawNameCache`], which transports fill
/// lazily without locking.
///
/// ## Example
///
/// ```rust,ignore
/// use cirrus_core::{MethodDescriptor, MethodType};
///
/// let method = MethodDescriptor::<HelloRequest, HelloReply>::builder()
///     .set_type(MethodType::Unary)
///     .set_full_method_name("helloworld.Greeter/SayHello")
///     .set_request_marshaller(Arc::new(request_marshaller))
///     .set_response_marshaller(Arc::new(response_marshaller))
///     .set_idempotent(true)
///     .build()?;
///
/// let bytes = method.stream_request(&request)?;
/// ```
pub struct MethodDescriptor<Req, Resp> {
    method_type: MethodType,
    full_method_name: String,
    request_marshaller: Arc<dyn Marshaller<Req>>,
    response_marshaller: Arc<dyn Marshaller<Resp>>,
    schema_descriptor: Option<SchemaDescriptor>,
    idempotent: bool,
    safe: bool,
    raw_names: RawNameCache,
}

impl<Req, Resp> MethodDescriptor<Req, Resp> {
    /// Assemble a descriptor from fields already validated by the builder.
    pub(crate) fn from_parts(
        method_type: MethodType,
        full_method_name: String,
        request_marshaller: Arc<dyn Marshaller<Req>>,
        response_marshaller: Arc<dyn Marshaller<Resp>>,
        schema_descriptor: Option<SchemaDescriptor>,
        idempotent: bool,
        safe: bool,
    ) -> Self {
        Self {
            method_type,
            full_method_name,
            request_marshaller,
            response_marshaller,
            schema_descriptor,
            idempotent,
            safe,
            raw_names: RawNameCache::new(),
        }
    }

    /// Create a descriptor directly, with no schema and both flags unset.
    #[deprecated(note = "use `MethodDescriptor::builder` instead")]
    #[must_use]
    pub fn create(
        method_type: MethodType,
        full_method_name: impl Into<String>,
        request_marshaller: Arc<dyn Marshaller<Req>>,
        response_marshaller: Arc<dyn Marshaller<Resp>>,
    ) -> Self {
        Self::from_parts(
            method_type,
            full_method_name.into(),
            request_marshaller,
            response_marshaller,
            None,
            false,
            false,
        )
    }

    /// Start an empty builder.
    #[must_use]
    pub fn builder() -> Builder<Req, Resp> {
        Builder::new()
    }

    /// Start a builder with both marshallers already set.
    #[must_use]
    pub fn builder_with_marshallers(
        request_marshaller: Arc<dyn Marshaller<Req>>,
        response_marshaller: Arc<dyn Marshaller<Resp>>,
    ) -> Builder<Req, Resp> {
        Builder::new()
            .set_request_marshaller(request_marshaller)
            .set_response_marshaller(response_marshaller)
    }

    /// Call cardinality.
    #[inline]
    #[must_use]
    pub fn method_type(&self) -> MethodType {
        self.method_type
    }

    /// Full method name, `<service>/<method>`.
    #[inline]
    #[must_use]
    pub fn full_method_name(&self) -> &str {
        &self.full_method_name
    }

    /// Service part of the full method name, if it contains a `/`.
    #[must_use]
    pub fn service_name(&self) -> Option<&str> {
        names::extract_full_service_name(&self.full_method_name)
    }

    /// Method part of the full method name, if it contains a `/`.
    #[must_use]
    pub fn bare_method_name(&self) -> Option<&str> {
        names::extract_bare_method_name(&self.full_method_name)
    }

    /// Encode a request message.
    #[inline]
    pub fn stream_request(&self, request: &Req) -> Result<Vec<u8>, CodecError> {
        self.request_marshaller.stream(request)
    }

    /// Decode a request message.
    #[inline]
    pub fn parse_request(&self, bytes: &[u8]) -> Result<Req, CodecError> {
        self.request_marshaller.parse(bytes)
    }

    /// Encode a response message.
    #[inline]
    pub fn stream_response(&self, response: &Resp) -> Result<Vec<u8>, CodecError> {
        self.response_marshaller.stream(response)
    }

    /// Decode a response message.
    #[inline]
    pub fn parse_response(&self, bytes: &[u8]) -> Result<Resp, CodecError> {
        self.response_marshaller.parse(bytes)
    }

    /// The request marshaller.
    #[must_use]
    pub fn request_marshaller(&self) -> &Arc<dyn Marshaller<Req>> {
        &self.request_marshaller
    }

    /// The response marshaller.
    #[must_use]
    pub fn response_marshaller(&self) -> &Arc<dyn Marshaller<Resp>> {
        &self.response_marshaller
    }

    /// The schema payload, if one was attached and it is an `S`.
    #[must_use]
    pub fn schema_descriptor<S: Any>(&self) -> Option<&S> {
        self.schema_descriptor.as_deref()?.downcast_ref()
    }

    /// The schema payload as attached, without downcasting.
    #[must_use]
    pub fn raw_schema_descriptor(&self) -> Option<&SchemaDescriptor> {
        self.schema_descriptor.as_ref()
    }

    /// Whether a schema payload was attached.
    #[must_use]
    pub fn has_schema_descriptor(&self) -> bool {
        self.schema_descriptor.is_some()
    }

    /// Whether repeating the call has no additional side effects.
    #[inline]
    #[must_use]
    pub fn is_idempotent(&self) -> bool {
        self.idempotent
    }

    /// Whether the call has no side effects at all. Only unary methods can be safe.
    #[inline]
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.safe
    }

    /// Per-transport raw name cache.
    #[must_use]
    pub fn raw_names(&self) -> &RawNameCache {
        &self.raw_names
    }

    /// Cached raw name for a transport slot, if one has been published.
    #[inline]
    #[must_use]
    pub fn raw_method_name_at(&self, index: TransportIndex) -> Option<Arc<RawMethodName>> {
        self.raw_names.get(index)
    }

    /// Publish a raw name into a transport slot.
    #[inline]
    pub fn set_raw_method_name_at(&self, index: TransportIndex, raw: Arc<RawMethodName>) {
        self.raw_names.set(index, raw);
    }

    /// Raw name for the encoder's transport, computing and publishing it on a miss.
    ///
    /// Concurrent callers may each compute the value once; every result is
    /// equivalent because it depends only on the full method name.
    pub fn raw_method_name<E>(&self, encoder: &E) -> Arc<RawMethodName>
    where
        E: RawNameEncoder + ?Sized,
    {
        let index = encoder.transport().index();
        if let Some(raw) = self.raw_names.get(index) {
            return raw;
        }

        let raw = Arc::new(encoder.encode(&self.full_method_name));
        self.raw_names.set(index, Arc::clone(&raw));
        raw
    }

    /// A builder pre-populated from this descriptor.
    ///
    /// The raw name cache is not carried over.
    #[must_use]
    pub fn to_builder(&self) -> Builder<Req, Resp> {
        self.to_builder_with_marshallers(
            Arc::clone(&self.request_marshaller),
            Arc::clone(&self.response_marshaller),
        )
    }

    /// A builder pre-populated from this descriptor with new marshallers,
    /// possibly for different message types.
    #[must_use]
    pub fn to_builder_with_marshallers<NewReq, NewResp>(
        &self,
        request_marshaller: Arc<dyn Marshaller<NewReq>>,
        response_marshaller: Arc<dyn Marshaller<NewResp>>,
    ) -> Builder<NewReq, NewResp> {
        let builder = Builder::new()
            .set_request_marshaller(request_marshaller)
            .set_response_marshaller(response_marshaller)
            .set_type(self.method_type)
            .set_full_method_name(self.full_method_name.clone())
            .set_idempotent(self.idempotent)
            .set_safe(self.safe);

        match &self.schema_descriptor {
            Some(schema) => builder.set_schema_descriptor(Arc::clone(schema)),
            None => builder,
        }
    }
}

/// Compares every field except the raw name cache. Marshallers and schema
/// payloads compare by identity.
impl<Req, Resp> PartialEq for MethodDescriptor<Req, Resp> {
    fn eq(&self, other: &Self) -> bool {
        self.method_type == other.method_type
            && self.full_method_name == other.full_method_name
            && self.idempotent == other.idempotent
            && self.safe == other.safe
            && std::ptr::addr_eq(
                Arc::as_ptr(&self.request_marshaller),
                Arc::as_ptr(&other.request_marshaller),
            )
            && std::ptr::addr_eq(
                Arc::as_ptr(&self.response_marshaller),
                Arc::as_ptr(&other.response_marshaller),
            )
            && match (&self.schema_descriptor, &other.schema_descriptor) {
                (None, None) => true,
                (Some(a), Some(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
                _ => false,
            }
    }
}

impl<Req, Resp> fmt::Debug for MethodDescriptor<Req, Resp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("type", &self.method_type)
            .field("full_method_name", &self.full_method_name)
            .field("schema_descriptor", &self.schema_descriptor.is_some())
            .field("idempotent", &self.idempotent)
            .field("safe", &self.safe)
            .field("raw_names", &self.raw_names)
            .finish_non_exhaustive()
    }
}
