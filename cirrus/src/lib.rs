//! # Cirrus
//!
//! Method descriptors and marshalling contracts for RPC call dispatch.
//!
//! Every call, client-initiated or server-dispatched, goes through a
//! [`MethodDescriptor`] to learn its cardinality and how to encode and decode
//! its messages. Cirrus provides:
//! - **Immutable descriptors** built once and shared across any number of
//!   concurrent calls
//! - **Marshaller capabilities**: base encode/decode plus optional type
//!   reflection and prototype access
//! - **Lock-free raw name caching** so each transport encodes a method name
//!   once per descriptor
//! - **Span naming** compatible with `Sent.`/`Recv.` tracing conventions
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use cirrus::{KnownTransport, MethodDescriptor, MethodType, PathEncoder, RawBytesMarshaller};
//!
//! let marshaller = Arc::new(RawBytesMarshaller::new());
//! let method = MethodDescriptor::<Vec<u8>, Vec<u8>>::builder()
//!     .set_type(MethodType::Unary)
//!     .set_full_method_name(cirrus::full_method_name("pkg.Echo", "Say"))
//!     .set_request_marshaller(marshaller.clone())
//!     .set_response_marshaller(marshaller)
//!     .set_idempotent(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(method.service_name(), Some("pkg.Echo"));
//! assert!(method.method_type().client_sends_one_message());
//!
//! let bytes = method.stream_request(&b"ping".to_vec()).unwrap();
//! assert_eq!(method.parse_request(&bytes).unwrap(), b"ping");
//!
//! // Transports compute their wire name once and reuse it.
//! let raw = method.raw_method_name(&PathEncoder::new(KnownTransport::Tcp));
//! assert_eq!(raw.downcast_ref::<Vec<u8>>().unwrap(), b"/pkg.Echo/Say");
//! ```
//!
//! ## Features
//!
//! - `codec` (default) - Concrete marshallers (rkyv, raw bytes, void)
//! - `tracing` (default) - Span registry and descriptor span helpers
//! - `full` - Enable all features
//!
//! ## Architecture
//!
//! - [`cirrus-core`] - Descriptors, builder, marshaller traits, name utilities
//! - [`cirrus-codec`] - Marshaller implementations
//! - [`cirrus-middleware`] - Tracing integration

// Re-export core types
pub use cirrus_core::{
    Builder, CodecError, DescriptorError, KnownTransport, Marshaller, MessageKind,
    MethodDescriptor, MethodType, PathEncoder, PrototypeMarshaller, RawMethodName, RawNameCache,
    RawNameEncoder, ReflectableMarshaller, SchemaDescriptor, SpanNameRegistrar, TransportIndex,
};

// Re-export name utilities
pub use cirrus_core::{
    extract_bare_method_name, extract_full_service_name, full_method_name, names,
    trace_span_name, trace_span_names,
};

// Re-export codec
#[cfg(feature = "codec")]
pub use cirrus_codec::{MarshallerConfig, RawBytesMarshaller, RkyvMarshaller, VoidMarshaller};

// Re-export middleware
#[cfg(feature = "tracing")]
pub use cirrus_middleware::{MethodSpanExt, SampledSpanRegistry, SpanRegistryConfig};

// Re-export rkyv for user convenience
pub use rkyv::{Archive, Deserialize, Serialize};

/// Prelude module for convenient imports.
///
/// ```rust
/// use cirrus::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Marshaller, MethodDescriptor, MethodType};

    #[cfg(feature = "codec")]
    pub use crate::RkyvMarshaller;

    #[cfg(feature = "tracing")]
    pub use crate::MethodSpanExt;
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
