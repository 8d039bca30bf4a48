//! # cirrus-core
//!
//! Method descriptors for the Cirrus RPC framework.
//!
//! This crate provides:
//! - `MethodDescriptor` and its `Builder`
//! - `MethodType` call cardinalities
//! - Marshaller capability traits (`Marshaller`, `ReflectableMarshaller`, `PrototypeMarshaller`)
//! - Full method name and trace span name utilities
//! - `RawNameCache`, the lock-free per-transport name cache
//! - Error types (`DescriptorError`, `CodecError`)

mod builder;
mod cache;
mod descriptor;
mod error;
mod marshaller;
mod method_type;
pub mod names;
mod span;
mod transport;

pub use builder::Builder;
pub use cache::{RawMethodName, RawNameCache};
pub use descriptor::{MethodDescriptor, SchemaDescriptor};
pub use error::{CodecError, DescriptorError};
pub use marshaller::{Marshaller, MessageKind, PrototypeMarshaller, ReflectableMarshaller};
pub use method_type::MethodType;
pub use names::{
    extract_bare_method_name, extract_full_service_name, full_method_name, trace_span_name,
};
pub use span::{SpanNameRegistrar, trace_span_names};
pub use transport::{KnownTransport, PathEncoder, RawNameEncoder, TransportIndex};
