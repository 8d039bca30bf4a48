//! # cirrus-codec
//!
//! Concrete marshallers for Cirrus method descriptors.
//!
//! This crate provides:
//! - `RkyvMarshaller` - rkyv archive encoding with validation on parse
//! - `RawBytesMarshaller` - identity marshaller for opaque payloads
//! - `VoidMarshaller` - the empty message
//! - `MarshallerConfig` - size limits shared by the above

mod archive;
mod config;
mod raw;

pub use archive::RkyvMarshaller;
pub use config::{DEFAULT_MAX_MESSAGE_SIZE, MarshallerConfig};
pub use raw::{RawBytesMarshaller, VoidMarshaller};
