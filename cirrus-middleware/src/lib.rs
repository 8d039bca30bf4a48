//! # cirrus-middleware
//!
//! Tracing integration for Cirrus method descriptors.
//!
//! This crate provides:
//! - `SampledSpanRegistry`, a span name registrar for descriptor builders
//! - `MethodSpanExt` for opening `tracing` spans named after a method

mod registry;
mod span_ext;

pub use registry::{DEFAULT_MAX_SPAN_NAMES, SampledSpanRegistry, SpanRegistryConfig};
pub use span_ext::MethodSpanExt;
