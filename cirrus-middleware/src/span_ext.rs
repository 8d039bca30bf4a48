//! Tracing spans named after method descriptors.

use cirrus_core::{MethodDescriptor, trace_span_name};
use tracing::{Span, info_span};

/// Extension trait for creating spans from a descriptor.
pub trait MethodSpanExt {
    /// Span for the client side of a call, named `Sent.<service>.<method>`.
    fn client_span(&self) -> Span;

    /// Span for the server side of a call, named `Recv.<service>.<method>`.
    fn server_span(&self) -> Span;
}

impl<Req, Resp> MethodSpanExt for MethodDescriptor<Req, Resp> {
    fn client_span(&self) -> Span {
        method_span(self, false)
    }

    fn server_span(&self) -> Span {
        method_span(self, true)
    }
}

fn method_span<Req, Resp>(method: &MethodDescriptor<Req, Resp>, is_server: bool) -> Span {
    let name = trace_span_name(is_server, method.full_method_name());
    info_span!(
        "rpc",
        otel.name = %name,
        rpc.method = %method.full_method_name(),
        rpc.method_type = %method.method_type(),
        rpc.idempotent = method.is_idempotent(),
    )
}
