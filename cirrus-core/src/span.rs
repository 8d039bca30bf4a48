//! Hook for registering trace span names at descriptor build time.

use crate::names::trace_span_name;

/// Receives span names that should be collected by a sampling backend.
///
/// Passed to [`Builder::set_span_registrar`](crate::Builder::set_span_registrar);
/// invoked by [`Builder::build`](crate::Builder::build) when
/// `register_for_tracing` is set.
pub trait SpanNameRegistrar: Send + Sync {
    /// Register span names for collection.
    fn register_span_names(&self, span_names: &[String]);
}

impl<F> SpanNameRegistrar for F
where
    F: Fn(&[String]) + Send + Sync,
{
    fn register_span_names(&self, span_names: &[String]) {
        self(span_names)
    }
}

/// Client and server span names for a method, in that order.
#[must_use]
pub fn trace_span_names(full_method_name: &str) -> [String; 2] {
    [
        trace_span_name(false, full_method_name),
        trace_span_name(true, full_method_name),
    ]
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    #[test]
    fn test_closure_registrar() {
        let seen = Mutex::new(Vec::new());
        let registrar = |names: &[String]| seen.lock().extend_from_slice(names);

        registrar.register_span_names(&trace_span_names("pkg.Svc/Method"));

        assert_eq!(
            *seen.lock(),
            vec!["Sent.pkg.Svc.Method".to_string(), "Recv.pkg.Svc.Method".to_string()]
        );
    }
}
