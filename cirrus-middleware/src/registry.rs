//! In-process registry of span names selected for sampling.

use std::sync::Arc;

use cirrus_core::SpanNameRegistrar;
use dashmap::DashSet;

/// Default cap on the number of distinct span names retained.
pub const DEFAULT_MAX_SPAN_NAMES: usize = 4096;

/// Configuration for a [`SampledSpanRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRegistryConfig {
    /// Maximum number of distinct span names to retain.
    pub max_span_names: usize,
}

impl Default for SpanRegistryConfig {
    fn default() -> Self {
        Self {
            max_span_names: DEFAULT_MAX_SPAN_NAMES,
        }
    }
}

impl SpanRegistryConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of span names.
    #[must_use]
    pub fn max_span_names(mut self, max: usize) -> Self {
        self.max_span_names = max;
        self
    }
}

/// Set of span names that should always be collected.
///
/// Hand it to descriptor builders as their span registrar, then consult
/// [`SampledSpanRegistry::is_sampled`] when deciding whether to record a span.
///
/// ## Example
///
/// ```rust,ignore
/// use cirrus_middleware::SampledSpanRegistry;
///
/// let registry = SampledSpanRegistry::shared();
/// let method = MethodDescriptor::<Req, Resp>::builder()
///     // ...
///     .set_register_for_tracing(true)
///     .set_span_registrar(registry.clone())
///     .build()?;
///
/// assert!(registry.is_sampled("Sent.pkg.Svc.Method"));
/// ```
#[derive(Debug)]
pub struct SampledSpanRegistry {
    config: SpanRegistryConfig,
    names: DashSet<String>,
}

impl SampledSpanRegistry {
    /// Create a registry with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SpanRegistryConfig::default())
    }

    /// Create a registry with full configuration.
    #[must_use]
    pub fn with_config(config: SpanRegistryConfig) -> Self {
        Self {
            config,
            names: DashSet::new(),
        }
    }

    /// Create a registry ready to be shared between builders.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Whether `span_name` has been registered.
    #[must_use]
    pub fn is_sampled(&self, span_name: &str) -> bool {
        self.names.contains(span_name)
    }

    /// Number of registered span names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no span names are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Registered span names, sorted.
    #[must_use]
    pub fn span_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.iter().map(|n| n.key().clone()).collect();
        names.sort_unstable();
        names
    }

    /// Stop sampling `span_name`. Returns whether it was registered.
    pub fn unregister(&self, span_name: &str) -> bool {
        self.names.remove(span_name).is_some()
    }

    fn insert(&self, span_name: &str) {
        if self.names.contains(span_name) {
            return;
        }
        // Concurrent registrations can overshoot the cap by a few entries.
        if self.names.len() >= self.config.max_span_names {
            tracing::warn!(
                span_name,
                max = self.config.max_span_names,
                "Span registry full, not sampling span"
            );
            return;
        }
        if self.names.insert(span_name.to_string()) {
            tracing::debug!(span_name, "Registered span name for sampling");
        }
    }
}

impl Default for SampledSpanRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SpanNameRegistrar for SampledSpanRegistry {
    fn register_span_names(&self, span_names: &[String]) {
        for name in span_names {
            self.insert(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_query() {
        let registry = SampledSpanRegistry::new();
        registry.register_span_names(&["Sent.a.B".to_string(), "Recv.a.B".to_string()]);

        assert!(registry.is_sampled("Sent.a.B"));
        assert!(registry.is_sampled("Recv.a.B"));
        assert!(!registry.is_sampled("Sent.a.C"));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.span_names(), vec!["Recv.a.B", "Sent.a.B"]);
    }

    #[test]
    fn test_duplicate_registration() {
        let registry = SampledSpanRegistry::new();
        registry.register_span_names(&["Sent.a.B".to_string()]);
        registry.register_span_names(&["Sent.a.B".to_string()]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_descriptor_build_registers() {
        use cirrus_codec::RawBytesMarshaller;
        use cirrus_core::{MethodDescriptor, MethodType};

        let registry = SampledSpanRegistry::shared();
        let marshaller = Arc::new(RawBytesMarshaller::new());

        let _method = MethodDescriptor::<Vec<u8>, Vec<u8>>::builder()
            .set_type(MethodType::ServerStreaming)
            .set_full_method_name("pkg.Feed/Subscribe")
            .set_request_marshaller(marshaller.clone())
            .set_response_marshaller(marshaller)
            .set_register_for_tracing(true)
            .set_span_registrar(registry.clone())
            .build()
            .unwrap();

        assert!(registry.is_sampled("Sent.pkg.Feed.Subscribe"));
        assert!(registry.is_sampled("Recv.pkg.Feed.Subscribe"));
    }

    #[test]
    fn test_capacity() {
        let registry =
            SampledSpanRegistry::with_config(SpanRegistryConfig::new().max_span_names(1));
        registry.register_span_names(&["one".to_string(), "two".to_string()]);

        assert!(registry.is_sampled("one"));
        assert!(!registry.is_sampled("two"));

        assert!(registry.unregister("one"));
        assert!(!registry.unregister("one"));
        assert!(registry.is_empty());
    }
}
