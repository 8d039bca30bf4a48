//! Staging area for [`MethodDescriptor`] construction.

use std::fmt;
use std::sync::Arc;

use crate::descriptor::{MethodDescriptor, SchemaDescriptor};
use crate::error::DescriptorError;
use crate::marshaller::Marshaller;
use crate::method_type::MethodType;
use crate::span::{SpanNameRegistrar, trace_span_names};

/// Accumulates descriptor fields and produces [`MethodDescriptor`]s.
///
/// Setters never validate; [`Builder::build`] checks required fields and the
/// `safe` ⇒ [`MethodType::Unary`] rule.
pub struct Builder<Req, Resp> {
    method_type: Option<MethodType>,
    full_method_name: Option<String>,
    request_marshaller: Option<Arc<dyn Marshaller<Req>>>,
    response_marshaller: Option<Arc<dyn Marshaller<Resp>>>,
    schema_descriptor: Option<SchemaDescriptor>,
    idempotent: bool,
    safe: bool,
    register_for_tracing: bool,
    span_registrar: Option<Arc<dyn SpanNameRegistrar>>,
}

impl<Req, Resp> Builder<Req, Resp> {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            method_type: None,
            full_method_name: None,
            request_marshaller: None,
            response_marshaller: None,
            schema_descriptor: None,
            idempotent: false,
            safe: false,
            register_for_tracing: false,
            span_registrar: None,
        }
    }

    /// Set the call cardinality.
    #[must_use]
    pub fn set_type(mut self, method_type: MethodType) -> Self {
        self.method_type = Some(method_type);
        self
    }

    /// Set the full method name, `<service>/<method>`.
    #[must_use]
    pub fn set_full_method_name(mut self, full_method_name: impl Into<String>) -> Self {
        self.full_method_name = Some(full_method_name.into());
        self
    }

    /// Set the request marshaller.
    #[must_use]
    pub fn set_request_marshaller(mut self, marshaller: Arc<dyn Marshaller<Req>>) -> Self {
        self.request_marshaller = Some(marshaller);
        self
    }

    /// Set the response marshaller.
    #[must_use]
    pub fn set_response_marshaller(mut self, marshaller: Arc<dyn Marshaller<Resp>>) -> Self {
        self.response_marshaller = Some(marshaller);
        self
    }

    /// Attach a schema payload.
    #[must_use]
    pub fn set_schema_descriptor(mut self, schema: SchemaDescriptor) -> Self {
        self.schema_descriptor = Some(schema);
        self
    }

    /// Remove any attached schema payload.
    #[must_use]
    pub fn clear_schema_descriptor(mut self) -> Self {
        self.schema_descriptor = None;
        self
    }

    /// Mark the method idempotent.
    #[must_use]
    pub fn set_idempotent(mut self, idempotent: bool) -> Self {
        self.idempotent = idempotent;
        self
    }

    /// Mark the method safe. Requires [`MethodType::Unary`] at build time.
    #[must_use]
    pub fn set_safe(mut self, safe: bool) -> Self {
        self.safe = safe;
        self
    }

    /// Register the method's client and server span names when building.
    #[must_use]
    pub fn set_register_for_tracing(mut self, register: bool) -> Self {
        self.register_for_tracing = register;
        self
    }

    /// Set the collaborator that receives span names on build.
    #[must_use]
    pub fn set_span_registrar(mut self, registrar: Arc<dyn SpanNameRegistrar>) -> Self {
        self.span_registrar = Some(registrar);
        self
    }

    /// Validate the staged fields and produce a descriptor.
    ///
    /// # Errors
    ///
    /// - [`DescriptorError::MissingField`] if the type, full method name, or
    ///   either marshaller was never set.
    /// - [`DescriptorError::InvalidConfiguration`] if `safe` is set on a
    ///   non-unary method.
    pub fn build(self) -> Result<MethodDescriptor<Req, Resp>, DescriptorError> {
        let method_type = self.method_type.ok_or(DescriptorError::MissingField("type"))?;
        let full_method_name = self
            .full_method_name
            .ok_or(DescriptorError::MissingField("full_method_name"))?;
        let request_marshaller = self
            .request_marshaller
            .ok_or(DescriptorError::MissingField("request_marshaller"))?;
        let response_marshaller = self
            .response_marshaller
            .ok_or(DescriptorError::MissingField("response_marshaller"))?;

        if self.safe && method_type != MethodType::Unary {
            return Err(DescriptorError::invalid(
                "only unary methods can be specified safe",
            ));
        }

        if self.register_for_tracing {
            match &self.span_registrar {
                Some(registrar) => {
                    let span_names = trace_span_names(&full_method_name);
                    tracing::debug!(
                        method = %full_method_name,
                        client_span = %span_names[0],
                        server_span = %span_names[1],
                        "Registering span names for collection"
                    );
                    registrar.register_span_names(&span_names);
                }
                None => {
                    tracing::warn!(
                        method = %full_method_name,
                        "Tracing registration requested without a span registrar; skipping"
                    );
                }
            }
        }

        Ok(MethodDescriptor::from_parts(
            method_type,
            full_method_name,
            request_marshaller,
            response_marshaller,
            self.schema_descriptor,
            self.idempotent,
            self.safe,
        ))
    }
}

impl<Req, Resp> Default for Builder<Req, Resp> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req, Resp> fmt::Debug for Builder<Req, Resp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("type", &self.method_type)
            .field("full_method_name", &self.full_method_name)
            .field("request_marshaller", &self.request_marshaller.is_some())
            .field("response_marshaller", &self.response_marshaller.is_some())
            .field("schema_descriptor", &self.schema_descriptor.is_some())
            .field("idempotent", &self.idempotent)
            .field("safe", &self.safe)
            .field("register_for_tracing", &self.register_for_tracing)
            .finish_non_exhaustive()
    }
}
