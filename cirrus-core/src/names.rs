//! Full method name composition and trace span naming.
//!
//! A full method name has the form `<fullServiceName>/<methodName>`. No
//! escaping is defined, so a `/` inside the method part breaks
//! [`extract_full_service_name`].

/// Separator between the service and method parts.
pub const METHOD_SEPARATOR: char = '/';

/// Span name prefix for the client side of a call.
pub const CLIENT_SPAN_PREFIX: &str = "Sent";

/// Span name prefix for the server side of a call.
pub const SERVER_SPAN_PREFIX: &str = "Recv";

/// Join a service name and method name into a full method name.
#[must_use]
pub fn full_method_name(full_service_name: &str, method_name: &str) -> String {
    let mut name = String::with_capacity(full_service_name.len() + 1 + method_name.len());
    name.push_str(full_service_name);
    name.push(METHOD_SEPARATOR);
    name.push_str(method_name);
    name
}

/// Service part of a full method name: everything before the last `/`.
///
/// Returns `None` when there is no `/`. A trailing `/` yields `Some("")`.
/// This is a best-effort split and does not validate the name.
#[must_use]
pub fn extract_full_service_name(full_method_name: &str) -> Option<&str> {
    full_method_name
        .rfind(METHOD_SEPARATOR)
        .map(|index| &full_method_name[..index])
}

/// Method part of a full method name: everything after the last `/`.
///
/// Returns `None` when there is no `/`.
#[must_use]
pub fn extract_bare_method_name(full_method_name: &str) -> Option<&str> {
    full_method_name
        .rfind(METHOD_SEPARATOR)
        .map(|index| &full_method_name[index + 1..])
}

/// Tracing span name for one side of a call.
///
/// `Recv.` for the server, `Sent.` for the client, followed by the full
/// method name with every `/` replaced by `.`.
#[must_use]
pub fn trace_span_name(is_server: bool, full_method_name: &str) -> String {
    let prefix = if is_server {
        SERVER_SPAN_PREFIX
    } else {
        CLIENT_SPAN_PREFIX
    };
    format!("{prefix}.{}", full_method_name.replace(METHOD_SEPARATOR, "."))
}
