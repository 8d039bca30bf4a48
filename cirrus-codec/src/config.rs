//! Marshaller configuration.

use cirrus_core::CodecError;

/// Default maximum message size (16 MB).
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// Limits shared by the byte-oriented marshallers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarshallerConfig {
    /// Largest encoded message accepted by `stream` or `parse`.
    pub max_message_size: usize,
}

impl Default for MarshallerConfig {
    fn default() -> Self {
        Self {
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

impl MarshallerConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum message size.
    #[must_use]
    pub fn max_message_size(mut self, size: usize) -> Self {
        self.max_message_size = size;
        self
    }

    /// Reject messages over the configured limit.
    #[inline]
    pub(crate) fn check_size(&self, size: usize) -> Result<(), CodecError> {
        if size > self.max_message_size {
            tracing::debug!(size, max = self.max_message_size, "Message exceeds size limit");
            return Err(CodecError::MessageTooLarge {
                size,
                max: self.max_message_size,
            });
        }
        Ok(())
    }
}
