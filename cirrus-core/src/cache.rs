//! Lock-free per-transport cache of precomputed method names.
//!
//! Every [`MethodDescriptor`](crate::MethodDescriptor) embeds one
//! [`RawNameCache`] with a slot per [`KnownTransport`]. A transport encodes
//! the method name the first time it sees a descriptor, publishes the result
//! into its slot, and reads it back on every later call.
//!
//! Slots are independent atomic cells. There is no lock and no
//! compare-and-swap: a reader that races a writer may see the slot empty and
//! recompute. That is fine because a slot is only ever written by one
//! transport kind with a value derived purely from the full method name, so
//! every write stores an equivalent value.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::error::DescriptorError;
use crate::transport::{KnownTransport, TransportIndex};

/// Opaque transport-specific encoding of a method name.
///
/// Transports downcast to the concrete type they stored.
pub struct RawMethodName {
    value: Box<dyn Any + Send + Sync>,
}

impl RawMethodName {
    /// Wrap a transport-specific value.
    #[must_use]
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Box::new(value),
        }
    }

    /// Borrow the stored value as `T`, if that is what it holds.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    /// Whether the stored value is a `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }
}

impl fmt::Debug for RawMethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawMethodName").finish_non_exhaustive()
    }
}

/// Fixed-size table of [`RawMethodName`] slots, one per transport kind.
pub struct RawNameCache {
    slots: [ArcSwapOption<RawMethodName>; KnownTransport::COUNT],
}

impl RawNameCache {
    /// Create a cache with every slot empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| ArcSwapOption::empty()),
        }
    }

    /// Number of slots.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        KnownTransport::COUNT
    }

    /// Always `false`; present for API symmetry with `len`.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        KnownTransport::COUNT == 0
    }

    /// Read the slot for `index`. Never blocks.
    ///
    /// Returns `None` if no write to this slot has become visible yet.
    #[inline]
    #[must_use]
    pub fn get(&self, index: TransportIndex) -> Option<Arc<RawMethodName>> {
        self.slots[index.get()].load_full()
    }

    /// Publish `value` into the slot for `index`. Never blocks.
    ///
    /// The store is visible to any later load that observes it; readers that
    /// do not observe it yet see the previous contents.
    ///
    /// The store is lock-free but not wait-free: before returning it settles
    /// any reader borrows still outstanding on the previous value.
    #[inline]
    pub fn set(&self, index: TransportIndex, value: Arc<RawMethodName>) {
        self.slots[index.get()].store(Some(value));
    }

    /// Read a slot by raw position.
    pub fn try_get(&self, index: usize) -> Result<Option<Arc<RawMethodName>>, DescriptorError> {
        let index = self.check(index)?;
        Ok(self.get(index))
    }

    /// Write a slot by raw position.
    pub fn try_set(&self, index: usize, value: Arc<RawMethodName>) -> Result<(), DescriptorError> {
        let index = self.check(index)?;
        self.set(index, value);
        Ok(())
    }

    fn check(&self, index: usize) -> Result<TransportIndex, DescriptorError> {
        TransportIndex::new(index).ok_or(DescriptorError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }
}

impl Default for RawNameCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RawNameCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filled: Vec<bool> = self.slots.iter().map(|s| s.load().is_some()).collect();
        f.debug_struct("RawNameCache").field("filled", &filled).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_starts_empty() {
        let cache = RawNameCache::new();
        assert_eq!(cache.len(), KnownTransport::COUNT);
        for kind in KnownTransport::ALL {
            assert!(cache.get(kind.index()).is_none());
        }
    }

    #[test]
    fn test_set_then_get() {
        let cache = RawNameCache::new();
        let tcp = KnownTransport::Tcp.index();

        cache.set(tcp, Arc::new(RawMethodName::new(b"/svc/m".to_vec())));

        let raw = cache.get(tcp).unwrap();
        assert_eq!(raw.downcast_ref::<Vec<u8>>().unwrap(), b"/svc/m");
        assert!(raw.downcast_ref::<String>().is_none());
        assert!(cache.get(KnownTransport::Uds.index()).is_none());
    }

    #[test]
    fn test_checked_access() {
        let cache = RawNameCache::new();
        let err = cache.try_get(KnownTransport::COUNT).unwrap_err();
        assert_eq!(
            err,
            DescriptorError::IndexOutOfRange {
                index: KnownTransport::COUNT,
                len: KnownTransport::COUNT,
            }
        );
        assert!(cache
            .try_set(usize::MAX, Arc::new(RawMethodName::new(0u8)))
            .is_err());

        cache.try_set(0, Arc::new(RawMethodName::new(1u8))).unwrap();
        let raw = cache.try_get(0).unwrap().unwrap();
        assert_eq!(raw.downcast_ref::<u8>(), Some(&1));
    }

    #[test]
    fn test_concurrent_readers_see_empty_or_value() {
        let cache = RawNameCache::new();
        let index = KnownTransport::Tls.index();

        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..1_000 {
                        if let Some(raw) = cache.get(index) {
                            assert_eq!(raw.downcast_ref::<&str>(), Some(&"/pkg.Svc/Method"));
                        }
                    }
                });
            }
            for _ in 0..2 {
                s.spawn(|| {
                    for _ in 0..100 {
                        cache.set(index, Arc::new(RawMethodName::new("/pkg.Svc/Method")));
                    }
                });
            }
        });

        let raw = cache.get(index).unwrap();
        assert_eq!(raw.downcast_ref::<&str>(), Some(&"/pkg.Svc/Method"));
    }
}
