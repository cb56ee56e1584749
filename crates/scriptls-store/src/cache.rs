//! The opaque persistence seam (§6). The store calls through this trait to
//! save and restore serialized symbol tables for known-but-unopened
//! documents; the on-disk layout is a front-end concern.

use scriptls_error::CoreError;
use std::future::Future;
use std::pin::Pin;

pub type CacheFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CoreError>> + Send + 'a>>;

/// Async persistence seam. No bundled implementation ships here — only
/// [`NullCache`], for callers who haven't wired one up yet.
///
/// Plain `async fn` in a trait isn't object-safe, and this crate needs to
/// hold a `Box<dyn Cache>` inside the store, so each method returns a
/// boxed future explicitly rather than pulling in `async-trait` for a
/// four-method seam.
pub trait Cache: Send + Sync {
    fn init(&self) -> CacheFuture<'_, ()>;
    fn read(&self, key: &str) -> CacheFuture<'_, Option<serde_json::Value>>;
    fn write(&self, key: &str, value: serde_json::Value) -> CacheFuture<'_, ()>;
    fn delete(&self, key: &str) -> CacheFuture<'_, ()>;
}

/// A cache that always misses and silently discards writes. The default
/// for any store that doesn't need cross-session persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCache;

impl Cache for NullCache {
    fn init(&self) -> CacheFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }

    fn read(&self, _key: &str) -> CacheFuture<'_, Option<serde_json::Value>> {
        Box::pin(async { Ok(None) })
    }

    fn write(&self, _key: &str, _value: serde_json::Value) -> CacheFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }

    fn delete(&self, _key: &str) -> CacheFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }
}
