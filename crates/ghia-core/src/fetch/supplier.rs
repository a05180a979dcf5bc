//! The async data source behind a cached fetch.

use crate::cancel::CancellationToken;
use crate::error::Result;
use async_trait::async_trait;
use std::future::Future;

/// Produces a value for a [`CachedFetch`](super::CachedFetch).
///
/// `key` is the cache key the call was started for; a successful result is
/// stored under exactly that key. The token is cancelled when the result is
/// no longer wanted. Suppliers should stop early and return
/// [`StorefrontError::Cancelled`] when they notice, but the caller discards
/// late results either way.
///
/// [`StorefrontError::Cancelled`]: crate::error::StorefrontError::Cancelled
#[async_trait]
pub trait Supplier<T>: Send + Sync {
    async fn fetch(&self, key: &str, token: CancellationToken) -> Result<T>;
}

#[async_trait]
impl<T, F, Fut> Supplier<T> for F
where
    F: Fn(&str, CancellationToken) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    async fn fetch(&self, key: &str, token: CancellationToken) -> Result<T> {
        (self)(key, token).await
    }
}
