//! Cached data fetching with per-consumer cancellation.
//!
//! A [`CachedFetch`] pairs a cache key with a [`Supplier`]. Activating it
//! adopts a fresh [`DataCache`](crate::cache::DataCache) entry when one exists
//! and otherwise calls the supplier. Each instance owns at most one in-flight
//! call; starting another, or tearing the instance down, cancels it and
//! discards whatever it eventually returns.

mod hook;
mod state;
mod supplier;

pub use hook::CachedFetch;
pub use state::{FetchPhase, FetchState};
pub use supplier::Supplier;
