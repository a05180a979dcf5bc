//! Shared in-memory data cache.
//!
//! One [`DataCache`] is built when the storefront starts and injected into
//! every consumer. Entries carry the time they were fetched; freshness is
//! decided by the reader against its own TTL, so expired entries linger until
//! the next successful fetch overwrites them.

mod clock;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{CacheEntry, DataCache};
