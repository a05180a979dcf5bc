//! API implementation submodules.
//!
//! Each submodule contains `impl Storefront` blocks that extend the public API.
//! The struct definition remains in `lib.rs`.

mod builder;
mod pages;

pub use builder::StorefrontBuilder;
