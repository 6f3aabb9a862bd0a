//! Spin-wait support primitives for the Pulse runtime crates
//!
//! This crate provides the low-level pieces shared by spin-wait and
//! contention-backoff loops: the architecture-specific hardware pause hint,
//! a one-time bootstrap guard for the shared thread pool, and L1 cache line
//! size detection for contention-aware data layout.

#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

//     ______   __  __     __         ______     ______
//    /\  == \ /\ \/\ \   /\ \       /\  ___\   /\  ___\
//    \ \  _-/ \ \ \_\ \  \ \ \____  \ \___  \  \ \  __\
//     \ \_\    \ \_____\  \ \_____\  \/\_____\  \ \_____\
//      \/_/     \/_____/   \/_____/   \/_____/   \/_____/
//
// Author: Colin MacRitchie / Ripple Group
// Spin-wait support primitives

/// One-time shared thread pool bootstrap
pub mod bootstrap;
/// Cache line size detection
pub mod cache_line;
/// Hardware pause hint for spin loops
pub mod spin;

// Public API exports
pub use bootstrap::{PoolBootstrap, initialize_shared_pool, shared_pool_is_initialized};
pub use cache_line::{FALLBACK_CACHE_LINE_SIZE, cache_line_size};
pub use spin::{pause, spin_loop};
