#![forbid(unsafe_code)]

//     ______   __  __     __         ______     ______
//    /\  == \ /\ \/\ \   /\ \       /\  ___\   /\  ___\
//    \ \  _-/ \ \ \_\ \  \ \ \____  \ \___  \  \ \  __\
//     \ \_\    \ \_____\  \ \_____\  \/\_____\  \ \_____\
//      \/_/     \/_____/   \/_____/   \/_____/   \/_____/
//
// Author: Colin MacRitchie / Ripple Group
// One-time shared thread pool bootstrap

use std::sync::Once;

/// One-time initialization guard for an external setup routine.
///
/// Wraps the setup call for a collaborator this crate does not own (the
/// shared thread pool) and guarantees it runs exactly once per guard no
/// matter how many threads race to fire it. The guard holds no handle to
/// whatever the setup routine creates and surfaces no errors of its own.
///
/// Prefer an explicit `fire` from the hosting process's bootstrap sequence
/// over link-time constructor tricks: it gives the caller control of
/// ordering relative to other initializers while keeping the exactly-once
/// contract enforced here.
#[derive(Debug)]
pub struct PoolBootstrap {
    once: Once,
}

impl PoolBootstrap {
    /// Creates an unfired guard.
    #[must_use]
    pub const fn new() -> Self {
        Self { once: Once::new() }
    }

    /// Runs `setup` if no earlier call on this guard has.
    ///
    /// Returns `true` iff this call performed the initialization. Losing
    /// racers block until the winner's `setup` returns, then return `false`,
    /// so every caller observes the initialization as begun before it
    /// proceeds.
    ///
    /// # Panics
    ///
    /// If `setup` panics the panic propagates to the calling thread and the
    /// guard is poisoned; subsequent `fire` calls panic, per
    /// [`std::sync::Once`] semantics.
    pub fn fire<F: FnOnce()>(&self, setup: F) -> bool {
        let mut performed = false;
        self.once.call_once(|| {
            setup();
            performed = true;
        });

        if performed {
            #[cfg(feature = "tracing")]
            tracing::debug!("shared thread pool initialized");
        }

        performed
    }

    /// Whether a `fire` on this guard has completed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.once.is_completed()
    }
}

impl Default for PoolBootstrap {
    fn default() -> Self {
        Self::new()
    }
}

/* Process-global guard for the shared thread pool */
static SHARED_POOL: PoolBootstrap = PoolBootstrap::new();

/// Initializes the shared thread pool exactly once per process.
///
/// `setup` is the external pool initialization entry point; it is invoked at
/// most once per process lifetime regardless of how many threads call this.
/// Call from the process bootstrap sequence before any code that relies on
/// the pool existing.
///
/// Returns `true` iff this call performed the initialization.
pub fn initialize_shared_pool<F: FnOnce()>(setup: F) -> bool {
    SHARED_POOL.fire(setup)
}

/// Whether the process-wide shared pool initialization has completed.
#[inline]
#[must_use]
pub fn shared_pool_is_initialized() -> bool {
    SHARED_POOL.is_complete()
}
