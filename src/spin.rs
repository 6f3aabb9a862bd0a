#![allow(unsafe_code)] // inline assembly requires unsafe
#![allow(clippy::inline_always)] /* Performance-critical */

//     ______   __  __     __         ______     ______
//    /\  == \ /\ \/\ \   /\ \       /\  ___\   /\  ___\
//    \ \  _-/ \ \ \_\ \  \ \ \____  \ \___  \  \ \  __\
//     \ \_\    \ \_____\  \ \_____\  \/\_____\  \ \_____\
//      \/_/     \/_____/   \/_____/   \/_____/   \/_____/
//
// Author: Colin MacRitchie / Ripple Group
// Hardware pause hint for spin-wait loops

/// Issues the processor's spin-wait hint
///
/// Signals the core that the current thread is in a busy-wait loop so it can
/// de-prioritize speculative execution and reduce power draw and pipeline
/// contention. The instruction is selected at compile time per target
/// architecture:
///
/// - x86 / x86-64: `pause`
/// - AArch64, and 32-bit ARMv7 in Thumb mode: `yield`
/// - anything else: no-op
///
/// No inputs, no outputs, cannot fail, never blocks beyond the inherent
/// hardware cycle cost. Touches no memory and no program-visible registers;
/// safe to call concurrently from any number of threads.
///
/// # Example
///
/// ```rust
/// use pulse_spin::pause;
///
/// let mut attempts = 0;
/// while attempts < 100 {
///     // try_acquire() here in a real contention loop
///     pause();
///     attempts += 1;
/// }
/// ```
#[inline(always)]
pub fn pause() {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    // SAFETY: `pause` takes no operands and only touches pipeline state
    unsafe {
        core::arch::asm!("pause", options(nomem, nostack, preserves_flags));
    }

    #[cfg(any(
        target_arch = "aarch64",
        all(target_arch = "arm", target_feature = "v7", target_feature = "thumb-mode")
    ))]
    // SAFETY: `yield` takes no operands and only touches pipeline state
    unsafe {
        core::arch::asm!("yield", options(nomem, nostack, preserves_flags));
    }

    // Unrecognized architectures degrade to a pure no-op
}

/// Issues the pause hint a fixed number of times
///
/// Convenience for contention backoff call sites that want a bounded spin
/// between retries. No adaptive policy; callers own their backoff strategy.
#[inline(always)]
pub fn spin_loop(iterations: u32) {
    for _ in 0..iterations {
        pause();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_returns_normally() {
        // Must return on every architecture, fallback included
        pause();
    }

    #[test]
    fn test_pause_is_idempotent() {
        for _ in 0..10_000 {
            pause();
        }
    }

    #[test]
    fn test_pause_preserves_program_state() {
        let before = 0xDEAD_BEEF_u64;
        let observed = std::hint::black_box(before);
        pause();
        assert_eq!(observed, before, "pause must not alter program-visible state");
    }

    #[test]
    fn test_spin_loop_zero_iterations() {
        spin_loop(0);
    }

    #[test]
    fn test_spin_loop_bounded() {
        spin_loop(1_000);
    }
}
