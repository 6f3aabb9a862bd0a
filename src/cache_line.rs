#![allow(unsafe_code)] // platform cache queries require FFI

//     ______   __  __     __         ______     ______
//    /\  == \ /\ \/\ \   /\ \       /\  ___\   /\  ___\
//    \ \  _-/ \ \ \_\ \  \ \ \____  \ \___  \  \ \  __\
//     \ \_\    \ \_____\  \ \_____\  \/\_____\  \ \_____\
//      \/_/     \/_____/   \/_____/   \/_____/   \/_____/
//
// Author: Colin MacRitchie / Ripple Group
// L1 data cache line size detection

use std::sync::atomic::{AtomicUsize, Ordering};

/// Line size assumed when the platform reports nothing usable.
pub const FALLBACK_CACHE_LINE_SIZE: usize = 64;

/* Detected size, 0 = not probed yet */
static CACHE_LINE_SIZE: AtomicUsize = AtomicUsize::new(0);

/// Returns the L1 data cache line size in bytes.
///
/// Probes the platform on first call and caches the result; later calls are
/// a single relaxed load. Never returns 0: when detection fails, or the
/// platform reports a value that is not a plausible line size, this returns
/// [`FALLBACK_CACHE_LINE_SIZE`].
///
/// # Platform Support
///
/// - **Linux**: `sysconf(_SC_LEVEL1_DCACHE_LINESIZE)`
/// - **macOS**: `sysctlbyname("hw.cachelinesize")`
/// - **Windows**: `GetLogicalProcessorInformation`, level-1 cache entry
/// - **Fallback**: [`FALLBACK_CACHE_LINE_SIZE`]
#[must_use]
pub fn cache_line_size() -> usize {
    match CACHE_LINE_SIZE.load(Ordering::Relaxed) {
        0 => {
            let detected = probe()
                .filter(|&size| size.is_power_of_two() && (16..=1024).contains(&size))
                .unwrap_or(FALLBACK_CACHE_LINE_SIZE);

            // Racing probes agree, so a plain store is fine
            CACHE_LINE_SIZE.store(detected, Ordering::Relaxed);
            detected
        },
        size => size,
    }
}

#[cfg(target_os = "linux")]
fn probe() -> Option<usize> {
    // SAFETY: sysconf with a valid name has no preconditions
    let line = unsafe { libc::sysconf(libc::_SC_LEVEL1_DCACHE_LINESIZE) };

    if line > 0 { Some(line as usize) } else { None }
}

#[cfg(target_os = "macos")]
fn probe() -> Option<usize> {
    let mut line: u64 = 0;
    let mut len: libc::size_t = std::mem::size_of::<u64>();

    // SAFETY: out-pointer and length describe the same 8-byte buffer
    let ret = unsafe {
        libc::sysctlbyname(
            c"hw.cachelinesize".as_ptr(),
            (&mut line as *mut u64).cast(),
            &mut len,
            std::ptr::null_mut(),
            0,
        )
    };

    if ret == 0 && line > 0 { Some(line as usize) } else { None }
}

#[cfg(target_os = "windows")]
fn probe() -> Option<usize> {
    use windows_sys::Win32::System::SystemInformation::{
        GetLogicalProcessorInformation, RelationCache, SYSTEM_LOGICAL_PROCESSOR_INFORMATION,
    };

    let entry_size = std::mem::size_of::<SYSTEM_LOGICAL_PROCESSOR_INFORMATION>();
    let mut length: u32 = 0;

    // SAFETY: null buffer with zero length is the documented size query
    unsafe { GetLogicalProcessorInformation(std::ptr::null_mut(), &mut length) };
    if length == 0 {
        return None;
    }

    let count = length as usize / entry_size;
    // SAFETY: the struct is plain old data; all-zero bytes are a valid value
    let mut buffer: Vec<SYSTEM_LOGICAL_PROCESSOR_INFORMATION> =
        vec![unsafe { std::mem::zeroed() }; count];

    // SAFETY: buffer capacity matches the byte length reported above
    let ok = unsafe { GetLogicalProcessorInformation(buffer.as_mut_ptr(), &mut length) };
    if ok == 0 {
        return None;
    }

    for info in &buffer[..length as usize / entry_size] {
        if info.Relationship == RelationCache {
            // SAFETY: the Cache arm is the valid union arm for RelationCache
            let cache = unsafe { info.Anonymous.Cache };
            if cache.Level == 1 {
                return Some(cache.LineSize as usize);
            }
        }
    }

    None
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn probe() -> Option<usize> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_line_size_is_plausible() {
        let size = cache_line_size();

        assert!(size >= 16, "Line size too small: {size}");
        assert!(size <= 1024, "Line size too large: {size}");
        assert!(size.is_power_of_two(), "Line size not a power of two: {size}");
    }

    #[test]
    fn test_cache_line_size_is_stable() {
        let first = cache_line_size();

        for _ in 0..100 {
            assert_eq!(cache_line_size(), first, "Cached value must not change");
        }
    }

    #[test]
    fn test_fallback_is_plausible() {
        assert!(FALLBACK_CACHE_LINE_SIZE.is_power_of_two());
    }
}
