use std::io::{Error, Result};

/// Reads `CLOCK_MONOTONIC` in nanoseconds via
/// [`clock_gettime`](https://man7.org/linux/man-pages/man2/clock_gettime.2.html).
///
/// Sample timestamps must come from a clock that never jumps backwards,
/// so the wall clock is not an option here.
pub(crate) fn monotonic_ns() -> Result<u64> {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    let result = unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts) };
    if result != -1 {
        Ok(ts.tv_sec as u64 * 1_000_000_000 + ts.tv_nsec as u64)
    } else {
        Err(Error::last_os_error())
    }
}
