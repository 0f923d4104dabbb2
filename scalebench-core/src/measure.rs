//! High-Precision Timing
//!
//! Uses RDTSCP on x86_64 and CNTVCT_EL0 on AArch64 for minimal overhead
//! cycle counting alongside the monotonic `std::time::Instant` clock.

use std::time::Duration;

/// Read the CPU cycle/tick counter (platform-specific).
#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn read_cycles() -> u64 {
    // SAFETY: RDTSCP is available on all x86_64 CPUs since ~2006 and
    // waits for prior instructions to retire before reading the counter.
    unsafe {
        let mut _aux: u32 = 0;
        std::arch::x86_64::__rdtscp(&mut _aux)
    }
}

/// Read the virtual counter timer on AArch64.
#[cfg(target_arch = "aarch64")]
#[inline(always)]
fn read_cycles() -> u64 {
    let cnt: u64;
    // SAFETY: CNTVCT_EL0 is readable from EL0 on all AArch64 implementations.
    unsafe {
        std::arch::asm!("mrs {}, cntvct_el0", out(reg) cnt, options(nostack, nomem));
    }
    cnt
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline(always)]
fn read_cycles() -> u64 {
    0
}

/// Whether this platform provides real cycle counters.
pub const HAS_CYCLE_COUNTER: bool = cfg!(target_arch = "x86_64") || cfg!(target_arch = "aarch64");

/// Time attributed to a measured region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Elapsed {
    /// Wall-clock nanoseconds
    pub nanos: u64,
    /// Cycle/tick delta (0 without a hardware counter)
    pub cycles: u64,
}

impl Elapsed {
    /// Elapsed wall-clock time as a `Duration`.
    pub fn as_duration(&self) -> Duration {
        Duration::from_nanos(self.nanos)
    }
}

/// Monotonic timer wrapped around one measured region.
///
/// The cycle counter is read before the clock on start and after it on
/// stop so the cycle window always encloses the clock window.
pub struct Timer {
    start: std::time::Instant,
    cycles_start: u64,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        let cycles_start = read_cycles();
        Self {
            start: std::time::Instant::now(),
            cycles_start,
        }
    }

    /// Stop the timer and return the elapsed time.
    #[inline(always)]
    pub fn stop(&self) -> Elapsed {
        let nanos = self.start.elapsed().as_nanos() as u64;
        let cycles = read_cycles().saturating_sub(self.cycles_start);
        Elapsed { nanos, cycles }
    }
}

/// Pin the current thread to a specific core.
///
/// Keeps the measuring thread from migrating between cores mid-trial.
#[cfg(target_os = "linux")]
pub fn pin_to_cpu(cpu: usize) -> Result<(), std::io::Error> {
    use std::mem::MaybeUninit;

    unsafe {
        let mut set = MaybeUninit::<libc::cpu_set_t>::zeroed();
        let set_ref = set.assume_init_mut();

        libc::CPU_ZERO(set_ref);
        libc::CPU_SET(cpu, set_ref);

        let result = libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), set_ref);

        if result == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }
}

/// Pin the current thread to a specific core (no-op off Linux).
#[cfg(not(target_os = "linux"))]
pub fn pin_to_cpu(_cpu: usize) -> Result<(), std::io::Error> {
    Ok(())
}
