//! Trial Execution
//!
//! One trial = `initialize(size)` → timed `step` loop → `dispose()`.
//! Only the `step` loop is inside the timer, so the cost of building and
//! releasing the structure never leaks into the measurement. `dispose` runs
//! on every path out of a trial, including hook errors and panics.

use crate::error::{HookError, TrialError, panic_message};
use crate::hooks::Hooks;
use crate::measure::{Elapsed, Timer};
use crate::task::Measurement;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Timing of one successful trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialOutcome {
    /// Size the structure was prepared for
    pub size: usize,
    /// Number of `step` calls inside the timer
    pub operations: usize,
    /// Time spent in the `step` loop only
    pub elapsed: Elapsed,
}

impl TrialOutcome {
    /// Average nanoseconds per `step` call.
    pub fn per_operation_ns(&self) -> f64 {
        if self.operations == 0 {
            return 0.0;
        }
        self.elapsed.nanos as f64 / self.operations as f64
    }

    /// Average cycles per `step` call.
    pub fn per_operation_cycles(&self) -> f64 {
        if self.operations == 0 {
            return 0.0;
        }
        self.elapsed.cycles as f64 / self.operations as f64
    }
}

/// Run one trial of `hooks` at `size`.
///
/// With [`Measurement::Point`] `step` is called once with `index = size`;
/// with [`Measurement::Amortized`] it is called for every index in `0..size`.
pub fn run_trial<H>(
    hooks: &mut H,
    size: usize,
    measurement: Measurement,
) -> Result<TrialOutcome, TrialError>
where
    H: Hooks + ?Sized,
{
    // Setup (not timed)
    let setup = catch_unwind(AssertUnwindSafe(|| hooks.initialize(size)));
    let setup_error = match setup {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(e.message().to_string()),
        Err(panic) => Some(panic_message(panic.as_ref())),
    };
    if let Some(message) = setup_error {
        // Partial state may exist; release it before reporting
        let _ = dispose(hooks);
        return Err(TrialError::Setup { size, message });
    }

    let operations = measurement.operations(size);
    let mut current = 0usize;

    let measured = catch_unwind(AssertUnwindSafe(|| {
        let timer = Timer::start();
        let result = step_loop(hooks, size, measurement, &mut current);
        let elapsed = timer.stop();
        result.map(|()| elapsed)
    }));

    // Teardown (not timed, unconditional)
    let teardown = dispose(hooks);

    let operation_error = match measured {
        Ok(Ok(elapsed)) => {
            teardown?;
            return Ok(TrialOutcome {
                size,
                operations,
                elapsed,
            });
        }
        Ok(Err(e)) => e.message().to_string(),
        Err(panic) => panic_message(panic.as_ref()),
    };

    // Both phases failed; keep the teardown message with the operation error
    let message = match teardown {
        Ok(()) => operation_error,
        Err(e) => format!("{operation_error}; {e}"),
    };
    Err(TrialError::Operation {
        index: current,
        message,
    })
}

#[inline]
fn step_loop<H>(
    hooks: &mut H,
    size: usize,
    measurement: Measurement,
    current: &mut usize,
) -> Result<(), HookError>
where
    H: Hooks + ?Sized,
{
    match measurement {
        Measurement::Point => {
            *current = size;
            hooks.step(size)
        }
        Measurement::Amortized => {
            for index in 0..size {
                *current = index;
                hooks.step(index)?;
            }
            Ok(())
        }
    }
}

fn dispose<H>(hooks: &mut H) -> Result<(), TrialError>
where
    H: Hooks + ?Sized,
{
    catch_unwind(AssertUnwindSafe(|| hooks.dispose())).map_err(|panic| TrialError::Teardown {
        message: panic_message(panic.as_ref()),
    })
}
