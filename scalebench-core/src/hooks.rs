//! Implementation Hooks
//!
//! The capability set every compared implementation provides. A task maps
//! each implementation label to one `Hooks` value; the executor drives it
//! through `initialize` → `step`* → `dispose` once per trial.

use crate::error::HookError;

/// Lifecycle of one structure under test.
pub trait Hooks {
    /// Build a fresh structure for a trial at `size`. Not timed.
    fn initialize(&mut self, size: usize) -> Result<(), HookError>;

    /// Perform exactly one measured operation.
    fn step(&mut self, index: usize) -> Result<(), HookError>;

    /// Release the structure. Not timed; must leave no state behind for the
    /// next trial. Called after every `initialize`, successful or not.
    fn dispose(&mut self);
}

impl<H: Hooks + ?Sized> Hooks for Box<H> {
    fn initialize(&mut self, size: usize) -> Result<(), HookError> {
        (**self).initialize(size)
    }

    fn step(&mut self, index: usize) -> Result<(), HookError> {
        (**self).step(index)
    }

    fn dispose(&mut self) {
        (**self).dispose()
    }
}

/// `Hooks` built from a setup/operate/teardown closure triple.
///
/// The structure returned by `setup` lives in the fixture only between
/// `initialize` and `dispose`; `operate` borrows it and `teardown` consumes it.
pub struct Fixture<T, S, O, D> {
    setup: S,
    operate: O,
    teardown: D,
    target: Option<T>,
}

impl<T, S, O, D> Fixture<T, S, O, D>
where
    S: FnMut(usize) -> Result<T, HookError>,
    O: FnMut(&mut T, usize) -> Result<(), HookError>,
    D: FnMut(T),
{
    /// Create a fixture from fallible setup and operate closures.
    pub fn new(setup: S, operate: O, teardown: D) -> Self {
        Self {
            setup,
            operate,
            teardown,
            target: None,
        }
    }

    /// Whether a structure is currently alive.
    pub fn is_live(&self) -> bool {
        self.target.is_some()
    }
}

impl<T, S, O, D> Hooks for Fixture<T, S, O, D>
where
    S: FnMut(usize) -> Result<T, HookError>,
    O: FnMut(&mut T, usize) -> Result<(), HookError>,
    D: FnMut(T),
{
    fn initialize(&mut self, size: usize) -> Result<(), HookError> {
        // A previous trial that skipped dispose must not leak into this one
        if let Some(stale) = self.target.take() {
            (self.teardown)(stale);
        }
        self.target = Some((self.setup)(size)?);
        Ok(())
    }

    #[inline]
    fn step(&mut self, index: usize) -> Result<(), HookError> {
        match self.target.as_mut() {
            Some(target) => (self.operate)(target, index),
            None => Err(HookError::msg("step called without a live structure")),
        }
    }

    fn dispose(&mut self) {
        if let Some(target) = self.target.take() {
            (self.teardown)(target);
        }
    }
}

/// Build hooks from infallible closures.
///
/// Whatever `operate` returns is passed through `black_box` so the
/// measured work is not optimized away.
///
/// ```ignore
/// let hooks = fixture(
///     |n| Vec::<u64>::with_capacity(n),
///     |v, i| v.push(i as u64),
///     drop,
/// );
/// ```
pub fn fixture<T, R>(
    mut setup: impl FnMut(usize) -> T,
    mut operate: impl FnMut(&mut T, usize) -> R,
    teardown: impl FnMut(T),
) -> impl Hooks {
    Fixture::new(
        move |size| Ok(setup(size)),
        move |target: &mut T, index| {
            std::hint::black_box(operate(target, index));
            Ok(())
        },
        teardown,
    )
}

/// Build hooks from fallible setup and operate closures.
pub fn try_fixture<T>(
    setup: impl FnMut(usize) -> Result<T, HookError>,
    operate: impl FnMut(&mut T, usize) -> Result<(), HookError>,
    teardown: impl FnMut(T),
) -> impl Hooks {
    Fixture::new(setup, operate, teardown)
}
