use std::time::Instant;

/// A monotonic time source.
///
/// [`now`] returns a count of nanoseconds since an arbitrary origin. Consecutive calls must never
/// return a smaller value than a previous call.
///
/// [`now`]: Self::now
pub trait Clock {
    /// Returns the current time in nanoseconds.
    fn now(&self) -> u64;
}

impl<C> Clock for &C
where
    C: Clock + ?Sized,
{
    #[inline]
    fn now(&self) -> u64 {
        (**self).now()
    }
}

/// The default [`Clock`], backed by [`Instant`].
///
/// The origin is the moment the `MonotonicClock` was created.
#[derive(Copy, Clone, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Creates a new `MonotonicClock` whose origin is now.
    #[inline]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> u64 {
        // Saturates after ~584 years of uptime.
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Converts a span of nanoseconds into whole milliseconds, rounding to the nearest.
#[inline]
pub(crate) const fn nanos_to_millis(from: u64, to: u64) -> u64 {
    let nanos = to.saturating_sub(from);
    nanos / 1_000_000 + (nanos % 1_000_000 >= 500_000) as u64
}
