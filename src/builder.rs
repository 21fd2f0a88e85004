#[cfg(not(loom))]
use crate::id::Global;
use crate::id::IdGenerator;
use crate::time::Clock;
#[cfg(not(loom))]
use crate::time::MonotonicClock;
use crate::Stopwatch;

/// A builder for a [`Stopwatch`].
///
/// The builder selects the id, the [`Clock`] the stopwatch reads from and the [`IdGenerator`]
/// consulted when no id was given.
#[derive(Clone, Debug)]
pub struct Builder<C, G> {
    id: Option<String>,
    clock: C,
    id_generator: G,
}

#[cfg(not(loom))]
impl Builder<MonotonicClock, Global> {
    /// Creates a new `Builder` without an id, reading from a [`MonotonicClock`] and drawing ids
    /// from the process-wide counter.
    ///
    /// # Examples
    ///
    /// ```
    /// # use laptimer::Builder;
    /// #
    /// let stopwatch = Builder::new().id("render").build();
    ///
    /// assert_eq!(stopwatch.id(), "render");
    /// assert!(!stopwatch.is_started());
    /// ```
    #[allow(clippy::new_without_default)]
    #[inline]
    pub fn new() -> Self {
        Self {
            id: None,
            clock: MonotonicClock::new(),
            id_generator: Global,
        }
    }
}

impl<C, G> Builder<C, G> {
    /// Sets the id of the `Builder`. An explicit id bypasses the id generator entirely.
    #[inline]
    pub fn id<T>(mut self, id: T) -> Self
    where
        T: Into<String>,
    {
        self.id = Some(id.into());
        self
    }

    /// Replaces the [`Clock`] of the `Builder`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use laptimer::{Builder, Clock};
    /// #
    /// struct Frozen;
    ///
    /// impl Clock for Frozen {
    ///     fn now(&self) -> u64 {
    ///         42
    ///     }
    /// }
    ///
    /// let mut stopwatch = Builder::new().clock(Frozen).start();
    /// assert_eq!(stopwatch.stop(), 0);
    /// ```
    #[inline]
    pub fn clock<T>(self, clock: T) -> Builder<T, G>
    where
        T: Clock,
    {
        Builder {
            id: self.id,
            clock,
            id_generator: self.id_generator,
        }
    }

    /// Replaces the [`IdGenerator`] of the `Builder`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use laptimer::Builder;
    /// use laptimer::id::Counter;
    ///
    /// let ids = Counter::new();
    ///
    /// let first = Builder::new().id_generator(&ids).build();
    /// let second = Builder::new().id_generator(&ids).build();
    ///
    /// assert_eq!(first.id(), "1");
    /// assert_eq!(second.id(), "2");
    /// ```
    #[inline]
    pub fn id_generator<T>(self, id_generator: T) -> Builder<C, T>
    where
        T: IdGenerator,
    {
        Builder {
            id: self.id,
            clock: self.clock,
            id_generator,
        }
    }

    /// Consumes this `Builder`, returning a [`Stopwatch`] that has not been started.
    pub fn build(self) -> Stopwatch<C>
    where
        C: Clock,
        G: IdGenerator,
    {
        let id = match self.id {
            Some(id) => id,
            None => self.id_generator.next_id(),
        };

        Stopwatch::from_parts(id, self.clock)
    }

    /// Consumes this `Builder`, returning a [`Stopwatch`] that is already running.
    pub fn start(self) -> Stopwatch<C>
    where
        C: Clock,
        G: IdGenerator,
    {
        let mut stopwatch = self.build();
        stopwatch.start();
        stopwatch
    }
}
