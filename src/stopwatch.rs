use std::fmt::{self, Display, Formatter};

#[cfg(not(loom))]
use crate::builder::Builder;
#[cfg(not(loom))]
use crate::id::Global;
use crate::time::{nanos_to_millis, Clock, MonotonicClock};

/// The state of a [`Stopwatch`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum State {
    /// The stopwatch has never been started.
    #[cfg_attr(feature = "serde", serde(rename = "not started"))]
    NotStarted,
    /// The stopwatch was started and has not been stopped since.
    Running,
    /// The stopwatch was started and then stopped.
    Stopped,
}

impl State {
    /// Returns the human readable name of the state.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not started",
            Self::Running => "running",
            Self::Stopped => "stopped",
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lap, in whole milliseconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Lap {
    /// Time elapsed since the previous lap, or since the start for the first lap.
    pub relative: u64,
    /// Time elapsed since the start.
    pub absolute: u64,
}

impl Lap {
    /// The lap returned when the stopwatch is not running.
    pub const ZERO: Self = Self {
        relative: 0,
        absolute: 0,
    };
}

/// A plain record of a [`Stopwatch`] at the moment [`snapshot`] was called.
///
/// [`snapshot`]: Stopwatch::snapshot
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot {
    /// The id of the stopwatch.
    pub id: String,
    /// The state of the stopwatch.
    pub state: State,
    /// The elapsed time in milliseconds, see [`Stopwatch::value`].
    pub value: u64,
}

/// A stopwatch measuring elapsed time across start, stop and lap cycles.
///
/// All values are reported in whole milliseconds, rounded to the nearest. Raw timestamps are
/// kept in nanoseconds as read from the [`Clock`].
///
/// # Example
/// ```
/// use laptimer::{State, Stopwatch};
///
/// let mut stopwatch = Stopwatch::start_new();
/// assert_eq!(stopwatch.state(), State::Running);
///
/// let lap = stopwatch.lap();
/// assert!(lap.relative <= lap.absolute);
///
/// stopwatch.stop();
/// assert_eq!(stopwatch.state(), State::Stopped);
/// assert_eq!(stopwatch.laps().len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Stopwatch<C = MonotonicClock> {
    id: String,
    clock: C,
    started_at: Option<u64>,
    stopped_at: Option<u64>,
    laps: Vec<u64>,
}

#[cfg(not(loom))]
impl Stopwatch<MonotonicClock> {
    /// Creates a new `Stopwatch` that has not been started, with an id taken from the
    /// process-wide counter.
    ///
    /// `Stopwatch` does not implement `Default`, ids are only drawn by the named constructors:
    ///
    /// ```compile_fail
    /// let stopwatch = laptimer::Stopwatch::default();
    /// ```
    ///
    /// ```compile_fail
    /// let builder = laptimer::Builder::default();
    /// ```
    #[allow(clippy::new_without_default)]
    #[inline]
    pub fn new() -> Self {
        Builder::new().build()
    }

    /// Creates a new `Stopwatch` with the given `id` that has not been started.
    ///
    /// # Examples
    ///
    /// ```
    /// # use laptimer::Stopwatch;
    /// #
    /// let stopwatch = Stopwatch::with_id("my-id");
    /// assert_eq!(stopwatch.id(), "my-id");
    /// ```
    #[inline]
    pub fn with_id<T>(id: T) -> Self
    where
        T: Into<String>,
    {
        Builder::new().id(id).build()
    }

    /// Creates a new `Stopwatch` and starts it immediately.
    #[inline]
    pub fn start_new() -> Self {
        Builder::new().start()
    }

    /// Creates a new `Stopwatch` with the given `id` and starts it immediately.
    #[inline]
    pub fn start_new_with_id<T>(id: T) -> Self
    where
        T: Into<String>,
    {
        Builder::new().id(id).start()
    }

    /// Creates a new `Builder` used to configure a `Stopwatch`.
    #[inline]
    pub fn builder() -> Builder<MonotonicClock, Global> {
        Builder::new()
    }
}

impl<C> Stopwatch<C>
where
    C: Clock,
{
    /// The value reported by a stopwatch that has never been started.
    pub const DEFAULT_VALUE: u64 = 0;

    pub(crate) fn from_parts(id: String, clock: C) -> Self {
        Self {
            id,
            clock,
            started_at: None,
            stopped_at: None,
            laps: Vec::new(),
        }
    }

    /// Returns the id of this `Stopwatch`.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns a reference to the [`Clock`] this `Stopwatch` reads from.
    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Starts the `Stopwatch` from zero.
    ///
    /// This is a full reset, not a resume: recorded laps and any previous stop are discarded,
    /// whatever the current state.
    pub fn start(&mut self) {
        self.laps.clear();
        self.stopped_at = None;
        self.started_at = Some(self.clock.now());

        log::trace!("stopwatch {} started", self.id);
    }

    /// Stops a running `Stopwatch` and returns the final value in milliseconds.
    ///
    /// A `Stopwatch` that was never started or is already stopped is left untouched; the first
    /// stop wins. The current [`value`] is returned in every case.
    ///
    /// # Examples
    ///
    /// ```
    /// # use laptimer::Stopwatch;
    /// #
    /// let mut stopwatch = Stopwatch::new();
    ///
    /// assert_eq!(stopwatch.stop(), 0);
    /// assert!(!stopwatch.is_started());
    /// ```
    ///
    /// [`value`]: Self::value
    pub fn stop(&mut self) -> u64 {
        let now = self.clock.now();

        if self.is_running() {
            self.stopped_at = Some(now);
            log::trace!("stopwatch {} stopped", self.id);
        }

        self.value()
    }

    /// Records a new lap and returns it.
    ///
    /// Returns [`Lap::ZERO`] and records nothing unless the `Stopwatch` is running.
    pub fn lap(&mut self) -> Lap {
        let started_at = match (self.started_at, self.stopped_at) {
            (Some(started_at), None) => started_at,
            _ => return Lap::ZERO,
        };

        let now = self.clock.now();
        let previous = self.laps.last().copied().unwrap_or(started_at);
        self.laps.push(now);

        let lap = Lap {
            relative: nanos_to_millis(previous, now),
            absolute: nanos_to_millis(started_at, now),
        };

        log::trace!(
            "stopwatch {} lap {}: {} ms (+{} ms)",
            self.id,
            self.laps.len(),
            lap.absolute,
            lap.relative
        );

        lap
    }

    /// Returns `true` if the `Stopwatch` was started, regardless of whether it was stopped since.
    #[inline]
    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Returns `true` if the `Stopwatch` was started and not stopped since.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.is_started() && self.stopped_at.is_none()
    }

    /// Returns `true` if the `Stopwatch` was started and then stopped.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.is_started() && self.stopped_at.is_some()
    }

    /// Returns the current [`State`].
    pub fn state(&self) -> State {
        if self.is_stopped() {
            State::Stopped
        } else if self.is_running() {
            State::Running
        } else {
            State::NotStarted
        }
    }

    /// Returns the elapsed time in milliseconds.
    ///
    /// This is the time since start while running, the time between start and stop once stopped
    /// and [`DEFAULT_VALUE`] if never started.
    ///
    /// [`DEFAULT_VALUE`]: Self::DEFAULT_VALUE
    pub fn value(&self) -> u64 {
        match (self.started_at, self.stopped_at) {
            (Some(started_at), Some(stopped_at)) => nanos_to_millis(started_at, stopped_at),
            (Some(started_at), None) => nanos_to_millis(started_at, self.clock.now()),
            _ => Self::DEFAULT_VALUE,
        }
    }

    /// Returns all recorded laps, computed from the stored timestamps.
    pub fn laps(&self) -> Vec<Lap> {
        let started_at = match self.started_at {
            Some(started_at) => started_at,
            None => return Vec::new(),
        };

        let mut previous = started_at;
        self.laps
            .iter()
            .map(|&lap| {
                let relative = nanos_to_millis(previous, lap);
                previous = lap;

                Lap {
                    relative,
                    absolute: nanos_to_millis(started_at, lap),
                }
            })
            .collect()
    }

    /// Returns a [`Snapshot`] of the id, state and current value.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            id: self.id.clone(),
            state: self.state(),
            value: self.value(),
        }
    }
}

impl<C> Display for Stopwatch<C>
where
    C: Clock,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stopwatch {} - {}: {} ms",
            self.id,
            self.state(),
            self.value()
        )
    }
}
