//! A crate for measuring and converting durations.
//!
//! Most notably this provides [`Stopwatch`] for measuring elapsed time across start, stop and lap
//! cycles and [`TimeValue`] for re-expressing a duration in hours, minutes, seconds or
//! milliseconds.
//!
//! # Measuring time
//!
//! A [`Stopwatch`] reads from a monotonic [`Clock`] and reports whole milliseconds.
//!
//! # Example
//! ```
//! use laptimer::Stopwatch;
//!
//! let mut stopwatch = Stopwatch::start_new();
//!
//! let first = stopwatch.lap();
//! let second = stopwatch.lap();
//! assert!(first.absolute <= second.absolute);
//!
//! let total = stopwatch.stop();
//! assert!(total >= second.absolute);
//! ```
//!
//! Stopwatches created without an id receive one from a process-wide counter. Use [`Builder`] to
//! supply a different [`IdGenerator`] or [`Clock`].
//!
//! # Converting durations
//!
//! The two types are independent; a stopwatch value is turned into a [`TimeValue`] at the call
//! site.
//!
//! # Example
//! ```
//! use laptimer::value::{Conversion, Rounding, Unit};
//! use laptimer::TimeValue;
//!
//! let value = TimeValue::from_millis(3_725_000);
//! let clock = |unit| Conversion::new(unit).bounded().rounding(Rounding::Truncate);
//!
//! let parts = value.decompose([
//!     clock(Unit::Hours),
//!     clock(Unit::Minutes),
//!     clock(Unit::Seconds),
//! ]);
//!
//! assert_eq!(parts, [1.0, 2.0, 5.0]);
//! ```
//!
//! # Feature flags
//! `serde`: Implements `Serialize` for [`Snapshot`] and `Serialize`/`Deserialize` for
//! [`TimeValue`].

mod builder;
mod stopwatch;
mod time;

pub mod id;
pub mod value;

pub use builder::Builder;
pub use id::IdGenerator;
pub use stopwatch::{Lap, Snapshot, State, Stopwatch};
pub use time::{Clock, MonotonicClock};
pub use value::TimeValue;
