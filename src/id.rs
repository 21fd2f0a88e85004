//! Identity generation for stopwatches.
//!
//! A [`Stopwatch`] created without an explicit id asks an [`IdGenerator`] for one. The default
//! generator is [`Global`], which draws from a single process-wide [`Counter`].
//!
//! # Example
//! ```
//! use laptimer::id::{Counter, IdGenerator};
//!
//! static IDS: Counter = Counter::new();
//!
//! assert_eq!(IDS.next_id(), "1");
//! assert_eq!(IDS.next_id(), "2");
//! ```
//!
//! [`Stopwatch`]: crate::Stopwatch

#[cfg(not(loom))]
use core::sync::atomic::{AtomicU64, Ordering};

#[cfg(loom)]
use loom::sync::atomic::{AtomicU64, Ordering};

/// A source of stopwatch ids.
pub trait IdGenerator {
    /// Returns a new id. Every call returns a different id.
    fn next_id(&self) -> String;
}

impl<G> IdGenerator for &G
where
    G: IdGenerator + ?Sized,
{
    #[inline]
    fn next_id(&self) -> String {
        (**self).next_id()
    }
}

/// An auto-incrementing id generator. Since [`next_id`] accepts a `&self` reference this can be
/// used in a `static` context and shared between threads.
///
/// The first id handed out is `"1"`. The counter is never reset.
///
/// [`next_id`]: IdGenerator::next_id
#[derive(Debug)]
pub struct Counter {
    issued: AtomicU64,
}

impl Counter {
    /// Creates a new `Counter` that has not issued any ids yet.
    #[cfg(not(loom))]
    #[inline]
    pub const fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
        }
    }

    // AtomicU64 is not const under loom.
    #[cfg(loom)]
    #[inline]
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
        }
    }

    /// Returns the number of ids issued so far.
    #[inline]
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::Relaxed)
    }

    #[inline]
    fn next(&self) -> u64 {
        // Increment and read happen as a single step so concurrent callers
        // never observe the same value.
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl Default for Counter {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for Counter {
    #[inline]
    fn next_id(&self) -> String {
        self.next().to_string()
    }
}

#[cfg(not(loom))]
static GLOBAL: Counter = Counter::new();

/// The process-wide id generator.
///
/// All instances share the same underlying [`Counter`], so ids are unique across every stopwatch
/// created through the default factories.
#[cfg(not(loom))]
#[derive(Copy, Clone, Debug, Default)]
pub struct Global;

#[cfg(not(loom))]
impl Global {
    /// Returns the number of ids the process-wide counter has issued.
    #[inline]
    pub fn issued(&self) -> u64 {
        GLOBAL.issued()
    }
}

#[cfg(not(loom))]
impl IdGenerator for Global {
    #[inline]
    fn next_id(&self) -> String {
        GLOBAL.next_id()
    }
}
