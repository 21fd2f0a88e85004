//! Time value conversion.
//!
//! [`TimeValue`] holds a duration as a whole number of milliseconds and re-expresses it in other
//! [`Unit`]s, optionally rounded and bounded to a clock face.
//!
//! # Example
//! ```
//! use laptimer::value::{Components, Conversion, TimeValue, Unit};
//!
//! let value = TimeValue::from(Components {
//!     min: 1.0,
//!     s: 5.0,
//!     ..Default::default()
//! });
//!
//! assert_eq!(value.raw_value(), 65_000);
//! assert_eq!(value.to(Unit::Seconds), 65.0);
//! assert_eq!(value.to(Conversion::new(Unit::Seconds).bounded()), 5.0);
//! ```

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// A unit of time understood by [`TimeValue`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Unit {
    Hours,
    Minutes,
    Seconds,
    #[default]
    Milliseconds,
}

impl Unit {
    /// Returns the number of milliseconds in one of this unit.
    #[inline]
    pub const fn millis(self) -> f64 {
        match self {
            Self::Hours => 3_600_000.0,
            Self::Minutes => 60_000.0,
            Self::Seconds => 1_000.0,
            Self::Milliseconds => 1.0,
        }
    }

    /// Returns the value at which this unit wraps on a clock face. Hours never wrap.
    #[inline]
    pub const fn bound(self) -> f64 {
        match self {
            Self::Hours => f64::INFINITY,
            Self::Minutes => 60.0,
            Self::Seconds => 60.0,
            Self::Milliseconds => 1_000.0,
        }
    }

    /// Returns the short tag of this unit.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hours => "h",
            Self::Minutes => "min",
            Self::Seconds => "s",
            Self::Milliseconds => "ms",
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned when parsing an unknown unit tag.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown time unit `{0}`, expected one of `h`, `min`, `s` or `ms`")]
pub struct ParseUnitError(String);

impl FromStr for Unit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h" => Ok(Self::Hours),
            "min" => Ok(Self::Minutes),
            "s" => Ok(Self::Seconds),
            "ms" => Ok(Self::Milliseconds),
            _ => Err(ParseUnitError(s.to_owned())),
        }
    }
}

impl TryFrom<&str> for Unit {
    type Error = ParseUnitError;

    #[inline]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A duration split into components. Missing components are `0`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Components {
    pub h: f64,
    pub min: f64,
    pub s: f64,
    pub ms: f64,
}

impl Components {
    /// Returns the sum of all components in milliseconds, unrounded.
    pub fn total_millis(&self) -> f64 {
        self.h * Unit::Hours.millis()
            + self.min * Unit::Minutes.millis()
            + self.s * Unit::Seconds.millis()
            + self.ms * Unit::Milliseconds.millis()
    }
}

/// The description of a duration a [`TimeValue`] is built from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DurationSpec {
    /// A single value in a single unit.
    Scalar { value: f64, unit: Unit },
    /// The sum of several components.
    Components(Components),
}

impl DurationSpec {
    fn total_millis(&self) -> f64 {
        match self {
            Self::Scalar { value, unit } => value * unit.millis(),
            Self::Components(components) => components.total_millis(),
        }
    }
}

impl From<Components> for DurationSpec {
    #[inline]
    fn from(components: Components) -> Self {
        Self::Components(components)
    }
}

/// How a converted value is rounded.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Keep full precision.
    #[default]
    Full,
    /// Round to the nearest integer.
    Nearest,
    /// Round to the given number of decimal places.
    Places(u32),
    /// Discard the fractional part.
    Truncate,
}

impl Rounding {
    fn apply(self, value: f64) -> f64 {
        match self {
            Self::Full => value,
            Self::Nearest => value.round(),
            Self::Places(places) => {
                let pow = 10_f64.powi(i32::try_from(places).unwrap_or(i32::MAX));
                let scaled = value * pow;

                // More places than an f64 can hold keeps full precision.
                if !pow.is_finite() || !scaled.is_finite() {
                    return value;
                }

                scaled.round() / pow
            }
            Self::Truncate => value.trunc(),
        }
    }
}

/// The target of [`TimeValue::to`].
///
/// Bounding is applied before rounding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Conversion {
    pub unit: Unit,
    pub bounded: bool,
    pub rounding: Rounding,
}

impl Conversion {
    /// Creates a full precision, unbounded `Conversion` into `unit`.
    #[inline]
    pub const fn new(unit: Unit) -> Self {
        Self {
            unit,
            bounded: false,
            rounding: Rounding::Full,
        }
    }

    /// Wraps the converted value at the clock face bound of the unit.
    #[inline]
    pub const fn bounded(mut self) -> Self {
        self.bounded = true;
        self
    }

    /// Sets how the converted value is rounded.
    #[inline]
    pub const fn rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }
}

impl From<Unit> for Conversion {
    #[inline]
    fn from(unit: Unit) -> Self {
        Self::new(unit)
    }
}

/// An immutable duration stored as a whole number of milliseconds.
///
/// Values are only obtained through the constructors and `From` impls, there is no default:
///
/// ```compile_fail
/// let value = laptimer::TimeValue::default();
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TimeValue {
    raw: u64,
}

impl TimeValue {
    /// Creates a new `TimeValue` from a single `value` in `unit`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use laptimer::value::{TimeValue, Unit};
    /// #
    /// assert_eq!(TimeValue::new(2.0, Unit::Seconds).raw_value(), 2_000);
    /// assert_eq!(TimeValue::new(4.56, Unit::Milliseconds).raw_value(), 5);
    /// ```
    #[inline]
    pub fn new(value: f64, unit: Unit) -> Self {
        Self::from_spec(DurationSpec::Scalar { value, unit })
    }

    /// Creates a new `TimeValue` from a [`DurationSpec`].
    ///
    /// The total is summed in milliseconds and rounded once, to the nearest millisecond.
    /// Negative and non-finite totals yield `0`.
    pub fn from_spec(spec: DurationSpec) -> Self {
        let total = spec.total_millis().round();

        // `as` saturates and maps NaN to 0.
        Self { raw: total as u64 }
    }

    /// Creates a new `TimeValue` from a whole number of milliseconds, such as a
    /// [`Stopwatch`] value.
    ///
    /// [`Stopwatch`]: crate::Stopwatch
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Self { raw: millis }
    }

    /// Returns the stored number of milliseconds.
    #[inline]
    pub const fn raw_value(&self) -> u64 {
        self.raw
    }

    /// Converts this value according to `conversion`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use laptimer::value::{Conversion, Rounding, TimeValue, Unit};
    /// #
    /// let value = TimeValue::new(123.456, Unit::Milliseconds);
    ///
    /// assert_eq!(value.to(Unit::Seconds), 0.123);
    /// assert_eq!(
    ///     value.to(Conversion::new(Unit::Seconds).rounding(Rounding::Places(2))),
    ///     0.12
    /// );
    /// ```
    pub fn to<T>(&self, conversion: T) -> f64
    where
        T: Into<Conversion>,
    {
        let conversion = conversion.into();
        let unit = conversion.unit;

        let mut value = self.raw as f64 / unit.millis();
        if conversion.bounded {
            value %= unit.bound();
        }

        conversion.rounding.apply(value)
    }

    /// Converts this value once per entry of `conversions`, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use laptimer::value::{Conversion, Rounding, TimeValue, Unit};
    /// #
    /// let value = TimeValue::new(3_725_500.0, Unit::Milliseconds);
    /// let clock = |unit| Conversion::new(unit).bounded().rounding(Rounding::Truncate);
    ///
    /// let parts = value.decompose([
    ///     clock(Unit::Hours),
    ///     clock(Unit::Minutes),
    ///     clock(Unit::Seconds),
    ///     clock(Unit::Milliseconds),
    /// ]);
    ///
    /// assert_eq!(parts, [1.0, 2.0, 5.0, 500.0]);
    /// ```
    pub fn decompose<I>(&self, conversions: I) -> Vec<f64>
    where
        I: IntoIterator,
        I::Item: Into<Conversion>,
    {
        conversions
            .into_iter()
            .map(|conversion| self.to(conversion))
            .collect()
    }
}

/// Creates a `TimeValue` from a number of milliseconds, rounded to the nearest.
impl From<f64> for TimeValue {
    #[inline]
    fn from(millis: f64) -> Self {
        Self::new(millis, Unit::Milliseconds)
    }
}

impl From<DurationSpec> for TimeValue {
    #[inline]
    fn from(spec: DurationSpec) -> Self {
        Self::from_spec(spec)
    }
}

impl From<Components> for TimeValue {
    #[inline]
    fn from(components: Components) -> Self {
        Self::from_spec(DurationSpec::Components(components))
    }
}

impl Display for TimeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ms", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::{Components, Conversion, DurationSpec, Rounding, TimeValue, Unit};

    const UNITS: [Unit; 4] = [
        Unit::Milliseconds,
        Unit::Seconds,
        Unit::Minutes,
        Unit::Hours,
    ];

    // Inputs in milliseconds and the expected plain conversions.
    const CONVERSIONS: [(f64, [f64; 4]); 10] = [
        (1.0, [1.0, 0.001, 0.000016666666666666667, 2.7777777777777776e-7]),
        (12.0, [12.0, 0.012, 0.0002, 0.0000033333333333333333]),
        (123.0, [123.0, 0.123, 0.00205, 0.000034166666666666666]),
        (1234.0, [1234.0, 1.234, 0.020566666666666667, 0.0003427777777777778]),
        (12345.0, [12345.0, 12.345, 0.20575, 0.0034291666666666667]),
        (123456.0, [123456.0, 123.456, 2.0576, 0.034293333333333335]),
        (1234567.0, [1234567.0, 1234.567, 20.576116666666667, 0.34293527777777777]),
        (12345678.0, [12345678.0, 12345.678, 205.7613, 3.429355]),
        (123456789.0, [123456789.0, 123456.789, 2057.61315, 34.2935525]),
        (1234567890.0, [1234567890.0, 1234567.89, 20576.1315, 342.935525]),
    ];

    fn components(h: f64, min: f64, s: f64, ms: f64) -> TimeValue {
        TimeValue::from(Components { h, min, s, ms })
    }

    #[test]
    fn test_unit_parse() {
        assert_eq!("h".parse::<Unit>(), Ok(Unit::Hours));
        assert_eq!("min".parse::<Unit>(), Ok(Unit::Minutes));
        assert_eq!(Unit::try_from("s"), Ok(Unit::Seconds));
        assert_eq!(Unit::try_from("ms"), Ok(Unit::Milliseconds));

        for unit in UNITS {
            assert_eq!(unit.as_str().parse::<Unit>(), Ok(unit));
        }

        let err = "sec".parse::<Unit>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown time unit `sec`, expected one of `h`, `min`, `s` or `ms`"
        );
    }

    #[test]
    fn test_new_with_unit() {
        let cases = [
            (1.0, Unit::Milliseconds, 1),
            (1234.0, Unit::Milliseconds, 1234),
            (2.0, Unit::Seconds, 2000),
            (3.456, Unit::Seconds, 3456),
            (0.789, Unit::Seconds, 789),
            (1.0, Unit::Minutes, 60000),
            (1.23, Unit::Minutes, 73800),
            (0.456, Unit::Minutes, 27360),
            (1.0, Unit::Hours, 3600000),
            (1.23, Unit::Hours, 4428000),
            (0.789, Unit::Hours, 2840400),
        ];

        for (input, unit, expected) in cases {
            assert_eq!(
                TimeValue::new(input, unit).raw_value(),
                expected,
                "{} {}",
                input,
                unit
            );
        }
    }

    #[test]
    fn test_new_rounds_sub_millisecond() {
        assert_eq!(TimeValue::new(0.123, Unit::Milliseconds).raw_value(), 0);
        assert_eq!(TimeValue::new(0.789, Unit::Milliseconds).raw_value(), 1);
        assert_eq!(TimeValue::new(4.45, Unit::Milliseconds).raw_value(), 4);
        assert_eq!(TimeValue::new(4.56, Unit::Milliseconds).raw_value(), 5);
        assert_eq!(TimeValue::new(7.5, Unit::Milliseconds).raw_value(), 8);
    }

    #[test]
    fn test_from_millis_f64() {
        assert_eq!(TimeValue::from(1234.0_f64).raw_value(), 1234);
        assert_eq!(TimeValue::from(123.456_f64).raw_value(), 123);
        assert_eq!(
            TimeValue::from(0.789_f64),
            TimeValue::new(0.789, Unit::Milliseconds)
        );

        let seconds = Conversion::new(Unit::Seconds).rounding(Rounding::Places(2));
        assert_eq!(TimeValue::from(123.456_f64).to(seconds), 0.12);
    }

    #[test]
    fn test_new_negative_clamps() {
        assert_eq!(TimeValue::new(-5.0, Unit::Seconds).raw_value(), 0);
        assert_eq!(TimeValue::new(f64::NAN, Unit::Seconds).raw_value(), 0);
    }

    #[test]
    fn test_components_empty() {
        assert_eq!(TimeValue::from(Components::default()).raw_value(), 0);
    }

    #[test]
    fn test_components_single() {
        let cases = [
            (components(123.0, 0.0, 0.0, 0.0), 442800000),
            (components(4.56, 0.0, 0.0, 0.0), 16416000),
            (components(0.789, 0.0, 0.0, 0.0), 2840400),
            (components(0.0, 123.0, 0.0, 0.0), 7380000),
            (components(0.0, 4.56, 0.0, 0.0), 273600),
            (components(0.0, 0.789, 0.0, 0.0), 47340),
            (components(0.0, 0.0, 123.0, 0.0), 123000),
            (components(0.0, 0.0, 4.56, 0.0), 4560),
            (components(0.0, 0.0, 0.789, 0.0), 789),
            (components(0.0, 0.0, 0.0, 123.0), 123),
            (components(0.0, 0.0, 0.0, 0.789), 1),
        ];

        for (value, expected) in cases {
            assert_eq!(value.raw_value(), expected);
        }
    }

    #[test]
    fn test_components_multiple() {
        assert_eq!(components(123.0, 456.0, 789.0, 0.0).raw_value(), 470949000);
        assert_eq!(components(1.23, 4.56, 7.89, 0.0).raw_value(), 4709490);
        assert_eq!(components(0.123, 0.456, 0.789, 0.0).raw_value(), 470949);
        assert_eq!(components(0.0, 123.0, 456.0, 789.0).raw_value(), 7836789);
        assert_eq!(components(0.0, 1.23, 4.56, 7.89).raw_value(), 78368);
        assert_eq!(components(0.0, 1.0, 5.0, 0.0).raw_value(), 65000);
    }

    #[test]
    fn test_components_round_once() {
        // 0.4 + 0.4 rounds to 1, rounding per component would give 0.
        let value = TimeValue::from_spec(DurationSpec::Components(Components {
            ms: 0.4,
            s: 0.0004,
            ..Default::default()
        }));

        assert_eq!(value.raw_value(), 1);
    }

    #[test]
    fn test_to() {
        for (input, expected) in CONVERSIONS {
            let value = TimeValue::new(input, Unit::Milliseconds);

            for (unit, expected) in UNITS.into_iter().zip(expected) {
                assert_eq!(value.to(unit), expected, "{} ms to {}", input, unit);
            }
        }

        assert_eq!(TimeValue::new(2.0, Unit::Seconds).to(Unit::Milliseconds), 2000.0);
        assert_eq!(TimeValue::new(2.0, Unit::Seconds).to(Unit::default()), 2000.0);
    }

    #[test]
    fn test_to_places() {
        for places in 0..6 {
            let pow = 10_f64.powi(places as i32);

            for (input, expected) in CONVERSIONS {
                let value = TimeValue::new(input, Unit::Milliseconds);

                for (unit, expected) in UNITS.into_iter().zip(expected) {
                    let conversion = Conversion::new(unit).rounding(Rounding::Places(places));
                    assert_eq!(
                        value.to(conversion),
                        (expected * pow).round() / pow,
                        "{} ms to {} with {} places",
                        input,
                        unit,
                        places
                    );
                }
            }
        }
    }

    #[test]
    fn test_to_nearest_and_truncate() {
        for (input, expected) in CONVERSIONS {
            let value = TimeValue::new(input, Unit::Milliseconds);

            for (unit, expected) in UNITS.into_iter().zip(expected) {
                let nearest = value.to(Conversion::new(unit).rounding(Rounding::Nearest));
                let places = value.to(Conversion::new(unit).rounding(Rounding::Places(0)));
                let truncated = value.to(Conversion::new(unit).rounding(Rounding::Truncate));

                assert_eq!(nearest, expected.round());
                assert_eq!(places, nearest);
                assert_eq!(truncated, expected.trunc());
            }
        }
    }

    #[test]
    fn test_to_places_beyond_precision() {
        let value = TimeValue::from_millis(123);

        for places in [400, 3_000_000_000, u32::MAX] {
            let conversion = Conversion::new(Unit::Milliseconds).rounding(Rounding::Places(places));
            assert_eq!(value.to(conversion), 123.0, "{} places", places);

            let conversion = Conversion::new(Unit::Hours).rounding(Rounding::Places(places));
            assert_eq!(value.to(conversion), value.to(Unit::Hours), "{} places", places);
        }
    }

    #[test]
    fn test_to_bounded() {
        for (input, expected) in CONVERSIONS {
            let value = TimeValue::new(input, Unit::Milliseconds);

            for (unit, expected) in UNITS.into_iter().zip(expected) {
                let bounded = value.to(Conversion::new(unit).bounded());

                let expected = match unit {
                    Unit::Milliseconds => expected % 1000.0,
                    Unit::Seconds | Unit::Minutes => expected % 60.0,
                    Unit::Hours => expected,
                };

                assert_eq!(bounded, expected, "{} ms to {} bounded", input, unit);
                assert!(bounded >= 0.0 && bounded < unit.bound());
            }
        }

        let value = components(0.0, 1.0, 5.0, 0.0);
        assert_eq!(value.to(Conversion::new(Unit::Seconds).bounded()), 5.0);
    }

    #[test]
    fn test_millis_round_trip() {
        for (input, _) in CONVERSIONS {
            let value = TimeValue::new(input, Unit::Milliseconds);
            let copy = TimeValue::new(value.to(Unit::Milliseconds), Unit::Milliseconds);

            assert_eq!(copy, value);
        }

        assert_eq!(TimeValue::from_millis(1234).raw_value(), 1234);
    }

    #[test]
    fn test_decompose() {
        let value = TimeValue::new(123.456, Unit::Seconds);

        let parts = value.decompose([
            Conversion::from(Unit::Minutes),
            Conversion::new(Unit::Minutes)
                .bounded()
                .rounding(Rounding::Places(4)),
            Conversion::from(Unit::Minutes),
        ]);

        assert_eq!(parts, [2.0576, 2.0576, 2.0576]);
        assert_eq!(value.decompose([Unit::Seconds, Unit::Hours]).len(), 2);
        assert!(value.decompose(Vec::<Unit>::new()).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(TimeValue::from_millis(65_000).to_string(), "65000 ms");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_transparent() {
        let value = TimeValue::from_millis(65_000);

        assert_eq!(serde_json::to_string(&value).unwrap(), "65000");
        assert_eq!(serde_json::from_str::<TimeValue>("65000").unwrap(), value);
    }
}
