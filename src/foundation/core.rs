use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use crate::foundation::error::{ResolveError, ResolveResult};

/// Exact rational number of seconds, always stored in lowest terms with a positive denominator.
///
/// All timeline arithmetic happens on this type. Conversion to frames happens only when a
/// [`Timecode`](crate::Timecode) is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rational {
    num: i64,
    den: i64, // > 0
}

impl Rational {
    /// Zero seconds.
    pub const ZERO: Rational = Rational { num: 0, den: 1 };

    /// Create a reduced rational. Returns `None` when `den == 0`.
    pub fn new(num: i64, den: i64) -> Option<Self> {
        if den == 0 {
            return None;
        }
        Some(Self::reduce(i128::from(num), i128::from(den)))
    }

    /// Whole number of seconds.
    pub fn from_int(secs: i64) -> Self {
        Self { num: secs, den: 1 }
    }

    /// Numerator in lowest terms (carries the sign).
    pub fn num(self) -> i64 {
        self.num
    }

    /// Denominator in lowest terms (always positive).
    pub fn den(self) -> i64 {
        self.den
    }

    /// Parse an FCPXML time string: `"N/Ds"` or `"Ns"`, optionally signed.
    pub fn parse(text: &str) -> ResolveResult<Self> {
        let bad = || ResolveError::format(format!("malformed rational time '{text}'"));

        let body = text.strip_suffix('s').ok_or_else(bad)?;
        let (negative, body) = match body.as_bytes().first() {
            Some(b'-') => (true, &body[1..]),
            Some(b'+') => (false, &body[1..]),
            _ => (false, body),
        };

        let (num_s, den_s) = match body.split_once('/') {
            Some((n, d)) => (n, Some(d)),
            None => (body, None),
        };

        let num = parse_digits(num_s).ok_or_else(bad)?;
        let den = match den_s {
            Some(d) => parse_digits(d).ok_or_else(bad)?,
            None => 1,
        };
        if den == 0 {
            return Err(bad());
        }

        let num = if negative { -num } else { num };
        Ok(Self::reduce(num, den))
    }

    /// Lossy conversion to floating-point seconds.
    pub fn as_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Largest integer `<= self`.
    pub fn floor(self) -> i64 {
        self.num.div_euclid(self.den)
    }

    /// Return `true` when the value is exactly zero.
    pub fn is_zero(self) -> bool {
        self.num == 0
    }

    /// Exact addition. Returns `None` when the result does not fit in `i64` terms.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        let (num, den) = sum_parts(self, rhs);
        Self::try_reduce(num, den)
    }

    /// Exact subtraction. Returns `None` when the result does not fit in `i64` terms.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.checked_add(rhs.checked_neg()?)
    }

    /// Exact multiplication. Returns `None` when the result does not fit in `i64` terms.
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        let (num, den) = product_parts(self, rhs);
        Self::try_reduce(num, den)
    }

    /// Exact division. Returns `None` when dividing by zero or when the result does not fit.
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.num == 0 {
            return None;
        }
        Self::try_reduce(
            i128::from(self.num) * i128::from(rhs.den),
            i128::from(self.den) * i128::from(rhs.num),
        )
    }

    /// Negation. Returns `None` for a numerator of `i64::MIN`.
    pub fn checked_neg(self) -> Option<Self> {
        Some(Self {
            num: self.num.checked_neg()?,
            den: self.den,
        })
    }

    /// Reciprocal. Returns `None` for zero.
    pub fn recip(self) -> Option<Self> {
        Self::from_int(1).checked_div(self)
    }

    fn try_reduce(mut num: i128, mut den: i128) -> Option<Self> {
        if den < 0 {
            num = -num;
            den = -den;
        }
        let g = gcd(num.unsigned_abs(), den.unsigned_abs()).max(1) as i128;
        Some(Self {
            num: i64::try_from(num / g).ok()?,
            den: i64::try_from(den / g).ok()?,
        })
    }

    // Operator form: out-of-range results saturate and are logged.
    fn reduce(num: i128, den: i128) -> Self {
        if let Some(r) = Self::try_reduce(num, den) {
            return r;
        }
        tracing::debug!(%num, %den, "rational out of i64 range, saturating");
        let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
        let g = gcd(num.unsigned_abs(), den.unsigned_abs()).max(1) as i128;
        Self {
            num: (num / g).clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64,
            den: (den / g).clamp(1, i128::from(i64::MAX)) as i64,
        }
    }
}

fn sum_parts(a: Rational, b: Rational) -> (i128, i128) {
    (
        i128::from(a.num) * i128::from(b.den) + i128::from(b.num) * i128::from(a.den),
        i128::from(a.den) * i128::from(b.den),
    )
}

fn product_parts(a: Rational, b: Rational) -> (i128, i128) {
    (
        i128::from(a.num) * i128::from(b.num),
        i128::from(a.den) * i128::from(b.den),
    )
}

fn parse_digits(s: &str) -> Option<i128> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<i64>().ok().map(i128::from)
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Default for Rational {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Rational {
    type Output = Rational;

    fn add(self, rhs: Self) -> Self {
        let (num, den) = sum_parts(self, rhs);
        Self::reduce(num, den)
    }
}

impl Sub for Rational {
    type Output = Rational;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Self {
        Self::reduce(-i128::from(self.num), i128::from(self.den))
    }
}

impl Mul for Rational {
    type Output = Rational;

    fn mul(self, rhs: Self) -> Self {
        let (num, den) = product_parts(self, rhs);
        Self::reduce(num, den)
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        (i128::from(self.num) * i128::from(other.den))
            .cmp(&(i128::from(other.num) * i128::from(self.den)))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}s", self.num)
        } else {
            write!(f, "{}/{}s", self.num, self.den)
        }
    }
}

impl FromStr for Rational {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for Rational {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Rational {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Half-open time interval `[start, end)` in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TimeRange {
    /// Inclusive start.
    pub start: Rational,
    /// Exclusive end, never before `start`.
    pub end: Rational,
}

impl TimeRange {
    /// Create a range, clamping `end` so that `end >= start`.
    pub fn new(start: Rational, end: Rational) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Create a range from a start and a (possibly negative) duration.
    pub fn from_start_duration(start: Rational, duration: Rational) -> Self {
        Self::new(start, start + duration)
    }

    /// Length of the range.
    pub fn duration(self) -> Rational {
        self.end - self.start
    }

    /// Return `true` when the range has zero length.
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Return `true` when `t` is inside `[start, end)`.
    pub fn contains(self, t: Rational) -> bool {
        self.start <= t && t < self.end
    }

    /// Return `true` when `other` lies completely inside `self`.
    pub fn contains_range(self, other: TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Return `true` when the ranges share time. Touching endpoints do not overlap.
    pub fn overlaps(self, other: TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Shared portion of two overlapping ranges.
    pub fn intersection(self, other: TimeRange) -> Option<TimeRange> {
        if !self.overlaps(other) {
            return None;
        }
        Some(TimeRange::new(
            self.start.max(other.start),
            self.end.min(other.end),
        ))
    }

    /// Shift both bounds by `delta`.
    pub fn shift(self, delta: Rational) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
