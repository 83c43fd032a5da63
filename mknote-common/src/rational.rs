//! Fractions as stored in Exif `RATIONAL` and `SRATIONAL` fields

/// Numerator and denominator of a camera reported ratio
///
/// The value is kept exactly as stored. No normalization happens on
/// construction and a denominator of zero is allowed since cameras use it as
/// a marker value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rational {
    pub numerator: i64,
    pub denominator: i64,
}

impl Rational {
    pub const fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn numerator(self) -> i64 {
        self.numerator
    }

    pub fn denominator(self) -> i64 {
        self.denominator
    }

    /// Whether the fraction describes a whole number
    ///
    /// `0/0` counts as integer zero.
    pub fn is_integer(self) -> bool {
        let Self {
            numerator,
            denominator,
        } = self;

        denominator == 1
            || (denominator != 0 && numerator.checked_rem(denominator) == Some(0))
            || (denominator == 0 && numerator == 0)
    }

    /// Truncated quotient, zero if the denominator is zero
    pub fn integer_value(self) -> i64 {
        self.numerator.checked_div(self.denominator).unwrap_or(0)
    }

    pub fn f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Fraction with numerator and denominator divided by their GCD
    ///
    /// ```
    /// # use mknote_common::Rational;
    /// assert_eq!(Rational::new(10, 4).simplified(), Rational::new(5, 2));
    /// assert_eq!(Rational::new(1, 0).simplified(), Rational::new(1, 0));
    /// ```
    pub fn simplified(self) -> Self {
        let gcd = gcd(
            self.numerator.unsigned_abs(),
            self.denominator.unsigned_abs(),
        );

        let Ok(gcd) = i64::try_from(gcd) else {
            return self;
        };

        if gcd <= 1 {
            return self;
        }

        match (
            self.numerator.checked_div(gcd),
            self.denominator.checked_div(gcd),
        ) {
            (Some(numerator), Some(denominator)) => Self::new(numerator, denominator),
            _ => self,
        }
    }

    /// Shortest readable representation
    ///
    /// Whole numbers are shown without a fraction. With `allow_decimal`, short
    /// decimal representations like `0.5` are preferred over `1/2`.
    ///
    /// ```
    /// # use mknote_common::Rational;
    /// assert_eq!(Rational::new(6, 3).to_simple_string(true), "2");
    /// assert_eq!(Rational::new(2, 4).to_simple_string(true), "0.5");
    /// assert_eq!(Rational::new(2, 4).to_simple_string(false), "1/2");
    /// assert_eq!(Rational::new(1, 3).to_simple_string(true), "1/3");
    /// assert_eq!(Rational::new(3, 0).to_simple_string(true), "3/0");
    /// ```
    pub fn to_simple_string(self, allow_decimal: bool) -> String {
        let Self {
            numerator,
            denominator,
        } = self;

        if denominator == 0 && numerator != 0 {
            return self.to_string();
        }

        if self.is_integer() {
            return self.integer_value().to_string();
        }

        if numerator != 1 && denominator.checked_rem(numerator) == Some(0) {
            if let Some(denominator) = denominator.checked_div(numerator) {
                return Self::new(1, denominator).to_simple_string(allow_decimal);
            }
        }

        let simplified = self.simplified();

        if allow_decimal {
            let decimal = simplified.f64().to_string();
            if decimal.len() < 5 {
                return decimal;
            }
        }

        simplified.to_string()
    }
}

impl std::fmt::Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl From<(u32, u32)> for Rational {
    fn from((numerator, denominator): (u32, u32)) -> Self {
        Self::new(numerator.into(), denominator.into())
    }
}

impl From<(i32, i32)> for Rational {
    fn from((numerator, denominator): (i32, i32)) -> Self {
        Self::new(numerator.into(), denominator.into())
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while let Some(rem) = a.checked_rem(b) {
        a = b;
        b = rem;
    }

    a
}
