use crate::misc::FloatingPoint;

/// A closed parameter interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval<T: FloatingPoint> {
    min: T,
    max: T,
}

impl<T: FloatingPoint> Interval<T> {
    /// Create an interval, swapping the bounds if they are given in decreasing order
    pub fn new(a: T, b: T) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    pub fn length(&self) -> T {
        self.max - self.min
    }

    pub fn mid(&self) -> T {
        (self.min + self.max) * T::from_literal(0.5)
    }

    /// Check if the value lies in the interval.
    /// `inclusive` admits the end values, otherwise only the open interior is accepted.
    pub fn includes(&self, value: T, inclusive: bool) -> bool {
        if inclusive {
            self.min <= value && value <= self.max
        } else {
            self.min < value && value < self.max
        }
    }

    /// Clamp the value into the interval
    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Wrap the value around the interval (for periodic directions).
    /// Values inside the interval are returned unchanged, non-finite values map to `min`.
    pub fn wrap(&self, value: T) -> T {
        let length = self.length();
        if length <= T::zero() || !value.is_finite() {
            return self.min;
        }
        if self.includes(value, true) {
            return value;
        }
        let offset = value - self.min;
        let wrapped = self.min + offset - length * (offset / length).floor();
        self.clamp(wrapped)
    }

    /// Evaluate the interval at a normalized parameter in `[0, 1]`
    pub fn lerp(&self, t: T) -> T {
        self.min + self.length() * t
    }
}

impl<T: FloatingPoint> From<(T, T)> for Interval<T> {
    fn from(value: (T, T)) -> Self {
        Self::new(value.0, value.1)
    }
}
