use nalgebra::RealField;
use num_traits::ToPrimitive;

/// Trait for floating point types (f32, f64)
/// Mainly used to identify the type of the field in nalgebra
pub trait FloatingPoint: RealField + ToPrimitive + Copy {
    /// Convert an `f64` constant into the scalar type
    fn from_literal(value: f64) -> Self {
        nalgebra::convert(value)
    }
}

impl FloatingPoint for f32 {}
impl FloatingPoint for f64 {}

/// Check that all the given values are finite
pub fn all_finite<'a, T: FloatingPoint + 'a>(values: impl IntoIterator<Item = &'a T>) -> bool {
    values.into_iter().all(|v| v.is_finite())
}
