use nalgebra::{Rotation3, Unit, Vector3};

use crate::misc::FloatingPoint;

/// Rotate a vector about an axis by `angle` radians (right-handed).
/// Returns `None` if the axis cannot be normalized.
pub fn rotate_about_axis<T: FloatingPoint>(
    vector: &Vector3<T>,
    axis: &Vector3<T>,
    angle: T,
) -> Option<Vector3<T>> {
    let axis = Unit::try_new(*axis, T::default_epsilon())?;
    Some(Rotation3::from_axis_angle(&axis, angle) * *vector)
}

/// Find any unit vector perpendicular to the given one
pub fn any_perpendicular<T: FloatingPoint>(vector: &Vector3<T>) -> Option<Vector3<T>> {
    let n = vector.try_normalize(T::default_epsilon())?;
    let helper = if n.x.abs() < T::from_literal(0.9) {
        Vector3::x()
    } else {
        Vector3::y()
    };
    n.cross(&helper).try_normalize(T::default_epsilon())
}
