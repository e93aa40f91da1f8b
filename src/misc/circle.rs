use nalgebra::{Point3, Vector3};

use crate::misc::{any_perpendicular, FloatingPoint};

/// A circle in 3D space, parameterized by angle `t` in `[0, 2pi)`
/// `C(t) = center + radius * (cos(t) * x_axis + sin(t) * y_axis)`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle<T: FloatingPoint> {
    center: Point3<T>,
    normal: Vector3<T>,
    x_axis: Vector3<T>,
    y_axis: Vector3<T>,
    radius: T,
}

impl<T: FloatingPoint> Circle<T> {
    /// Create a circle lying in the plane through `center` with the given normal
    pub fn try_new(center: Point3<T>, normal: &Vector3<T>, radius: T) -> anyhow::Result<Self> {
        anyhow::ensure!(
            radius > T::zero() && radius.is_finite(),
            "Circle radius must be positive and finite"
        );
        let normal = normal
            .try_normalize(T::default_epsilon())
            .ok_or(anyhow::anyhow!("Circle normal must not be zero"))?;
        let x_axis = any_perpendicular(&normal)
            .ok_or(anyhow::anyhow!("Failed to find the circle plane basis"))?;
        let y_axis = normal.cross(&x_axis);
        Ok(Self {
            center,
            normal,
            x_axis,
            y_axis,
            radius,
        })
    }

    pub fn center(&self) -> &Point3<T> {
        &self.center
    }

    pub fn normal(&self) -> &Vector3<T> {
        &self.normal
    }

    pub fn radius(&self) -> T {
        self.radius
    }

    /// Evaluate the point at angle `t`
    pub fn point_at(&self, t: T) -> Point3<T> {
        self.center + (self.x_axis * t.cos() + self.y_axis * t.sin()) * self.radius
    }

    /// Evaluate the first derivative with respect to `t`
    pub fn tangent_at(&self, t: T) -> Vector3<T> {
        (self.y_axis * t.cos() - self.x_axis * t.sin()) * self.radius
    }
}
