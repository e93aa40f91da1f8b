use nalgebra::{Point3, Vector3};

use crate::misc::{FloatingPoint, Interval};

/// Position and partial derivatives up to second order at a parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceDerivatives<T: FloatingPoint> {
    pub point: Point3<T>,
    pub su: Vector3<T>,
    pub sv: Vector3<T>,
    pub suu: Vector3<T>,
    pub suv: Vector3<T>,
    pub svv: Vector3<T>,
}

/// A caller supplied parametric evaluator `S(u, v)`.
///
/// The crate never represents surfaces itself, implementors wrap their own geometry
/// (NURBS, analytic, sampled, ...) and [`crate::prelude::SurfaceEvaluator`] derives the
/// remaining oracle operations from these evaluations.
pub trait ParametricSurface<T: FloatingPoint> {
    /// Evaluate the position at `(u, v)`
    fn point_at(&self, u: T, v: T) -> Point3<T>;

    /// Evaluate the position with first and second partial derivatives at `(u, v)`
    fn derivatives(&self, u: T, v: T) -> SurfaceDerivatives<T>;

    fn u_domain(&self) -> Interval<T>;

    fn v_domain(&self) -> Interval<T>;

    /// Whether the surface is periodic in (u, v)
    fn is_closed(&self) -> (bool, bool) {
        (false, false)
    }
}

impl<T: FloatingPoint, S: ParametricSurface<T> + ?Sized> ParametricSurface<T> for &S {
    fn point_at(&self, u: T, v: T) -> Point3<T> {
        (**self).point_at(u, v)
    }

    fn derivatives(&self, u: T, v: T) -> SurfaceDerivatives<T> {
        (**self).derivatives(u, v)
    }

    fn u_domain(&self) -> Interval<T> {
        (**self).u_domain()
    }

    fn v_domain(&self) -> Interval<T> {
        (**self).v_domain()
    }

    fn is_closed(&self) -> (bool, bool) {
        (**self).is_closed()
    }
}
