pub mod parametric_surface;
pub mod surface_curvature;
pub mod surface_evaluator;
pub use parametric_surface::*;
pub use surface_curvature::*;
pub use surface_evaluator::*;

use nalgebra::{Point3, Vector2};

use crate::misc::{Circle, FloatingPoint, Interval};

/// Parametric direction of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UVDirection {
    U,
    V,
}

/// The geometry kernel queries consumed by the tracers and solvers.
///
/// Every query is a blocking evaluation. Failures are reported as `None`,
/// the callers decide whether that terminates a trace or skips a node.
pub trait SurfaceOracle<T: FloatingPoint> {
    /// Evaluate the surface at the given u, v parameters to get a point
    fn point_at(&self, u: T, v: T) -> Point3<T>;

    /// Find the parameter of the surface point closest to `point`
    fn closest_parameter(&self, point: &Point3<T>) -> Option<Vector2<T>>;

    /// Evaluate the principal curvature frame, `None` where it is undefined
    fn curvature_at(&self, u: T, v: T) -> Option<SurfaceCurvature<T>>;

    /// Parameter domain in the given direction
    fn domain(&self, direction: UVDirection) -> Interval<T>;

    /// Intersect a circle with the surface.
    /// Returns `None` when the kernel cannot compute the intersection at all.
    fn intersect_circle(&self, _circle: &Circle<T>, _tolerance: T) -> Option<Vec<Point3<T>>> {
        None
    }

    /// Model absolute tolerance, used as a lower bound for step lengths
    fn absolute_tolerance(&self) -> T {
        T::from_literal(1e-3)
    }

    /// Check whether `(u, v)` lies in the closed parameter domain
    fn includes_parameter(&self, uv: &Vector2<T>) -> bool {
        self.domain(UVDirection::U).includes(uv.x, true)
            && self.domain(UVDirection::V).includes(uv.y, true)
    }
}

impl<T: FloatingPoint, O: SurfaceOracle<T> + ?Sized> SurfaceOracle<T> for &O {
    fn point_at(&self, u: T, v: T) -> Point3<T> {
        (**self).point_at(u, v)
    }

    fn closest_parameter(&self, point: &Point3<T>) -> Option<Vector2<T>> {
        (**self).closest_parameter(point)
    }

    fn curvature_at(&self, u: T, v: T) -> Option<SurfaceCurvature<T>> {
        (**self).curvature_at(u, v)
    }

    fn domain(&self, direction: UVDirection) -> Interval<T> {
        (**self).domain(direction)
    }

    fn intersect_circle(&self, circle: &Circle<T>, tolerance: T) -> Option<Vec<Point3<T>>> {
        (**self).intersect_circle(circle, tolerance)
    }

    fn absolute_tolerance(&self) -> T {
        (**self).absolute_tolerance()
    }

    fn includes_parameter(&self, uv: &Vector2<T>) -> bool {
        (**self).includes_parameter(uv)
    }
}
