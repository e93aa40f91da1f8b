use std::marker::PhantomData;

use argmin::core::ArgminFloat;
use nalgebra::{Point3, Vector2, Vector3};

use crate::{
    closest_parameter::{find_surface_closest_parameter, ClosestParameterOptions},
    intersects::{find_circle_surface_intersections, CircleIntersectionOptions},
    misc::{all_finite, Circle, FloatingPoint, Interval},
    surface::{ParametricSurface, SurfaceCurvature, SurfaceDerivatives, SurfaceOracle, UVDirection},
};

/// Adapter providing the full [`SurfaceOracle`] for a [`ParametricSurface`] evaluator.
///
/// * closest point: regular grid seed + Newton's method
/// * curvature: principal frame from the first and second fundamental forms
/// * circle intersection: sampled seeds + Newton's method on `(t, u, v)`
#[derive(Clone, Debug)]
pub struct SurfaceEvaluator<S, T: FloatingPoint> {
    surface: S,
    absolute_tolerance: T,
    closest_parameter_options: ClosestParameterOptions<T>,
    intersection_options: CircleIntersectionOptions<T>,
    phantom: PhantomData<T>,
}

impl<S, T> SurfaceEvaluator<S, T>
where
    S: ParametricSurface<T>,
    T: FloatingPoint + ArgminFloat,
{
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            absolute_tolerance: T::from_literal(1e-3),
            closest_parameter_options: Default::default(),
            intersection_options: Default::default(),
            phantom: PhantomData,
        }
    }

    pub fn with_absolute_tolerance(mut self, tolerance: T) -> Self {
        self.absolute_tolerance = tolerance;
        self
    }

    pub fn with_closest_parameter_options(mut self, options: ClosestParameterOptions<T>) -> Self {
        self.closest_parameter_options = options;
        self
    }

    pub fn with_intersection_options(mut self, options: CircleIntersectionOptions<T>) -> Self {
        self.intersection_options = options;
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Find the closest parameter on the surface to a given point with Newton's method
    pub fn find_closest_parameter(&self, point: &Point3<T>) -> anyhow::Result<Vector2<T>> {
        find_surface_closest_parameter(&self.surface, point, &self.closest_parameter_options)
    }
}

impl<S, T> SurfaceOracle<T> for SurfaceEvaluator<S, T>
where
    S: ParametricSurface<T>,
    T: FloatingPoint + ArgminFloat,
{
    fn point_at(&self, u: T, v: T) -> Point3<T> {
        self.surface.point_at(u, v)
    }

    fn closest_parameter(&self, point: &Point3<T>) -> Option<Vector2<T>> {
        match self.find_closest_parameter(point) {
            Ok(uv) => Some(uv),
            Err(e) => {
                log::debug!("closest parameter failed: {e}");
                None
            }
        }
    }

    fn curvature_at(&self, u: T, v: T) -> Option<SurfaceCurvature<T>> {
        principal_curvature(&self.surface.derivatives(u, v))
    }

    fn domain(&self, direction: UVDirection) -> Interval<T> {
        match direction {
            UVDirection::U => self.surface.u_domain(),
            UVDirection::V => self.surface.v_domain(),
        }
    }

    fn intersect_circle(&self, circle: &Circle<T>, tolerance: T) -> Option<Vec<Point3<T>>> {
        let options = self.intersection_options.clone().with_tolerance(tolerance);
        match find_circle_surface_intersections(&self.surface, circle, &options) {
            Ok(points) => Some(points),
            Err(e) => {
                log::debug!("circle intersection failed: {e}");
                None
            }
        }
    }

    fn absolute_tolerance(&self) -> T {
        self.absolute_tolerance
    }
}

/// Compute the principal curvature frame from the fundamental forms.
/// Returns `None` where the normal or the metric degenerates.
pub fn principal_curvature<T: FloatingPoint>(
    d: &SurfaceDerivatives<T>,
) -> Option<SurfaceCurvature<T>> {
    let eps = T::default_epsilon();
    let normal = d.su.cross(&d.sv).try_normalize(eps)?;

    // first fundamental form
    let e = d.su.dot(&d.su);
    let f = d.su.dot(&d.sv);
    let g = d.sv.dot(&d.sv);

    // second fundamental form
    let l = normal.dot(&d.suu);
    let m = normal.dot(&d.suv);
    let n = normal.dot(&d.svv);

    let det = e * g - f * f;
    if det <= eps * e * g || !det.is_finite() {
        return None;
    }

    // K = (LN - M^2) / (EG - F^2), H = (EN - 2FM + GL) / 2(EG - F^2)
    let gaussian = (l * n - m * m) / det;
    let mean = (e * n - f * m * T::from_literal(2.) + g * l) / (det * T::from_literal(2.));
    let discriminant = mean * mean - gaussian;
    let root = if discriminant > T::zero() {
        discriminant.sqrt()
    } else {
        T::zero()
    };
    let kappa = [mean + root, mean - root];

    let d0 = principal_direction(d, kappa[0], (e, f, g), (l, m, n))
        .unwrap_or_else(|| d.su.normalize());
    // the second direction completes the orthonormal tangent frame
    let d1 = normal.cross(&d0);
    if !all_finite(d0.iter().chain(d1.iter())) {
        return None;
    }

    Some(SurfaceCurvature::new(kappa, [d0, d1], normal))
}

/// Eigenvector of the shape operator for the curvature `kappa`, mapped into the tangent plane.
/// `(L - kE) a + (M - kF) b = 0` and `(M - kF) a + (N - kG) b = 0`
fn principal_direction<T: FloatingPoint>(
    d: &SurfaceDerivatives<T>,
    kappa: T,
    first: (T, T, T),
    second: (T, T, T),
) -> Option<Vector3<T>> {
    let (e, f, g) = first;
    let (l, m, n) = second;
    let a0 = -(m - kappa * f);
    let b0 = l - kappa * e;
    let a1 = -(n - kappa * g);
    let b1 = m - kappa * f;

    // pick the better conditioned of the two equations
    let (a, b) = if a0 * a0 + b0 * b0 >= a1 * a1 + b1 * b1 {
        (a0, b0)
    } else {
        (a1, b1)
    };
    (d.su * a + d.sv * b).try_normalize(T::default_epsilon().sqrt())
}
