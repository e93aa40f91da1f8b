//! Analytic surfaces and mock oracles shared by the unit tests.

use std::cell::Cell;

use nalgebra::{Point3, Vector2, Vector3};

use crate::{
    misc::Interval,
    surface::{ParametricSurface, SurfaceCurvature, SurfaceDerivatives, SurfaceOracle, UVDirection},
};

/// Plane `z = 0` with `S(u, v) = (u, v, 0)`
#[derive(Debug, Clone)]
pub struct PlanePatch {
    u: Interval<f64>,
    v: Interval<f64>,
}

impl PlanePatch {
    pub fn new(u: (f64, f64), v: (f64, f64)) -> Self {
        Self {
            u: u.into(),
            v: v.into(),
        }
    }

    pub fn unit() -> Self {
        Self::new((0., 1.), (0., 1.))
    }
}

impl ParametricSurface<f64> for PlanePatch {
    fn point_at(&self, u: f64, v: f64) -> Point3<f64> {
        Point3::new(u, v, 0.)
    }

    fn derivatives(&self, u: f64, v: f64) -> SurfaceDerivatives<f64> {
        SurfaceDerivatives {
            point: self.point_at(u, v),
            su: Vector3::x(),
            sv: Vector3::y(),
            suu: Vector3::zeros(),
            suv: Vector3::zeros(),
            svv: Vector3::zeros(),
        }
    }

    fn u_domain(&self) -> Interval<f64> {
        self.u
    }

    fn v_domain(&self) -> Interval<f64> {
        self.v
    }
}

/// Half cylinder `S(u, v) = (r cos u, r sin u, v)`, `u in [0, pi]`, `v in [0, height]`.
/// The normal points outward, so the circumferential curvature is `-1 / r`.
#[derive(Debug, Clone)]
pub struct HalfCylinder {
    radius: f64,
    height: f64,
}

impl HalfCylinder {
    pub fn new(radius: f64, height: f64) -> Self {
        Self { radius, height }
    }
}

impl ParametricSurface<f64> for HalfCylinder {
    fn point_at(&self, u: f64, v: f64) -> Point3<f64> {
        Point3::new(self.radius * u.cos(), self.radius * u.sin(), v)
    }

    fn derivatives(&self, u: f64, v: f64) -> SurfaceDerivatives<f64> {
        let r = self.radius;
        SurfaceDerivatives {
            point: self.point_at(u, v),
            su: Vector3::new(-r * u.sin(), r * u.cos(), 0.),
            sv: Vector3::z(),
            suu: Vector3::new(-r * u.cos(), -r * u.sin(), 0.),
            suv: Vector3::zeros(),
            svv: Vector3::zeros(),
        }
    }

    fn u_domain(&self) -> Interval<f64> {
        Interval::new(0., std::f64::consts::PI)
    }

    fn v_domain(&self) -> Interval<f64> {
        Interval::new(0., self.height)
    }
}

/// Hyperbolic paraboloid `z = uv`, ruled by the lines of constant u and constant v
#[derive(Debug, Clone)]
pub struct Saddle {
    extent: f64,
}

impl Saddle {
    pub fn unit() -> Self {
        Self { extent: 1. }
    }
}

impl ParametricSurface<f64> for Saddle {
    fn point_at(&self, u: f64, v: f64) -> Point3<f64> {
        Point3::new(u, v, u * v)
    }

    fn derivatives(&self, u: f64, v: f64) -> SurfaceDerivatives<f64> {
        SurfaceDerivatives {
            point: self.point_at(u, v),
            su: Vector3::new(1., 0., v),
            sv: Vector3::new(0., 1., u),
            suu: Vector3::zeros(),
            suv: Vector3::z(),
            svv: Vector3::zeros(),
        }
    }

    fn u_domain(&self) -> Interval<f64> {
        Interval::new(-self.extent, self.extent)
    }

    fn v_domain(&self) -> Interval<f64> {
        Interval::new(-self.extent, self.extent)
    }
}

/// Plane `z = 0` over a huge domain reporting a constant curvature frame.
/// Principal direction 0 is the x axis, direction 1 is the y axis.
/// With `flipping` set, every curvature query negates both directions.
#[derive(Debug)]
pub struct ConstantFieldPlane {
    kappa: [f64; 2],
    flipping: bool,
    flipped: Cell<bool>,
    pub curvature_queries: Cell<usize>,
}

impl ConstantFieldPlane {
    pub fn new(kappa: [f64; 2]) -> Self {
        Self {
            kappa,
            flipping: false,
            flipped: Cell::new(false),
            curvature_queries: Cell::new(0),
        }
    }

    pub fn flipping(kappa: [f64; 2]) -> Self {
        Self {
            flipping: true,
            ..Self::new(kappa)
        }
    }
}

impl SurfaceOracle<f64> for ConstantFieldPlane {
    fn point_at(&self, u: f64, v: f64) -> Point3<f64> {
        Point3::new(u, v, 0.)
    }

    fn closest_parameter(&self, point: &Point3<f64>) -> Option<Vector2<f64>> {
        Some(Vector2::new(point.x, point.y))
    }

    fn curvature_at(&self, _u: f64, _v: f64) -> Option<SurfaceCurvature<f64>> {
        self.curvature_queries.set(self.curvature_queries.get() + 1);
        let sign = if self.flipped.get() { -1. } else { 1. };
        if self.flipping {
            self.flipped.set(!self.flipped.get());
        }
        Some(SurfaceCurvature::new(
            self.kappa,
            [Vector3::x() * sign, Vector3::y() * sign],
            Vector3::z(),
        ))
    }

    fn domain(&self, _direction: UVDirection) -> Interval<f64> {
        Interval::new(-1e6, 1e6)
    }
}

/// Oracle whose curvature is never available
#[derive(Debug)]
pub struct NoCurvaturePlane;

impl SurfaceOracle<f64> for NoCurvaturePlane {
    fn point_at(&self, u: f64, v: f64) -> Point3<f64> {
        Point3::new(u, v, 0.)
    }

    fn closest_parameter(&self, point: &Point3<f64>) -> Option<Vector2<f64>> {
        Some(Vector2::new(point.x, point.y))
    }

    fn curvature_at(&self, _u: f64, _v: f64) -> Option<SurfaceCurvature<f64>> {
        None
    }

    fn domain(&self, _direction: UVDirection) -> Interval<f64> {
        Interval::new(0., 1.)
    }
}

/// Oracle that can never project a point
#[derive(Debug)]
pub struct NoProjectionPlane;

impl SurfaceOracle<f64> for NoProjectionPlane {
    fn point_at(&self, u: f64, v: f64) -> Point3<f64> {
        Point3::new(u, v, 0.)
    }

    fn closest_parameter(&self, _point: &Point3<f64>) -> Option<Vector2<f64>> {
        None
    }

    fn curvature_at(&self, _u: f64, _v: f64) -> Option<SurfaceCurvature<f64>> {
        None
    }

    fn domain(&self, _direction: UVDirection) -> Interval<f64> {
        Interval::new(0., 1.)
    }
}

/// Unit square plane `z = 0` whose projection never clamps to the domain.
/// Principal direction 0 is the x axis with the larger curvature.
#[derive(Debug)]
pub struct OpenPlane {
    /// Number of successful projections left, unlimited when `None`
    projections_left: Cell<Option<usize>>,
    interior_only: bool,
}

impl OpenPlane {
    pub fn new() -> Self {
        Self {
            projections_left: Cell::new(None),
            interior_only: false,
        }
    }

    /// Projection fails once `count` projections succeeded
    pub fn failing_after(count: usize) -> Self {
        Self {
            projections_left: Cell::new(Some(count)),
            ..Self::new()
        }
    }

    /// Domain membership excludes the boundary
    pub fn interior_only() -> Self {
        Self {
            interior_only: true,
            ..Self::new()
        }
    }
}

impl SurfaceOracle<f64> for OpenPlane {
    fn point_at(&self, u: f64, v: f64) -> Point3<f64> {
        Point3::new(u, v, 0.)
    }

    fn closest_parameter(&self, point: &Point3<f64>) -> Option<Vector2<f64>> {
        match self.projections_left.get() {
            Some(0) => return None,
            Some(n) => self.projections_left.set(Some(n - 1)),
            None => {}
        }
        Some(Vector2::new(point.x, point.y))
    }

    fn curvature_at(&self, _u: f64, _v: f64) -> Option<SurfaceCurvature<f64>> {
        Some(SurfaceCurvature::new(
            [1., 0.],
            [Vector3::x(), Vector3::y()],
            Vector3::z(),
        ))
    }

    fn domain(&self, _direction: UVDirection) -> Interval<f64> {
        Interval::new(0., 1.)
    }

    fn includes_parameter(&self, uv: &Vector2<f64>) -> bool {
        let domain = Interval::new(0., 1.);
        domain.includes(uv.x, !self.interior_only) && domain.includes(uv.y, !self.interior_only)
    }
}
