use argmin::core::{ArgminFloat, Executor, State};
use nalgebra::{Point3, RealField, Vector2};

use crate::{
    misc::{all_finite, FloatingPoint, Interval},
    surface::ParametricSurface,
};

use super::{ClosestParameterOptions, SurfaceClosestParameterNewton, SurfaceClosestParameterProblem};

/// Find the closest parameter on the surface to a given point with Newton's method.
/// The initial guess is the nearest sample of a regular parameter grid.
pub fn find_surface_closest_parameter<T, S>(
    surface: &S,
    point: &Point3<T>,
    options: &ClosestParameterOptions<T>,
) -> anyhow::Result<Vector2<T>>
where
    T: FloatingPoint + ArgminFloat,
    S: ParametricSurface<T>,
{
    anyhow::ensure!(
        all_finite(point.coords.iter()),
        "Point must have finite coordinates"
    );

    let u_domain = surface.u_domain();
    let v_domain = surface.v_domain();
    let init = seed_parameter(surface, point, &u_domain, &v_domain, options.seed_divisions);

    let solver = SurfaceClosestParameterNewton::new((u_domain, v_domain), surface.is_closed())
        .with_gamma(options.gamma)?;
    let res = Executor::new(SurfaceClosestParameterProblem::new(point, surface), solver)
        .configure(|state| state.param(init).max_iters(options.max_iters))
        .run()?;

    let state = res.state();
    let best = state
        .get_best_param()
        .or(state.get_param())
        .cloned()
        .ok_or(anyhow::anyhow!("No best parameter found"))?;
    anyhow::ensure!(all_finite(best.iter()), "Closest parameter diverged");
    Ok(best)
}

/// Search the nearest sample of a regular parameter grid
fn seed_parameter<T, S>(
    surface: &S,
    point: &Point3<T>,
    u_domain: &Interval<T>,
    v_domain: &Interval<T>,
    divisions: usize,
) -> Vector2<T>
where
    T: FloatingPoint,
    S: ParametricSurface<T>,
{
    let divs = divisions.max(1);
    let fdivs = T::from_usize(divs).unwrap_or(T::one());
    let mut best = Vector2::new(u_domain.min(), v_domain.min());
    let mut min = <T as RealField>::max_value().unwrap_or(T::one() / T::default_epsilon());
    for i in 0..=divs {
        let u = u_domain.lerp(T::from_usize(i).unwrap_or(T::zero()) / fdivs);
        for j in 0..=divs {
            let v = v_domain.lerp(T::from_usize(j).unwrap_or(T::zero()) / fdivs);
            let d = (surface.point_at(u, v) - point).norm_squared();
            if d < min {
                min = d;
                best = Vector2::new(u, v);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    use super::*;
    use crate::fixtures::{HalfCylinder, PlanePatch, Saddle};

    #[test]
    fn projects_onto_plane() {
        let plane = PlanePatch::unit();
        let uv = find_surface_closest_parameter(
            &plane,
            &Point3::new(0.25, 0.75, 3.0),
            &Default::default(),
        )
        .unwrap();
        assert_relative_eq!(uv, Vector2::new(0.25, 0.75), epsilon = 1e-12);
    }

    #[test]
    fn clamps_to_domain() {
        let plane = PlanePatch::unit();
        let uv = find_surface_closest_parameter(
            &plane,
            &Point3::new(1.5, -0.5, 0.0),
            &Default::default(),
        )
        .unwrap();
        assert_relative_eq!(uv, Vector2::new(1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn projects_onto_cylinder() {
        let cylinder = HalfCylinder::new(1.0, 2.0);
        let angle: f64 = 1.2;
        let p = Point3::new(2.0 * angle.cos(), 2.0 * angle.sin(), 0.4);
        let uv = find_surface_closest_parameter(&cylinder, &p, &Default::default()).unwrap();
        assert_relative_eq!(uv, Vector2::new(angle, 0.4), epsilon = 1e-9);
    }

    #[test]
    fn projects_onto_saddle() {
        let saddle = Saddle::unit();
        let on = saddle.point_at(-0.3, 0.6);
        let uv = find_surface_closest_parameter(&saddle, &on, &Default::default()).unwrap();
        assert_relative_eq!(uv, Vector2::new(-0.3, 0.6), epsilon = 1e-9);
    }

    #[test]
    fn rejects_non_finite_point() {
        let plane = PlanePatch::unit();
        let res = find_surface_closest_parameter(
            &plane,
            &Point3::new(f64::NAN, 0.0, 0.0),
            &Default::default(),
        );
        assert!(res.is_err());
    }
}
