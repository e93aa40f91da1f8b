use std::cmp::Ordering;

use argmin::core::{ArgminFloat, Executor, State};
use itertools::Itertools;
use nalgebra::{ComplexField, Point3, Vector3};

use crate::{
    closest_parameter::find_surface_closest_parameter,
    misc::{Circle, FloatingPoint},
    surface::ParametricSurface,
};

use super::{
    CircleIntersectionOptions, CircleSurfaceIntersectionNewton, CircleSurfaceIntersectionProblem,
};

/// Find the points where a circle pierces a surface.
///
/// The circle is sampled at regular angles; every local minimum of the sample's distance to
/// the surface within a chord length seeds a Newton iteration on `(t, u, v)`.
/// Converged roots are returned ordered by the circle angle, near duplicates merged.
pub fn find_circle_surface_intersections<T, S>(
    surface: &S,
    circle: &Circle<T>,
    options: &CircleIntersectionOptions<T>,
) -> anyhow::Result<Vec<Point3<T>>>
where
    T: FloatingPoint + ArgminFloat,
    S: ParametricSurface<T>,
{
    anyhow::ensure!(options.samples >= 3, "At least 3 circle samples are required");
    anyhow::ensure!(
        options.tolerance > T::zero(),
        "Intersection tolerance must be positive"
    );

    let n = options.samples;
    let count = T::from_usize(n).ok_or(anyhow::anyhow!("Too many circle samples"))?;
    let chord = circle.radius() * T::two_pi() / count;

    // (t, u, v, distance) of each sample
    let samples = (0..n)
        .map(|i| {
            let t = T::two_pi() * T::from_usize(i).unwrap_or(T::zero()) / count;
            let p = circle.point_at(t);
            let uv = find_surface_closest_parameter(surface, &p, &options.closest_parameter)?;
            let d = (surface.point_at(uv.x, uv.y) - p).norm();
            Ok((Vector3::new(t, uv.x, uv.y), d))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let seeds = (0..n).filter_map(|i| {
        let prev = samples[(i + n - 1) % n].1;
        let next = samples[(i + 1) % n].1;
        let (param, d) = samples[i];
        (d <= prev && d <= next && d < chord).then_some(param)
    });

    let domain = (surface.u_domain(), surface.v_domain());
    let closed = surface.is_closed();

    let roots = seeds
        .filter_map(|init| {
            let problem = CircleSurfaceIntersectionProblem::new(circle, surface);
            let solver = CircleSurfaceIntersectionNewton::new(domain, closed);
            let res = Executor::new(problem, solver)
                .configure(|state| state.param(init).max_iters(options.max_iters))
                .run();
            match res {
                Ok(r) => {
                    let state = r.state();
                    let cost = state.get_best_cost();
                    let param = state.get_best_param().or(state.get_param())?;
                    if ComplexField::is_finite(&cost) && cost < options.tolerance {
                        Some((param.x, surface.point_at(param.y, param.z)))
                    } else {
                        log::trace!("rejected circle intersection seed at t = {:?}", init.x);
                        None
                    }
                }
                Err(e) => {
                    log::debug!("circle intersection solver failed: {e}");
                    None
                }
            }
        })
        .sorted_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal))
        .map(|(_, p)| p)
        .coalesce(|a, b| {
            if (a - b).norm() < options.minimum_distance {
                Ok(a)
            } else {
                Err((a, b))
            }
        })
        .collect_vec();

    // the first & last roots may meet across the angle seam
    let mut roots = roots;
    if roots.len() > 1 && (roots[0] - roots[roots.len() - 1]).norm() < options.minimum_distance {
        roots.pop();
    }

    Ok(roots)
}
