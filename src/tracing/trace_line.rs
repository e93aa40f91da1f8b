use nalgebra::{Point3, Vector2};

use crate::{
    field::{AsymptoticBranch, CurvatureField, FieldParameters},
    integrator::Integrator,
    misc::{all_finite, FloatingPoint},
    surface::SurfaceOracle,
};

use super::{CurvatureLine, HalfTrace, TraceOptions, TraceTermination};

/// Trace a field line through `start` in both directions.
///
/// The start point is projected onto the surface first. The half traced with
/// `options.angle` is the forward half, the half traced with `options.angle + pi` is
/// reversed in front of it.
///
/// # Example
/// ```
/// use nalgebra::{Point3, Vector3};
/// use surface_flow::prelude::*;
///
/// struct Plane;
///
/// impl ParametricSurface<f64> for Plane {
///     fn point_at(&self, u: f64, v: f64) -> Point3<f64> {
///         Point3::new(u, v, 0.)
///     }
///     fn derivatives(&self, u: f64, v: f64) -> SurfaceDerivatives<f64> {
///         SurfaceDerivatives {
///             point: self.point_at(u, v),
///             su: Vector3::x(),
///             sv: Vector3::y(),
///             suu: Vector3::zeros(),
///             suv: Vector3::zeros(),
///             svv: Vector3::zeros(),
///         }
///     }
///     fn u_domain(&self) -> Interval<f64> {
///         Interval::new(0., 1.)
///     }
///     fn v_domain(&self) -> Interval<f64> {
///         Interval::new(0., 1.)
///     }
/// }
///
/// let surface = SurfaceEvaluator::new(Plane);
/// let line = trace_line(
///     &surface,
///     &Point3::new(0.5, 0.5, 0.),
///     &TraceOptions::default().with_step_length(0.1),
/// )
/// .unwrap();
/// assert!(line.points().len() > 1);
/// ```
pub fn trace_line<T, O>(
    surface: &O,
    start: &Point3<T>,
    options: &TraceOptions<T>,
) -> anyhow::Result<CurvatureLine<T>>
where
    T: FloatingPoint,
    O: SurfaceOracle<T>,
{
    anyhow::ensure!(
        all_finite(start.coords.iter()),
        "Start point must have finite coordinates"
    );
    anyhow::ensure!(
        options.step_length.is_finite() && options.step_length > T::zero(),
        "Step length must be positive and finite"
    );
    anyhow::ensure!(options.angle.is_finite(), "Angle must be finite");
    anyhow::ensure!(options.max_points > 0, "Maximum number of points must be positive");

    let uv = surface
        .closest_parameter(start)
        .ok_or(anyhow::anyhow!("Start point cannot be projected onto the surface"))?;

    let tolerance = surface.absolute_tolerance();
    let step_length = if options.step_length < tolerance {
        tolerance
    } else {
        options.step_length
    };

    let forward = FieldParameters {
        field: options.field,
        angle: options.angle,
        step_length,
    };
    let backward = FieldParameters {
        angle: options.angle + T::pi(),
        ..forward
    };

    let forward = trace_half(surface, &uv, &forward, options);
    let backward = trace_half(surface, &uv, &backward, options);
    log::debug!(
        "traced {} + {} points, stopped by {:?} / {:?}",
        forward.points.len(),
        backward.points.len(),
        forward.termination,
        backward.termination
    );

    Ok(CurvatureLine::from_halves(forward, backward))
}

/// Trace both asymptotic lines through `start`.
/// The field of `options` is replaced by the two asymptotic branches.
pub fn trace_asymptotic_lines<T, O>(
    surface: &O,
    start: &Point3<T>,
    options: &TraceOptions<T>,
) -> anyhow::Result<[CurvatureLine<T>; 2]>
where
    T: FloatingPoint,
    O: SurfaceOracle<T>,
{
    let positive = options.clone().with_field(CurvatureField::Asymptotic {
        branch: AsymptoticBranch::Positive,
    });
    let negative = options.clone().with_field(CurvatureField::Asymptotic {
        branch: AsymptoticBranch::Negative,
    });
    Ok([
        trace_line(surface, start, &positive)?,
        trace_line(surface, start, &negative)?,
    ])
}

/// Walk the field from `start` in one direction until a termination condition holds
pub fn trace_half<T, O>(
    surface: &O,
    start: &Vector2<T>,
    parameters: &FieldParameters<T>,
    options: &TraceOptions<T>,
) -> HalfTrace<T>
where
    T: FloatingPoint,
    O: SurfaceOracle<T>,
{
    let integrator: Integrator = options.integrator;
    let mut uv = *start;
    let mut points = vec![];

    let termination = loop {
        let current = surface.point_at(uv.x, uv.y);
        points.push(current);

        let Some(displacement) = integrator.step(surface, &uv, parameters, &points) else {
            break TraceTermination::SampleUnavailable;
        };

        let Some(next) = surface.closest_parameter(&(current + displacement)) else {
            break TraceTermination::ProjectionFailed;
        };

        if points.len() >= options.max_points {
            break TraceTermination::RunawayGuard;
        }
        if !surface.includes_parameter(&next) {
            break TraceTermination::OutOfDomain;
        }
        if (next.x - uv.x).abs() < options.stall_tolerance
            && (next.y - uv.y).abs() < options.stall_tolerance
        {
            break TraceTermination::Stalled;
        }

        log::trace!("step {}: ({:?}, {:?})", points.len(), next.x, next.y);
        uv = next;
    };

    HalfTrace {
        points,
        termination,
    }
}
