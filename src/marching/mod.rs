use nalgebra::{Point3, Vector3};

use crate::{
    misc::{all_finite, Circle, FloatingPoint},
    surface::SurfaceOracle,
};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarchOptions<T: FloatingPoint> {
    /// Chord length between consecutive points
    pub radius: T,
    /// Maximum number of steps
    pub max_steps: usize,
    /// Tolerance passed to the circle intersection
    pub tolerance: T,
}

impl<T: FloatingPoint> Default for MarchOptions<T> {
    fn default() -> Self {
        Self {
            radius: T::from_literal(0.1),
            max_steps: 10_000,
            tolerance: T::from_literal(1e-6),
        }
    }
}

impl<T: FloatingPoint> MarchOptions<T> {
    pub fn with_radius(mut self, radius: T) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Reason the march stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarchTermination {
    /// No intersection ahead of the current point
    NoIntersection,
    /// The only reachable intersection leads back toward the previous point
    TurnedBack,
    MaxStepsReached,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarchResult<T: FloatingPoint> {
    pub points: Vec<Point3<T>>,
    pub termination: MarchTermination,
}

/// Walk the section of the surface by the plane through `start` with normal `plane_normal`
/// in equal chords.
///
/// Each step intersects the circle around the current point (lying in the section plane)
/// with the surface. The first step takes the intersection furthest along `heading`, later
/// steps take the intersection furthest from the point before the current one.
pub fn march_section<T, O>(
    surface: &O,
    start: &Point3<T>,
    plane_normal: &Vector3<T>,
    heading: &Vector3<T>,
    options: &MarchOptions<T>,
) -> anyhow::Result<MarchResult<T>>
where
    T: FloatingPoint,
    O: SurfaceOracle<T>,
{
    anyhow::ensure!(
        all_finite(start.coords.iter().chain(plane_normal.iter()).chain(heading.iter())),
        "Start point, plane normal and heading must be finite"
    );
    anyhow::ensure!(
        options.radius.is_finite() && options.radius > T::zero(),
        "Radius must be positive and finite"
    );
    anyhow::ensure!(
        options.tolerance.is_finite() && options.tolerance > T::zero(),
        "Tolerance must be positive and finite"
    );

    let uv = surface
        .closest_parameter(start)
        .ok_or(anyhow::anyhow!("Start point cannot be projected onto the surface"))?;
    let mut points = vec![surface.point_at(uv.x, uv.y)];

    for step in 0..options.max_steps {
        let current = points[points.len() - 1];
        let circle = Circle::try_new(current, plane_normal, options.radius)?;
        let Some(hits) = surface.intersect_circle(&circle, options.tolerance) else {
            log::debug!("circle intersection unavailable at step {step}");
            return Ok(MarchResult {
                points,
                termination: MarchTermination::NoIntersection,
            });
        };

        let next = match points.len() {
            1 => hits
                .into_iter()
                .map(|p| ((p - current).dot(heading), p))
                .filter(|(d, _)| *d > T::zero())
                .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(_, p)| p),
            n => {
                let before = points[n - 2];
                match hits
                    .into_iter()
                    .map(|p| ((p - before).norm(), p))
                    .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
                {
                    Some((d, _)) if d <= options.radius => {
                        log::debug!("section march turned back after {step} steps");
                        return Ok(MarchResult {
                            points,
                            termination: MarchTermination::TurnedBack,
                        });
                    }
                    other => other.map(|(_, p)| p),
                }
            }
        };

        match next {
            Some(p) => points.push(p),
            None => {
                log::debug!("section march found no intersection after {step} steps");
                return Ok(MarchResult {
                    points,
                    termination: MarchTermination::NoIntersection,
                });
            }
        }
    }

    Ok(MarchResult {
        points,
        termination: MarchTermination::MaxStepsReached,
    })
}
