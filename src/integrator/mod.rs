use nalgebra::{Point3, Vector2, Vector3};

use crate::{
    field::{sample_direction, FieldParameters},
    misc::FloatingPoint,
    surface::SurfaceOracle,
};

/// Stepping scheme used to advance a trace by one displacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Integrator {
    /// One field sample at the current point
    #[default]
    Euler,
    /// Heun's method: average of the samples at the current point and at the predicted point
    ModifiedEuler,
    /// Two stage scheme with the weights `(K1 + 2 K2) / 3`, `K2` sampled half a step ahead
    RungeKutta,
}

impl Integrator {
    /// Compute the displacement from `uv`.
    /// `history` holds the 3D points accepted so far, the last two of them give the
    /// previous direction used for continuity.
    pub fn step<T, O>(
        &self,
        surface: &O,
        uv: &Vector2<T>,
        parameters: &FieldParameters<T>,
        history: &[Point3<T>],
    ) -> Option<Vector3<T>>
    where
        T: FloatingPoint,
        O: SurfaceOracle<T>,
    {
        let previous = previous_direction(history);
        let d1 = sample_direction(surface, uv, parameters, previous.as_ref())?;
        match self {
            Integrator::Euler => Some(d1),
            Integrator::ModifiedEuler => {
                let last = history.last()?;
                let mid = surface.closest_parameter(&(last + d1))?;
                let d2 = sample_direction(surface, &mid, parameters, Some(&d1))?;
                Some((d1 + d2) * T::from_literal(0.5))
            }
            Integrator::RungeKutta => {
                let last = history.last()?;
                let mid = surface.closest_parameter(&(last + d1 * T::from_literal(0.5)))?;
                let k2 = sample_direction(surface, &mid, parameters, Some(&d1))?;
                Some((d1 + k2 * T::from_literal(2.)) / T::from_literal(3.))
            }
        }
    }
}

/// Difference of the last two points, `None` with fewer than two
pub fn previous_direction<T: FloatingPoint>(history: &[Point3<T>]) -> Option<Vector3<T>> {
    match history {
        [.., a, b] => Some(b - a),
        _ => None,
    }
}
