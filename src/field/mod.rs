use nalgebra::{Vector2, Vector3};

use crate::{
    misc::{all_finite, rotate_about_axis, FloatingPoint},
    surface::{SurfaceCurvature, SurfaceOracle},
};

/// Branch of the asymptotic direction pair at a hyperbolic point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AsymptoticBranch {
    /// Larger principal direction rotated by `+theta` about the normal
    Positive,
    /// Larger principal direction rotated by `-theta` about the normal
    Negative,
}

/// Direction field sampled on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurvatureField {
    /// Principal direction of the larger (`pick_max`) or smaller principal curvature
    Principal { pick_max: bool },
    /// Direction of zero normal curvature
    Asymptotic { branch: AsymptoticBranch },
}

impl Default for CurvatureField {
    fn default() -> Self {
        Self::Principal { pick_max: true }
    }
}

impl CurvatureField {
    /// Unit direction of the field before the user rotation.
    /// `None` where the field is undefined (no real asymptotic direction).
    pub fn base_direction<T: FloatingPoint>(
        &self,
        frame: &SurfaceCurvature<T>,
    ) -> Option<Vector3<T>> {
        match *self {
            CurvatureField::Principal { pick_max } => {
                let index = if (frame.kappa(0) > frame.kappa(1)) == pick_max {
                    0
                } else {
                    1
                };
                Some(*frame.direction(index))
            }
            CurvatureField::Asymptotic { branch } => {
                let hi = frame.max_index();
                let (k_hi, k_lo) = (frame.kappa(hi), frame.kappa(1 - hi));
                if k_hi * k_lo > T::zero() {
                    return None;
                }
                let theta = if k_lo == T::zero() {
                    if k_hi == T::zero() {
                        return None;
                    }
                    T::frac_pi_2()
                } else {
                    (-k_hi / k_lo).sqrt().atan()
                };
                let theta = match branch {
                    AsymptoticBranch::Positive => theta,
                    AsymptoticBranch::Negative => -theta,
                };
                rotate_about_axis(frame.direction(hi), frame.normal(), theta)
            }
        }
    }
}

/// Sampling parameters shared by every step of a trace
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldParameters<T: FloatingPoint> {
    pub field: CurvatureField,
    /// Rotation about the surface normal in radians
    pub angle: T,
    pub step_length: T,
}

/// Sample the field at `uv`, rotated by the user angle and scaled to the step length.
///
/// The result is negated when it points against `previous` (angle over 90 degrees),
/// which keeps a trace from folding back on a sign-ambiguous field.
pub fn sample_direction<T, O>(
    surface: &O,
    uv: &Vector2<T>,
    parameters: &FieldParameters<T>,
    previous: Option<&Vector3<T>>,
) -> Option<Vector3<T>>
where
    T: FloatingPoint,
    O: SurfaceOracle<T>,
{
    let frame = surface.curvature_at(uv.x, uv.y)?;
    let base = parameters.field.base_direction(&frame)?;
    let rotated = rotate_about_axis(&base, frame.normal(), parameters.angle)?;
    if !all_finite(rotated.iter()) {
        return None;
    }
    let direction = rotated.try_normalize(T::default_epsilon())? * parameters.step_length;
    match previous {
        Some(prev) if prev.dot(&direction) < T::zero() => Some(-direction),
        _ => Some(direction),
    }
}
