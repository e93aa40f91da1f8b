use itertools::Itertools;
use nalgebra::{Point3, Vector3};

use crate::{misc::FloatingPoint, surface::SurfaceOracle};

use super::{Lattice, RelaxationOptions};

/// Final state of a relaxation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelaxationStatus {
    /// The largest correction fell below the tolerance
    Converged,
    /// The largest correction stopped changing
    Stabilized,
    IterationLimitReached,
}

/// Relaxed lattice with the run's outcome
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelaxationResult<T: FloatingPoint> {
    pub lattice: Lattice<T>,
    pub status: RelaxationStatus,
    /// Number of iterations performed
    pub iterations: usize,
    /// Largest correction of the last iteration
    pub max_correction: T,
    /// Largest correction of every iteration
    pub history: Vec<T>,
}

/// Number of consecutive unchanged iterations after which the run is stabilized
const STABLE_ITERATIONS: usize = 5;

/// Relax a lattice on the surface toward `options.target_length`.
///
/// Every iteration computes a damped correction per node from the edges to its 4-connected
/// neighbours that fall outside `[min_length, max_length]`, applies all corrections from a
/// snapshot of the previous positions, projects the moved nodes back onto the surface and
/// blends them with their previous position.
pub fn relax<T, O>(
    surface: &O,
    lattice: Lattice<T>,
    options: &RelaxationOptions<T>,
) -> anyhow::Result<RelaxationResult<T>>
where
    T: FloatingPoint,
    O: SurfaceOracle<T>,
{
    options.validate()?;

    let mut lattice = lattice;
    let mut history = Vec::with_capacity(options.max_iterations);
    let mut previous_max: Option<T> = None;
    let mut stable_count = 0;
    let mut status = RelaxationStatus::IterationLimitReached;

    for iteration in 0..options.max_iterations {
        let snapshot = lattice.positions().to_vec();
        let corrections = compute_corrections(&lattice, options);
        let max_correction = corrections
            .iter()
            .map(|c| c.norm())
            .fold(T::zero(), |a, b| if b > a { b } else { a });

        let smoothing = options.smoothing;
        for ((position, previous), correction) in lattice
            .positions_mut()
            .iter_mut()
            .zip(snapshot.iter())
            .zip(corrections.iter())
        {
            let moved = previous + correction;
            let projected = match surface.closest_parameter(&moved) {
                Some(uv) => surface.point_at(uv.x, uv.y),
                None => {
                    log::warn!("failed to project a relaxed node, keeping its position");
                    *previous
                }
            };
            *position = Point3::from(
                projected.coords * smoothing + previous.coords * (T::one() - smoothing),
            );
        }
        history.push(max_correction);
        log::trace!("iteration {}: max correction {:?}", iteration + 1, max_correction);

        if max_correction < options.tolerance {
            status = RelaxationStatus::Converged;
            break;
        }

        let unchanged = previous_max.is_some_and(|prev| {
            (max_correction - prev).abs() < options.tolerance * T::from_literal(0.02)
        });
        if unchanged {
            stable_count += 1;
            if stable_count > STABLE_ITERATIONS {
                status = RelaxationStatus::Stabilized;
                break;
            }
        } else {
            stable_count = 0;
        }
        previous_max = Some(max_correction);
    }

    let iterations = history.len();
    let max_correction = history.last().copied().unwrap_or(T::zero());
    log::debug!(
        "relaxation finished after {} iterations: {:?} (max correction {:?})",
        iterations,
        status,
        max_correction
    );

    Ok(RelaxationResult {
        lattice,
        status,
        iterations,
        max_correction,
        history,
    })
}

/// Damped correction of every node, in storage order
fn compute_corrections<T: FloatingPoint>(
    lattice: &Lattice<T>,
    options: &RelaxationOptions<T>,
) -> Vec<Vector3<T>> {
    let nu = lattice.nu();
    let fnu = T::from_usize(nu).unwrap_or(T::one());
    let half = T::from_literal(0.5);
    let l = options.target_length;
    let positions = lattice.positions();

    (0..lattice.nv())
        .cartesian_product(0..nu)
        .map(|(i, j)| {
            let p = &positions[lattice.index(i, j)];
            let total = lattice
                .neighbors(i, j)
                .fold(Vector3::zeros(), |total, k| {
                    let d = positions[k] - p;
                    let r = d.norm();
                    if r <= T::default_epsilon() {
                        return total;
                    }
                    let e = d / r;
                    let f = ((r - l).abs() / l).min(half);
                    if r < options.min_length {
                        total + e * ((r - options.min_length) * f * half)
                    } else if r > options.max_length {
                        total + e * ((r - options.max_length) * f * T::from_literal(0.8))
                    } else {
                        total
                    }
                });

            let column = T::from_usize(j).unwrap_or(T::zero());
            let damping = options.damping * (T::one() + column / fnu) * options.relaxation;
            let correction = total * damping;
            if j == 0 || j == nu - 1 {
                correction * half
            } else {
                correction
            }
        })
        .collect()
}
