use argmin::{argmin_error_closure, core::*, float};
use nalgebra::{ComplexField, Matrix3, Vector3};

use crate::misc::{FloatingPoint, Interval};

use super::CircleSurfaceParam;

/// Newton's method with step halving for the square system `S(u, v) - C(t) = 0`.
/// The surface parameters stay inside (or wrap around) the surface domain.
#[derive(Clone, Copy)]
pub struct CircleSurfaceIntersectionNewton<F: FloatingPoint> {
    /// domain of the surface parameter
    domain: (Interval<F>, Interval<F>),
    /// the target surface is closed or not
    closed: (bool, bool),
    /// maximum number of step halvings per iteration
    max_backtracks: usize,
}

impl<F> CircleSurfaceIntersectionNewton<F>
where
    F: FloatingPoint + ArgminFloat,
{
    pub fn new(domain: (Interval<F>, Interval<F>), closed: (bool, bool)) -> Self {
        CircleSurfaceIntersectionNewton {
            domain,
            closed,
            max_backtracks: 8,
        }
    }

    fn constrain(&self, param: CircleSurfaceParam<F>) -> CircleSurfaceParam<F> {
        let angle = Interval::new(F::zero(), F::two_pi());
        let u = if self.closed.0 {
            self.domain.0.wrap(param.y)
        } else {
            self.domain.0.clamp(param.y)
        };
        let v = if self.closed.1 {
            self.domain.1.wrap(param.z)
        } else {
            self.domain.1.clamp(param.z)
        };
        Vector3::new(angle.wrap(param.x), u, v)
    }
}

type CircleSurfaceState<F> = IterState<CircleSurfaceParam<F>, (), (), (), (), F>;

impl<O, F> Solver<O, CircleSurfaceState<F>> for CircleSurfaceIntersectionNewton<F>
where
    F: FloatingPoint + ArgminFloat,
    O: Operator<Param = CircleSurfaceParam<F>, Output = Vector3<F>>
        + Jacobian<Param = CircleSurfaceParam<F>, Jacobian = Matrix3<F>>,
{
    const NAME: &'static str = "Circle surface intersection newton method";

    fn init(
        &mut self,
        problem: &mut Problem<O>,
        state: CircleSurfaceState<F>,
    ) -> Result<(CircleSurfaceState<F>, Option<KV>), Error> {
        let x0 = state.get_param().ok_or_else(argmin_error_closure!(
            NotInitialized,
            concat!(
                "`CircleSurfaceIntersectionNewton` requires an initial parameter vector. ",
                "Please provide an initial guess via `Executor`s `configure` method."
            )
        ))?;
        let residual = problem.apply(x0)?;
        Ok((state.cost(residual.norm()), None))
    }

    fn next_iter(
        &mut self,
        problem: &mut Problem<O>,
        state: CircleSurfaceState<F>,
    ) -> Result<(CircleSurfaceState<F>, Option<KV>), Error> {
        let param = *state.get_param().ok_or_else(argmin_error_closure!(
            NotInitialized,
            concat!(
                "`CircleSurfaceIntersectionNewton` requires an initial parameter vector. ",
                "Please provide an initial guess via `Executor`s `configure` method."
            )
        ))?;

        let residual = problem.apply(&param)?;
        let jacobian = problem.jacobian(&param)?;

        // singular system (tangential contact or degenerate surface)
        let Some(delta) = jacobian.lu().solve(&-residual) else {
            return Ok((state.param(param), None));
        };

        let cost = state.get_cost();
        let mut step = float!(1.0);
        for _ in 0..self.max_backtracks {
            let candidate = self.constrain(param + delta * step);
            let candidate_cost = problem.apply(&candidate)?.norm();
            if ComplexField::is_finite(&candidate_cost) && candidate_cost < cost {
                return Ok((state.param(candidate).cost(candidate_cost), None));
            }
            step = step * float!(0.5);
        }

        Ok((state.param(param), None))
    }

    fn terminate(&mut self, state: &CircleSurfaceState<F>) -> TerminationStatus {
        if state.iter > state.max_iters {
            return TerminationStatus::Terminated(TerminationReason::MaxItersReached);
        }

        if state.get_cost() <= F::epsilon() {
            return TerminationStatus::Terminated(TerminationReason::SolverConverged);
        }

        match (state.get_param(), state.get_prev_param()) {
            (Some(current_param), Some(prev_param)) => {
                let delta = (current_param - prev_param).norm();
                if delta < F::epsilon() {
                    TerminationStatus::Terminated(TerminationReason::SolverConverged)
                } else {
                    TerminationStatus::NotTerminated
                }
            }
            _ => TerminationStatus::NotTerminated,
        }
    }
}
