use argmin::{argmin_error, argmin_error_closure, core::*, float};
use nalgebra::{ComplexField, Matrix2, Vector2, Vector3};

use crate::{misc::FloatingPoint, misc::Interval, surface::SurfaceDerivatives};

/// Customized Newton's method for finding the closest parameter on a surface
/// Adapted from: https://argmin-rs.github.io/argmin/argmin/solver/newton/struct.Newton.html
#[derive(Clone, Copy)]
pub struct SurfaceClosestParameterNewton<F: FloatingPoint> {
    /// gamma
    gamma: F,
    /// domain of the parameter
    domain: (Interval<F>, Interval<F>),
    /// the target surface is closed or not
    closed: (bool, bool),
}

impl<F> SurfaceClosestParameterNewton<F>
where
    F: FloatingPoint + ArgminFloat,
{
    /// Construct a new instance of [`SurfaceClosestParameterNewton`]
    pub fn new(domain: (Interval<F>, Interval<F>), closed: (bool, bool)) -> Self {
        SurfaceClosestParameterNewton {
            gamma: float!(1.0),
            domain,
            closed,
        }
    }

    /// Set step size gamma
    ///
    /// Gamma must be in `(0, 1]` and defaults to `1`.
    pub fn with_gamma(mut self, gamma: F) -> Result<Self, Error> {
        if gamma <= float!(0.0) || gamma > float!(1.0) {
            return Err(argmin_error!(
                InvalidParameter,
                "Newton: gamma must be in  (0, 1]."
            ));
        }
        self.gamma = gamma;
        Ok(self)
    }

    /// Solve the 2x2 Newton system for the squared distance `|S(u, v) - P|^2 / 2`
    fn newton_step(&self, dif: &Vector3<F>, e: &SurfaceDerivatives<F>) -> Option<Vector2<F>> {
        let grad = Vector2::new(e.su.dot(dif), e.sv.dot(dif));
        let j00 = e.su.dot(&e.su) + e.suu.dot(dif);
        let j01 = e.su.dot(&e.sv) + e.suv.dot(dif);
        let j11 = e.sv.dot(&e.sv) + e.svv.dot(dif);
        let hessian = Matrix2::new(j00, j01, j01, j11);
        hessian.lu().solve(&-grad)
    }
}

impl<O, F> Solver<O, IterState<Vector2<F>, Vector2<F>, (), (), (), F>>
    for SurfaceClosestParameterNewton<F>
where
    F: FloatingPoint + ArgminFloat,
    O: CostFunction<Param = Vector2<F>, Output = F>
        + Gradient<Param = Vector2<F>, Gradient = Vector3<F>>
        + Hessian<Param = Vector2<F>, Hessian = SurfaceDerivatives<F>>,
{
    const NAME: &'static str = "Surface closest parameter newton method";

    fn init(
        &mut self,
        problem: &mut Problem<O>,
        state: IterState<Vector2<F>, Vector2<F>, (), (), (), F>,
    ) -> Result<(IterState<Vector2<F>, Vector2<F>, (), (), (), F>, Option<KV>), Error> {
        let x0 = state.get_param().ok_or_else(argmin_error_closure!(
            NotInitialized,
            concat!(
                "`SurfaceClosestParameterNewton` requires an initial parameter vector. ",
                "Please provide an initial guess via `Executor`s `configure` method."
            )
        ))?;
        let cost = problem.cost(x0)?;
        Ok((state.cost(cost), None))
    }

    fn next_iter(
        &mut self,
        problem: &mut Problem<O>,
        state: IterState<Vector2<F>, Vector2<F>, (), (), (), F>,
    ) -> Result<(IterState<Vector2<F>, Vector2<F>, (), (), (), F>, Option<KV>), Error> {
        let param = *state.get_param().ok_or_else(argmin_error_closure!(
            NotInitialized,
            concat!(
                "`SurfaceClosestParameterNewton` requires an initial parameter vector. ",
                "Please provide an initial guess via `Executor`s `configure` method."
            )
        ))?;

        let dif = problem.gradient(&param)?;
        let e = problem.hessian(&param)?;

        // singular system: the current parameter is as good as it gets
        let Some(delta) = self.newton_step(&dif, &e) else {
            return Ok((state.param(param), None));
        };

        let new_param = param + delta * self.gamma;

        // Constrain the parameter to the domain
        let new_param = Vector2::new(
            constrain(new_param.x, &self.domain.0, self.closed.0),
            constrain(new_param.y, &self.domain.1, self.closed.1),
        );

        let new_cost = problem.cost(&new_param)?;

        // halt if cost is not decreasing
        if state.get_cost() < new_cost || !ComplexField::is_finite(&new_cost) {
            Ok((state.param(param), None))
        } else {
            Ok((state.cost(new_cost).param(new_param), None))
        }
    }

    fn terminate(
        &mut self,
        state: &IterState<Vector2<F>, Vector2<F>, (), (), (), F>,
    ) -> TerminationStatus {
        if state.iter > state.max_iters {
            return TerminationStatus::Terminated(TerminationReason::MaxItersReached);
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

fn constrain<T: FloatingPoint>(parameter: T, domain: &Interval<T>, closed: bool) -> T {
    if closed {
        domain.wrap(parameter)
    } else {
        domain.clamp(parameter)
    }
}
