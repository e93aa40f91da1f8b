use argmin::core::{CostFunction, Gradient, Hessian};
use nalgebra::{Point3, Vector2, Vector3};

use crate::{
    misc::FloatingPoint,
    surface::{ParametricSurface, SurfaceDerivatives},
};

/// Gradient & Hessian provider for finding the closest parameter on a surface to a given point.
pub struct SurfaceClosestParameterProblem<'a, T: FloatingPoint, S: ParametricSurface<T>> {
    /// The point to find the closest parameter to.
    point: &'a Point3<T>,
    /// The surface to find the closest parameter on.
    surface: &'a S,
}

impl<'a, T: FloatingPoint, S: ParametricSurface<T>> SurfaceClosestParameterProblem<'a, T, S> {
    pub fn new(point: &'a Point3<T>, surface: &'a S) -> Self {
        SurfaceClosestParameterProblem { point, surface }
    }
}

impl<T: FloatingPoint, S: ParametricSurface<T>> CostFunction
    for SurfaceClosestParameterProblem<'_, T, S>
{
    type Param = Vector2<T>;
    type Output = T;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, anyhow::Error> {
        let p = self.surface.point_at(param.x, param.y);
        Ok((p - self.point).norm())
    }
}

impl<T: FloatingPoint, S: ParametricSurface<T>> Gradient
    for SurfaceClosestParameterProblem<'_, T, S>
{
    type Param = Vector2<T>;
    type Gradient = Vector3<T>;

    /// S(u, v) - P
    fn gradient(&self, param: &Self::Param) -> Result<Self::Gradient, anyhow::Error> {
        let p = self.surface.point_at(param.x, param.y);
        Ok(p - self.point)
    }
}

impl<T: FloatingPoint, S: ParametricSurface<T>> Hessian
    for SurfaceClosestParameterProblem<'_, T, S>
{
    type Param = Vector2<T>;
    type Hessian = SurfaceDerivatives<T>;

    fn hessian(&self, param: &Self::Param) -> Result<Self::Hessian, anyhow::Error> {
        Ok(self.surface.derivatives(param.x, param.y))
    }
}
