use argmin::core::{Jacobian, Operator};
use nalgebra::{Matrix3, Vector3};

use crate::{
    misc::{Circle, FloatingPoint},
    surface::ParametricSurface,
};

use super::CircleSurfaceParam;

/// Residual & Jacobian provider for finding the intersection between a circle & a surface.
/// The residual is `F(t, u, v) = S(u, v) - C(t)`.
pub struct CircleSurfaceIntersectionProblem<'a, T: FloatingPoint, S: ParametricSurface<T>> {
    circle: &'a Circle<T>,
    surface: &'a S,
}

impl<'a, T: FloatingPoint, S: ParametricSurface<T>> CircleSurfaceIntersectionProblem<'a, T, S> {
    pub fn new(circle: &'a Circle<T>, surface: &'a S) -> Self {
        CircleSurfaceIntersectionProblem { circle, surface }
    }
}

impl<T: FloatingPoint, S: ParametricSurface<T>> Operator
    for CircleSurfaceIntersectionProblem<'_, T, S>
{
    type Param = CircleSurfaceParam<T>;
    type Output = Vector3<T>;

    fn apply(&self, param: &Self::Param) -> Result<Self::Output, anyhow::Error> {
        let s = self.surface.point_at(param.y, param.z);
        let c = self.circle.point_at(param.x);
        Ok(s - c)
    }
}

impl<T: FloatingPoint, S: ParametricSurface<T>> Jacobian
    for CircleSurfaceIntersectionProblem<'_, T, S>
{
    type Param = CircleSurfaceParam<T>;
    type Jacobian = Matrix3<T>;

    /// `[-C'(t), Su, Sv]` column-wise
    fn jacobian(&self, param: &Self::Param) -> Result<Self::Jacobian, anyhow::Error> {
        let d = self.surface.derivatives(param.y, param.z);
        let dc = self.circle.tangent_at(param.x);
        Ok(Matrix3::from_columns(&[-dc, d.su, d.sv]))
    }
}
