use nalgebra::Vector3;

use crate::misc::FloatingPoint;

/// Principal curvature frame at a surface point.
/// Holds the two principal curvatures, their tangent directions and the unit normal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceCurvature<T: FloatingPoint> {
    kappa: [T; 2],
    directions: [Vector3<T>; 2],
    normal: Vector3<T>,
}

impl<T: FloatingPoint> SurfaceCurvature<T> {
    pub fn new(kappa: [T; 2], directions: [Vector3<T>; 2], normal: Vector3<T>) -> Self {
        Self {
            kappa,
            directions,
            normal,
        }
    }

    /// Returns the principal curvature of the given index (0 or 1)
    pub fn kappa(&self, index: usize) -> T {
        self.kappa[index]
    }

    /// Returns the principal direction of the given index (0 or 1)
    pub fn direction(&self, index: usize) -> &Vector3<T> {
        &self.directions[index]
    }

    pub fn normal(&self) -> &Vector3<T> {
        &self.normal
    }

    /// Index of the larger principal curvature.
    /// Ties resolve to index 1.
    pub fn max_index(&self) -> usize {
        if self.kappa[0] > self.kappa[1] {
            0
        } else {
            1
        }
    }

    /// Gaussian curvature (product of the principal curvatures)
    pub fn gaussian(&self) -> T {
        self.kappa[0] * self.kappa[1]
    }

    /// Mean curvature
    pub fn mean(&self) -> T {
        (self.kappa[0] + self.kappa[1]) * T::from_literal(0.5)
    }
}
