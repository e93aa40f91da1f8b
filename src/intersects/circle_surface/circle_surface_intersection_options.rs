use crate::{closest_parameter::ClosestParameterOptions, misc::FloatingPoint};

/// Hyperparameters for the circle & surface intersection solver.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CircleIntersectionOptions<T: FloatingPoint> {
    /// Number of regular samples along the circle used to seed the Newton method.
    pub samples: usize,
    /// Maximum distance between the circle and the surface to accept a root.
    pub tolerance: T,
    /// Roots closer than this distance are merged.
    pub minimum_distance: T,
    /// Maximum number of iterations for the Newton method.
    pub max_iters: u64,
    /// Options for projecting the circle samples onto the surface.
    pub closest_parameter: ClosestParameterOptions<T>,
}

impl<T: FloatingPoint> Default for CircleIntersectionOptions<T> {
    fn default() -> Self {
        Self {
            samples: 64,
            tolerance: T::from_literal(1e-6),
            minimum_distance: T::from_literal(1e-6),
            max_iters: 32,
            closest_parameter: Default::default(),
        }
    }
}

impl<T: FloatingPoint> CircleIntersectionOptions<T> {
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_minimum_distance(mut self, minimum_distance: T) -> Self {
        self.minimum_distance = minimum_distance;
        self
    }

    pub fn with_max_iters(mut self, max_iters: u64) -> Self {
        self.max_iters = max_iters;
        self
    }

    pub fn with_closest_parameter(mut self, options: ClosestParameterOptions<T>) -> Self {
        self.closest_parameter = options;
        self
    }
}
