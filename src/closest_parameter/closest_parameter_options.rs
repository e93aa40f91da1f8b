use crate::misc::FloatingPoint;

/// Options for finding the closest parameter on a surface
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClosestParameterOptions<T: FloatingPoint> {
    /// Number of divisions per direction of the regular grid searched for the initial guess
    pub seed_divisions: usize,
    /// Maximum number of Newton iterations
    pub max_iters: u64,
    /// Newton step scale in `(0, 1]`
    pub gamma: T,
}

impl<T: FloatingPoint> Default for ClosestParameterOptions<T> {
    fn default() -> Self {
        Self {
            seed_divisions: 16,
            max_iters: 32,
            gamma: T::one(),
        }
    }
}

impl<T: FloatingPoint> ClosestParameterOptions<T> {
    pub fn with_seed_divisions(mut self, seed_divisions: usize) -> Self {
        self.seed_divisions = seed_divisions.max(1);
        self
    }

    pub fn with_max_iters(mut self, max_iters: u64) -> Self {
        self.max_iters = max_iters;
        self
    }

    pub fn with_gamma(mut self, gamma: T) -> Self {
        self.gamma = gamma;
        self
    }
}
