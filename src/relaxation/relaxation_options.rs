use crate::misc::FloatingPoint;

/// Options for relaxing a lattice toward a target edge length
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelaxationOptions<T: FloatingPoint> {
    /// Target edge length `L`
    pub target_length: T,
    /// Edges shorter than this push their nodes apart
    pub min_length: T,
    /// Edges longer than this pull their nodes together
    pub max_length: T,
    pub max_iterations: usize,
    /// Converged once the largest correction falls below this
    pub tolerance: T,
    pub damping: T,
    pub relaxation: T,
    /// Weight of the projected position in the update, the rest stays at the previous one
    pub smoothing: T,
}

impl<T: FloatingPoint> Default for RelaxationOptions<T> {
    fn default() -> Self {
        Self::new(T::one(), T::from_literal(0.9), T::from_literal(1.1))
    }
}

impl<T: FloatingPoint> RelaxationOptions<T> {
    pub fn new(target_length: T, min_length: T, max_length: T) -> Self {
        Self {
            target_length,
            min_length,
            max_length,
            max_iterations: 100,
            tolerance: T::from_literal(1e-3),
            damping: T::from_literal(0.02),
            relaxation: T::from_literal(0.8),
            smoothing: T::from_literal(0.9),
        }
    }

    pub fn with_target_length(mut self, target_length: T) -> Self {
        self.target_length = target_length;
        self
    }

    pub fn with_length_bounds(mut self, min_length: T, max_length: T) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_damping(mut self, damping: T) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_relaxation(mut self, relaxation: T) -> Self {
        self.relaxation = relaxation;
        self
    }

    pub fn with_smoothing(mut self, smoothing: T) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub(crate) fn validate(&self) -> anyhow::Result<()> {
        let finite = [
            self.target_length,
            self.min_length,
            self.max_length,
            self.tolerance,
            self.damping,
            self.relaxation,
            self.smoothing,
        ];
        anyhow::ensure!(
            finite.iter().all(|v| v.is_finite()),
            "Relaxation options must be finite"
        );
        anyhow::ensure!(
            self.target_length > T::zero(),
            "Target length must be positive"
        );
        anyhow::ensure!(
            T::zero() <= self.min_length && self.min_length <= self.max_length,
            "Length bounds must satisfy 0 <= min <= max"
        );
        anyhow::ensure!(self.tolerance > T::zero(), "Tolerance must be positive");
        anyhow::ensure!(
            T::zero() <= self.smoothing && self.smoothing <= T::one(),
            "Smoothing must be in [0, 1]"
        );
        Ok(())
    }
}
