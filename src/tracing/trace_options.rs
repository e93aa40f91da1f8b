use crate::{field::CurvatureField, integrator::Integrator, misc::FloatingPoint};

/// Options for tracing a curvature line
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceOptions<T: FloatingPoint> {
    /// Length of each step, floored to the surface's absolute tolerance
    pub step_length: T,
    /// Rotation of the field about the surface normal in radians
    pub angle: T,
    pub field: CurvatureField,
    pub integrator: Integrator,
    /// Maximum number of points of a half trace
    pub max_points: usize,
    /// A step moving less than this in both parameters is stalled
    pub stall_tolerance: T,
}

impl<T: FloatingPoint> Default for TraceOptions<T> {
    fn default() -> Self {
        Self {
            step_length: T::from_literal(0.1),
            angle: T::zero(),
            field: CurvatureField::default(),
            integrator: Integrator::default(),
            max_points: 9999,
            stall_tolerance: T::from_literal(1e-12),
        }
    }
}

impl<T: FloatingPoint> TraceOptions<T> {
    pub fn with_step_length(mut self, step_length: T) -> Self {
        self.step_length = step_length;
        self
    }

    pub fn with_angle(mut self, angle: T) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_field(mut self, field: CurvatureField) -> Self {
        self.field = field;
        self
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    pub fn with_stall_tolerance(mut self, stall_tolerance: T) -> Self {
        self.stall_tolerance = stall_tolerance;
        self
    }
}
