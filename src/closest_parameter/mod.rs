pub mod closest_parameter_options;
pub mod surface_closest_parameter;
pub mod surface_closest_parameter_newton;
pub mod surface_closest_parameter_problem;
pub use closest_parameter_options::*;
pub use surface_closest_parameter::*;
pub use surface_closest_parameter_newton::*;
pub use surface_closest_parameter_problem::*;
