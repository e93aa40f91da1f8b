pub mod circle_surface_intersection_newton;
pub mod circle_surface_intersection_options;
pub mod circle_surface_intersection_problem;
pub mod intersection_circle_surface;

use nalgebra::Vector3;
pub use circle_surface_intersection_newton::*;
pub use circle_surface_intersection_options::*;
pub use circle_surface_intersection_problem::*;
pub use intersection_circle_surface::*;

/// `(t, u, v)`: circle angle followed by the surface parameters
pub type CircleSurfaceParam<T> = Vector3<T>;
