#![allow(clippy::needless_range_loop)]

mod closest_parameter;
mod compass;
mod field;
mod integrator;
mod intersects;
mod marching;
mod misc;
mod relaxation;
mod surface;
mod tracing;

#[cfg(test)]
mod fixtures;

pub mod prelude {
    pub use crate::closest_parameter::{find_surface_closest_parameter, ClosestParameterOptions};
    pub use crate::compass::*;
    pub use crate::field::*;
    pub use crate::integrator::*;
    pub use crate::intersects::{find_circle_surface_intersections, CircleIntersectionOptions};
    pub use crate::marching::*;
    pub use crate::misc::*;
    pub use crate::relaxation::*;
    pub use crate::surface::*;
    pub use crate::tracing::*;
}
