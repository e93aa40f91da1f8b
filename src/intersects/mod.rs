pub mod circle_surface;

pub use circle_surface::*;
