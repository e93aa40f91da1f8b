pub mod circle;
pub mod floating_point;
pub mod interval;
pub mod trigonometry;

pub use circle::*;
pub use floating_point::*;
pub use interval::*;
pub use trigonometry::*;
