pub mod curvature_line;
pub mod trace_line;
pub mod trace_options;

pub use curvature_line::*;
pub use trace_line::*;
pub use trace_options::*;
