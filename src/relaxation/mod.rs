pub mod lattice;
pub mod relax;
pub mod relaxation_options;

pub use lattice::*;
pub use relax::*;
pub use relaxation_options::*;
