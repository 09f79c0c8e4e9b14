pub mod environment;
pub mod grid;

pub use environment::*;
pub use grid::*;
