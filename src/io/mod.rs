//! Boundary I/O: loading parameter grids and exporting results.

pub mod export;
pub mod loader;

pub use export::{export_grid, export_report, write_grid, ExportFormat};
pub use loader::{load_grid, load_grid_with_shape, read_grid};
