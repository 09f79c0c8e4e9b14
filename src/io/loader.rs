//! Grid loader for header-less, comma-delimited text.
//!
//! One line per timestep, one column per spatial point. Empty cells read as
//! NaN. A file without a single row is rejected, since it would otherwise fix
//! an environment to a 0 x 0 shape.

use csv::{ReaderBuilder, Trim};
use ndarray::Array2;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::domain::{GridAxis, GridShape, ParameterGrid};
use crate::error::{ComfortError, Result};

pub fn load_grid(path: &Path) -> Result<ParameterGrid> {
    let file = File::open(path)?;
    let grid = read_grid(file)?;
    debug!(path = %path.display(), shape = %GridShape::of(&grid.view()), "grid loaded");
    Ok(grid)
}

/// Load a grid and require a declared shape.
pub fn load_grid_with_shape(path: &Path, expected: GridShape) -> Result<ParameterGrid> {
    let grid = load_grid(path)?;
    let found = GridShape::of(&grid.view());
    if found != expected {
        return Err(ComfortError::ShapeMismatch {
            name: path.display().to_string(),
            expected,
            found,
        });
    }
    Ok(grid)
}

pub fn read_grid<R: Read>(reader: R) -> Result<ParameterGrid> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut cells = Vec::new();
    let mut points: Option<usize> = None;
    let mut timesteps = 0;

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(timesteps + 1, |p| p.line() as usize);

        match points {
            None => points = Some(record.len()),
            Some(n) if n != record.len() => {
                return Err(ComfortError::Parse {
                    line,
                    reason: format!("expected {} columns, found {}", n, record.len()),
                });
            }
            Some(_) => {}
        }

        for field in record.iter() {
            let value = if field.is_empty() {
                f64::NAN
            } else {
                field.parse::<f64>().map_err(|e| ComfortError::Parse {
                    line,
                    reason: format!("'{field}': {e}"),
                })?
            };
            cells.push(value);
        }
        timesteps += 1;
    }

    if timesteps == 0 {
        return Err(ComfortError::EmptyGrid(GridAxis::Time.name()));
    }

    Array2::from_shape_vec((timesteps, points.unwrap_or(0)), cells).map_err(|e| ComfortError::Parse {
        line: timesteps,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_read_grid() {
        let text = "20.0, 21.0\n22.0,23.0\n24,25\n";
        let grid = read_grid(text.as_bytes()).unwrap();
        assert_eq!(grid, arr2(&[[20.0, 21.0], [22.0, 23.0], [24.0, 25.0]]));
    }

    #[test]
    fn test_empty_cell_is_nan() {
        let grid = read_grid("1.0,,3.0\n".as_bytes()).unwrap();
        assert_eq!(grid.dim(), (1, 3));
        assert!(grid[[0, 1]].is_nan());
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let err = read_grid("1,2,3\n4,5\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ComfortError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_non_numeric_cell_is_rejected() {
        let err = read_grid("1,2\n3,warm\n".as_bytes()).unwrap_err();
        match err {
            ComfortError::Parse { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("warm"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(read_grid("".as_bytes()), Err(ComfortError::EmptyGrid("time"))));
    }
}
