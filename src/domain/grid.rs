use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A time × point grid of one environmental parameter.
///
/// Row `t` holds every spatial point at timestep `t`; column `p` holds the
/// full time series of point `p`.
pub type ParameterGrid = Array2<f64>;

/// Dimensions shared by every grid in one environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    pub timesteps: usize,
    pub points: usize,
}

impl GridShape {
    pub fn new(timesteps: usize, points: usize) -> Self {
        Self { timesteps, points }
    }

    pub fn of<T>(grid: &ArrayView2<'_, T>) -> Self {
        let (timesteps, points) = grid.dim();
        Self { timesteps, points }
    }

    pub fn cells(&self) -> usize {
        self.timesteps * self.points
    }

    pub fn as_tuple(&self) -> (usize, usize) {
        (self.timesteps, self.points)
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} timesteps x {} points", self.timesteps, self.points)
    }
}

/// Named axes of a parameter grid.
///
/// Reductions always say which axis they collapse, so time and space are
/// never confused by a bare `Axis(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridAxis {
    Time,
    Point,
}

impl GridAxis {
    pub fn axis(self) -> Axis {
        match self {
            GridAxis::Time => Axis(0),
            GridAxis::Point => Axis(1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GridAxis::Time => "time",
            GridAxis::Point => "point",
        }
    }

    pub fn len_in(self, shape: GridShape) -> usize {
        match self {
            GridAxis::Time => shape.timesteps,
            GridAxis::Point => shape.points,
        }
    }
}
