//! Occupancy calendar for hourly annual series.
//!
//! The office calendar starts with one working day followed by 52 weeks of
//! five working days and two unoccupied weekend days. Working days are
//! occupied from 08:00 through the 17:00 hour.

use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: usize = 24;
pub const WORKING_DAYS_PER_WEEK: usize = 5;
pub const WEEKEND_DAYS_PER_WEEK: usize = 2;
pub const WEEKS_PER_YEAR: usize = 52;
/// First and last occupied hour of a working day, inclusive.
pub const OCCUPIED_HOURS: (usize, usize) = (8, 17);
pub const YEAR_HOURS: usize = HOURS_PER_DAY * (1 + WEEKS_PER_YEAR * (WORKING_DAYS_PER_WEEK + WEEKEND_DAYS_PER_WEEK));

/// A fixed hour-by-hour occupancy mask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancySchedule {
    mask: Vec<bool>,
}

impl OccupancySchedule {
    /// The standard office year of [`YEAR_HOURS`] hours.
    pub fn office_year() -> Self {
        let working_day: Vec<bool> = (0..HOURS_PER_DAY)
            .map(|h| (OCCUPIED_HOURS.0..=OCCUPIED_HOURS.1).contains(&h))
            .collect();
        let weekend_day = vec![false; HOURS_PER_DAY];

        let mut week = working_day.repeat(WORKING_DAYS_PER_WEEK);
        week.extend(weekend_day.repeat(WEEKEND_DAYS_PER_WEEK));

        let mut mask = working_day;
        mask.extend(week.repeat(WEEKS_PER_YEAR));
        Self { mask }
    }

    pub fn from_mask(mask: Vec<bool>) -> Self {
        Self { mask }
    }

    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    pub fn len(&self) -> usize {
        self.mask.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    pub fn occupied_hours(&self) -> usize {
        self.mask.iter().filter(|&&o| o).count()
    }

    /// Keep the entries at occupied hours, in order.
    ///
    /// The sequence is expected to cover the whole calendar. Entries past
    /// the end of the calendar are never selected. A shorter sequence trips a
    /// debug assertion; release builds silently truncate the output at the
    /// end of the sequence.
    pub fn filter<T: Clone>(&self, sequence: &[T]) -> Vec<T> {
        debug_assert!(
            sequence.len() >= self.mask.len(),
            "sequence of {} entries is shorter than the {}-hour calendar",
            sequence.len(),
            self.mask.len()
        );
        sequence
            .iter()
            .zip(&self.mask)
            .filter(|&(_, &occupied)| occupied)
            .map(|(v, _)| v.clone())
            .collect()
    }

    /// Keep the timesteps (rows) of a time × point grid at occupied hours.
    pub fn filter_rows(&self, grid: &ArrayView2<'_, f64>) -> Array2<f64> {
        let rows: Vec<usize> = (0..grid.nrows()).collect();
        let keep = self.filter(&rows);
        grid.select(Axis(0), &keep)
    }
}

impl Default for OccupancySchedule {
    fn default() -> Self {
        Self::office_year()
    }
}

/// Select the occupied hours of a full-year hourly sequence.
///
/// The input must hold at least [`YEAR_HOURS`] entries. Debug builds panic on
/// a shorter input; release builds return only the occupied hours that the
/// input reaches, so a short input comes back truncated.
pub fn filter_by_schedule<T: Clone>(sequence: &[T]) -> Vec<T> {
    OccupancySchedule::office_year().filter(sequence)
}
