//! Six-month commit heatmap laid out as weekday rows by week columns.

use chrono::{Datelike, NaiveDate};

use crate::git::{CommitCountHistogram, last_six_months};

use super::IntensityTier;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Seven rows (Sunday first) by one column per week. Cells before the first
/// day or after today are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapGrid {
    rows: [Vec<Option<NaiveDate>>; 7],
}

impl HeatmapGrid {
    pub fn new(today: NaiveDate) -> Self {
        let days = last_six_months(today);
        let offset = days
            .first()
            .map(|d| d.weekday().num_days_from_sunday() as usize)
            .unwrap_or(0);
        let weeks = (offset + days.len()).div_ceil(7);

        let mut rows: [Vec<Option<NaiveDate>>; 7] = Default::default();
        for row in rows.iter_mut() {
            row.resize(weeks, None);
        }
        for (i, day) in days.into_iter().enumerate() {
            let slot = offset + i;
            rows[slot % 7][slot / 7] = Some(day);
        }

        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Option<NaiveDate>>; 7] {
        &self.rows
    }

    pub fn weeks(&self) -> usize {
        self.rows[0].len()
    }

    /// Tier for every cell, with `None` for padding cells.
    pub fn tiers(&self, histogram: &CommitCountHistogram) -> [Vec<Option<IntensityTier>>; 7] {
        self.rows.clone().map(|row| {
            row.into_iter()
                .map(|cell| cell.map(|d| IntensityTier::from_count(histogram.count(d))))
                .collect()
        })
    }
}
