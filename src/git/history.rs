//! Commit-count histogram built from `git log` dates.

use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};
use serde::Serialize;
use tracing::warn;

/// Date format used by `git log --date=short` and the histogram keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Commits per calendar day. Immutable once fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitCountHistogram {
    counts: BTreeMap<NaiveDate, u32>,
}

impl CommitCountHistogram {
    /// Parse `git log --pretty=format:%ad --date=short` output, one date per line.
    ///
    /// Lines that are not `YYYY-MM-DD` dates are skipped with a warning.
    pub fn from_log_output(output: &str) -> Self {
        let mut counts = BTreeMap::new();
        for line in output.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match NaiveDate::parse_from_str(line, DATE_FORMAT) {
                Ok(date) => *counts.entry(date).or_insert(0) += 1,
                Err(_) => warn!("Skipping unparseable log date '{}'", line),
            }
        }
        Self { counts }
    }

    /// Commits recorded on `date` (0 when absent).
    pub fn count(&self, date: NaiveDate) -> u32 {
        self.counts.get(&date).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(NaiveDate, u32)> for CommitCountHistogram {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, u32)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (date, count) in iter {
            *counts.entry(date).or_insert(0) += count;
        }
        Self { counts }
    }
}

/// Every day from six months before `today` through `today`, inclusive.
pub fn last_six_months(today: NaiveDate) -> Vec<NaiveDate> {
    let start = today
        .checked_sub_months(Months::new(6))
        .unwrap_or(NaiveDate::MIN);
    start.iter_days().take_while(|d| *d <= today).collect()
}
