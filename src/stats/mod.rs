//! Commit-history views: the interactive calendar and the static heatmap.

pub mod calendar;
pub mod heatmap;

pub use calendar::{CalendarCursor, CalendarEvent, ContributionCalendar, first_of_month, month_grid};
pub use heatmap::HeatmapGrid;

/// Display bucket for a day's commit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IntensityTier {
    None,
    Low,
    Medium,
    High,
    VeryHigh,
    Exceptional,
}

impl IntensityTier {
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => IntensityTier::None,
            1..=2 => IntensityTier::Low,
            3..=5 => IntensityTier::Medium,
            6..=10 => IntensityTier::High,
            11..=15 => IntensityTier::VeryHigh,
            _ => IntensityTier::Exceptional,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(IntensityTier::from_count(0), IntensityTier::None);
        assert_eq!(IntensityTier::from_count(2), IntensityTier::Low);
        assert_eq!(IntensityTier::from_count(3), IntensityTier::Medium);
        assert_eq!(IntensityTier::from_count(10), IntensityTier::High);
        assert_eq!(IntensityTier::from_count(15), IntensityTier::VeryHigh);
        assert_eq!(IntensityTier::from_count(16), IntensityTier::Exceptional);
        assert_eq!(IntensityTier::from_count(u32::MAX), IntensityTier::Exceptional);
    }

    #[test]
    fn test_tier_is_monotonic() {
        for count in 0..40 {
            assert!(IntensityTier::from_count(count) <= IntensityTier::from_count(count + 1));
        }
    }
}
