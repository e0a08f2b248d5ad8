//! Month-by-month navigation over the commit-count histogram.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::git::CommitCountHistogram;

/// Which month is on screen and which day is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    /// First day of the month on screen.
    pub month_anchor: NaiveDate,
    /// Never later than today.
    pub selected: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarEvent {
    DayLeft,
    DayRight,
    WeekUp,
    WeekDown,
    PagePrev,
    PageNext,
    Quit,
}

/// Read-only calendar over an immutable histogram.
///
/// `today` is fixed at construction so reduction stays a pure function of
/// the state and the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionCalendar {
    histogram: CommitCountHistogram,
    today: NaiveDate,
    cursor: CalendarCursor,
    quit: bool,
}

impl ContributionCalendar {
    pub fn new(histogram: CommitCountHistogram, today: NaiveDate) -> Self {
        Self {
            histogram,
            today,
            cursor: CalendarCursor {
                month_anchor: first_of_month(today),
                selected: today,
            },
            quit: false,
        }
    }

    pub fn cursor(&self) -> CalendarCursor {
        self.cursor
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn histogram(&self) -> &CommitCountHistogram {
        &self.histogram
    }

    pub fn is_terminal(&self) -> bool {
        self.quit
    }

    pub fn selected_count(&self) -> u32 {
        self.histogram.count(self.cursor.selected)
    }

    pub fn reduce(mut self, event: CalendarEvent) -> Self {
        if self.quit {
            return self;
        }

        match event {
            CalendarEvent::DayLeft => self.move_back(Days::new(1)),
            CalendarEvent::DayRight => self.move_forward(Days::new(1)),
            CalendarEvent::WeekUp => self.move_back(Days::new(7)),
            CalendarEvent::WeekDown => self.move_forward(Days::new(7)),
            CalendarEvent::PagePrev => {
                if let Some(prev) = self.cursor.month_anchor.checked_sub_months(Months::new(1)) {
                    self.cursor = CalendarCursor {
                        month_anchor: prev,
                        selected: prev,
                    };
                }
            }
            CalendarEvent::PageNext => {
                if let Some(next) = self.cursor.month_anchor.checked_add_months(Months::new(1)) {
                    if next <= first_of_month(self.today) {
                        self.cursor = CalendarCursor {
                            month_anchor: next,
                            selected: next,
                        };
                    }
                }
            }
            CalendarEvent::Quit => self.quit = true,
        }

        self
    }

    pub fn reduce_all(self, events: impl IntoIterator<Item = CalendarEvent>) -> Self {
        events.into_iter().fold(self, |state, event| state.reduce(event))
    }

    fn move_back(&mut self, days: Days) {
        if let Some(date) = self.cursor.selected.checked_sub_days(days) {
            self.select(date);
        }
    }

    /// Forward moves that would pass today are ignored.
    fn move_forward(&mut self, days: Days) {
        if let Some(date) = self.cursor.selected.checked_add_days(days) {
            if date <= self.today {
                self.select(date);
            }
        }
    }

    fn select(&mut self, date: NaiveDate) {
        self.cursor.selected = date;
        let month = first_of_month(date);
        if month != self.cursor.month_anchor {
            self.cursor.month_anchor = month;
        }
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Weeks of the month starting at `anchor`, Sunday first. Cells outside the
/// month are `None`.
pub fn month_grid(anchor: NaiveDate) -> Vec<[Option<NaiveDate>; 7]> {
    let first = first_of_month(anchor);
    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut column = first.weekday().num_days_from_sunday() as usize;

    for day in first.iter_days().take_while(|d| d.month() == first.month()) {
        week[column] = Some(day);
        column += 1;
        if column == 7 {
            weeks.push(week);
            week = [None; 7];
            column = 0;
        }
    }
    if column > 0 {
        weeks.push(week);
    }

    weeks
}
