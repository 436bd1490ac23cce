use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// Six months expressed in days.
pub const DAYS_IN_WINDOW: usize = 183;
/// Number of full weeks before the current one that the calendar shows.
pub const WEEKS_IN_WINDOW: usize = 26;
pub const DAYS_IN_WEEK: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub author_email: String,
    pub authored_at: DateTime<FixedOffset>,
}

/// Calendar days between a commit's day and today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOffset {
    Days(usize),
    OutOfRange,
}

impl DayOffset {
    pub fn days(self) -> Option<usize> {
        match self {
            DayOffset::Days(d) => Some(d),
            DayOffset::OutOfRange => None,
        }
    }
}

/// Commit counts indexed by day offset. Every offset in the window is
/// always present; a day without commits holds zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitCounts {
    counts: [u32; DAYS_IN_WINDOW + 1],
}

impl CommitCounts {
    pub fn new() -> Self {
        Self {
            counts: [0; DAYS_IN_WINDOW + 1],
        }
    }

    pub fn record(&mut self, offset: DayOffset) {
        if let Some(slot) = offset.days().and_then(|d| self.counts.get_mut(d)) {
            *slot += 1;
        }
    }

    pub fn get(&self, days: usize) -> u32 {
        self.counts.get(days).copied().unwrap_or(0)
    }

    /// Sums `other` into `self`, for maps accumulated per repository.
    pub fn merge(&mut self, other: &CommitCounts) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// `(offset, count)` pairs, newest day first.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.counts.iter().copied().enumerate()
    }
}

impl Default for CommitCounts {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub week_index: usize,
    pub weekday_index: usize,
    pub count: u32,
}

/// Week-major commit grid. Column 0 is the week containing today; the
/// weekday index follows Sunday = 0 .. Saturday = 6.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    pub(crate) columns: [[u32; DAYS_IN_WEEK]; WEEKS_IN_WINDOW + 1],
    pub(crate) current_week_start: NaiveDate,
}

impl CalendarGrid {
    pub fn empty(current_week_start: NaiveDate) -> Self {
        Self {
            columns: [[0; DAYS_IN_WEEK]; WEEKS_IN_WINDOW + 1],
            current_week_start,
        }
    }

    pub fn column(&self, week_index: usize) -> Option<&[u32; DAYS_IN_WEEK]> {
        self.columns.get(week_index)
    }

    pub fn count(&self, week_index: usize, weekday_index: usize) -> u32 {
        self.columns
            .get(week_index)
            .and_then(|col| col.get(weekday_index))
            .copied()
            .unwrap_or(0)
    }

    pub fn week_count(&self) -> usize {
        self.columns.len()
    }

    /// Sunday that starts the column `week_index` weeks before the current one.
    pub fn week_start(&self, week_index: usize) -> NaiveDate {
        self.current_week_start - chrono::Duration::weeks(week_index as i64)
    }

    pub fn cells(&self) -> impl Iterator<Item = CalendarCell> + '_ {
        self.columns.iter().enumerate().flat_map(|(week_index, col)| {
            col.iter()
                .enumerate()
                .map(move |(weekday_index, &count)| CalendarCell {
                    week_index,
                    weekday_index,
                    count,
                })
        })
    }

    pub fn total(&self) -> u64 {
        self.cells().map(|c| c.count as u64).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekColumn {
    pub week_index: usize,
    pub week_start: NaiveDate,
    pub days: [u32; DAYS_IN_WEEK],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub email: String,
    pub repositories: Vec<String>,
    pub total_commits: u64,
    pub weeks: Vec<WeekColumn>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_start_zeroed_for_every_offset() {
        let counts = CommitCounts::new();
        assert_eq!(counts.iter().count(), DAYS_IN_WINDOW + 1);
        assert!(counts.iter().all(|(_, c)| c == 0));
    }

    #[test]
    fn out_of_range_is_never_recorded() {
        let mut counts = CommitCounts::new();
        counts.record(DayOffset::OutOfRange);
        counts.record(DayOffset::Days(DAYS_IN_WINDOW + 1));
        assert_eq!(counts.total(), 0);

        counts.record(DayOffset::Days(DAYS_IN_WINDOW));
        assert_eq!(counts.get(DAYS_IN_WINDOW), 1);
    }

    #[test]
    fn merge_sums_partitioned_maps() {
        let mut a = CommitCounts::new();
        let mut b = CommitCounts::new();
        a.record(DayOffset::Days(3));
        b.record(DayOffset::Days(3));
        b.record(DayOffset::Days(10));

        a.merge(&b);
        assert_eq!(a.get(3), 2);
        assert_eq!(a.get(10), 1);
        assert_eq!(a.total(), 3);
    }
}
