use crate::model::{CalendarGrid, CommitCounts, WEEKS_IN_WINDOW};
use crate::util::{week_anchor, weekday_index};
use chrono::{DateTime, Days, NaiveDate, TimeZone};

/// Lays the per-day counts out as week columns anchored on Sundays.
///
/// Column 0 is the calendar week containing `now`; each further column is
/// one week older. Days whose week falls beyond the last column are dropped.
pub fn build_grid<Tz: TimeZone>(counts: &CommitCounts, now: &DateTime<Tz>) -> CalendarGrid {
    build_grid_for(counts, now.date_naive())
}

pub fn build_grid_for(counts: &CommitCounts, today: NaiveDate) -> CalendarGrid {
    let current_anchor = week_anchor(today);
    let mut grid = CalendarGrid::empty(current_anchor);

    for (offset, count) in counts.iter() {
        let Some(day) = today.checked_sub_days(Days::new(offset as u64)) else {
            continue;
        };
        let weeks = (current_anchor - week_anchor(day)).num_days() / 7;
        if !(0..=WEEKS_IN_WINDOW as i64).contains(&weeks) {
            continue;
        }
        grid.columns[weeks as usize][weekday_index(day)] = count;
    }

    grid
}
