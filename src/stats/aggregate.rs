use crate::model::{CommitCounts, CommitRecord, DayOffset, DAYS_IN_WINDOW};
use crate::util::{start_of_date, truncate_to_day_start};
use chrono::{DateTime, TimeZone};

/// Calendar days between the day `authored` falls on and the day `now`
/// falls on, each in its own zone.
///
/// The distance is walked one calendar day at a time so days that are
/// shorter or longer than 24h (DST changes) still count as one day.
/// Commits dated today or later land on offset 0.
pub fn day_offset<Tz, Nz>(authored: &DateTime<Tz>, now: &DateTime<Nz>) -> DayOffset
where
    Tz: TimeZone,
    Nz: TimeZone,
{
    let today = truncate_to_day_start(now);
    let zone = authored.timezone();
    let mut day = truncate_to_day_start(authored);
    let mut days = 0;

    while day < today {
        let next = day
            .date_naive()
            .succ_opt()
            .and_then(|date| start_of_date(&zone, date));
        day = match next {
            Some(next) => next,
            None => return DayOffset::OutOfRange,
        };
        days += 1;
        if days > DAYS_IN_WINDOW {
            return DayOffset::OutOfRange;
        }
    }

    DayOffset::Days(days)
}

/// Records a single commit if it was authored by `email` inside the window.
pub fn count_commit<Tz: TimeZone>(
    counts: &mut CommitCounts,
    email: &str,
    commit: &CommitRecord,
    now: &DateTime<Tz>,
) -> bool {
    if commit.author_email != email {
        return false;
    }
    let offset = day_offset(&commit.authored_at, now);
    counts.record(offset);
    offset != DayOffset::OutOfRange
}

/// Adds every commit by `email` inside the window to `counts`.
/// Returns the number of commits that were counted.
pub fn aggregate_into<I, Tz>(
    counts: &mut CommitCounts,
    email: &str,
    commits: I,
    now: &DateTime<Tz>,
) -> usize
where
    I: IntoIterator<Item = CommitRecord>,
    Tz: TimeZone,
{
    commits
        .into_iter()
        .filter(|commit| count_commit(counts, email, commit, now))
        .count()
}

pub fn aggregate<I, Tz>(email: &str, commits: I, now: &DateTime<Tz>) -> CommitCounts
where
    I: IntoIterator<Item = CommitRecord>,
    Tz: TimeZone,
{
    let mut counts = CommitCounts::new();
    aggregate_into(&mut counts, email, commits, now);
    counts
}
