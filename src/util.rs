use chrono::{DateTime, Datelike, Days, LocalResult, NaiveDate, NaiveTime, TimeZone};

const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Midnight of `t`'s wall-clock date, in `t`'s own zone.
///
/// When a zone skips midnight (a DST change at 00:00) the first instant
/// that exists on that date is returned instead.
pub fn truncate_to_day_start<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    start_of_date(&t.timezone(), t.date_naive()).unwrap_or_else(|| t.clone())
}

/// First existing instant of `date` in `tz`.
pub fn start_of_date<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Tz>> {
    let midnight = date.and_time(NaiveTime::MIN);
    // Gaps are at most a couple of hours wide; probe forward in half hours.
    (0..=8).find_map(|step| {
        let probe = midnight + chrono::Duration::minutes(30 * step);
        match tz.from_local_datetime(&probe) {
            LocalResult::Single(dt) => Some(dt),
            LocalResult::Ambiguous(earliest, _) => Some(earliest),
            LocalResult::None => None,
        }
    })
}

/// Sunday = 0 .. Saturday = 6.
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

/// The Sunday on or before `date`.
pub fn week_anchor(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(weekday_index(date) as u64))
        .unwrap_or(date)
}

pub fn month_abbrev(date: NaiveDate) -> &'static str {
    MONTH_ABBREVS[date.month0() as usize]
}
