use crate::model::{CalendarGrid, StatsOutput, WeekColumn, SCHEMA_VERSION};
use chrono::Utc;
use std::path::PathBuf;

pub fn stats_output(grid: &CalendarGrid, email: &str, repos: &[PathBuf]) -> StatsOutput {
    let weeks = (0..grid.week_count())
        .rev()
        .filter_map(|week_index| {
            grid.column(week_index).map(|days| WeekColumn {
                week_index,
                week_start: grid.week_start(week_index),
                days: *days,
            })
        })
        .collect();

    StatsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        email: email.to_string(),
        repositories: repos.iter().map(|p| p.to_string_lossy().to_string()).collect(),
        total_commits: grid.total(),
        weeks,
    }
}

pub fn output_json(grid: &CalendarGrid, email: &str, repos: &[PathBuf]) -> anyhow::Result<()> {
    let output = stats_output(grid, email, repos);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CommitCounts, DayOffset, WEEKS_IN_WINDOW};
    use crate::stats::grid::build_grid_for;
    use chrono::NaiveDate;

    #[test]
    fn weeks_are_listed_oldest_first() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut counts = CommitCounts::new();
        counts.record(DayOffset::Days(0));
        counts.record(DayOffset::Days(0));
        let grid = build_grid_for(&counts, today);

        let out = stats_output(&grid, "me@example.com", &[PathBuf::from("/r")]);
        assert_eq!(out.weeks.len(), WEEKS_IN_WINDOW + 1);
        assert_eq!(out.weeks[0].week_index, WEEKS_IN_WINDOW);
        let current = out.weeks.last().unwrap();
        assert_eq!(current.week_index, 0);
        assert_eq!(current.week_start, NaiveDate::from_ymd_opt(2024, 1, 14).unwrap());
        assert_eq!(current.days, [0, 2, 0, 0, 0, 0, 0]);
        assert_eq!(out.total_commits, 2);

        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["weeks"][WEEKS_IN_WINDOW]["week_start"], "2024-01-14");
        assert_eq!(json["repositories"][0], "/r");
    }
}
