use crate::model::{CalendarGrid, DAYS_IN_WEEK};
use crate::util::{month_abbrev, weekday_index};
use chrono::NaiveDate;
use std::io::{self, Write};

const RESET: &str = "\x1b[0m";
const CELL_WIDTH: usize = 4;
const GUTTER: &str = "     ";
const DAY_LABELS: [&str; DAYS_IN_WEEK] = [" Sun ", " Mon ", " Tue ", " Wed ", " Thu ", " Fri ", " Sat "];

/// Colour band a cell is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Today,
    Empty,
    Low,
    Medium,
    High,
    Max,
}

impl Band {
    pub fn for_count(count: u32) -> Self {
        match count {
            0 => Band::Empty,
            1..=4 => Band::Low,
            5..=9 => Band::Medium,
            10..=14 => Band::High,
            _ => Band::Max,
        }
    }

    /// Raw 256-colour escape for the band. These are written as-is with no
    /// terminal capability check, so output is byte-identical everywhere.
    pub fn escape(self) -> &'static str {
        match self {
            Band::Today => "\x1b[1;37;45m",
            Band::Empty => "\x1b[0;37;30m",
            Band::Low => "\x1b[38;5;17;48;5;153m",
            Band::Medium => "\x1b[38;5;17;48;5;75m",
            Band::High => "\x1b[38;5;18;48;5;33m",
            Band::Max => "\x1b[38;5;17;104m",
        }
    }
}

/// Band and fixed-width text for one cell.
pub fn cell_style(count: u32, is_today: bool) -> (Band, String) {
    let band = if is_today {
        Band::Today
    } else {
        Band::for_count(count)
    };
    let text = match count {
        0 => format!("{:<width$}", " - ", width = CELL_WIDTH),
        1..=999 => format!("{count:>3} "),
        _ => "999+".to_string(),
    };
    (band, text)
}

pub fn day_label(weekday: usize) -> &'static str {
    DAY_LABELS.get(weekday).copied().unwrap_or(GUTTER)
}

/// Month labels over each column, oldest column first.
///
/// A label is printed for the oldest column and wherever a column's Sunday
/// falls in a different month from the column before it.
pub fn month_header(grid: &CalendarGrid) -> String {
    let mut line = String::from(GUTTER);
    let mut previous = None;

    for week in (0..grid.week_count()).rev() {
        let month = month_abbrev(grid.week_start(week));
        if previous != Some(month) {
            line.push_str(&format!("{month:<width$}", width = CELL_WIDTH));
        } else {
            line.push_str(&" ".repeat(CELL_WIDTH));
        }
        previous = Some(month);
    }

    line
}

pub fn render_to<W: Write>(grid: &CalendarGrid, today: NaiveDate, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", month_header(grid))?;
    let today_weekday = weekday_index(today);

    for weekday in 0..DAYS_IN_WEEK {
        write!(out, "{}", day_label(weekday))?;
        for week in (0..grid.week_count()).rev() {
            let is_today = week == 0 && weekday == today_weekday;
            let (band, text) = cell_style(grid.count(week, weekday), is_today);
            write!(out, "{}{}{}", band.escape(), text, RESET)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

pub fn render(grid: &CalendarGrid, today: NaiveDate) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_to(grid, today, &mut out)?;
    out.flush()
}
