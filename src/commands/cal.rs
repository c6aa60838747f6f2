use crate::command::{Command, CommandResult, Flow};
use crate::context::TerminalContext;
use crate::error::ShellError;
use chrono::{Datelike, Local, Months, NaiveDate};

/// cal [[MONTH] YEAR]
/// Print a month or a whole year, weeks starting on Monday.
pub struct CalCommand;

const MONTH_WIDTH: usize = 20;
const MONTH_GAP: usize = 6;
const WEEK_HEADER: &str = "Mo Tu We Th Fr Sa Su";
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CalView {
    Month { year: i32, month: u32 },
    Year(i32),
}

impl Command for CalCommand {
    fn execute(&self, args: &[String], _ctx: &mut TerminalContext) -> CommandResult {
        let view = parse_view(args, Local::now().year())?;
        let text = match view {
            CalView::Month { year, month } => format_month(first_of_month(year, month)?),
            CalView::Year(year) => format_year(year)?,
        };
        Ok(Flow::Continue(text))
    }
}

fn parse_number(arg: &str) -> Result<i32, ShellError> {
    arg.parse::<i32>()
        .map_err(|_| ShellError::argument("cal", format!("not a number: {}", arg)))
}

fn check_year(year: i32) -> Result<i32, ShellError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(ShellError::argument("cal", format!("year {} not in range {}..{}", year, MIN_YEAR, MAX_YEAR)))
    }
}

// a lone number is a month when it fits 1-12, otherwise a year
fn parse_view(args: &[String], current_year: i32) -> Result<CalView, ShellError> {
    match args {
        [] => Ok(CalView::Year(current_year)),
        [single] => {
            let n = parse_number(single)?;
            if (1..=12).contains(&n) {
                Ok(CalView::Month { year: current_year, month: n as u32 })
            } else {
                Ok(CalView::Year(check_year(n)?))
            }
        }
        [month, year] => {
            let month = parse_number(month)?;
            let year = parse_number(year)?;
            if !(1..=12).contains(&month) {
                return Err(ShellError::argument("cal", format!("{} is neither a month number (1..12) nor a name", month)));
            }
            Ok(CalView::Month { year: check_year(year)?, month: month as u32 })
        }
        _ => Err(ShellError::argument("cal", "too many arguments")),
    }
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, ShellError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ShellError::argument("cal", format!("invalid date {}-{}", year, month)))
}

fn days_in_month(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

// every line padded to MONTH_WIDTH so blocks can sit side by side
fn month_block(first: NaiveDate, with_year: bool) -> Vec<String> {
    let title = if with_year {
        format!("{} {}", first.format("%B"), first.year())
    } else {
        first.format("%B").to_string()
    };
    let mut lines = vec![format!("{:^w$}", title, w = MONTH_WIDTH), WEEK_HEADER.to_string()];

    let offset = first.weekday().num_days_from_monday() as usize;
    let mut cells = vec!["  ".to_string(); offset];
    cells.extend((1..=days_in_month(first)).map(|day| format!("{:>2}", day)));
    for week in cells.chunks(7) {
        lines.push(format!("{:<w$}", week.join(" "), w = MONTH_WIDTH));
    }
    lines
}

fn format_month(first: NaiveDate) -> String {
    let mut out = String::new();
    for line in month_block(first, true) {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn format_year(year: i32) -> Result<String, ShellError> {
    let width = 3 * MONTH_WIDTH + 2 * MONTH_GAP;
    let blank = " ".repeat(MONTH_WIDTH);
    let gap = " ".repeat(MONTH_GAP);

    let mut out = format!("{:^w$}", year, w = width).trim_end().to_string();
    out.push('\n');
    for quarter in 0..4u32 {
        let blocks = (1..=3u32)
            .map(|i| first_of_month(year, quarter * 3 + i).map(|first| month_block(first, false)))
            .collect::<Result<Vec<_>, _>>()?;
        let height = blocks.iter().map(Vec::len).max().unwrap_or(0);
        out.push('\n');
        for row in 0..height {
            let line = blocks
                .iter()
                .map(|block| block.get(row).unwrap_or(&blank).as_str())
                .collect::<Vec<_>>()
                .join(&gap);
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
    Ok(out)
}
