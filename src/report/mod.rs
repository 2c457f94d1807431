//! Human-readable exports of a trip and its expenses.
//!
//! A [TripReport] gathers a trip, its expenses (newest first) and their
//! [ExpenseSummary], and can be rendered as plain text, a standalone HTML
//! document, or CSV.

mod csv_export;
mod html;
mod text;

use serde::Serialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

pub use csv_export::render_csv;
pub use html::render_html;
pub use text::render_text;

use crate::{Error, Expense, ExpenseSummary, Trip, compute_summary};

/// The formats a report can be exported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// Plain text, suitable for pasting into a message.
    #[default]
    Text,
    /// A standalone HTML document with receipts inlined.
    Html,
    /// One CSV row per expense.
    Csv,
}

impl ReportFormat {
    /// The file extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Html => "html",
            ReportFormat::Csv => "csv",
        }
    }
}

/// Everything needed to render a report for one trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripReport {
    /// The trip being reported on.
    pub trip: Trip,
    /// The trip's expenses, newest first.
    pub expenses: Vec<Expense>,
    /// The totals for `expenses` against the trip's budget.
    pub summary: ExpenseSummary,
    /// The day the report was generated.
    pub generated_on: Date,
}

impl TripReport {
    /// Sort `expenses` newest first and summarize them against the trip's budget.
    pub fn new(trip: Trip, mut expenses: Vec<Expense>, generated_on: Date) -> Self {
        sort_newest_first(&mut expenses);
        let summary = compute_summary(&expenses, trip.budget);

        Self {
            trip,
            expenses,
            summary,
            generated_on,
        }
    }

    /// Render the report in `format`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Csv] if the CSV export fails. Text and HTML
    /// rendering cannot fail.
    pub fn render(&self, format: ReportFormat) -> Result<String, Error> {
        match format {
            ReportFormat::Text => Ok(render_text(self)),
            ReportFormat::Html => Ok(render_html(self).into_string()),
            ReportFormat::Csv => render_csv(&self.expenses),
        }
    }

    /// A file name for the report, e.g. "report-lisbon-2025.html".
    pub fn file_name(&self, format: ReportFormat) -> String {
        let slug: String = self
            .trip
            .name
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect();
        let slug = slug
            .split('-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-");

        format!("report-{slug}.{}", format.extension())
    }
}

/// Sort expenses by date, newest first. Expenses on the same day are ordered
/// by when they were recorded, newest first.
pub fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|left, right| {
        right
            .date
            .cmp(&left.date)
            .then_with(|| right.created_at.cmp(&left.created_at))
    });
}

const SHORT_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[day]/[month]/[year]");
const LONG_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day] [month repr:long] [year]");

/// Format a date as "dd/mm/yyyy".
pub fn format_date_short(date: Date) -> String {
    date.format(SHORT_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Format a date as e.g. "02 March 2025".
pub fn format_date_long(date: Date) -> String {
    date.format(LONG_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}
