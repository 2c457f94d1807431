//! Plain text reports.

use crate::{
    format_currency,
    report::{TripReport, format_date_short},
};

/// Render `report` as plain text.
///
/// Only categories with spending are listed. Each expense notes whether a
/// receipt is attached but the receipt itself is left out.
pub fn render_text(report: &TripReport) -> String {
    let trip = &report.trip;
    let comparison = &report.summary.budget_comparison;

    let remaining_label = if comparison.is_over_budget() {
        "Over budget"
    } else {
        "Remaining"
    };

    let mut lines = vec![
        "TRIP EXPENSE REPORT".to_owned(),
        String::new(),
        format!("Trip: {}", trip.name),
        format!(
            "Period: {} to {}",
            format_date_short(trip.start_date),
            format_date_short(trip.end_date)
        ),
        String::new(),
        "FINANCIAL SUMMARY".to_owned(),
        format!("Planned budget: {}", format_currency(trip.budget)),
        format!("Total spent: {}", format_currency(report.summary.total)),
        format!(
            "{remaining_label}: {}",
            format_currency(comparison.remaining.abs())
        ),
        String::new(),
        "EXPENSES BY CATEGORY".to_owned(),
    ];

    lines.extend(
        report
            .summary
            .by_category
            .iter()
            .filter(|(_, amount)| *amount > 0.0)
            .map(|(category, amount)| {
                format!("{}: {}", category.label(), format_currency(amount))
            }),
    );

    lines.push(String::new());
    lines.push(format!("EXPENSE DETAILS ({})", report.expenses.len()));
    lines.push(String::new());

    for (position, expense) in report.expenses.iter().enumerate() {
        let receipt = if expense.receipt.is_some() {
            "Receipt attached"
        } else {
            "No receipt"
        };

        lines.extend([
            format!("{}. {}", position + 1, expense.description),
            format!("   Category: {}", expense.category.label()),
            format!("   Date: {}", format_date_short(expense.date)),
            format!("   Amount: {}", format_currency(expense.amount)),
            format!("   {receipt}"),
            String::new(),
        ]);
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
