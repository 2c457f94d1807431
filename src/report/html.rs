//! Standalone HTML reports.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::{
    Expense, format_currency,
    report::{TripReport, format_date_long, format_date_short},
};

const BLUE: &str = "#1976d2";
const GREEN: &str = "#4caf50";
const RED: &str = "#f44336";

/// Render `report` as a complete HTML document that can be saved and opened
/// in a browser. Receipt images are embedded in the page.
pub fn render_html(report: &TripReport) -> Markup {
    let trip = &report.trip;
    let comparison = &report.summary.budget_comparison;

    let (spent_color, remaining_label, remaining_color) = if comparison.is_over_budget() {
        (RED, "Over Budget", RED)
    } else {
        (BLUE, "Remaining", GREEN)
    };

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Expense Report - " (trip.name) }
                style { (stylesheet()) }
            }
            body {
                div class="container" {
                    h1 { "📊 Trip Expense Report" }

                    div class="trip-info" {
                        p { strong { "Trip: " } (trip.name) }
                        p {
                            strong { "Period: " }
                            (format_date_short(trip.start_date)) " to " (format_date_short(trip.end_date))
                        }
                        @if let Some(description) = &trip.description {
                            p { strong { "Description: " } (description) }
                        }
                        p { strong { "Generated on: " } (format_date_long(report.generated_on)) }
                    }

                    h2 { "💰 Financial Summary" }
                    div class="summary" {
                        div class="summary-item" {
                            span class="summary-label" { "Planned Budget" }
                            span class="summary-value" { (format_currency(trip.budget)) }
                        }
                        div class="summary-item" {
                            span class="summary-label" { "Total Spent" }
                            span class="summary-value" style={ "color: " (spent_color) ";" } {
                                (format_currency(report.summary.total))
                            }
                        }
                        div class="summary-item" {
                            span class="summary-label" { (remaining_label) }
                            span class="summary-value" style={ "color: " (remaining_color) ";" } {
                                (format_currency(comparison.remaining.abs()))
                            }
                        }
                    }

                    h2 { "📈 Expenses by Category" }
                    div class="category-list" {
                        @for (category, amount) in report.summary.categories_by_amount() {
                            div class="category-item" {
                                span { (category.icon()) " " (category.label()) }
                                strong { (format_currency(amount)) }
                            }
                        }
                    }

                    h2 { "📋 Expense Details (" (report.expenses.len()) ")" }
                    div class="expense-list" {
                        @for expense in &report.expenses {
                            (expense_item(expense))
                        }
                    }
                }
            }
        }
    }
}

fn expense_item(expense: &Expense) -> Markup {
    html! {
        div class="expense-item" {
            div class="expense-header" {
                span class="expense-description" {
                    (expense.category.icon()) " " (expense.description)
                }
                span class="expense-amount" { (format_currency(expense.amount)) }
            }
            div class="expense-meta" {
                span { "Category: " (expense.category.label()) }
                " • "
                span { "Date: " (format_date_short(expense.date)) }
            }
            @if let Some(receipt) = &expense.receipt {
                span class="receipt-indicator" { "📎 Receipt attached" }
                br;
                img src=(receipt) class="receipt-img" alt="Receipt";
            }
        }
    }
}

fn stylesheet() -> PreEscaped<String> {
    PreEscaped(format!(
        r#"
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; padding: 20px; background: #f5f5f5; color: #333; }}
        .container {{ max-width: 800px; margin: 0 auto; background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }}
        h1 {{ color: {BLUE}; margin-bottom: 10px; font-size: 28px; }}
        h2 {{ color: #424242; margin-top: 30px; margin-bottom: 15px; font-size: 20px; border-bottom: 2px solid {BLUE}; padding-bottom: 8px; }}
        .trip-info {{ background: #f5f5f5; padding: 15px; border-radius: 6px; margin: 20px 0; }}
        .trip-info p {{ margin: 8px 0; }}
        .summary {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px; margin: 20px 0; }}
        .summary-item {{ background: #e3f2fd; padding: 15px; border-radius: 6px; text-align: center; }}
        .summary-label {{ display: block; font-size: 14px; color: #666; margin-bottom: 5px; }}
        .summary-value {{ display: block; font-size: 24px; font-weight: bold; color: {BLUE}; }}
        .category-list {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(250px, 1fr)); gap: 10px; margin: 15px 0; }}
        .category-item {{ background: #f5f5f5; padding: 12px; border-radius: 6px; display: flex; justify-content: space-between; align-items: center; }}
        .expense-list {{ margin: 20px 0; }}
        .expense-item {{ background: #fafafa; padding: 15px; border-radius: 6px; margin-bottom: 10px; border-left: 4px solid {BLUE}; }}
        .expense-header {{ display: flex; justify-content: space-between; align-items: center; margin-bottom: 8px; }}
        .expense-description {{ font-weight: 600; font-size: 16px; }}
        .expense-amount {{ font-size: 18px; font-weight: bold; color: {BLUE}; }}
        .expense-meta {{ font-size: 14px; color: #666; }}
        .receipt-indicator {{ display: inline-block; background: {GREEN}; color: white; padding: 2px 8px; border-radius: 4px; font-size: 12px; margin-top: 5px; }}
        .receipt-img {{ max-width: 100%; margin-top: 10px; border-radius: 6px; border: 2px solid #e0e0e0; }}
        @media print {{ body {{ background: white; }} .container {{ box-shadow: none; }} }}
        "#
    ))
}
