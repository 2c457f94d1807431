//! CSV export of expenses.

use serde::Serialize;

use crate::{Error, Expense};

#[derive(Serialize)]
struct ExpenseRow<'a> {
    date: String,
    category: &'a str,
    description: &'a str,
    amount: String,
    has_receipt: bool,
}

/// Render `expenses` as CSV, one row per expense in the order given.
///
/// Dates are written as `YYYY-MM-DD` so spreadsheets sort them correctly.
///
/// The header is `date,category,description,amount,has_receipt`. Amounts
/// have two decimal places and no currency symbol.
///
/// # Errors
///
/// Returns an [Error::Csv] if a row cannot be written.
pub fn render_csv(expenses: &[Expense]) -> Result<String, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if expenses.is_empty() {
        writer.write_record(["date", "category", "description", "amount", "has_receipt"])?;
    }

    for expense in expenses {
        writer.serialize(ExpenseRow {
            date: expense.date.to_string(),
            category: expense.category.as_str(),
            description: &expense.description,
            amount: format!("{:.2}", expense.amount),
            has_receipt: expense.receipt.is_some(),
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::Csv(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::Csv(error.to_string()))
}
