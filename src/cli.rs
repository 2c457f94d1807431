//! The command line front end.
//!
//! [Args] is parsed by the `trip_ledger` binary and [run] carries out the
//! chosen [Command] against a pair of stores, writing its output to any
//! [Write]r so the commands can be tested without a terminal.
//!
//! Input is validated here rather than in the stores: names and descriptions
//! must not be empty, amounts must not be negative, trips must not end before
//! they start, and expenses can only be added to trips that exist.

use std::{io::Write, path::PathBuf, str::FromStr};

use clap::{Parser, Subcommand};
use serde::Serialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    BudgetComparison, BudgetStatus, Database, Error, Expense, ExpenseCategory, ExpenseId,
    ExpenseSummary, Trip, TripId, TripStatus, compute_summary, format_currency,
    report::{ReportFormat, TripReport, format_date_short, sort_newest_first},
    stores::{ExpenseIndex, ExpenseStore, TripIndex, TripStore},
};

/// Track travel budgets and expenses.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// File path to the SQLite database.
    #[arg(long, env = "TRIP_LEDGER_DB", default_value_os_t = Database::default_path())]
    pub db_path: PathBuf,

    /// The command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// The top level commands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create, edit and inspect trips.
    #[command(subcommand)]
    Trip(TripCommand),

    /// Record and edit expenses.
    #[command(subcommand)]
    Expense(ExpenseCommand),

    /// Export a trip and its expenses.
    Report {
        /// The ID of the trip to report on.
        trip_id: TripId,

        /// The format to export the report in.
        #[arg(long, value_enum, default_value_t)]
        format: ReportFormat,

        /// Write the report to this file instead of stdout. If this is a
        /// directory, the report is saved there under a generated name.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// The trip commands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum TripCommand {
    /// Create a trip and print its ID.
    Add {
        /// The trip's name, e.g. "Lisbon".
        #[arg(long)]
        name: String,

        /// The first day of the trip, YYYY-MM-DD.
        #[arg(long, value_parser = parse_date_arg)]
        start: Date,

        /// The last day of the trip, YYYY-MM-DD.
        #[arg(long, value_parser = parse_date_arg)]
        end: Date,

        /// How much you plan to spend.
        #[arg(long, allow_negative_numbers = true)]
        budget: f64,

        /// Notes about the trip.
        #[arg(long)]
        description: Option<String>,
    },

    /// Change some of a trip's details. Unset options keep their value.
    Edit {
        /// The ID of the trip to edit.
        id: TripId,

        /// The new name.
        #[arg(long)]
        name: Option<String>,

        /// The new first day, YYYY-MM-DD.
        #[arg(long, value_parser = parse_date_arg)]
        start: Option<Date>,

        /// The new last day, YYYY-MM-DD.
        #[arg(long, value_parser = parse_date_arg)]
        end: Option<Date>,

        /// The new budget.
        #[arg(long, allow_negative_numbers = true)]
        budget: Option<f64>,

        /// The new description, pass an empty string to remove it.
        #[arg(long)]
        description: Option<String>,
    },

    /// Mark an active trip as completed, or reopen a completed trip.
    ToggleStatus {
        /// The ID of the trip.
        id: TripId,
    },

    /// List trips, most recently created first.
    List {
        /// Only list trips with this status: active or completed.
        #[arg(long, value_parser = parse_arg::<TripStatus>)]
        status: Option<TripStatus>,
    },

    /// Show a trip, its budget summary and its expenses.
    Show {
        /// The ID of the trip.
        id: TripId,

        /// Print the trip, summary and expenses as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Delete a trip and all of its expenses.
    Delete {
        /// The ID of the trip.
        id: TripId,
    },
}

/// The expense commands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ExpenseCommand {
    /// Record an expense against a trip and print its ID.
    Add {
        /// The ID of the trip the expense belongs to.
        trip_id: TripId,

        /// The day of the expense, YYYY-MM-DD.
        #[arg(long, value_parser = parse_date_arg)]
        date: Date,

        /// One of food, accommodation, transportation, entertainment,
        /// shopping or other.
        #[arg(long, value_parser = parse_arg::<ExpenseCategory>)]
        category: ExpenseCategory,

        /// How much was spent.
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,

        /// What the money was spent on.
        #[arg(long)]
        description: String,

        /// An encoded receipt image, e.g. a `data:` URL.
        #[arg(long)]
        receipt: Option<String>,
    },

    /// Change some of an expense's details. Unset options keep their value.
    Edit {
        /// The ID of the expense to edit.
        id: ExpenseId,

        /// The new date, YYYY-MM-DD.
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<Date>,

        /// The new category.
        #[arg(long, value_parser = parse_arg::<ExpenseCategory>)]
        category: Option<ExpenseCategory>,

        /// The new amount.
        #[arg(long, allow_negative_numbers = true)]
        amount: Option<f64>,

        /// The new description.
        #[arg(long)]
        description: Option<String>,

        /// The new receipt, pass an empty string to remove it.
        #[arg(long)]
        receipt: Option<String>,
    },

    /// Delete an expense.
    Delete {
        /// The ID of the expense.
        id: ExpenseId,
    },
}

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns an [Error::InvalidDate] if `value` is not a valid date in that format.
pub fn parse_date(value: &str) -> Result<Date, Error> {
    Date::parse(value.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate(value.to_owned()))
}

fn parse_date_arg(value: &str) -> Result<Date, String> {
    parse_date(value).map_err(|error| error.to_string())
}

fn parse_arg<T>(value: &str) -> Result<T, String>
where
    T: FromStr<Err = Error>,
{
    value.parse().map_err(|error: Error| error.to_string())
}

/// Carry out `command`, writing anything meant for the user to `out`.
///
/// `today` is used as the generation date of reports.
///
/// # Errors
///
/// Returns an:
/// - [Error::TripNotFound] or [Error::ExpenseNotFound] if an ID does not
///   match a stored record,
/// - a validation error if new or edited details are invalid, see
///   [Trip::validate] and [Expense::validate],
/// - [Error::Io] if the output cannot be written,
/// - any error from the stores.
pub fn run<T, E>(
    command: Command,
    trips: &T,
    expenses: &E,
    today: Date,
    out: &mut impl Write,
) -> Result<(), Error>
where
    T: TripStore,
    E: ExpenseStore,
{
    match command {
        Command::Trip(command) => run_trip_command(command, trips, expenses, out),
        Command::Expense(command) => run_expense_command(command, trips, expenses, out),
        Command::Report {
            trip_id,
            format,
            output,
        } => {
            let trip = get_trip(trips, &trip_id)?;
            let trip_expenses = expenses.get_all_by_index(ExpenseIndex::ByTrip(trip_id))?;
            let report = TripReport::new(trip, trip_expenses, today);
            let content = report.render(format)?;

            match output {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(report.file_name(format))
                    } else {
                        path
                    };

                    std::fs::write(&path, content)?;
                    tracing::info!("Saved report to {}", path.display());
                    writeln!(out, "Saved report to {}", path.display())?;
                }
                None => write!(out, "{content}")?,
            }

            Ok(())
        }
    }
}

fn run_trip_command<T, E>(
    command: TripCommand,
    trips: &T,
    expenses: &E,
    out: &mut impl Write,
) -> Result<(), Error>
where
    T: TripStore,
    E: ExpenseStore,
{
    match command {
        TripCommand::Add {
            name,
            start,
            end,
            budget,
            description,
        } => {
            let trip = Trip::build(&name, start, end, budget)
                .description(description.as_deref())
                .finalize()?;

            trips.add(&trip)?;
            tracing::info!("Created trip {}", trip.id);
            writeln!(out, "{}", trip.id)?;
        }
        TripCommand::Edit {
            id,
            name,
            start,
            end,
            budget,
            description,
        } => {
            let trip = get_trip(trips, &id)?;

            let edited = Trip::build(
                name.as_deref().unwrap_or(&trip.name),
                start.unwrap_or(trip.start_date),
                end.unwrap_or(trip.end_date),
                budget.unwrap_or(trip.budget),
            )
            .description(description.as_deref().or(trip.description.as_deref()))
            .status(trip.status)
            .finalize_with(trip.id, trip.created_at)?;

            trips.put(&edited)?;
            writeln!(out, "Updated trip \"{}\"", edited.name)?;
        }
        TripCommand::ToggleStatus { id } => {
            let mut trip = get_trip(trips, &id)?;
            trip.status = trip.status.toggled();

            trips.put(&trip)?;
            writeln!(out, "Trip \"{}\" is now {}", trip.name, trip.status)?;
        }
        TripCommand::List { status } => {
            let mut listed = match status {
                Some(status) => trips.get_all_by_index(TripIndex::ByStatus(status))?,
                None => trips.get_all()?,
            };
            listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));

            if listed.is_empty() {
                writeln!(out, "No trips yet.")?;
            }

            for trip in listed {
                let trip_expenses =
                    expenses.get_all_by_index(ExpenseIndex::ByTrip(trip.id.clone()))?;
                let summary = compute_summary(&trip_expenses, trip.budget);
                write_trip_card(out, &trip, &summary)?;
            }
        }
        TripCommand::Show { id, json } => {
            let trip = get_trip(trips, &id)?;
            let mut trip_expenses = expenses.get_all_by_index(ExpenseIndex::ByTrip(id))?;
            sort_newest_first(&mut trip_expenses);
            let summary = compute_summary(&trip_expenses, trip.budget);

            if json {
                let details = TripDetails {
                    trip: &trip,
                    summary: &summary,
                    expenses: &trip_expenses,
                };
                let json = serde_json::to_string_pretty(&details)
                    .map_err(|error| Error::JSONSerializationError(error.to_string()))?;
                writeln!(out, "{json}")?;
            } else {
                write_trip_details(out, &trip, &summary, &trip_expenses)?;
            }
        }
        TripCommand::Delete { id } => {
            let trip = get_trip(trips, &id)?;

            trips.delete(&trip.id)?;
            tracing::info!("Deleted trip {}", trip.id);
            writeln!(out, "Deleted trip \"{}\" and its expenses", trip.name)?;
        }
    }

    Ok(())
}

fn run_expense_command<T, E>(
    command: ExpenseCommand,
    trips: &T,
    expenses: &E,
    out: &mut impl Write,
) -> Result<(), Error>
where
    T: TripStore,
    E: ExpenseStore,
{
    match command {
        ExpenseCommand::Add {
            trip_id,
            date,
            category,
            amount,
            description,
            receipt,
        } => {
            let trip = get_trip(trips, &trip_id)?;
            let expense = Expense::build(&trip.id, date, category, amount, &description)
                .receipt(receipt)
                .finalize()?;

            expenses.add(&expense)?;
            tracing::info!("Created expense {} for trip {}", expense.id, trip.id);
            writeln!(out, "{}", expense.id)?;
        }
        ExpenseCommand::Edit {
            id,
            date,
            category,
            amount,
            description,
            receipt,
        } => {
            let expense = get_expense(expenses, &id)?;

            let edited = Expense::build(
                &expense.trip_id,
                date.unwrap_or(expense.date),
                category.unwrap_or(expense.category),
                amount.unwrap_or(expense.amount),
                description.as_deref().unwrap_or(&expense.description),
            )
            .receipt(receipt.or(expense.receipt))
            .finalize_with(expense.id, expense.created_at)?;

            expenses.put(&edited)?;
            writeln!(out, "Updated expense \"{}\"", edited.description)?;
        }
        ExpenseCommand::Delete { id } => {
            let expense = get_expense(expenses, &id)?;

            expenses.delete(&expense.id)?;
            writeln!(out, "Deleted expense \"{}\"", expense.description)?;
        }
    }

    Ok(())
}

fn get_trip(trips: &impl TripStore, id: &str) -> Result<Trip, Error> {
    trips
        .get(id)?
        .ok_or_else(|| Error::TripNotFound(id.to_owned()))
}

fn get_expense(expenses: &impl ExpenseStore, id: &str) -> Result<Expense, Error> {
    expenses
        .get(id)?
        .ok_or_else(|| Error::ExpenseNotFound(id.to_owned()))
}

#[derive(Serialize)]
struct TripDetails<'a> {
    trip: &'a Trip,
    summary: &'a ExpenseSummary,
    expenses: &'a [Expense],
}

const PROGRESS_BAR_WIDTH: usize = 20;

fn progress_bar(comparison: &BudgetComparison) -> String {
    let fraction = comparison.percentage_used.clamp(0.0, 100.0) / 100.0;
    let filled = (fraction * PROGRESS_BAR_WIDTH as f64).round() as usize;

    let label = match comparison.status() {
        BudgetStatus::OnTrack => "on track",
        BudgetStatus::NearLimit => "near limit",
        BudgetStatus::Exceeded => "over budget",
    };

    format!(
        "[{}{}] {:.1}% of budget used, {label}",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled),
        comparison.percentage_used,
    )
}

fn remaining_text(comparison: &BudgetComparison) -> String {
    if comparison.is_over_budget() {
        format!("{} over budget", format_currency(comparison.remaining.abs()))
    } else {
        format!("{} remaining", format_currency(comparison.remaining))
    }
}

fn write_trip_card(
    out: &mut impl Write,
    trip: &Trip,
    summary: &ExpenseSummary,
) -> Result<(), Error> {
    let comparison = &summary.budget_comparison;

    writeln!(out, "{} ({})", trip.name, trip.status)?;
    writeln!(out, "  ID: {}", trip.id)?;
    writeln!(
        out,
        "  {} to {}",
        format_date_short(trip.start_date),
        format_date_short(trip.end_date)
    )?;
    writeln!(
        out,
        "  Spent {} of {}, {}",
        format_currency(summary.total),
        format_currency(trip.budget),
        remaining_text(comparison)
    )?;
    writeln!(out, "  {}", progress_bar(comparison))?;
    writeln!(out)?;

    Ok(())
}

fn write_trip_details(
    out: &mut impl Write,
    trip: &Trip,
    summary: &ExpenseSummary,
    expenses: &[Expense],
) -> Result<(), Error> {
    let comparison = &summary.budget_comparison;

    writeln!(out, "{} ({})", trip.name, trip.status)?;
    writeln!(out, "ID: {}", trip.id)?;
    writeln!(
        out,
        "Dates: {} to {}",
        format_date_short(trip.start_date),
        format_date_short(trip.end_date)
    )?;
    if let Some(description) = &trip.description {
        writeln!(out, "Description: {description}")?;
    }
    writeln!(out)?;

    writeln!(out, "Budget: {}", format_currency(trip.budget))?;
    writeln!(out, "Spent: {}", format_currency(summary.total))?;
    if comparison.is_over_budget() {
        writeln!(
            out,
            "Over budget: {}",
            format_currency(comparison.remaining.abs())
        )?;
    } else {
        writeln!(out, "Remaining: {}", format_currency(comparison.remaining))?;
    }
    writeln!(out, "{}", progress_bar(comparison))?;

    let categories = summary.categories_by_amount();
    if !categories.is_empty() {
        writeln!(out)?;
        writeln!(out, "By category:")?;
        for (category, amount) in categories {
            writeln!(
                out,
                "  {} {}: {}",
                category.icon(),
                category.label(),
                format_currency(amount)
            )?;
        }
    }

    writeln!(out)?;
    if expenses.is_empty() {
        writeln!(out, "No expenses yet.")?;
        return Ok(());
    }

    writeln!(out, "Expenses ({}):", expenses.len())?;
    for expense in expenses {
        let receipt = if expense.receipt.is_some() {
            " [receipt]"
        } else {
            ""
        };

        writeln!(
            out,
            "  {}  {} {}  {}  {}{receipt}",
            format_date_short(expense.date),
            expense.category.icon(),
            expense.description,
            format_currency(expense.amount),
            expense.id,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use time::macros::{date, datetime};

    use crate::{
        Database, Error, ExpenseCategory, TripStatus,
        cli::{Args, parse_date, run},
        stores::{ExpenseIndex, ExpenseStore, TripStore, sqlite::SQLiteStores},
        test_utils::{sample_expense, sample_trip},
    };

    fn get_stores() -> SQLiteStores {
        SQLiteStores::new(Database::in_memory())
    }

    fn run_args(stores: &SQLiteStores, args: &[&str]) -> Result<String, Error> {
        let args =
            Args::try_parse_from(std::iter::once("trip_ledger").chain(args.iter().copied()))
                .expect("arguments should parse");
        let mut out = Vec::new();

        run(
            args.command,
            &stores.trips,
            &stores.expenses,
            date!(2025 - 03 - 10),
            &mut out,
        )?;

        Ok(String::from_utf8(out).unwrap())
    }

    fn add_trip(stores: &SQLiteStores) -> String {
        let output = run_args(
            stores,
            &[
                "trip",
                "add",
                "--name",
                "Lisbon",
                "--start",
                "2025-03-01",
                "--end",
                "2025-03-10",
                "--budget",
                "1000",
            ],
        )
        .unwrap();

        output.trim().to_owned()
    }

    #[test]
    fn parses_dates() {
        assert_eq!(parse_date("2025-03-01"), Ok(date!(2025 - 03 - 01)));
        assert_eq!(
            parse_date("01/03/2025"),
            Err(Error::InvalidDate("01/03/2025".to_owned()))
        );
        assert_eq!(
            parse_date("2025-02-30"),
            Err(Error::InvalidDate("2025-02-30".to_owned()))
        );
    }

    #[test]
    fn rejects_unknown_category() {
        let result = Args::try_parse_from([
            "trip_ledger",
            "expense",
            "add",
            "trip-1",
            "--date",
            "2025-03-02",
            "--category",
            "souvenirs",
            "--amount",
            "5",
            "--description",
            "Magnet",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn add_trip_prints_id_and_stores_trip() {
        let stores = get_stores();

        let id = add_trip(&stores);

        let trip = stores.trips.get(&id).unwrap().unwrap();
        assert_eq!(trip.name, "Lisbon");
        assert_eq!(trip.budget, 1000.0);
        assert_eq!(trip.status, TripStatus::Active);
    }

    #[test]
    fn add_trip_rejects_end_before_start() {
        let stores = get_stores();

        let result = run_args(
            &stores,
            &[
                "trip", "add", "--name", "Lisbon", "--start", "2025-03-10", "--end", "2025-03-01",
                "--budget", "1000",
            ],
        );

        assert_eq!(
            result,
            Err(Error::InvalidDateRange {
                start: date!(2025 - 03 - 10),
                end: date!(2025 - 03 - 01),
            })
        );
        assert!(stores.trips.get_all().unwrap().is_empty());
    }

    #[test]
    fn add_trip_rejects_negative_budget() {
        let stores = get_stores();

        let result = run_args(
            &stores,
            &[
                "trip", "add", "--name", "Lisbon", "--start", "2025-03-01", "--end", "2025-03-10",
                "--budget", "-5",
            ],
        );

        assert_eq!(result, Err(Error::NegativeAmount(-5.0)));
    }

    #[test]
    fn edit_trip_keeps_unset_fields() {
        let stores = get_stores();
        let id = add_trip(&stores);
        let before = stores.trips.get(&id).unwrap().unwrap();

        run_args(
            &stores,
            &["trip", "edit", &id, "--budget", "1200", "--description", "Family visit"],
        )
        .unwrap();

        let after = stores.trips.get(&id).unwrap().unwrap();
        assert_eq!(after.budget, 1200.0);
        assert_eq!(after.description.as_deref(), Some("Family visit"));
        assert_eq!(after.name, before.name);
        assert_eq!(after.start_date, before.start_date);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn edit_trip_with_empty_description_removes_it() {
        let stores = get_stores();
        let mut trip = sample_trip("trip-1", 100.0);
        trip.description = Some("Work".to_owned());
        stores.trips.add(&trip).unwrap();

        run_args(&stores, &["trip", "edit", "trip-1", "--description", ""]).unwrap();

        let after = stores.trips.get("trip-1").unwrap().unwrap();
        assert_eq!(after.description, None);
    }

    #[test]
    fn edit_trip_validates_new_dates() {
        let stores = get_stores();
        stores.trips.add(&sample_trip("trip-1", 100.0)).unwrap();

        let result = run_args(&stores, &["trip", "edit", "trip-1", "--start", "2025-04-01"]);

        assert!(matches!(result, Err(Error::InvalidDateRange { .. })));
        let unchanged = stores.trips.get("trip-1").unwrap().unwrap();
        assert_eq!(unchanged.start_date, date!(2025 - 03 - 01));
    }

    #[test]
    fn missing_trip_is_an_error() {
        let stores = get_stores();

        for args in [
            vec!["trip", "show", "nope"],
            vec!["trip", "edit", "nope", "--name", "Porto"],
            vec!["trip", "toggle-status", "nope"],
            vec!["trip", "delete", "nope"],
            vec!["report", "nope"],
        ] {
            assert_eq!(
                run_args(&stores, &args),
                Err(Error::TripNotFound("nope".to_owned())),
                "{args:?}"
            );
        }
    }

    #[test]
    fn toggle_status_flips_and_flips_back() {
        let stores = get_stores();
        stores.trips.add(&sample_trip("trip-1", 100.0)).unwrap();

        let output = run_args(&stores, &["trip", "toggle-status", "trip-1"]).unwrap();
        assert_eq!(output, "Trip \"Lisbon\" is now completed\n");
        assert_eq!(
            stores.trips.get("trip-1").unwrap().unwrap().status,
            TripStatus::Completed
        );

        run_args(&stores, &["trip", "toggle-status", "trip-1"]).unwrap();
        assert_eq!(
            stores.trips.get("trip-1").unwrap().unwrap().status,
            TripStatus::Active
        );
    }

    #[test]
    fn list_shows_newest_first_with_spending() {
        let stores = get_stores();
        let mut older = sample_trip("trip-old", 1000.0);
        older.name = "Porto".to_owned();
        older.created_at = datetime!(2025-01-01 12:00 UTC);
        let mut newer = sample_trip("trip-new", 100.0);
        newer.name = "Madrid".to_owned();
        newer.created_at = datetime!(2025-02-01 12:00 UTC);
        stores.trips.add(&older).unwrap();
        stores.trips.add(&newer).unwrap();
        stores
            .expenses
            .add(&sample_expense("e-1", "trip-old", 750.0, ExpenseCategory::Food))
            .unwrap();
        stores
            .expenses
            .add(&sample_expense("e-2", "trip-new", 150.0, ExpenseCategory::Shopping))
            .unwrap();

        let output = run_args(&stores, &["trip", "list"]).unwrap();

        let madrid = output.find("Madrid").unwrap();
        let porto = output.find("Porto").unwrap();
        assert!(madrid < porto, "{output}");
        assert!(output.contains("Spent $750.00 of $1,000.00, $250.00 remaining"));
        assert!(output.contains("[###############-----] 75.0% of budget used, on track"));
        assert!(output.contains("Spent $150.00 of $100.00, $50.00 over budget"));
        assert!(output.contains("[####################] 150.0% of budget used, over budget"));
    }

    #[test]
    fn list_filters_by_status() {
        let stores = get_stores();
        let mut done = sample_trip("trip-done", 100.0);
        done.name = "Rome".to_owned();
        done.status = TripStatus::Completed;
        stores.trips.add(&done).unwrap();
        stores.trips.add(&sample_trip("trip-active", 100.0)).unwrap();

        let output = run_args(&stores, &["trip", "list", "--status", "completed"]).unwrap();

        assert!(output.contains("Rome (completed)"));
        assert!(!output.contains("Lisbon"));
    }

    #[test]
    fn list_without_trips() {
        let stores = get_stores();

        let output = run_args(&stores, &["trip", "list"]).unwrap();

        assert_eq!(output, "No trips yet.\n");
    }

    #[test]
    fn show_prints_summary_and_expenses_newest_first() {
        let stores = get_stores();
        stores.trips.add(&sample_trip("trip-1", 1000.0)).unwrap();
        let mut dinner = sample_expense("e-1", "trip-1", 300.0, ExpenseCategory::Food);
        dinner.description = "Dinner".to_owned();
        dinner.date = date!(2025 - 03 - 02);
        let mut train = sample_expense("e-2", "trip-1", 450.0, ExpenseCategory::Transportation);
        train.description = "Train".to_owned();
        train.date = date!(2025 - 03 - 05);
        stores.expenses.add(&dinner).unwrap();
        stores.expenses.add(&train).unwrap();

        let output = run_args(&stores, &["trip", "show", "trip-1"]).unwrap();

        assert!(output.contains("Budget: $1,000.00"));
        assert!(output.contains("Spent: $750.00"));
        assert!(output.contains("Remaining: $250.00"));
        assert!(output.contains("75.0% of budget used"));
        assert!(output.contains("Expenses (2):"));
        let train = output.find("Train").unwrap();
        let dinner = output.find("Dinner").unwrap();
        assert!(train < dinner, "{output}");
    }

    #[test]
    fn show_json_includes_summary() {
        let stores = get_stores();
        stores.trips.add(&sample_trip("trip-1", 1000.0)).unwrap();
        stores
            .expenses
            .add(&sample_expense("e-1", "trip-1", 300.0, ExpenseCategory::Food))
            .unwrap();

        let output = run_args(&stores, &["trip", "show", "trip-1", "--json"]).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["trip"]["id"], "trip-1");
        assert_eq!(json["summary"]["total"], 300.0);
        assert_eq!(json["summary"]["by_category"]["food"], 300.0);
        assert_eq!(json["summary"]["budget_comparison"]["remaining"], 700.0);
        assert_eq!(json["expenses"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn show_json_writes_dates_as_text() {
        let stores = get_stores();
        stores.trips.add(&sample_trip("trip-1", 1000.0)).unwrap();
        stores
            .expenses
            .add(&sample_expense("e-1", "trip-1", 300.0, ExpenseCategory::Food))
            .unwrap();

        let output = run_args(&stores, &["trip", "show", "trip-1", "--json"]).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["trip"]["start_date"], "2025-03-01");
        assert_eq!(json["trip"]["end_date"], "2025-03-10");
        assert_eq!(json["trip"]["created_at"], "2025-01-01T12:00:00Z");
        assert_eq!(json["expenses"][0]["date"], "2025-03-02");
    }

    #[test]
    fn budget_spent_exactly_is_not_over_budget() {
        let stores = get_stores();
        stores.trips.add(&sample_trip("trip-1", 7.7)).unwrap();
        for (id, amount) in [("e-1", 1.1), ("e-2", 2.2), ("e-3", 4.4)] {
            stores
                .expenses
                .add(&sample_expense(id, "trip-1", amount, ExpenseCategory::Food))
                .unwrap();
        }

        let show = run_args(&stores, &["trip", "show", "trip-1"]).unwrap();
        let list = run_args(&stores, &["trip", "list"]).unwrap();

        assert!(show.contains("Spent: $7.70\n"), "{show}");
        assert!(show.contains("Remaining: $0.00\n"), "{show}");
        assert!(show.contains("100.0% of budget used, near limit"), "{show}");
        assert!(!show.contains("Over budget"), "{show}");
        assert!(list.contains("Spent $7.70 of $7.70, $0.00 remaining"), "{list}");
    }

    #[test]
    fn delete_trip_removes_its_expenses() {
        let stores = get_stores();
        stores.trips.add(&sample_trip("trip-1", 100.0)).unwrap();
        stores
            .expenses
            .add(&sample_expense("e-1", "trip-1", 10.0, ExpenseCategory::Food))
            .unwrap();

        run_args(&stores, &["trip", "delete", "trip-1"]).unwrap();

        assert_eq!(stores.trips.get("trip-1"), Ok(None));
        assert_eq!(stores.expenses.get("e-1"), Ok(None));
    }

    #[test]
    fn add_expense_to_trip() {
        let stores = get_stores();
        let trip_id = add_trip(&stores);

        let output = run_args(
            &stores,
            &[
                "expense",
                "add",
                &trip_id,
                "--date",
                "2025-03-02",
                "--category",
                "Food",
                "--amount",
                "12.5",
                "--description",
                "Pastéis de nata",
                "--receipt",
                "data:image/png;base64,AAAA",
            ],
        )
        .unwrap();

        let expense = stores.expenses.get(output.trim()).unwrap().unwrap();
        assert_eq!(expense.trip_id, trip_id);
        assert_eq!(expense.category, ExpenseCategory::Food);
        assert_eq!(expense.amount, 12.5);
        assert_eq!(expense.receipt.as_deref(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn add_expense_requires_existing_trip() {
        let stores = get_stores();

        let result = run_args(
            &stores,
            &[
                "expense",
                "add",
                "nope",
                "--date",
                "2025-03-02",
                "--category",
                "food",
                "--amount",
                "1",
                "--description",
                "Coffee",
            ],
        );

        assert_eq!(result, Err(Error::TripNotFound("nope".to_owned())));
        assert!(stores.expenses.get_all().unwrap().is_empty());
    }

    #[test]
    fn add_expense_rejects_blank_description() {
        let stores = get_stores();
        stores.trips.add(&sample_trip("trip-1", 100.0)).unwrap();

        let result = run_args(
            &stores,
            &[
                "expense",
                "add",
                "trip-1",
                "--date",
                "2025-03-02",
                "--category",
                "food",
                "--amount",
                "1",
                "--description",
                "   ",
            ],
        );

        assert_eq!(result, Err(Error::EmptyDescription));
    }

    #[test]
    fn edit_expense_replaces_fields() {
        let stores = get_stores();
        stores.trips.add(&sample_trip("trip-1", 100.0)).unwrap();
        let mut expense = sample_expense("e-1", "trip-1", 10.0, ExpenseCategory::Food);
        expense.receipt = Some("data:image/png;base64,AAAA".to_owned());
        stores.expenses.add(&expense).unwrap();

        run_args(
            &stores,
            &[
                "expense",
                "edit",
                "e-1",
                "--amount",
                "12",
                "--category",
                "other",
                "--receipt",
                "",
            ],
        )
        .unwrap();

        let edited = stores.expenses.get("e-1").unwrap().unwrap();
        assert_eq!(edited.amount, 12.0);
        assert_eq!(edited.category, ExpenseCategory::Other);
        assert_eq!(edited.receipt, None);
        assert_eq!(edited.description, expense.description);
        assert_eq!(edited.created_at, expense.created_at);
    }

    #[test]
    fn edit_and_delete_missing_expense() {
        let stores = get_stores();

        assert_eq!(
            run_args(&stores, &["expense", "edit", "nope", "--amount", "1"]),
            Err(Error::ExpenseNotFound("nope".to_owned()))
        );
        assert_eq!(
            run_args(&stores, &["expense", "delete", "nope"]),
            Err(Error::ExpenseNotFound("nope".to_owned()))
        );
    }

    #[test]
    fn delete_expense() {
        let stores = get_stores();
        stores.trips.add(&sample_trip("trip-1", 100.0)).unwrap();
        stores
            .expenses
            .add(&sample_expense("e-1", "trip-1", 10.0, ExpenseCategory::Food))
            .unwrap();

        run_args(&stores, &["expense", "delete", "e-1"]).unwrap();

        assert_eq!(
            stores
                .expenses
                .get_all_by_index(ExpenseIndex::ByTrip("trip-1".to_owned()))
                .unwrap(),
            vec![]
        );
    }

    #[test]
    fn report_prints_to_stdout() {
        let stores = get_stores();
        stores.trips.add(&sample_trip("trip-1", 100.0)).unwrap();
        stores
            .expenses
            .add(&sample_expense("e-1", "trip-1", 10.0, ExpenseCategory::Food))
            .unwrap();

        let output = run_args(&stores, &["report", "trip-1", "--format", "csv"]).unwrap();

        assert_eq!(
            output,
            "date,category,description,amount,has_receipt\n2025-03-02,food,Expense e-1,10.00,false\n"
        );
    }

    #[test]
    fn report_saves_into_directory() {
        let stores = get_stores();
        stores.trips.add(&sample_trip("trip-1", 100.0)).unwrap();
        let directory =
            std::env::temp_dir().join(format!("trip-ledger-report-{}", crate::new_record_id()));
        std::fs::create_dir_all(&directory).unwrap();

        let output = run_args(
            &stores,
            &[
                "report",
                "trip-1",
                "--format",
                "html",
                "--output",
                directory.to_str().unwrap(),
            ],
        )
        .unwrap();

        let path = directory.join("report-lisbon.html");
        assert_eq!(output, format!("Saved report to {}\n", path.display()));
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Trip Expense Report"));

        std::fs::remove_dir_all(directory).unwrap();
    }
}
