use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::Parser;
use time::{Duration, OffsetDateTime};

use trip_ledger::{
    Database, Expense, ExpenseCategory, Trip, TripStatus,
    stores::{ExpenseStore, TripStore, sqlite::SQLiteStores},
};

/// Create a trip_ledger database holding a finished trip and a trip in
/// progress, for trying out the CLI and reports.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Where to create the database, e.g. "demo.sqlite". Must not exist yet.
    #[arg(long, short)]
    output_path: PathBuf,
}

/// Refuse paths that would clobber an existing file or that lack an extension.
fn check_output_path(path: &Path) -> Result<(), String> {
    if path.extension().is_none_or(|extension| extension.is_empty()) {
        return Err(format!(
            "{} has no file extension, use something like demo.sqlite",
            path.display()
        ));
    }

    if path.exists() {
        return Err(format!("{} already exists", path.display()));
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if let Err(message) = check_output_path(&args.output_path) {
        eprintln!("{message}");
        exit(1);
    }

    println!("Creating demo database at {}", args.output_path.display());
    let stores = SQLiteStores::new(Database::open(&args.output_path));

    let today = OffsetDateTime::now_utc().date();

    println!("Creating sample trips...");

    let past = Trip::build(
        "Lisbon and Porto",
        today - Duration::days(60),
        today - Duration::days(50),
        1500.0,
    )
    .description(Some("Spring break in Portugal"))
    .status(TripStatus::Completed)
    .finalize()?;
    stores.trips.add(&past)?;

    let current = Trip::build(
        "Tokyo",
        today - Duration::days(3),
        today + Duration::days(7),
        800.0,
    )
    .finalize()?;
    stores.trips.add(&current)?;

    println!("Creating sample expenses...");

    let sample_expenses = [
        (&past, 0, ExpenseCategory::Transportation, 320.0, "Flights"),
        (&past, 0, ExpenseCategory::Accommodation, 540.0, "Hotel in Alfama"),
        (&past, 1, ExpenseCategory::Food, 18.5, "Pastéis de nata"),
        (&past, 4, ExpenseCategory::Transportation, 42.0, "Train to Porto"),
        (&past, 5, ExpenseCategory::Entertainment, 25.0, "Port wine tasting"),
        (&past, 9, ExpenseCategory::Shopping, 60.0, "Azulejo tiles"),
        (&current, 0, ExpenseCategory::Accommodation, 450.0, "Capsule hotel"),
        (&current, 1, ExpenseCategory::Food, 35.0, "Ramen"),
        (&current, 2, ExpenseCategory::Transportation, 28.0, "Suica top up"),
        (&current, 2, ExpenseCategory::Other, 250.0, "Travel insurance"),
    ];

    for (trip, day, category, amount, description) in sample_expenses {
        let expense = Expense::build(
            &trip.id,
            trip.start_date + Duration::days(day),
            category,
            amount,
            description,
        )
        .finalize()?;

        stores.expenses.add(&expense)?;
    }

    println!(
        "Created 2 trips and {} expenses",
        sample_expenses.len()
    );

    Ok(())
}
