use std::process::exit;

use clap::Parser;
use time::OffsetDateTime;
use tracing_subscriber::filter::LevelFilter;

use trip_ledger::{Database, cli::Args, init_logging, stores::sqlite::SQLiteStores};

/// Track travel budgets and expenses from the command line.
fn main() {
    init_logging(LevelFilter::WARN);

    let args = Args::parse();

    let database = Database::shared(&args.db_path);
    let stores = SQLiteStores::new(database.clone());

    // The local offset cannot always be determined, e.g. in multi-threaded
    // processes on some platforms.
    let today = OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date();

    let mut stdout = std::io::stdout().lock();

    if let Err(error) = trip_ledger::cli::run(
        args.command,
        &stores.trips,
        &stores.expenses,
        today,
        &mut stdout,
    ) {
        eprintln!("Error: {error}");
        exit(1);
    }
}
