//! Implements a SQLite backed trip store.

use rusqlite::{Connection, Row};

use crate::{
    Database, Error, Trip,
    stores::{ExpenseIndex, ExpenseStore, TripIndex, TripStore, sqlite::SQLiteExpenseStore},
};

const SELECT_COLUMNS: &str = "SELECT id, name, start_date, end_date, budget, description, status, created_at FROM trip";

/// Stores trips in a SQLite database.
///
/// Deleting a trip also deletes its expenses through a [SQLiteExpenseStore]
/// on the same database.
#[derive(Debug, Clone)]
pub struct SQLiteTripStore {
    database: Database,
    expenses: SQLiteExpenseStore,
}

impl SQLiteTripStore {
    /// Create a new store for `database`.
    pub fn new(database: Database) -> Self {
        Self {
            expenses: SQLiteExpenseStore::new(database.clone()),
            database,
        }
    }

    fn query(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Trip>, Error> {
        self.database.with_connection(|connection| {
            connection
                .prepare(sql)?
                .query_map(params, map_row)?
                .map(|maybe_trip| maybe_trip.map_err(|error| error.into()))
                .collect()
        })
    }

    fn delete_expenses_of(&self, trip_id: &str) -> Result<(), Error> {
        let partial_failure = |deleted: usize, error: Error| Error::PartialCascadeFailure {
            trip_id: trip_id.to_owned(),
            deleted,
            source: Box::new(error),
        };

        let expenses = self
            .expenses
            .get_all_by_index(ExpenseIndex::ByTrip(trip_id.to_owned()))
            .map_err(|error| partial_failure(0, error))?;

        for (deleted, expense) in expenses.iter().enumerate() {
            if let Err(error) = self.expenses.delete(&expense.id) {
                tracing::warn!(
                    "Deleted trip {trip_id} but could not delete expense {} ({deleted} of {} expenses deleted): {error}",
                    expense.id,
                    expenses.len()
                );
                return Err(partial_failure(deleted, error));
            }
        }

        tracing::debug!(
            "Deleted {} expenses of trip {trip_id}",
            expenses.len()
        );

        Ok(())
    }
}

impl TripStore for SQLiteTripStore {
    fn put(&self, trip: &Trip) -> Result<(), Error> {
        tracing::debug!("Putting trip {}", trip.id);

        self.database.with_connection(|connection| {
            connection.execute(
                "INSERT INTO trip (id, name, start_date, end_date, budget, description, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    start_date = excluded.start_date,
                    end_date = excluded.end_date,
                    budget = excluded.budget,
                    description = excluded.description,
                    status = excluded.status,
                    created_at = excluded.created_at",
                (
                    &trip.id,
                    &trip.name,
                    trip.start_date,
                    trip.end_date,
                    trip.budget,
                    &trip.description,
                    trip.status,
                    trip.created_at,
                ),
            )?;

            Ok(())
        })
    }

    /// Insert a new trip.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DuplicateId] if a trip with the same ID already exists,
    /// - [Error::SqlError] if there is some other SQL error.
    fn add(&self, trip: &Trip) -> Result<(), Error> {
        tracing::debug!("Adding trip {}", trip.id);

        self.database.with_connection(|connection| {
            connection
                .execute(
                    "INSERT INTO trip (id, name, start_date, end_date, budget, description, status, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    (
                        &trip.id,
                        &trip.name,
                        trip.start_date,
                        trip.end_date,
                        trip.budget,
                        &trip.description,
                        trip.status,
                        trip.created_at,
                    ),
                )
                .map_err(|error| match error {
                    // Code 1555 occurs when a PRIMARY KEY constraint failed.
                    rusqlite::Error::SqliteFailure(error, Some(_))
                        if error.extended_code == 1555 =>
                    {
                        Error::DuplicateId(trip.id.clone())
                    }
                    error => error.into(),
                })?;

            Ok(())
        })
    }

    fn get(&self, id: &str) -> Result<Option<Trip>, Error> {
        let mut trips = self.query(&format!("{SELECT_COLUMNS} WHERE id = ?1"), [id])?;

        Ok(trips.pop())
    }

    fn get_all(&self) -> Result<Vec<Trip>, Error> {
        self.query(SELECT_COLUMNS, [])
    }

    fn get_all_by_index(&self, index: TripIndex) -> Result<Vec<Trip>, Error> {
        tracing::debug!("Looking up trips with index {}", index.name());

        match index {
            TripIndex::ByStatus(status) => {
                self.query(&format!("{SELECT_COLUMNS} WHERE status = ?1"), [status])
            }
        }
    }

    fn delete(&self, id: &str) -> Result<(), Error> {
        tracing::debug!("Deleting trip {id}");

        self.database.with_connection(|connection| {
            connection.execute("DELETE FROM trip WHERE id = ?1", [id])?;

            Ok(())
        })?;

        self.delete_expenses_of(id)
    }
}

/// Initialize the trip table and its status index.
pub fn create_trip_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS trip (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            budget REAL NOT NULL,
            description TEXT,
            status TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_trip_status ON trip(status);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Trip, rusqlite::Error> {
    Ok(Trip {
        id: row.get(0)?,
        name: row.get(1)?,
        start_date: row.get(2)?,
        end_date: row.get(3)?,
        budget: row.get(4)?,
        description: row.get(5)?,
        status: row.get(6)?,
        created_at: row.get(7)?,
    })
}
