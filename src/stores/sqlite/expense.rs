//! Implements a SQLite backed expense store.

use rusqlite::{Connection, Row};

use crate::{
    Database, Error, Expense,
    stores::{ExpenseIndex, ExpenseStore},
};

const SELECT_COLUMNS: &str =
    "SELECT id, trip_id, date, category, amount, description, receipt, created_at FROM expense";

/// Stores expenses in a SQLite database.
///
/// There is no foreign key from an expense to its trip, so expenses for
/// trips that do not exist are stored without complaint.
#[derive(Debug, Clone)]
pub struct SQLiteExpenseStore {
    database: Database,
}

impl SQLiteExpenseStore {
    /// Create a new store for `database`.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn query(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Expense>, Error> {
        self.database.with_connection(|connection| {
            connection
                .prepare(sql)?
                .query_map(params, map_row)?
                .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
                .collect()
        })
    }
}

impl ExpenseStore for SQLiteExpenseStore {
    fn put(&self, expense: &Expense) -> Result<(), Error> {
        tracing::debug!("Putting expense {}", expense.id);

        self.database.with_connection(|connection| {
            connection.execute(
                "INSERT INTO expense (id, trip_id, date, category, amount, description, receipt, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(id) DO UPDATE SET
                    trip_id = excluded.trip_id,
                    date = excluded.date,
                    category = excluded.category,
                    amount = excluded.amount,
                    description = excluded.description,
                    receipt = excluded.receipt,
                    created_at = excluded.created_at",
                (
                    &expense.id,
                    &expense.trip_id,
                    expense.date,
                    expense.category,
                    expense.amount,
                    &expense.description,
                    &expense.receipt,
                    expense.created_at,
                ),
            )?;

            Ok(())
        })
    }

    /// Insert a new expense.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DuplicateId] if an expense with the same ID already exists,
    /// - [Error::SqlError] if there is some other SQL error.
    fn add(&self, expense: &Expense) -> Result<(), Error> {
        tracing::debug!("Adding expense {}", expense.id);

        self.database.with_connection(|connection| {
            connection
                .execute(
                    "INSERT INTO expense (id, trip_id, date, category, amount, description, receipt, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    (
                        &expense.id,
                        &expense.trip_id,
                        expense.date,
                        expense.category,
                        expense.amount,
                        &expense.description,
                        &expense.receipt,
                        expense.created_at,
                    ),
                )
                .map_err(|error| match error {
                    // Code 1555 occurs when a PRIMARY KEY constraint failed.
                    rusqlite::Error::SqliteFailure(error, Some(_))
                        if error.extended_code == 1555 =>
                    {
                        Error::DuplicateId(expense.id.clone())
                    }
                    error => error.into(),
                })?;

            Ok(())
        })
    }

    fn get(&self, id: &str) -> Result<Option<Expense>, Error> {
        let mut expenses = self.query(&format!("{SELECT_COLUMNS} WHERE id = ?1"), [id])?;

        Ok(expenses.pop())
    }

    fn get_all(&self) -> Result<Vec<Expense>, Error> {
        self.query(SELECT_COLUMNS, [])
    }

    fn get_all_by_index(&self, index: ExpenseIndex) -> Result<Vec<Expense>, Error> {
        tracing::debug!("Looking up expenses with index {}", index.name());

        match index {
            ExpenseIndex::ByTrip(trip_id) => {
                self.query(&format!("{SELECT_COLUMNS} WHERE trip_id = ?1"), [trip_id])
            }
            ExpenseIndex::ByDate(date) => {
                self.query(&format!("{SELECT_COLUMNS} WHERE date = ?1"), [date])
            }
        }
    }

    fn delete(&self, id: &str) -> Result<(), Error> {
        tracing::debug!("Deleting expense {id}");

        self.database.with_connection(|connection| {
            connection.execute("DELETE FROM expense WHERE id = ?1", [id])?;

            Ok(())
        })
    }
}

/// Initialize the expense table and its indexes.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id TEXT PRIMARY KEY NOT NULL,
            trip_id TEXT NOT NULL,
            date TEXT NOT NULL,
            category TEXT NOT NULL,
            amount REAL NOT NULL,
            description TEXT NOT NULL,
            receipt TEXT,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_expense_trip_id ON expense(trip_id);
        CREATE INDEX IF NOT EXISTS idx_expense_date ON expense(date);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        trip_id: row.get(1)?,
        date: row.get(2)?,
        category: row.get(3)?,
        amount: row.get(4)?,
        description: row.get(5)?,
        receipt: row.get(6)?,
        created_at: row.get(7)?,
    })
}
