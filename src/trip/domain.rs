//! Core trip domain types.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Error, TripId, new_record_id};

/// Whether a trip is still under way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    /// The trip is planned or in progress.
    Active,
    /// The trip is over.
    Completed,
}

impl TripStatus {
    /// The key used to store the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Active => "active",
            TripStatus::Completed => "completed",
        }
    }

    /// The other status.
    pub fn toggled(self) -> Self {
        match self {
            TripStatus::Active => TripStatus::Completed,
            TripStatus::Completed => TripStatus::Active,
        }
    }
}

impl Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TripStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(TripStatus::Active),
            "completed" => Ok(TripStatus::Completed),
            _ => Err(Error::InvalidStatus(s.to_owned())),
        }
    }
}

impl ToSql for TripStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TripStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// A travel period with a budget that expenses are logged against.
///
/// To create a new `Trip`, use [Trip::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// The ID of the trip.
    pub id: TripId,
    /// What the trip is called, e.g. "Lisbon 2025".
    pub name: String,
    /// The first day of the trip.
    pub start_date: Date,
    /// The last day of the trip.
    pub end_date: Date,
    /// How much the traveller plans to spend.
    pub budget: f64,
    /// Free-text notes about the trip.
    pub description: Option<String>,
    /// Whether the trip is still under way.
    pub status: TripStatus,
    /// When the trip was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Trip {
    /// Create a new trip.
    ///
    /// Shortcut for [TripBuilder] for discoverability.
    pub fn build(name: &str, start_date: Date, end_date: Date, budget: f64) -> TripBuilder {
        TripBuilder {
            name: name.to_owned(),
            start_date,
            end_date,
            budget,
            description: None,
            status: TripStatus::Active,
        }
    }

    /// Check the fields that the store itself does not check.
    ///
    /// # Errors
    ///
    /// Returns an:
    /// - [Error::EmptyName] if the name is empty or just whitespace,
    /// - [Error::NegativeAmount] if the budget is negative or not a number,
    /// - [Error::InvalidDateRange] if the trip ends before it starts.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::EmptyName);
        }

        if self.budget < 0.0 || self.budget.is_nan() {
            return Err(Error::NegativeAmount(self.budget));
        }

        if self.end_date < self.start_date {
            return Err(Error::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }

        Ok(())
    }
}

/// A builder for creating [Trip] instances.
#[derive(Debug, Clone, PartialEq)]
pub struct TripBuilder {
    name: String,
    start_date: Date,
    end_date: Date,
    budget: f64,
    description: Option<String>,
    status: TripStatus,
}

impl TripBuilder {
    /// Set the trip's description. Blank descriptions are dropped.
    pub fn description(mut self, description: Option<&str>) -> Self {
        self.description = description
            .map(str::trim)
            .filter(|description| !description.is_empty())
            .map(str::to_owned);
        self
    }

    /// Set the trip's status, [TripStatus::Active] by default.
    pub fn status(mut self, status: TripStatus) -> Self {
        self.status = status;
        self
    }

    /// Validate the builder and create a trip with a fresh ID, created now.
    ///
    /// # Errors
    ///
    /// See [Trip::validate].
    pub fn finalize(self) -> Result<Trip, Error> {
        self.finalize_with(new_record_id(), OffsetDateTime::now_utc())
    }

    /// Validate the builder and create a trip with the given ID and creation time.
    ///
    /// # Errors
    ///
    /// See [Trip::validate].
    pub fn finalize_with(self, id: TripId, created_at: OffsetDateTime) -> Result<Trip, Error> {
        let trip = Trip {
            id,
            name: self.name.trim().to_owned(),
            start_date: self.start_date,
            end_date: self.end_date,
            budget: self.budget,
            description: self.description,
            status: self.status,
            created_at,
        };

        trip.validate()?;

        Ok(trip)
    }
}
