//! Defines the trip store trait.

use crate::{Error, Trip, TripStatus};

/// The secondary indexes on trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripIndex {
    /// Trips with the given status.
    ByStatus(TripStatus),
}

impl TripIndex {
    /// The name of the index.
    pub fn name(&self) -> &'static str {
        match self {
            TripIndex::ByStatus(_) => "by-status",
        }
    }
}

/// Handles the storage and retrieval of trips.
///
/// Stores do not validate trips, that is left to the caller.
pub trait TripStore {
    /// Insert `trip`, or replace the stored trip with the same ID.
    fn put(&self, trip: &Trip) -> Result<(), Error>;

    /// Insert `trip`, failing with [Error::DuplicateId] if its ID is taken.
    fn add(&self, trip: &Trip) -> Result<(), Error>;

    /// Retrieve a trip by its ID, `None` if there is no such trip.
    fn get(&self, id: &str) -> Result<Option<Trip>, Error>;

    /// Retrieve every trip, in no particular order.
    fn get_all(&self) -> Result<Vec<Trip>, Error>;

    /// Retrieve the trips matching `index`, in no particular order.
    fn get_all_by_index(&self, index: TripIndex) -> Result<Vec<Trip>, Error>;

    /// Delete a trip and then each of its expenses.
    ///
    /// Deleting a trip that does not exist is not an error. The deletes are
    /// not atomic: if an expense cannot be deleted, the trip and any
    /// expenses deleted so far stay deleted and an
    /// [Error::PartialCascadeFailure] is returned.
    fn delete(&self, id: &str) -> Result<(), Error>;
}
