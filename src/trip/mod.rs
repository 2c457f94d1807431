//! Trips: a named travel period with a budget.

mod domain;

pub use domain::{Trip, TripBuilder, TripStatus};
