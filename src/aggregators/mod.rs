//! Derivation of the dashboard's summary tables.
//!
//! Every function here is a pure transformation: it borrows a slice of
//! hourly records (or an earlier derived table) and returns a freshly built
//! table. Group-by output is ordered by key, categorical keys in code order.

pub mod bins;
pub mod daily;
pub mod hourly;
pub mod least_usage;
pub mod season;
pub mod types;
pub mod utility;
pub mod weekly;
