//! Itinerary views over parsed records.
//!
//! - Filter: day / type selection
//! - Grouper: records grouped per day, ordered by day number

pub mod filter;
pub mod grouper;

pub use filter::{ActivityFilter, Selection};
pub use grouper::{compare_days, day_number, group_by_day, unique_days, unique_types, DayGroup};
