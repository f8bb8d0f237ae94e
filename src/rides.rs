//! Ride table vocabulary: column names and categorical code labels.

pub mod columns;
pub mod labels;

pub use labels::{payment_type_label, store_and_fwd_label, trip_type_label};
