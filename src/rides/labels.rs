//! Human-readable labels for the categorical ride codes.
//!
//! Each mapping is total: any code outside the table, including null, maps to
//! the catch-all label. The lookup functions and the `polars` expressions are
//! built from the same tables so the two cannot drift apart.

use polars::prelude::*;

pub const PAYMENT_TYPE_LABELS: [(i64, &str); 5] = [
    (1, "Credit Card"),
    (2, "Cash"),
    (3, "No Charge"),
    (4, "Dispute"),
    (5, "Unknown"),
];
pub const PAYMENT_TYPE_FALLBACK: &str = "Other";

pub const STORE_AND_FWD_LABELS: [(&str, &str); 2] = [("Y", "Yes"), ("N", "No")];
pub const STORE_AND_FWD_FALLBACK: &str = "Unknown";

pub const TRIP_TYPE_LABELS: [(i64, &str); 2] = [(1, "Street-hail"), (2, "Dispatch")];
pub const TRIP_TYPE_FALLBACK: &str = "Unknown";

pub fn payment_type_label(code: Option<i64>) -> &'static str {
    lookup(&PAYMENT_TYPE_LABELS, code, PAYMENT_TYPE_FALLBACK)
}

pub fn store_and_fwd_label(flag: Option<&str>) -> &'static str {
    flag.and_then(|f| {
        STORE_AND_FWD_LABELS
            .iter()
            .find(|(k, _)| *k == f)
            .map(|(_, v)| *v)
    })
    .unwrap_or(STORE_AND_FWD_FALLBACK)
}

pub fn trip_type_label(code: Option<i64>) -> &'static str {
    lookup(&TRIP_TYPE_LABELS, code, TRIP_TYPE_FALLBACK)
}

fn lookup(table: &[(i64, &'static str)], code: Option<i64>, fallback: &'static str) -> &'static str {
    code.and_then(|c| table.iter().find(|(k, _)| *k == c).map(|(_, v)| *v))
        .unwrap_or(fallback)
}

/// Expression recoding an integer code column into its label.
///
/// A value only matches a code when it is integral: `1.5` and unparsable text
/// take the fallback label rather than being truncated onto a code.
pub fn int_code_label_expr(
    column: &str,
    table: &[(i64, &'static str)],
    fallback: &'static str,
) -> Expr {
    let as_int = col(column).cast(DataType::Int64);
    let integral = col(column)
        .cast(DataType::Float64)
        .eq(as_int.clone().cast(DataType::Float64));
    let code = when(integral)
        .then(as_int)
        .otherwise(lit(NULL).cast(DataType::Int64));
    table
        .iter()
        .rev()
        .fold(lit(fallback), |otherwise, (k, label)| {
            when(code.clone().eq(lit(*k)))
                .then(lit(*label))
                .otherwise(otherwise)
        })
        .alias(column)
}

/// Expression recoding a string flag column into its label.
pub fn str_code_label_expr(
    column: &str,
    table: &[(&'static str, &'static str)],
    fallback: &'static str,
) -> Expr {
    let flag = col(column).cast(DataType::String);
    table
        .iter()
        .rev()
        .fold(lit(fallback), |otherwise, (k, label)| {
            when(flag.clone().eq(lit(*k)))
                .then(lit(*label))
                .otherwise(otherwise)
        })
        .alias(column)
}
