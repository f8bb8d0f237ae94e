//! Column names of the source ride table and of the derived tables.

pub const PICKUP_DATETIME: &str = "lpepPickupDatetime";
pub const DROPOFF_DATETIME: &str = "lpepDropoffDatetime";
pub const PICKUP_LOCATION_ID: &str = "puLocationId";
pub const DROPOFF_LOCATION_ID: &str = "doLocationId";
pub const PASSENGER_COUNT: &str = "passengerCount";
pub const TRIP_DISTANCE: &str = "tripDistance";
pub const FARE_AMOUNT: &str = "fareAmount";
pub const TIP_AMOUNT: &str = "tipAmount";
pub const TOTAL_AMOUNT: &str = "totalAmount";
pub const PAYMENT_TYPE: &str = "paymentType";
pub const STORE_AND_FWD_FLAG: &str = "storeAndFwdFlag";
pub const TRIP_TYPE: &str = "tripType";
/// Always null in the source feed.
pub const EHAIL_FEE: &str = "ehailFee";

// Derived by the enricher
pub const TRIP_DURATION_MINUTES: &str = "tripDurationMinutes";
pub const YEAR: &str = "year";
pub const MONTH: &str = "month";
pub const DAY: &str = "day";
pub const DAY_OF_WEEK: &str = "dayOfWeek";
pub const HOUR: &str = "hour";
pub const TIP_PERCENT: &str = "tipPercent";

// Zone statistics
pub const LOCATION_ID: &str = "LocationId";
pub const PICKUP_COUNT: &str = "pickup_count";
pub const DROPOFF_COUNT: &str = "dropoff_count";

/// Columns added by the enricher, in the order they are appended.
pub const DERIVED: [&str; 7] = [
    TRIP_DURATION_MINUTES,
    YEAR,
    MONTH,
    DAY,
    DAY_OF_WEEK,
    HOUR,
    TIP_PERCENT,
];
