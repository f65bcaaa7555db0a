/// Decimal precision for monetary amounts (cents).
pub const MONEY_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for utilization and share-of-budget percentages.
pub const PERCENT_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for pledge progress percentages.
pub const PROGRESS_DECIMAL_PRECISION: u32 = 1;
