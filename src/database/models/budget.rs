use rust_decimal::Decimal;

/// A per-category spending limit. At most one row per (user, category),
/// maintained by the application-level upsert.
#[derive(Debug, Clone)]
pub struct Budget {
    pub budget_id: i64,
    pub user_id: i64,
    pub category: String,
    pub limit_amount: Decimal,
}
