use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A savings goal. Progress is derived at read time from year-to-date
/// savings and is never persisted.
#[derive(Debug, Clone)]
pub struct Goal {
    pub goal_id: i64,
    pub user_id: i64,
    pub name: String,
    pub target_amount: Decimal,
    pub deadline: NaiveDate,
}
