use chrono::NaiveDate;

/// An earned achievement. Existence of a (user_id, name) row means the
/// achievement is permanently granted; the store enforces uniqueness.
#[derive(Debug, Clone)]
pub struct Badge {
    pub badge_id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: String,
    pub earned_date: NaiveDate,
}
