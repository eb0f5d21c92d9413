use chrono::Local;
use rust_decimal::Decimal;
use sqlx::{Pool, Sqlite};

use crate::core::{totals, Totals};
use crate::database::db::queries;

/// Aggregate state the badge rules are evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct UserStats {
    pub transaction_count: i64,
    pub budget_count: i64,
    pub totals: Totals,
}

const SAVINGS_SUPERSTAR_THRESHOLD: i64 = 100_000;

/// The fixed rule set, in evaluation order. Rules are non-exclusive; one
/// mutation can satisfy several at once.
pub fn due_badges(stats: &UserStats) -> Vec<(&'static str, &'static str)> {
    let mut due = Vec::new();

    if stats.transaction_count == 1 {
        due.push(("First Step", "Added your first transaction"));
    }
    if stats.transaction_count >= 10 {
        due.push(("Getting Started", "Added 10 transactions"));
    }
    if stats.budget_count >= 1 {
        due.push(("Budget Planner", "Set your first budget"));
    }
    if stats.totals.balance() > Decimal::from(SAVINGS_SUPERSTAR_THRESHOLD) {
        due.push(("Savings Superstar", "Saved over 100,000"));
    }

    due
}

/// Re-evaluate the rule set for a user and grant whatever is due.
///
/// Runs after every mutating action and on the achievements page. The
/// uniqueness constraint on (user_id, name) makes repeated evaluation
/// idempotent, including under concurrent requests.
pub async fn evaluate_for_user(pool: &Pool<Sqlite>, user_id: i64) -> Result<(), sqlx::Error> {
    let transactions = queries::get_transactions_by_user(pool, user_id).await?;
    let budget_count = queries::count_budgets_by_user(pool, user_id).await?;

    let stats = UserStats {
        transaction_count: transactions.len() as i64,
        budget_count,
        totals: totals(&transactions),
    };

    let today = Local::now().date_naive();
    for (name, description) in due_badges(&stats) {
        let granted = queries::grant_badge(pool, user_id, name, description, today).await?;
        if granted {
            tracing::info!(user_id, badge = name, "badge granted");
        }
    }

    Ok(())
}
