use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::database::models::{Goal, Transaction, TransactionKind};

#[derive(Debug, Clone)]
pub struct GoalProgress {
    pub goal: Goal,
    pub progress_percent: i64,
}

/// Net savings over transactions dated in the given calendar year.
pub fn year_to_date_savings(transactions: &[Transaction], year: i32) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.txn_date.year() == year)
        .map(|t| match t.kind {
            TransactionKind::Income => t.amount,
            TransactionKind::Expense => -t.amount,
        })
        .sum()
}

/// Derive progress for each goal from year-to-date savings.
///
/// Progress is floor(savings / target * 100), capped at 100. The lower
/// bound is deliberately not clamped: spending more than you earn shows
/// up as negative progress.
pub fn evaluate(goals: &[Goal], transactions: &[Transaction], today: NaiveDate) -> Vec<GoalProgress> {
    let savings = year_to_date_savings(transactions, today.year());

    goals
        .iter()
        .map(|goal| {
            let progress_percent = if goal.target_amount > Decimal::ZERO {
                let percent = (savings / goal.target_amount * Decimal::from(100)).floor();
                percent.to_i64().unwrap_or(0).min(100)
            } else {
                0
            };

            GoalProgress {
                goal: goal.clone(),
                progress_percent,
            }
        })
        .collect()
}
