use rand::seq::SliceRandom;
use rust_decimal::Decimal;

use crate::core::budget::{BudgetStatus, BudgetTier};
use crate::core::Totals;

const MOTIVATIONAL_TIPS: [&str; 5] = [
    "Track every expense, no matter how small.",
    "Pay yourself first: move savings aside on payday.",
    "Review your budgets once a week.",
    "Small recurring costs add up faster than you think.",
    "Set a goal with a deadline and watch it shrink.",
];

/// Assemble the tips shown on the dashboard: one random motivational tip
/// plus messages computed from budget health and the savings ratio.
/// Always returns at least one entry. Nothing here is persisted.
pub fn tips(statuses: &[BudgetStatus], totals: &Totals) -> Vec<String> {
    let mut out = Vec::new();

    let mut rng = rand::thread_rng();
    let motivational = MOTIVATIONAL_TIPS
        .choose(&mut rng)
        .copied()
        .unwrap_or(MOTIVATIONAL_TIPS[0]);
    out.push(motivational.to_string());

    for status in statuses {
        match status.tier {
            BudgetTier::Exceeded => out.push(format!(
                "You have exceeded your {} budget by {}.",
                status.category,
                status.spent - status.limit
            )),
            BudgetTier::Warning => out.push(format!(
                "You are close to your {} budget limit ({}% used).",
                status.category,
                status.percentage.round()
            )),
            BudgetTier::Ok => {}
        }
    }

    if totals.income > Decimal::ZERO {
        let ratio = totals.balance() / totals.income * Decimal::from(100);
        if ratio >= Decimal::from(20) {
            out.push(format!(
                "Great job! You are saving {}% of your income.",
                ratio.round()
            ));
        } else if ratio >= Decimal::ZERO {
            out.push("Try to save at least 20% of your income.".to_string());
        } else {
            out.push("You are spending more than you earn this period.".to_string());
        }
    }

    out
}
