use rust_decimal::Decimal;

use crate::database::models::{Budget, Transaction, TransactionKind};

/// Budget health classification derived from spent-vs-limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetTier {
    Ok,
    Warning,
    Exceeded,
}

impl BudgetTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Ok => "ok",
            BudgetTier::Warning => "warning",
            BudgetTier::Exceeded => "exceeded",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BudgetStatus {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub tier: BudgetTier,
}

// Warning kicks in above 85% of the limit.
const WARNING_RATIO_PERCENT: i64 = 85;

/// Derive a status row for each budget from the user's ledger.
///
/// `spent` sums expense entries whose category matches exactly
/// (case-sensitive) and is all-time: budgets carry no period window, so
/// spending never resets. Zero-limit budgets report 0% rather than
/// dividing by zero.
pub fn evaluate(budgets: &[Budget], transactions: &[Transaction]) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|budget| {
            let spent: Decimal = transactions
                .iter()
                .filter(|t| t.kind == TransactionKind::Expense && t.category == budget.category)
                .map(|t| t.amount)
                .sum();

            let limit = budget.limit_amount;
            let percentage = if limit > Decimal::ZERO {
                spent / limit * Decimal::from(100)
            } else {
                Decimal::ZERO
            };

            let warning_threshold = limit * Decimal::from(WARNING_RATIO_PERCENT) / Decimal::from(100);
            let tier = if spent > limit {
                BudgetTier::Exceeded
            } else if spent > warning_threshold {
                BudgetTier::Warning
            } else {
                BudgetTier::Ok
            };

            BudgetStatus {
                category: budget.category.clone(),
                limit,
                spent,
                remaining: limit - spent,
                percentage,
                tier,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tests::txn;

    fn budget(category: &str, limit: i64) -> Budget {
        Budget {
            budget_id: 0,
            user_id: 1,
            category: category.to_string(),
            limit_amount: Decimal::from(limit),
        }
    }

    #[test]
    fn no_budgets_yields_empty_list() {
        let ledger = vec![txn(500, "Food", TransactionKind::Expense)];
        assert!(evaluate(&[], &ledger).is_empty());
    }

    #[test]
    fn percentage_and_remaining() {
        let budgets = vec![budget("Food", 1000)];
        let ledger = vec![
            txn(300, "Food", TransactionKind::Expense),
            txn(100, "Food", TransactionKind::Expense),
        ];

        let statuses = evaluate(&budgets, &ledger);

        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].spent, Decimal::from(400));
        assert_eq!(statuses[0].remaining, Decimal::from(600));
        assert_eq!(statuses[0].percentage, Decimal::from(40));
        assert_eq!(statuses[0].tier, BudgetTier::Ok);
    }

    #[test]
    fn warning_above_85_percent() {
        let budgets = vec![budget("Food", 1000)];
        let ledger = vec![
            txn(500, "Food", TransactionKind::Expense),
            txn(400, "Food", TransactionKind::Expense),
        ];

        let statuses = evaluate(&budgets, &ledger);

        // 900 > 850 but not over the limit
        assert_eq!(statuses[0].tier, BudgetTier::Warning);
    }

    #[test]
    fn exceeded_when_spent_over_limit() {
        let budgets = vec![budget("Food", 1000)];
        let ledger = vec![txn(1001, "Food", TransactionKind::Expense)];

        assert_eq!(evaluate(&budgets, &ledger)[0].tier, BudgetTier::Exceeded);
    }

    #[test]
    fn exactly_at_limit_is_warning_not_exceeded() {
        let budgets = vec![budget("Food", 1000)];
        let ledger = vec![txn(1000, "Food", TransactionKind::Expense)];

        assert_eq!(evaluate(&budgets, &ledger)[0].tier, BudgetTier::Warning);
    }

    #[test]
    fn zero_limit_reports_zero_percentage() {
        let budgets = vec![budget("Misc", 0)];
        let ledger = vec![txn(50, "Misc", TransactionKind::Expense)];

        let statuses = evaluate(&budgets, &ledger);

        assert_eq!(statuses[0].percentage, Decimal::ZERO);
        assert_eq!(statuses[0].tier, BudgetTier::Exceeded);
    }

    #[test]
    fn category_match_is_case_sensitive() {
        let budgets = vec![budget("Food", 1000)];
        let ledger = vec![
            txn(600, "food", TransactionKind::Expense),
            txn(200, "Food", TransactionKind::Expense),
        ];

        assert_eq!(evaluate(&budgets, &ledger)[0].spent, Decimal::from(200));
    }

    #[test]
    fn income_does_not_count_as_spending() {
        let budgets = vec![budget("Food", 1000)];
        let ledger = vec![txn(900, "Food", TransactionKind::Income)];

        assert_eq!(evaluate(&budgets, &ledger)[0].spent, Decimal::ZERO);
    }
}
