pub mod achievements;
pub mod advice;
pub mod budget;
pub mod goal;

use rust_decimal::Decimal;

use crate::database::models::{Transaction, TransactionKind};

/// Lifetime income/expense totals for a user's ledger.
#[derive(Debug, Clone, Copy, Default)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl Totals {
    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();
    for t in transactions {
        match t.kind {
            TransactionKind::Income => totals.income += t.amount,
            TransactionKind::Expense => totals.expense += t.amount,
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub(crate) fn txn(amount: i64, category: &str, kind: TransactionKind) -> Transaction {
        Transaction {
            transaction_id: 0,
            user_id: 1,
            amount: Decimal::from(amount),
            category: category.to_string(),
            description: None,
            kind,
            txn_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        }
    }

    #[test]
    fn balance_is_income_minus_expense() {
        let ledger = vec![
            txn(5000, "Salary", TransactionKind::Income),
            txn(1200, "Rent", TransactionKind::Expense),
            txn(300, "Food", TransactionKind::Expense),
        ];

        let totals = totals(&ledger);

        assert_eq!(totals.income, Decimal::from(5000));
        assert_eq!(totals.expense, Decimal::from(1500));
        assert_eq!(totals.balance(), Decimal::from(3500));
    }
}
