use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::Row;
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

use crate::database::models::{Badge, Budget, Goal, Transaction, TransactionKind, User};

/*
CRUD logic for the five relations. Monetary amounts are stored as TEXT and
parsed back into Decimal on read.
 */

fn parse_decimal(text: &str, column: &str) -> Result<Decimal, sqlx::Error> {
    Decimal::from_str(text).map_err(|e| {
        sqlx::Error::Decode(format!("Invalid Decimal format for {}: {}", column, e).into())
    })
}

fn parse_kind(text: &str) -> Result<TransactionKind, sqlx::Error> {
    TransactionKind::parse(text)
        .ok_or_else(|| sqlx::Error::Decode(format!("Unknown transaction kind: {}", text).into()))
}

/*==========User Queries===========*/

pub async fn create_user(
    pool: &Pool<Sqlite>,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO users (name, email, password_hash)
        VALUES (?, ?, ?)
        RETURNING user_id
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(row.get("user_id"))
}

// Case-sensitive exact match on email.
pub async fn find_user_by_email(
    pool: &Pool<Sqlite>,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, name, email, password_hash
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn get_user_by_id(pool: &Pool<Sqlite>, user_id: i64) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, name, email, password_hash
        FROM users
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/*==========Transaction Queries===========*/

pub async fn create_transaction(
    pool: &Pool<Sqlite>,
    user_id: i64,
    amount: Decimal,
    category: &str,
    description: Option<&str>,
    kind: TransactionKind,
    txn_date: NaiveDate,
) -> Result<i64, sqlx::Error> {
    let amount_str = amount.to_string();

    let row = sqlx::query(
        r#"
        INSERT INTO transactions (user_id, amount, category, description, kind, txn_date)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING transaction_id
        "#,
    )
    .bind(user_id)
    .bind(amount_str)
    .bind(category)
    .bind(description)
    .bind(kind.as_str())
    .bind(txn_date)
    .fetch_one(pool)
    .await?;

    Ok(row.get("transaction_id"))
}

// All transactions of a user, newest first.
pub async fn get_transactions_by_user(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<Transaction>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT transaction_id, user_id, amount, category, description, kind, txn_date
        FROM transactions
        WHERE user_id = ?
        ORDER BY txn_date DESC, transaction_id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|row| {
        let amount_text: String = row.get("amount");
        let kind_text: String = row.get("kind");

        Ok(Transaction {
            transaction_id: row.get("transaction_id"),
            user_id: row.get("user_id"),
            amount: parse_decimal(&amount_text, "amount")?,
            category: row.get("category"),
            description: row.get("description"),
            kind: parse_kind(&kind_text)?,
            txn_date: row.get("txn_date"),
        })
    })
    .collect::<Result<Vec<Transaction>, sqlx::Error>>()
}

/*==========Budget Queries===========*/

/* Upsert semantics are enforced here, not by a uniqueness constraint:
look up the existing (user, category) row inside a store transaction,
update its limit in place if found, otherwise insert a new row. */
pub async fn upsert_budget(
    pool: &Pool<Sqlite>,
    user_id: i64,
    category: &str,
    limit_amount: Decimal,
) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let limit_str = limit_amount.to_string();

    let existing = sqlx::query(
        r#"
        SELECT budget_id FROM budgets
        WHERE user_id = ? AND category = ?
        "#,
    )
    .bind(user_id)
    .bind(category)
    .fetch_optional(&mut *tx)
    .await?;

    let budget_id = match existing {
        Some(row) => {
            let budget_id: i64 = row.get("budget_id");
            sqlx::query(
                r#"
                UPDATE budgets SET limit_amount = ?
                WHERE budget_id = ?
                "#,
            )
            .bind(&limit_str)
            .bind(budget_id)
            .execute(&mut *tx)
            .await?;
            budget_id
        }
        None => {
            let row = sqlx::query(
                r#"
                INSERT INTO budgets (user_id, category, limit_amount)
                VALUES (?, ?, ?)
                RETURNING budget_id
                "#,
            )
            .bind(user_id)
            .bind(category)
            .bind(&limit_str)
            .fetch_one(&mut *tx)
            .await?;
            row.get("budget_id")
        }
    };

    tx.commit().await?;

    Ok(budget_id)
}

pub async fn get_budgets_by_user(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<Budget>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT budget_id, user_id, category, limit_amount
        FROM budgets
        WHERE user_id = ?
        ORDER BY budget_id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|row| {
        let limit_text: String = row.get("limit_amount");

        Ok(Budget {
            budget_id: row.get("budget_id"),
            user_id: row.get("user_id"),
            category: row.get("category"),
            limit_amount: parse_decimal(&limit_text, "limit_amount")?,
        })
    })
    .collect::<Result<Vec<Budget>, sqlx::Error>>()
}

pub async fn count_budgets_by_user(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM budgets WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(row.get("n"))
}

/*==========Goal Queries===========*/

pub async fn create_goal(
    pool: &Pool<Sqlite>,
    user_id: i64,
    name: &str,
    target_amount: Decimal,
    deadline: NaiveDate,
) -> Result<i64, sqlx::Error> {
    let target_str = target_amount.to_string();

    let row = sqlx::query(
        r#"
        INSERT INTO goals (user_id, name, target_amount, deadline)
        VALUES (?, ?, ?, ?)
        RETURNING goal_id
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(target_str)
    .bind(deadline)
    .fetch_one(pool)
    .await?;

    Ok(row.get("goal_id"))
}

pub async fn get_goals_by_user(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<Goal>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT goal_id, user_id, name, target_amount, deadline
        FROM goals
        WHERE user_id = ?
        ORDER BY goal_id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|row| {
        let target_text: String = row.get("target_amount");

        Ok(Goal {
            goal_id: row.get("goal_id"),
            user_id: row.get("user_id"),
            name: row.get("name"),
            target_amount: parse_decimal(&target_text, "target_amount")?,
            deadline: row.get("deadline"),
        })
    })
    .collect::<Result<Vec<Goal>, sqlx::Error>>()
}

/*==========Badge Queries===========*/

/* The UNIQUE (user_id, name) constraint makes the grant idempotent: a
conflicting insert means the badge was already earned and is a no-op.
Returns true only when the badge was newly granted. */
pub async fn grant_badge(
    pool: &Pool<Sqlite>,
    user_id: i64,
    name: &str,
    description: &str,
    earned_date: NaiveDate,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO badges (user_id, name, description, earned_date)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (user_id, name) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(description)
    .bind(earned_date)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_badges_by_user(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<Badge>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT badge_id, user_id, name, description, earned_date
        FROM badges
        WHERE user_id = ?
        ORDER BY badge_id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|row| {
        Ok(Badge {
            badge_id: row.get("badge_id"),
            user_id: row.get("user_id"),
            name: row.get("name"),
            description: row.get("description"),
            earned_date: row.get("earned_date"),
        })
    })
    .collect::<Result<Vec<Badge>, sqlx::Error>>()
}
