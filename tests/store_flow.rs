use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use finance_tracker::core::budget::{self, BudgetTier};
use finance_tracker::core::{achievements, totals};
use finance_tracker::database::db::{migrate, queries};
use finance_tracker::database::models::TransactionKind;

async fn test_pool() -> Pool<Sqlite> {
    // One connection so the in-memory database is shared across queries.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    migrate::run_migrations(&pool)
        .await
        .expect("failed to run migrations");
    pool
}

async fn test_user(pool: &Pool<Sqlite>) -> i64 {
    queries::create_user(pool, "Alice", "alice@example.com", "hash")
        .await
        .expect("failed to create user")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn duplicate_email_violates_unique_constraint() {
    let pool = test_pool().await;
    test_user(&pool).await;

    let found = queries::find_user_by_email(&pool, "alice@example.com")
        .await
        .unwrap();
    assert!(found.is_some());

    let second = queries::create_user(&pool, "Alice Again", "alice@example.com", "hash").await;
    let err = second.expect_err("duplicate email should be rejected");
    assert!(err
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation()));
}

#[tokio::test]
async fn email_lookup_is_case_sensitive() {
    let pool = test_pool().await;
    test_user(&pool).await;

    let found = queries::find_user_by_email(&pool, "Alice@example.com")
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn transaction_roundtrip_preserves_fields() {
    let pool = test_pool().await;
    let user_id = test_user(&pool).await;

    queries::create_transaction(
        &pool,
        user_id,
        Decimal::new(1234, 2), // 12.34
        "Food",
        Some("lunch"),
        TransactionKind::Expense,
        date(2026, 8, 1),
    )
    .await
    .unwrap();
    queries::create_transaction(
        &pool,
        user_id,
        Decimal::from(5000),
        "Salary",
        None,
        TransactionKind::Income,
        date(2026, 8, 25),
    )
    .await
    .unwrap();

    let transactions = queries::get_transactions_by_user(&pool, user_id).await.unwrap();

    // Newest first
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].category, "Salary");
    assert_eq!(transactions[0].kind, TransactionKind::Income);
    assert_eq!(transactions[1].amount, Decimal::new(1234, 2));
    assert_eq!(transactions[1].description.as_deref(), Some("lunch"));
    assert_eq!(transactions[1].txn_date, date(2026, 8, 1));

    let totals = totals(&transactions);
    assert_eq!(totals.balance(), Decimal::from(5000) - Decimal::new(1234, 2));
}

#[tokio::test]
async fn budget_upsert_updates_in_place() {
    let pool = test_pool().await;
    let user_id = test_user(&pool).await;

    let first_id = queries::upsert_budget(&pool, user_id, "Food", Decimal::from(1000))
        .await
        .unwrap();
    let second_id = queries::upsert_budget(&pool, user_id, "Food", Decimal::from(1500))
        .await
        .unwrap();

    assert_eq!(first_id, second_id);

    let budgets = queries::get_budgets_by_user(&pool, user_id).await.unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].limit_amount, Decimal::from(1500));
}

#[tokio::test]
async fn budget_upsert_keeps_distinct_categories_apart() {
    let pool = test_pool().await;
    let user_id = test_user(&pool).await;

    queries::upsert_budget(&pool, user_id, "Food", Decimal::from(1000))
        .await
        .unwrap();
    // Case-sensitive: "food" is a different category.
    queries::upsert_budget(&pool, user_id, "food", Decimal::from(200))
        .await
        .unwrap();

    let budgets = queries::get_budgets_by_user(&pool, user_id).await.unwrap();
    assert_eq!(budgets.len(), 2);
}

#[tokio::test]
async fn expense_without_budget_yields_no_statuses() {
    let pool = test_pool().await;
    let user_id = test_user(&pool).await;

    queries::create_transaction(
        &pool,
        user_id,
        Decimal::from(500),
        "Food",
        None,
        TransactionKind::Expense,
        date(2026, 8, 1),
    )
    .await
    .unwrap();

    let budgets = queries::get_budgets_by_user(&pool, user_id).await.unwrap();
    let transactions = queries::get_transactions_by_user(&pool, user_id).await.unwrap();

    assert!(budget::evaluate(&budgets, &transactions).is_empty());
}

#[tokio::test]
async fn spending_ninety_percent_of_budget_is_a_warning() {
    let pool = test_pool().await;
    let user_id = test_user(&pool).await;

    queries::upsert_budget(&pool, user_id, "Food", Decimal::from(1000))
        .await
        .unwrap();
    for amount in [400, 300, 200] {
        queries::create_transaction(
            &pool,
            user_id,
            Decimal::from(amount),
            "Food",
            None,
            TransactionKind::Expense,
            date(2026, 8, 1),
        )
        .await
        .unwrap();
    }

    let budgets = queries::get_budgets_by_user(&pool, user_id).await.unwrap();
    let transactions = queries::get_transactions_by_user(&pool, user_id).await.unwrap();
    let statuses = budget::evaluate(&budgets, &transactions);

    assert_eq!(statuses[0].spent, Decimal::from(900));
    assert_eq!(statuses[0].tier, BudgetTier::Warning);
}

#[tokio::test]
async fn badge_grant_is_idempotent() {
    let pool = test_pool().await;
    let user_id = test_user(&pool).await;

    let first = queries::grant_badge(&pool, user_id, "First Step", "desc", date(2026, 8, 28))
        .await
        .unwrap();
    let second = queries::grant_badge(&pool, user_id, "First Step", "desc", date(2026, 8, 28))
        .await
        .unwrap();

    assert!(first);
    assert!(!second);

    let badges = queries::get_badges_by_user(&pool, user_id).await.unwrap();
    assert_eq!(badges.len(), 1);
}

#[tokio::test]
async fn first_transaction_earns_first_step_once() {
    let pool = test_pool().await;
    let user_id = test_user(&pool).await;

    queries::create_transaction(
        &pool,
        user_id,
        Decimal::from(50),
        "Food",
        None,
        TransactionKind::Expense,
        date(2026, 8, 1),
    )
    .await
    .unwrap();

    // Evaluating repeatedly must not duplicate the grant.
    achievements::evaluate_for_user(&pool, user_id).await.unwrap();
    achievements::evaluate_for_user(&pool, user_id).await.unwrap();

    let badges = queries::get_badges_by_user(&pool, user_id).await.unwrap();
    assert_eq!(badges.len(), 1);
    assert_eq!(badges[0].name, "First Step");

    // A second transaction does not reach the Getting Started threshold.
    queries::create_transaction(
        &pool,
        user_id,
        Decimal::from(20),
        "Food",
        None,
        TransactionKind::Expense,
        date(2026, 8, 2),
    )
    .await
    .unwrap();
    achievements::evaluate_for_user(&pool, user_id).await.unwrap();

    let badges = queries::get_badges_by_user(&pool, user_id).await.unwrap();
    assert_eq!(badges.len(), 1);
}

#[tokio::test]
async fn ten_transactions_earn_getting_started() {
    let pool = test_pool().await;
    let user_id = test_user(&pool).await;

    for day in 1..=10 {
        queries::create_transaction(
            &pool,
            user_id,
            Decimal::from(10),
            "Misc",
            None,
            TransactionKind::Expense,
            date(2026, 8, day),
        )
        .await
        .unwrap();
        achievements::evaluate_for_user(&pool, user_id).await.unwrap();
    }

    let badges = queries::get_badges_by_user(&pool, user_id).await.unwrap();
    let names: Vec<&str> = badges.iter().map(|b| b.name.as_str()).collect();

    assert!(names.contains(&"First Step"));
    assert!(names.contains(&"Getting Started"));
}

#[tokio::test]
async fn setting_a_budget_earns_budget_planner_on_next_evaluation() {
    let pool = test_pool().await;
    let user_id = test_user(&pool).await;

    queries::upsert_budget(&pool, user_id, "Food", Decimal::from(1000))
        .await
        .unwrap();
    achievements::evaluate_for_user(&pool, user_id).await.unwrap();

    let badges = queries::get_badges_by_user(&pool, user_id).await.unwrap();
    assert_eq!(badges.len(), 1);
    assert_eq!(badges[0].name, "Budget Planner");
}

#[tokio::test]
async fn badges_are_scoped_per_user() {
    let pool = test_pool().await;
    let alice = test_user(&pool).await;
    let bob = queries::create_user(&pool, "Bob", "bob@example.com", "hash")
        .await
        .unwrap();

    queries::grant_badge(&pool, alice, "First Step", "desc", date(2026, 8, 28))
        .await
        .unwrap();

    let granted = queries::grant_badge(&pool, bob, "First Step", "desc", date(2026, 8, 28))
        .await
        .unwrap();
    assert!(granted);

    assert_eq!(queries::get_badges_by_user(&pool, alice).await.unwrap().len(), 1);
    assert_eq!(queries::get_badges_by_user(&pool, bob).await.unwrap().len(), 1);
}
