use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::SignedCookieJar;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

use crate::backend::{auth, views, AppState};
use crate::core::{self, achievements, advice, budget, goal};
use crate::database::db::queries;
use crate::database::models::{TransactionKind, User};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct Notice {
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    pub amount: String,
    pub category: String,
    pub description: Option<String>,
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct BudgetForm {
    pub category: String,
    pub limit: String,
}

#[derive(Debug, Deserialize)]
pub struct GoalForm {
    pub name: String,
    pub target_amount: String,
    pub deadline: String,
}

/// Resolve the session cookie to a full user row. A session pointing at a
/// missing user is treated as not logged in.
async fn current_user(state: &AppState, jar: &SignedCookieJar) -> Result<User, AppError> {
    let user_id = auth::require_session(jar)?;
    match queries::get_user_by_id(&state.db, user_id).await {
        Ok(user) => Ok(user),
        Err(sqlx::Error::RowNotFound) => Err(AppError::Unauthenticated),
        Err(err) => Err(err.into()),
    }
}

/*==========Public pages===========*/

pub async fn home(jar: SignedCookieJar, Query(q): Query<Notice>) -> Html<String> {
    let logged_in = auth::require_session(&jar).is_ok();
    views::home_page(logged_in, q.notice.as_deref())
}

pub async fn register_form(Query(q): Query<Notice>) -> Html<String> {
    views::register_page(q.notice.as_deref())
}

pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    if queries::find_user_by_email(&state.db, &form.email)
        .await?
        .is_some()
    {
        return Err(AppError::EmailTaken);
    }

    let password_hash = auth::hash_password(&form.password)?;
    // The UNIQUE constraint on email backs up the lookup above when two
    // registrations race.
    let user_id = queries::create_user(&state.db, &form.name, &form.email, &password_hash)
        .await
        .map_err(|err| {
            if err
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation())
            {
                AppError::EmailTaken
            } else {
                AppError::Database(err)
            }
        })?;

    tracing::info!(user_id, "new user registered");
    Ok(views::flash_redirect("/login", "Registration successful!").into_response())
}

pub async fn login_form(Query(q): Query<Notice>) -> Html<String> {
    views::login_page(q.notice.as_deref())
}

pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    // Same error for unknown email and wrong password.
    let user = queries::find_user_by_email(&state.db, &form.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !auth::verify_password(&user.password_hash, &form.password) {
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!(user_id = user.user_id, "user logged in");
    let jar = jar.add(auth::session_cookie(user.user_id));
    Ok((jar, Redirect::to("/dashboard")).into_response())
}

pub async fn logout(jar: SignedCookieJar) -> impl IntoResponse {
    let jar = jar.remove(auth::removal_cookie());
    (jar, Redirect::to("/"))
}

/*==========Gated pages===========*/

pub async fn dashboard(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(q): Query<Notice>,
) -> Result<Response, AppError> {
    let user = current_user(&state, &jar).await?;
    let transactions = queries::get_transactions_by_user(&state.db, user.user_id).await?;
    let budgets = queries::get_budgets_by_user(&state.db, user.user_id).await?;
    let goals = queries::get_goals_by_user(&state.db, user.user_id).await?;

    let totals = core::totals(&transactions);
    let statuses = budget::evaluate(&budgets, &transactions);
    let progress = goal::evaluate(&goals, &transactions, Local::now().date_naive());
    let tips = advice::tips(&statuses, &totals);

    let recent = &transactions[..transactions.len().min(5)];
    Ok(views::dashboard_page(
        &user.name,
        &totals,
        recent,
        &statuses,
        &progress,
        &tips,
        q.notice.as_deref(),
    )
    .into_response())
}

pub async fn add_transaction_form(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(q): Query<Notice>,
) -> Result<Response, AppError> {
    current_user(&state, &jar).await?;
    Ok(views::add_transaction_page(q.notice.as_deref()).into_response())
}

/// Validation failures are recovered here into a flash redirect back to
/// the form the user came from; nothing bubbles past the request.
fn recover_validation(
    result: Result<Response, AppError>,
    form_path: &str,
) -> Result<Response, AppError> {
    match result {
        Err(AppError::Validation(message)) => {
            Ok(views::flash_redirect(form_path, &message).into_response())
        }
        other => other,
    }
}

fn parse_amount(raw: &str) -> Result<Decimal, AppError> {
    match Decimal::from_str(raw.trim()) {
        Ok(amount) if amount >= Decimal::ZERO => Ok(amount),
        _ => Err(AppError::Validation(
            "Amount must be a non-negative number.".to_string(),
        )),
    }
}

pub async fn add_transaction(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<TransactionForm>,
) -> Result<Response, AppError> {
    let result = add_transaction_inner(&state, &jar, form).await;
    recover_validation(result, "/add_transaction")
}

async fn add_transaction_inner(
    state: &AppState,
    jar: &SignedCookieJar,
    form: TransactionForm,
) -> Result<Response, AppError> {
    let user = current_user(state, jar).await?;

    let amount = parse_amount(&form.amount)?;
    let kind = TransactionKind::parse(&form.kind).ok_or_else(|| {
        AppError::Validation("Type must be income or expense.".to_string())
    })?;
    let description = form.description.as_deref().filter(|d| !d.is_empty());

    let transaction_id = queries::create_transaction(
        &state.db,
        user.user_id,
        amount,
        &form.category,
        description,
        kind,
        Local::now().date_naive(),
    )
    .await?;
    tracing::debug!(user_id = user.user_id, transaction_id, "transaction recorded");

    achievements::evaluate_for_user(&state.db, user.user_id).await?;

    Ok(views::flash_redirect("/dashboard", "Transaction added successfully!").into_response())
}

pub async fn transactions(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(q): Query<Notice>,
) -> Result<Response, AppError> {
    let user = current_user(&state, &jar).await?;
    let transactions = queries::get_transactions_by_user(&state.db, user.user_id).await?;
    Ok(views::transactions_page(&transactions, q.notice.as_deref()).into_response())
}

pub async fn set_budget_form(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(q): Query<Notice>,
) -> Result<Response, AppError> {
    current_user(&state, &jar).await?;
    Ok(views::set_budget_page(q.notice.as_deref()).into_response())
}

pub async fn set_budget(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<BudgetForm>,
) -> Result<Response, AppError> {
    let result = set_budget_inner(&state, &jar, form).await;
    recover_validation(result, "/set_budget")
}

async fn set_budget_inner(
    state: &AppState,
    jar: &SignedCookieJar,
    form: BudgetForm,
) -> Result<Response, AppError> {
    let user = current_user(state, jar).await?;

    // Numeric parsing is the only server-side check on the limit.
    let limit = Decimal::from_str(form.limit.trim())
        .map_err(|_| AppError::Validation("Limit must be a number.".to_string()))?;

    queries::upsert_budget(&state.db, user.user_id, &form.category, limit).await?;

    Ok(views::flash_redirect("/budgets", "Budget updated successfully!").into_response())
}

pub async fn budgets(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(q): Query<Notice>,
) -> Result<Response, AppError> {
    let user = current_user(&state, &jar).await?;
    let budgets = queries::get_budgets_by_user(&state.db, user.user_id).await?;
    let transactions = queries::get_transactions_by_user(&state.db, user.user_id).await?;

    let statuses = budget::evaluate(&budgets, &transactions);
    Ok(views::budgets_page(&statuses, q.notice.as_deref()).into_response())
}

pub async fn set_goal_form(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(q): Query<Notice>,
) -> Result<Response, AppError> {
    current_user(&state, &jar).await?;
    Ok(views::set_goal_page(q.notice.as_deref()).into_response())
}

pub async fn set_goal(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<GoalForm>,
) -> Result<Response, AppError> {
    let result = set_goal_inner(&state, &jar, form).await;
    recover_validation(result, "/set_goal")
}

async fn set_goal_inner(
    state: &AppState,
    jar: &SignedCookieJar,
    form: GoalForm,
) -> Result<Response, AppError> {
    let user = current_user(state, jar).await?;

    let target_amount = Decimal::from_str(form.target_amount.trim())
        .map_err(|_| AppError::Validation("Target amount must be a number.".to_string()))?;
    let deadline = NaiveDate::parse_from_str(form.deadline.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::Validation("Deadline must be a date in YYYY-MM-DD format.".to_string())
    })?;

    queries::create_goal(&state.db, user.user_id, &form.name, target_amount, deadline).await?;

    Ok(views::flash_redirect("/goals", "Goal set successfully!").into_response())
}

pub async fn goals(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(q): Query<Notice>,
) -> Result<Response, AppError> {
    let user = current_user(&state, &jar).await?;
    let goals = queries::get_goals_by_user(&state.db, user.user_id).await?;
    let transactions = queries::get_transactions_by_user(&state.db, user.user_id).await?;

    let progress = goal::evaluate(&goals, &transactions, Local::now().date_naive());
    Ok(views::goals_page(&progress, q.notice.as_deref()).into_response())
}

pub async fn achievements_page(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(q): Query<Notice>,
) -> Result<Response, AppError> {
    let user = current_user(&state, &jar).await?;

    // Viewing the page re-runs the rule set, so badges earned through
    // budget changes show up here without another transaction.
    achievements::evaluate_for_user(&state.db, user.user_id).await?;

    let badges = queries::get_badges_by_user(&state.db, user.user_id).await?;
    Ok(views::achievements_page(&badges, q.notice.as_deref()).into_response())
}
