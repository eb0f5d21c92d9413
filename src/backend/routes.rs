use axum::routing::get;
use axum::Router;

use crate::backend::{handlers, AppState};

pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home))
        .route(
            "/register",
            get(handlers::register_form).post(handlers::register),
        )
        .route("/login", get(handlers::login_form).post(handlers::login))
        .route("/logout", get(handlers::logout))
        .route("/dashboard", get(handlers::dashboard))
        .route(
            "/add_transaction",
            get(handlers::add_transaction_form).post(handlers::add_transaction),
        )
        .route("/transactions", get(handlers::transactions))
        .route(
            "/set_budget",
            get(handlers::set_budget_form).post(handlers::set_budget),
        )
        .route("/budgets", get(handlers::budgets))
        .route(
            "/set_goal",
            get(handlers::set_goal_form).post(handlers::set_goal),
        )
        .route("/goals", get(handlers::goals))
        .route("/achievements", get(handlers::achievements_page))
}
