//! Server-rendered HTML. Every page goes through `layout`; user-supplied
//! text is escaped before interpolation.

use axum::response::{Html, Redirect};
use url::form_urlencoded;

use crate::core::budget::BudgetStatus;
use crate::core::goal::GoalProgress;
use crate::core::Totals;
use crate::database::models::{Badge, Transaction};

/// Redirect-after-post with the flash notice carried in the query string.
pub fn flash_redirect(path: &str, notice: &str) -> Redirect {
    let encoded: String = form_urlencoded::byte_serialize(notice.as_bytes()).collect();
    Redirect::to(&format!("{}?notice={}", path, encoded))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn layout(title: &str, logged_in: bool, notice: Option<&str>, body: &str) -> Html<String> {
    let nav = if logged_in {
        concat!(
            r#"<a href="/dashboard">Dashboard</a> "#,
            r#"<a href="/add_transaction">Add Transaction</a> "#,
            r#"<a href="/transactions">Transactions</a> "#,
            r#"<a href="/budgets">Budgets</a> "#,
            r#"<a href="/goals">Goals</a> "#,
            r#"<a href="/achievements">Achievements</a> "#,
            r#"<a href="/logout">Logout</a>"#,
        )
    } else {
        concat!(
            r#"<a href="/">Home</a> "#,
            r#"<a href="/register">Register</a> "#,
            r#"<a href="/login">Login</a>"#,
        )
    };
    let flash = notice
        .map(|n| format!(r#"<p class="flash">{}</p>"#, escape(n)))
        .unwrap_or_default();

    Html(format!(
        "<!DOCTYPE html>\n<html><head><title>{} - Finance Tracker</title></head>\n\
         <body><nav>{}</nav>{}\n{}</body></html>",
        escape(title),
        nav,
        flash,
        body
    ))
}

pub fn home_page(logged_in: bool, notice: Option<&str>) -> Html<String> {
    layout(
        "Home",
        logged_in,
        notice,
        "<h1>Finance Tracker</h1>\
         <p>Track your income and expenses, set budgets and savings goals, and earn badges along the way.</p>",
    )
}

pub fn register_page(notice: Option<&str>) -> Html<String> {
    layout(
        "Register",
        false,
        notice,
        r#"<h1>Register</h1>
<form method="post" action="/register">
<label>Name <input type="text" name="name" required></label>
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Register</button>
</form>"#,
    )
}

pub fn login_page(notice: Option<&str>) -> Html<String> {
    layout(
        "Login",
        false,
        notice,
        r#"<h1>Login</h1>
<form method="post" action="/login">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Login</button>
</form>"#,
    )
}

fn transaction_rows(transactions: &[Transaction]) -> String {
    transactions
        .iter()
        .map(|t| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                t.txn_date,
                escape(&t.category),
                escape(t.description.as_deref().unwrap_or("")),
                t.kind.as_str(),
                t.amount
            )
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
pub fn dashboard_page(
    name: &str,
    totals: &Totals,
    recent: &[Transaction],
    statuses: &[BudgetStatus],
    progress: &[GoalProgress],
    tips: &[String],
    notice: Option<&str>,
) -> Html<String> {
    let tips_items: String = tips
        .iter()
        .map(|tip| format!("<li>{}</li>", escape(tip)))
        .collect();
    let budget_items: String = statuses
        .iter()
        .map(|s| {
            format!(
                "<li>{}: {} of {} spent ({})</li>",
                escape(&s.category),
                s.spent,
                s.limit,
                s.tier.as_str()
            )
        })
        .collect();
    let goal_items: String = progress
        .iter()
        .map(|p| format!("<li>{}: {}%</li>", escape(&p.goal.name), p.progress_percent))
        .collect();

    let body = format!(
        "<h1>Welcome, {}</h1>\
         <p>Balance: {} (income {} / expenses {})</p>\
         <h2>Recent transactions</h2>\
         <table>{}</table>\
         <h2>Budgets</h2><ul>{}</ul>\
         <h2>Goals</h2><ul>{}</ul>\
         <h2>Tips</h2><ul>{}</ul>",
        escape(name),
        totals.balance(),
        totals.income,
        totals.expense,
        transaction_rows(recent),
        budget_items,
        goal_items,
        tips_items
    );

    layout("Dashboard", true, notice, &body)
}

pub fn add_transaction_page(notice: Option<&str>) -> Html<String> {
    layout(
        "Add Transaction",
        true,
        notice,
        r#"<h1>Add Transaction</h1>
<form method="post" action="/add_transaction">
<label>Amount <input type="text" name="amount" required></label>
<label>Category <input type="text" name="category" required></label>
<label>Description <input type="text" name="description"></label>
<label>Type <select name="kind">
<option value="income">Income</option>
<option value="expense">Expense</option>
</select></label>
<button type="submit">Add</button>
</form>"#,
    )
}

pub fn transactions_page(transactions: &[Transaction], notice: Option<&str>) -> Html<String> {
    let body = format!(
        "<h1>Transactions</h1>\
         <table><tr><th>Date</th><th>Category</th><th>Description</th><th>Type</th><th>Amount</th></tr>{}</table>",
        transaction_rows(transactions)
    );
    layout("Transactions", true, notice, &body)
}

pub fn set_budget_page(notice: Option<&str>) -> Html<String> {
    layout(
        "Set Budget",
        true,
        notice,
        r#"<h1>Set Budget</h1>
<form method="post" action="/set_budget">
<label>Category <input type="text" name="category" required></label>
<label>Limit <input type="text" name="limit" required></label>
<button type="submit">Save</button>
</form>"#,
    )
}

pub fn budgets_page(statuses: &[BudgetStatus], notice: Option<&str>) -> Html<String> {
    let rows: String = statuses
        .iter()
        .map(|s| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}%</td><td>{}</td></tr>",
                escape(&s.category),
                s.limit,
                s.spent,
                s.remaining,
                s.percentage.round(),
                s.tier.as_str()
            )
        })
        .collect();
    let body = format!(
        "<h1>Budgets</h1>\
         <p><a href=\"/set_budget\">Set a budget</a></p>\
         <table><tr><th>Category</th><th>Limit</th><th>Spent</th><th>Remaining</th><th>Used</th><th>Status</th></tr>{}</table>",
        rows
    );
    layout("Budgets", true, notice, &body)
}

pub fn set_goal_page(notice: Option<&str>) -> Html<String> {
    layout(
        "Set Goal",
        true,
        notice,
        r#"<h1>Set Goal</h1>
<form method="post" action="/set_goal">
<label>Name <input type="text" name="name" required></label>
<label>Target amount <input type="text" name="target_amount" required></label>
<label>Deadline <input type="date" name="deadline" required></label>
<button type="submit">Save</button>
</form>"#,
    )
}

pub fn goals_page(progress: &[GoalProgress], notice: Option<&str>) -> Html<String> {
    let rows: String = progress
        .iter()
        .map(|p| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}%</td></tr>",
                escape(&p.goal.name),
                p.goal.target_amount,
                p.goal.deadline,
                p.progress_percent
            )
        })
        .collect();
    let body = format!(
        "<h1>Goals</h1>\
         <p><a href=\"/set_goal\">Set a goal</a></p>\
         <table><tr><th>Name</th><th>Target</th><th>Deadline</th><th>Progress</th></tr>{}</table>",
        rows
    );
    layout("Goals", true, notice, &body)
}

pub fn achievements_page(badges: &[Badge], notice: Option<&str>) -> Html<String> {
    let items: String = badges
        .iter()
        .map(|b| {
            format!(
                "<li><strong>{}</strong> - {} (earned {})</li>",
                escape(&b.name),
                escape(&b.description),
                b.earned_date
            )
        })
        .collect();
    let body = if badges.is_empty() {
        "<h1>Achievements</h1><p>No badges yet. Add a transaction to get started!</p>".to_string()
    } else {
        format!("<h1>Achievements</h1><ul>{}</ul>", items)
    };
    layout("Achievements", true, notice, &body)
}
