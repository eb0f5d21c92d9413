use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use thiserror::Error;

/// Request-level error taxonomy. Everything here is recovered at the
/// request boundary; nothing is fatal to the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Email already exists!")]
    EmailTaken,

    #[error("Invalid email or password!")]
    InvalidCredentials,

    #[error("Please log in to continue.")]
    Unauthenticated,

    #[error("{0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing failed")]
    PasswordHash,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthenticated => Redirect::to("/login").into_response(),
            AppError::EmailTaken => {
                crate::backend::views::flash_redirect("/register", &self.to_string())
                    .into_response()
            }
            AppError::InvalidCredentials => {
                crate::backend::views::flash_redirect("/login", &self.to_string()).into_response()
            }
            AppError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                Html(format!("<p>{}</p>", message)),
            )
                .into_response(),
            AppError::Database(err) => {
                tracing::error!("database error while handling request: {:#?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<p>Something went wrong. Please try again.</p>".to_string()),
                )
                    .into_response()
            }
            AppError::PasswordHash => {
                tracing::error!("password hashing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<p>Something went wrong. Please try again.</p>".to_string()),
                )
                    .into_response()
            }
        }
    }
}
