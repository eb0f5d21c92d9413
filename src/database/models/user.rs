use sqlx::FromRow;

#[derive(FromRow, Debug, Clone)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
