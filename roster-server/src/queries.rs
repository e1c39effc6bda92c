use roster_core::models::User;
use sqlx::{postgres::PgRow, Row};

/// SQL statements issued against the `users` table
pub struct Queries;

impl Queries {
    pub const CREATE_USERS_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS users (
            username TEXT NOT NULL,
            email TEXT NOT NULL
        )
    "#;

    pub const INSERT_USER: &'static str = r#"
        INSERT INTO users (username, email)
        VALUES ($1, $2)
    "#;

    // No ORDER BY: rows come back in whatever order the engine yields them.
    pub const LIST_USERS: &'static str = r#"
        SELECT username, email
        FROM users
    "#;
}

/// Parse a user from a `users` row
pub fn parse_user(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        username: row.try_get("username")?,
        email: row.try_get("email")?,
    })
}
