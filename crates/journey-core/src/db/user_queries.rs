//! User account queries.

use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::{timestamp_column, timestamp_to_sql, uuid_column};
use crate::{
    error::{DatabaseResultExt, JourneyError, Result},
    models::User,
};

const USER_COLUMNS: &str = "id, email, username, name, password_hash, signup_date";
const INSERT_USER_SQL: &str = "INSERT INTO users (id, email, username, name, password_hash, signup_date) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_USER_SQL: &str =
    "UPDATE users SET email = ?1, username = ?2, name = ?3, password_hash = ?4 WHERE id = ?5";
const DELETE_USER_SQL: &str = "DELETE FROM users WHERE id = ?1";
const EMAIL_TAKEN_SQL: &str = "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1 AND id != ?2)";
const USERNAME_TAKEN_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1 AND id != ?2)";

impl super::Database {
    /// Stores a new user after checking email and username are free.
    pub fn create_user(&mut self, user: &User) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        ensure_unique(&tx, user)?;

        tx.execute(
            INSERT_USER_SQL,
            params![
                user.id.to_string(),
                user.email,
                user.username,
                user.name,
                user.password_hash,
                timestamp_to_sql(user.signup_date),
            ],
        )
        .db_context("Failed to insert user")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    pub fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        self.find_user("id", &id.to_string())
    }

    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.find_user("email", email)
    }

    pub fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.find_user("username", username)
    }

    fn find_user(&self, column: &str, value: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = ?1");
        self.connection
            .query_row(&query, params![value], read_user)
            .optional()
            .db_context("Failed to query user")
    }

    /// Writes back a modified user. Email and username must stay unique.
    pub fn update_user(&mut self, user: &User) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        ensure_unique(&tx, user)?;

        tx.execute(
            UPDATE_USER_SQL,
            params![
                user.email,
                user.username,
                user.name,
                user.password_hash,
                user.id.to_string(),
            ],
        )
        .db_context("Failed to update user")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Deletes a user. Their trips and journal entries go with them.
    pub fn delete_user(&self, id: Uuid) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_USER_SQL, params![id.to_string()])
            .db_context("Failed to delete user")?;
        Ok(deleted > 0)
    }
}

fn ensure_unique(conn: &rusqlite::Connection, user: &User) -> Result<()> {
    let id = user.id.to_string();

    let email_taken: bool = conn
        .query_row(EMAIL_TAKEN_SQL, params![user.email, id], |row| row.get(0))
        .db_context("Failed to check email")?;
    if email_taken {
        return Err(JourneyError::AlreadyExists {
            field: "email".to_string(),
        });
    }

    if let Some(username) = &user.username {
        let username_taken: bool = conn
            .query_row(USERNAME_TAKEN_SQL, params![username, id], |row| row.get(0))
            .db_context("Failed to check username")?;
        if username_taken {
            return Err(JourneyError::AlreadyExists {
                field: "username".to_string(),
            });
        }
    }

    Ok(())
}

fn read_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: uuid_column(row, 0)?,
        email: row.get(1)?,
        username: row.get(2)?,
        name: row.get(3)?,
        password_hash: row.get(4)?,
        signup_date: timestamp_column(row, 5)?,
    })
}
