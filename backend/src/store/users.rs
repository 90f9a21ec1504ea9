//! User table and favorites relation.
//!
//! The favorites relation has a composite primary key, so duplicates cannot
//! exist by construction; `add_favorite` leans on `INSERT OR IGNORE` for its
//! idempotency and `remove_favorite` reports whether anything was actually
//! removed so the handler can answer with a conflict.

use common::model::user::User;
use rusqlite::{params, Row};

use super::Db;

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        login: row.get(1)?,
        hashed_pass: row.get(2)?,
        is_admin: row.get(3)?,
    })
}

impl Db {
    /// Creates a user. Returns `Ok(None)` when the login is already taken;
    /// the UNIQUE constraint is the arbiter, so two concurrent registrations
    /// cannot both succeed.
    pub fn create_user(&self, login: &str, hashed_pass: &str) -> rusqlite::Result<Option<i64>> {
        let conn = self.conn();
        let result = conn.execute(
            "INSERT INTO users (login, hashed_pass, is_admin) VALUES (?1, ?2, 0)",
            params![login, hashed_pass],
        );
        match result {
            Ok(_) => Ok(Some(conn.last_insert_rowid())),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn find_user_by_login(&self, login: &str) -> rusqlite::Result<Option<User>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT id, login, hashed_pass, is_admin FROM users WHERE login = ?1")?;
        let mut rows = stmt.query_map(params![login], row_to_user)?;
        rows.next().transpose()
    }

    /// Login lookup matching both the login and the password digest, as the
    /// login endpoint does.
    pub fn find_user_by_credentials(
        &self,
        login: &str,
        hashed_pass: &str,
    ) -> rusqlite::Result<Option<User>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, login, hashed_pass, is_admin FROM users
             WHERE login = ?1 AND hashed_pass = ?2",
        )?;
        let mut rows = stmt.query_map(params![login, hashed_pass], row_to_user)?;
        rows.next().transpose()
    }

    pub fn get_user(&self, id: i64) -> rusqlite::Result<Option<User>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT id, login, hashed_pass, is_admin FROM users WHERE id = ?1")?;
        let mut rows = stmt.query_map(params![id], row_to_user)?;
        rows.next().transpose()
    }

    /// Favorite template ids of a user, newest first.
    pub fn favorite_ids(&self, user_id: i64) -> rusqlite::Result<Vec<i64>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT template_id FROM favorites WHERE user_id = ?1 ORDER BY template_id DESC",
        )?;
        let rows = stmt.query_map(params![user_id], |row| row.get(0))?;
        rows.collect()
    }

    /// Adds a favorite. Returns `false` when the relation already existed;
    /// either way the relation holds afterwards.
    pub fn add_favorite(&self, user_id: i64, template_id: i64) -> rusqlite::Result<bool> {
        let changed = self.conn().execute(
            "INSERT OR IGNORE INTO favorites (user_id, template_id) VALUES (?1, ?2)",
            params![user_id, template_id],
        )?;
        Ok(changed > 0)
    }

    /// Removes a favorite. Returns `false` when the relation was not there.
    pub fn remove_favorite(&self, user_id: i64, template_id: i64) -> rusqlite::Result<bool> {
        let changed = self.conn().execute(
            "DELETE FROM favorites WHERE user_id = ?1 AND template_id = ?2",
            params![user_id, template_id],
        )?;
        Ok(changed > 0)
    }
}
