//! SQLite persistence façade.
//!
//! One `Db` handle is created at startup and shared through the application
//! state. All statements go through a single connection behind a mutex;
//! that serialization is what gives state transitions and favorites updates
//! their one-winner semantics without any in-process locking elsewhere.

mod templates;
mod users;

use rusqlite::Connection;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct Db {
    conn: Mutex<Connection>,
}

impl Db {
    /// Opens (or creates) the database file and ensures the schema exists.
    pub fn open(path: &str) -> rusqlite::Result<Db> {
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(Db {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database with the same schema, for tests.
    #[cfg(test)]
    pub fn open_in_memory() -> rusqlite::Result<Db> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Db {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                 id          INTEGER PRIMARY KEY AUTOINCREMENT,
                 login       TEXT NOT NULL UNIQUE,
                 hashed_pass TEXT NOT NULL,
                 is_admin    INTEGER NOT NULL DEFAULT 0
             );
             CREATE TABLE IF NOT EXISTS templates (
                 id        INTEGER PRIMARY KEY AUTOINCREMENT,
                 state     TEXT NOT NULL,
                 key_words TEXT NOT NULL,
                 sender_id INTEGER REFERENCES users(id)
             );
             CREATE TABLE IF NOT EXISTS favorites (
                 user_id     INTEGER NOT NULL REFERENCES users(id),
                 template_id INTEGER NOT NULL REFERENCES templates(id),
                 PRIMARY KEY (user_id, template_id)
             );",
        )
    }

    /// Recovers the guard even if a previous holder panicked; the
    /// connection itself stays usable.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
