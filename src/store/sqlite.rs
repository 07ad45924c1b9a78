use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::User;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    fn create_user(&self, user: &User) -> Result<()> {
        let result = self.conn().execute(
            "INSERT INTO users (id, username, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                user.id,
                user.username,
                user.password_hash,
                format_datetime(&user.created_at),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(Error::AlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?1",
            params![username],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    password_hash: row.get(2)?,
                    created_at: parse_datetime(&row.get::<_, String>(3)?),
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn has_users(&self) -> Result<bool> {
        let conn = self.conn();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count > 0)
    }

    fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        store
    }

    fn make_user(username: &str) -> User {
        User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_and_get_user() {
        let store = test_store();
        let user = make_user("admin");
        store.create_user(&user).unwrap();

        let fetched = store.get_user_by_username("admin").unwrap().unwrap();
        assert_eq!(fetched.id, user.id);
        assert_eq!(fetched.password_hash, user.password_hash);
    }

    #[test]
    fn test_get_unknown_user_is_none() {
        let store = test_store();
        assert!(store.get_user_by_username("nobody").unwrap().is_none());
    }

    #[test]
    fn test_username_lookup_is_case_sensitive() {
        let store = test_store();
        store.create_user(&make_user("Admin")).unwrap();
        assert!(store.get_user_by_username("admin").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let store = test_store();
        store.create_user(&make_user("admin")).unwrap();
        let err = store.create_user(&make_user("admin")).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists));
    }

    #[test]
    fn test_has_users() {
        let store = test_store();
        assert!(!store.has_users().unwrap());
        store.create_user(&make_user("admin")).unwrap();
        assert!(store.has_users().unwrap());
    }
}
