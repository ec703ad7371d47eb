//! Session model
//!
//! Issued bearer tokens. Only the SHA-256 of a token is stored.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token_hash: String,
    pub user_id: i64,
    pub created_at: String,
    pub expires_at: String,
}

/// Format used for `expires_at`; lexicographic order matches time order
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl Session {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            token_hash: row.get("token_hash")?,
            user_id: row.get("user_id")?,
            created_at: row.get("created_at")?,
            expires_at: row.get("expires_at")?,
        })
    }

    pub fn create(
        conn: &Connection,
        token_hash: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> DbResult<Self> {
        conn.execute(
            "INSERT INTO sessions (token_hash, user_id, expires_at) VALUES (?1, ?2, ?3)",
            params![token_hash, user_id, format_timestamp(expires_at)],
        )?;

        Self::get(conn, token_hash)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    pub fn get(conn: &Connection, token_hash: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM sessions WHERE token_hash = ?1")?;

        let result = stmt.query_row([token_hash], Self::from_row);
        match result {
            Ok(session) => Ok(Some(session)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Unparseable expiry counts as expired
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match DateTime::parse_from_rfc3339(&self.expires_at) {
            Ok(expires) => expires.with_timezone(&Utc) <= now,
            Err(_) => true,
        }
    }

    pub fn delete(conn: &Connection, token_hash: &str) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM sessions WHERE token_hash = ?1", [token_hash])?;
        Ok(rows > 0)
    }

    /// Remove sessions that expired at or before `now`
    pub fn delete_expired(conn: &Connection, now: DateTime<Utc>) -> DbResult<usize> {
        let rows = conn.execute(
            "DELETE FROM sessions WHERE expires_at <= ?1",
            [format_timestamp(now)],
        )?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use chrono::Duration;

    fn setup() -> (Connection, i64) {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        run_migrations(&conn).unwrap();
        conn.execute(
            "INSERT INTO users (name, email, password_hash, age_years, sex, weight_kg, height_cm)
             VALUES ('A', 'a@example.com', 'x', 30, 'male', 70, 175)",
            [],
        )
        .unwrap();
        let id = conn.last_insert_rowid();
        (conn, id)
    }

    #[test]
    fn test_create_get_delete() {
        let (conn, user_id) = setup();
        let now = Utc::now();
        let session = Session::create(&conn, "abc", user_id, now + Duration::hours(1)).unwrap();
        assert_eq!(session.user_id, user_id);
        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + Duration::hours(2)));

        assert!(Session::get(&conn, "abc").unwrap().is_some());
        assert!(Session::delete(&conn, "abc").unwrap());
        assert!(!Session::delete(&conn, "abc").unwrap());
        assert!(Session::get(&conn, "abc").unwrap().is_none());
    }

    #[test]
    fn test_delete_expired() {
        let (conn, user_id) = setup();
        let now = Utc::now();
        Session::create(&conn, "old", user_id, now - Duration::hours(1)).unwrap();
        Session::create(&conn, "new", user_id, now + Duration::hours(1)).unwrap();

        assert_eq!(Session::delete_expired(&conn, now).unwrap(), 1);
        let remaining: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sessions WHERE user_id = ?1",
                [user_id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(remaining, 1);
        assert!(Session::get(&conn, "new").unwrap().is_some());
    }

    #[test]
    fn test_sessions_cascade_with_user() {
        let (conn, user_id) = setup();
        Session::create(&conn, "abc", user_id, Utc::now() + Duration::hours(1)).unwrap();
        conn.execute("DELETE FROM users WHERE id = ?1", [user_id]).unwrap();
        assert!(Session::get(&conn, "abc").unwrap().is_none());
    }

    #[test]
    fn test_unparseable_expiry_is_expired() {
        let session = Session {
            token_hash: "t".to_string(),
            user_id: 1,
            created_at: String::new(),
            expires_at: "soon".to_string(),
        };
        assert!(session.is_expired(Utc::now()));
    }
}
