use std::path::Path;
use rusqlite::{params, Connection, OptionalExtension};
use crate::error::ApiError;
use crate::models::Admin;

pub const TOKEN_KEY: &str = "adminToken";
pub const ADMIN_KEY: &str = "adminUser";

/// The signed-in administrator and the bearer token the backend issued.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub token: String,
    pub admin: Admin,
}

/// Small key/value table that survives restarts. Only the two session keys
/// are ever written.
pub struct SessionStore {
    conn: Connection,
}

impl SessionStore {
    pub fn open(path: &Path) -> Result<Self, ApiError> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, ApiError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, ApiError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS storage (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )?;
        Ok(Self { conn })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        let value = self
            .conn
            .query_row("SELECT value FROM storage WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        self.conn.execute(
            "INSERT INTO storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), ApiError> {
        self.conn.execute("DELETE FROM storage WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// A session needs a token. The profile may be absent or unreadable, in
    /// which case an empty admin is returned and the profile screen asks to
    /// sign in again when it needs the id.
    pub fn load(&self) -> Result<Option<AuthSession>, ApiError> {
        let Some(token) = self.get(TOKEN_KEY)? else {
            return Ok(None);
        };
        let admin = match self.get(ADMIN_KEY)? {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                log::warn!("stored admin profile is unreadable: {err}");
                Admin::default()
            }),
            None => Admin::default(),
        };
        Ok(Some(AuthSession { token, admin }))
    }

    pub fn login(&self, session: &AuthSession) -> Result<(), ApiError> {
        if session.admin.id.is_empty() {
            log::error!("login response carries no admin id");
        }
        self.set(TOKEN_KEY, &session.token)?;
        self.update_admin(&session.admin)
    }

    pub fn update_admin(&self, admin: &Admin) -> Result<(), ApiError> {
        self.set(ADMIN_KEY, &serde_json::to_string(admin)?)
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        self.remove(TOKEN_KEY)?;
        self.remove(ADMIN_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> AuthSession {
        AuthSession {
            token: "tok-123".to_string(),
            admin: Admin {
                id: "a1".to_string(),
                name: "Registrar".to_string(),
                email: "registrar@college.edu".to_string(),
                profile_photo: None,
            },
        }
    }

    #[test]
    fn empty_store_has_no_session() {
        let store = SessionStore::open_in_memory().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn login_persists_both_keys() {
        let store = SessionStore::open_in_memory().unwrap();
        store.login(&sample_session()).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-123"));
        assert!(store.get(ADMIN_KEY).unwrap().unwrap().contains("registrar@college.edu"));
        assert_eq!(store.load().unwrap(), Some(sample_session()));
    }

    #[test]
    fn logout_clears_both_keys() {
        let store = SessionStore::open_in_memory().unwrap();
        store.login(&sample_session()).unwrap();
        store.logout().unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(ADMIN_KEY).unwrap(), None);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn profile_update_keeps_token() {
        let store = SessionStore::open_in_memory().unwrap();
        store.login(&sample_session()).unwrap();
        let mut admin = sample_session().admin;
        admin.name = "Chief Registrar".to_string();
        store.update_admin(&admin).unwrap();
        let session = store.load().unwrap().unwrap();
        assert_eq!(session.token, "tok-123");
        assert_eq!(session.admin.name, "Chief Registrar");
    }

    #[test]
    fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.db");
        SessionStore::open(&path).unwrap().login(&sample_session()).unwrap();
        let reopened = SessionStore::open(&path).unwrap();
        assert_eq!(reopened.load().unwrap(), Some(sample_session()));
    }
}
