//! Cookie-backed login sessions.
//!
//! The whole session lives in the `loginSession` private cookie, which Rocket
//! encrypts and authenticates with the key generated at startup. The server
//! only remembers which sessions were logged out, so a copied cookie stops
//! working after logout even though it still decrypts.

use chrono::Utc;
use dashmap::DashMap;
use rocket::http::{Cookie, CookieJar, SameSite};
use rocket::time::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "loginSession";
pub const SESSION_PATH: &str = "/user";
pub const DEFAULT_SESSION_MAX_AGE: i64 = 300;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The identity a session carries. Never includes the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub id: i32,
    pub username: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionState {
    pub id: Uuid,
    pub user: SessionUser,
    /// Unix timestamp (seconds).
    pub expires_at: i64,
}

impl SessionState {
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

pub struct SessionStore {
    max_age: i64,
    secure: bool,
    revoked: DashMap<Uuid, i64>, // session id -> expires_at
}

impl SessionStore {
    pub fn new(max_age: i64, secure: bool) -> Self {
        SessionStore {
            max_age,
            secure,
            revoked: DashMap::new(),
        }
    }

    pub fn max_age(&self) -> i64 {
        self.max_age
    }

    /// The live session carried by the request, if any.
    pub fn get(&self, jar: &CookieJar<'_>) -> Option<SessionState> {
        let cookie = jar.get_private(SESSION_COOKIE)?;
        let state: SessionState = serde_json::from_str(cookie.value()).ok()?;
        if state.is_expired(Utc::now().timestamp()) || self.revoked.contains_key(&state.id) {
            return None;
        }
        Some(state)
    }

    pub fn establish(&self, jar: &CookieJar<'_>, user: SessionUser) -> Result<SessionState, SessionError> {
        let state = SessionState {
            id: Uuid::new_v4(),
            user,
            expires_at: Utc::now().timestamp() + self.max_age,
        };
        self.save(jar, &state)?;
        Ok(state)
    }

    /// Extends the session by one full lifetime and writes it back.
    pub fn refresh(&self, jar: &CookieJar<'_>, mut state: SessionState) -> Result<SessionState, SessionError> {
        state.expires_at = Utc::now().timestamp() + self.max_age;
        self.save(jar, &state)?;
        Ok(state)
    }

    /// Re-serializes and re-encrypts the cookie. Called on every change.
    pub fn save(&self, jar: &CookieJar<'_>, state: &SessionState) -> Result<(), SessionError> {
        let value = serde_json::to_string(state)?;
        jar.add_private(self.cookie(value, self.max_age));
        Ok(())
    }

    /// Ends the session: the id is refused until it would have expired anyway
    /// and the browser is told to drop the cookie.
    pub fn expire(&self, jar: &CookieJar<'_>, state: &SessionState) {
        let now = Utc::now().timestamp();
        self.revoked.retain(|_, expires_at| *expires_at > now);
        self.revoked.insert(state.id, state.expires_at);
        jar.remove_private(self.cookie(String::new(), 0));
    }

    fn cookie(&self, value: String, max_age: i64) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, value))
            .path(SESSION_PATH)
            .max_age(Duration::seconds(max_age))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_checked_against_now() {
        let state = SessionState {
            id: Uuid::new_v4(),
            user: SessionUser { id: 1, username: "alice".into() },
            expires_at: 1_000,
        };
        assert!(!state.is_expired(999));
        assert!(state.is_expired(1_000));
    }

    #[test]
    fn cookie_carries_session_attributes() {
        let store = SessionStore::new(DEFAULT_SESSION_MAX_AGE, true);
        let cookie = store.cookie("v".into(), DEFAULT_SESSION_MAX_AGE);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.path(), Some(SESSION_PATH));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(300)));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(true));

        let insecure = SessionStore::new(DEFAULT_SESSION_MAX_AGE, false);
        assert_eq!(insecure.cookie("v".into(), 0).secure(), Some(false));
    }

    #[test]
    fn state_serializes_without_password_material() {
        let state = SessionState {
            id: Uuid::new_v4(),
            user: SessionUser { id: 7, username: "bob".into() },
            expires_at: 42,
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"username\":\"bob\""));
        assert!(!json.contains("password"));
        let back: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
