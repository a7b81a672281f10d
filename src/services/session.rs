//! Admin session store
//!
//! In-memory map from session-id cookie to [`PortalSession`]. The
//! store enforces the inactivity timeout: every authenticated request
//! goes through [`SessionStore::touch`], which either resets the
//! countdown or tears the session down and reports why. A periodic
//! cleanup task purges sessions that idled out without ever coming
//! back.
//!
//! Also hosts the login-attempt tracker: three failed attempts lock
//! the username out for a cooldown window, mirroring the login form's
//! give-up-and-go-home behavior.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{NotificationLedger, PortalSession};

/// Why a session cookie was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRejection {
    /// No session exists for the cookie (or no cookie at all)
    Missing,
    /// The session existed but sat idle past the timeout; it has been
    /// destroyed. The login view shows "session expired" for this.
    Expired,
}

impl SessionRejection {
    /// Reason code surfaced to the login flow.
    pub fn reason(&self) -> &'static str {
        match self {
            SessionRejection::Missing => "unauthenticated",
            SessionRejection::Expired => "timeout",
        }
    }
}

/// In-memory session store.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, PortalSession>>,
    idle_timeout: Duration,
}

impl SessionStore {
    /// Create a store with the given inactivity timeout.
    pub fn new(idle_timeout: std::time::Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout: Duration::from_std(idle_timeout)
                .unwrap_or_else(|_| Duration::seconds(180)),
        }
    }

    /// Create a session for a freshly issued backend credential.
    /// Returns the session; its id is the cookie value.
    pub async fn create(&self, api_token: String, username: String) -> PortalSession {
        let session = PortalSession::new(Uuid::new_v4().to_string(), api_token, username);
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id.clone(), session.clone());
        session
    }

    /// Look up a session and reset its inactivity countdown.
    ///
    /// A session past the idle timeout is destroyed here and reported
    /// as [`SessionRejection::Expired`]; the caller turns that into
    /// the `timeout` reason the login view consumes.
    pub async fn touch(&self, id: &str) -> Result<PortalSession, SessionRejection> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id).ok_or(SessionRejection::Missing)?;

        let now = Utc::now();
        if now - session.last_seen > self.idle_timeout {
            let username = session.username.clone();
            sessions.remove(id);
            tracing::info!(%username, "admin session expired after inactivity");
            return Err(SessionRejection::Expired);
        }

        session.last_seen = now;
        Ok(session.clone())
    }

    /// Destroy a session (logout, or a backend 401).
    pub async fn destroy(&self, id: &str) -> Option<PortalSession> {
        self.sessions.write().await.remove(id)
    }

    /// Run a closure against a session's notification ledger. Returns
    /// `None` when the session is gone (the ledger dies with it).
    pub async fn with_ledger<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut NotificationLedger) -> R,
    ) -> Option<R> {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(id).map(|s| f(&mut s.ledger))
    }

    /// Purge sessions that idled out; called periodically.
    pub async fn cleanup(&self) {
        let cutoff = Utc::now() - self.idle_timeout;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.last_seen > cutoff);
        let purged = before - sessions.len();
        if purged > 0 {
            tracing::debug!(purged, "purged idle admin sessions");
        }
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Failed-login tracker: a username locks after three failed attempts
/// inside the window.
pub struct LoginAttempts {
    attempts: RwLock<HashMap<String, Vec<DateTime<Utc>>>>,
}

/// Attempts allowed before the lockout.
const MAX_ATTEMPTS: usize = 3;
/// Window the attempts are counted over.
const ATTEMPT_WINDOW_MINUTES: i64 = 15;

impl LoginAttempts {
    pub fn new() -> Self {
        Self {
            attempts: RwLock::new(HashMap::new()),
        }
    }

    /// Whether the username is currently locked out.
    pub async fn is_locked(&self, username: &str) -> bool {
        let mut attempts = self.attempts.write().await;
        let cutoff = Utc::now() - Duration::minutes(ATTEMPT_WINDOW_MINUTES);
        let entry = attempts.entry(username.to_lowercase()).or_default();
        entry.retain(|t| *t > cutoff);
        entry.len() >= MAX_ATTEMPTS
    }

    /// Record a failed attempt; returns true when this failure locked
    /// the account out.
    pub async fn record_failure(&self, username: &str) -> bool {
        let mut attempts = self.attempts.write().await;
        let entry = attempts.entry(username.to_lowercase()).or_default();
        entry.push(Utc::now());
        entry.len() >= MAX_ATTEMPTS
    }

    /// Clear attempts on a successful login.
    pub async fn clear(&self, username: &str) {
        self.attempts.write().await.remove(&username.to_lowercase());
    }

    /// Drop stale entries; called periodically.
    pub async fn cleanup(&self) {
        let cutoff = Utc::now() - Duration::minutes(ATTEMPT_WINDOW_MINUTES);
        let mut attempts = self.attempts.write().await;
        attempts.retain(|_, times| {
            times.retain(|t| *t > cutoff);
            !times.is_empty()
        });
    }
}

impl Default for LoginAttempts {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration as StdDuration;

    #[tokio::test]
    async fn test_create_and_touch() {
        let store = SessionStore::new(StdDuration::from_secs(180));
        let session = store.create("token-1".to_string(), "jdoe".to_string()).await;

        let touched = store.touch(&session.id).await.unwrap();
        assert_eq!(touched.api_token, "token-1");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_cookie_is_missing() {
        let store = SessionStore::new(StdDuration::from_secs(180));
        assert_eq!(store.touch("nope").await.unwrap_err(), SessionRejection::Missing);
    }

    #[tokio::test]
    async fn test_idle_session_expires_with_timeout_reason() {
        let store = SessionStore::new(StdDuration::from_secs(0));
        let session = store.create("token".to_string(), "jdoe".to_string()).await;

        // Zero timeout: any elapsed time is past the deadline.
        tokio::time::sleep(StdDuration::from_millis(5)).await;

        let rejection = store.touch(&session.id).await.unwrap_err();
        assert_eq!(rejection, SessionRejection::Expired);
        assert_eq!(rejection.reason(), "timeout");

        // The session is gone; the next request is plain missing.
        assert_eq!(store.touch(&session.id).await.unwrap_err(), SessionRejection::Missing);
    }

    #[tokio::test]
    async fn test_touch_resets_countdown() {
        let store = SessionStore::new(StdDuration::from_secs(2));
        let session = store.create("token".to_string(), "jdoe".to_string()).await;

        // Repeated activity inside the window keeps the session alive
        // well past one timeout span.
        for _ in 0..4 {
            tokio::time::sleep(StdDuration::from_millis(50)).await;
            assert!(store.touch(&session.id).await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_destroy() {
        let store = SessionStore::new(StdDuration::from_secs(180));
        let session = store.create("token".to_string(), "jdoe".to_string()).await;

        assert!(store.destroy(&session.id).await.is_some());
        assert_eq!(store.touch(&session.id).await.unwrap_err(), SessionRejection::Missing);
    }

    #[tokio::test]
    async fn test_ledger_is_session_scoped() {
        let store = SessionStore::new(StdDuration::from_secs(180));
        let session = store.create("token".to_string(), "jdoe".to_string()).await;

        store
            .with_ledger(&session.id, |ledger| ledger.mark_notified(42))
            .await
            .unwrap();
        let notified = store
            .with_ledger(&session.id, |ledger| ledger.has_notified(42))
            .await
            .unwrap();
        assert!(notified);

        // A new session (new login) starts clean.
        let fresh = store.create("token-2".to_string(), "jdoe".to_string()).await;
        let notified = store
            .with_ledger(&fresh.id, |ledger| ledger.has_notified(42))
            .await
            .unwrap();
        assert!(!notified);
    }

    #[tokio::test]
    async fn test_cleanup_purges_idle_sessions() {
        let store = SessionStore::new(StdDuration::from_secs(0));
        store.create("a".to_string(), "a".to_string()).await;
        store.create("b".to_string(), "b".to_string()).await;

        tokio::time::sleep(StdDuration::from_millis(5)).await;
        store.cleanup().await;
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_login_lockout_after_three_failures() {
        let attempts = LoginAttempts::new();
        assert!(!attempts.is_locked("jdoe").await);

        assert!(!attempts.record_failure("jdoe").await);
        assert!(!attempts.record_failure("JDoe").await);
        assert!(attempts.record_failure("JDOE").await);
        assert!(attempts.is_locked("jdoe").await);

        attempts.clear("jdoe").await;
        assert!(!attempts.is_locked("jdoe").await);
    }
}
