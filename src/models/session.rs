//! Portal session model
//!
//! A session binds a browser (via the session-id cookie) to the bearer
//! credential issued by the backend, plus the volatile notification
//! ledger for review popups. Sessions are created at login and die at
//! logout or after the inactivity timeout, so the ledger resets on
//! every new login.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// One authenticated admin session.
#[derive(Debug, Clone)]
pub struct PortalSession {
    /// Opaque session id, also the cookie value
    pub id: String,
    /// Bearer credential for the backend API
    pub api_token: String,
    /// Username captured at login, for log lines only
    pub username: String,
    /// Review-popup bookkeeping, session-scoped
    pub ledger: NotificationLedger,
    /// Creation instant
    pub created_at: DateTime<Utc>,
    /// Instant of the last authenticated request; drives the
    /// inactivity timeout
    pub last_seen: DateTime<Utc>,
}

impl PortalSession {
    /// Create a fresh session around a backend credential. The ledger
    /// starts empty so a new login re-arms review popups.
    pub fn new(id: String, api_token: String, username: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            api_token,
            username,
            ledger: NotificationLedger::default(),
            created_at: now,
            last_seen: now,
        }
    }
}

/// Session-scoped bookkeeping for "returned for review" popups.
///
/// Two mechanisms coexist, with a fixed precedence: the blanket
/// dismiss flag is authoritative — once the user picks "ignore for
/// now", nothing pops for the rest of the session, and the per-id set
/// does not re-arm. Below that, each update id pops at most once per
/// session; marking an id (either because its popup was shown or
/// because the user caused the denial themself) permanently silences
/// it.
#[derive(Debug, Clone, Default)]
pub struct NotificationLedger {
    notified: HashSet<i64>,
    dismissed_all: bool,
}

impl NotificationLedger {
    /// Whether a popup for this update id was already shown (or
    /// suppressed as self-triggered) this session.
    pub fn has_notified(&self, id: i64) -> bool {
        self.notified.contains(&id)
    }

    /// Record that a popup for this id was shown or suppressed.
    pub fn mark_notified(&mut self, id: i64) {
        self.notified.insert(id);
    }

    /// Silence all review popups for the remainder of the session.
    pub fn dismiss_all(&mut self) {
        self.dismissed_all = true;
    }

    /// Whether the blanket dismissal is in effect.
    pub fn is_dismissed_all(&self) -> bool {
        self.dismissed_all
    }
}
