//! Update moderation workflow
//!
//! The portal's one real piece of logic. Three layers:
//!
//! - a pure transition table over `UpdateStatus` deciding which
//!   moderation actions exist, who may take them, and where they lead;
//! - the review-notification protocol: owners get exactly one popup
//!   per session when one of their updates comes back in `review`,
//!   with self-triggered denials suppressed;
//! - a per-session snapshot of the admin update list behind a
//!   coalescing TTL cache, so the polling timer and user-triggered
//!   refreshes share one idempotent load path.
//!
//! Everything here derives state from backend responses; no transition
//! is ever applied locally before the backend confirms it.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::backend::{BackendError, UpdatesApi};
use crate::models::{
    EditUpdateInput, ModerationAction, NotificationLedger, Update, UpdateStatus, User,
};

/// Who may take a given transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Permit {
    /// Manager role required
    Manager,
    /// The update's owner or a manager
    OwnerOrManager,
}

/// The transition table. One row per legal (status, action) pair.
const TRANSITIONS: &[(UpdateStatus, ModerationAction, UpdateStatus, Permit)] = &[
    (UpdateStatus::Pending, ModerationAction::Approve, UpdateStatus::Live, Permit::Manager),
    (UpdateStatus::Pending, ModerationAction::Deny, UpdateStatus::Review, Permit::Manager),
    (UpdateStatus::Pending, ModerationAction::DeleteSoft, UpdateStatus::Deleted, Permit::OwnerOrManager),
    (UpdateStatus::Review, ModerationAction::DeleteSoft, UpdateStatus::Deleted, Permit::OwnerOrManager),
    (UpdateStatus::Review, ModerationAction::Activate, UpdateStatus::Live, Permit::Manager),
    (UpdateStatus::Live, ModerationAction::Deactivate, UpdateStatus::Inactive, Permit::Manager),
    (UpdateStatus::Live, ModerationAction::Deny, UpdateStatus::Review, Permit::Manager),
    (UpdateStatus::Inactive, ModerationAction::Activate, UpdateStatus::Live, Permit::Manager),
    (UpdateStatus::Inactive, ModerationAction::Deny, UpdateStatus::Review, Permit::Manager),
    (UpdateStatus::Deleted, ModerationAction::Restore, UpdateStatus::Inactive, Permit::Manager),
];

/// Error from validating a requested transition.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ModerationError {
    #[error("Action '{action}' is not valid for an update in status '{status}'")]
    InvalidTransition {
        action: ModerationAction,
        status: UpdateStatus,
    },

    #[error("You are not allowed to {action} this update")]
    NotPermitted { action: ModerationAction },

    #[error("A reason is required when returning an update for review")]
    MissingReason,
}

/// Target status of `action` applied to `status`, ignoring actor
/// permissions. `None` when the table has no such row.
pub fn transition(status: UpdateStatus, action: ModerationAction) -> Option<UpdateStatus> {
    TRANSITIONS
        .iter()
        .find(|(from, a, _, _)| *from == status && *a == action)
        .map(|(_, _, to, _)| *to)
}

/// The actions `user` may take on `update`, in table order. Drives the
/// dashboard's action menu; a pure function so it is testable without
/// any rendering or network.
pub fn available_actions(update: &Update, user: &User) -> Vec<ModerationAction> {
    TRANSITIONS
        .iter()
        .filter(|(from, _, _, _)| *from == update.status)
        .filter(|(_, _, _, permit)| match permit {
            Permit::Manager => user.is_manager(),
            Permit::OwnerOrManager => user.is_manager() || update.is_owned_by(user.id),
        })
        .map(|(_, action, _, _)| *action)
        .collect()
}

/// Validate that `user` may apply `action` to `update`, returning the
/// target status. `reason` must be non-empty for denials.
pub fn authorize(
    update: &Update,
    user: &User,
    action: ModerationAction,
    reason: Option<&str>,
) -> Result<UpdateStatus, ModerationError> {
    let target = transition(update.status, action).ok_or(ModerationError::InvalidTransition {
        action,
        status: update.status,
    })?;

    if !available_actions(update, user).contains(&action) {
        return Err(ModerationError::NotPermitted { action });
    }

    if action == ModerationAction::Deny && reason.map_or(true, |r| r.trim().is_empty()) {
        return Err(ModerationError::MissingReason);
    }

    Ok(target)
}

/// Fold owner-resubmission semantics into an edit: saving an update
/// that sits in `review`, by its owner, sends it back to `pending` and
/// clears the rejection reason. This is the implicit transition riding
/// on the generic edit operation, not a dedicated action endpoint.
pub fn apply_resubmission(update: &Update, user: &User, mut input: EditUpdateInput) -> EditUpdateInput {
    if update.status == UpdateStatus::Review && update.is_owned_by(user.id) {
        input.status = Some(UpdateStatus::Pending);
        input.rejection_reason = Some(None);
    }
    input
}

// ============================================================================
// Review notifications
// ============================================================================

/// Payload for the "your update was returned" popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewAlert {
    /// Id of the returned update
    pub update_id: i64,
    /// Its headline, for the popup body
    pub title: String,
    /// The moderator's reason
    pub reason: String,
}

/// Run the notification check against a fresh snapshot.
///
/// At most one alert surfaces per check; its id is recorded in the
/// ledger at that moment, so re-running the check against the same or
/// a newer snapshot never duplicates a popup. The blanket dismissal
/// suppresses everything and is never re-armed (see
/// [`NotificationLedger`]).
pub fn next_review_alert(
    updates: &[Update],
    user: &User,
    ledger: &mut NotificationLedger,
) -> Option<ReviewAlert> {
    if ledger.is_dismissed_all() {
        return None;
    }

    let hit = updates.iter().find(|u| {
        u.status == UpdateStatus::Review && u.is_owned_by(user.id) && !ledger.has_notified(u.id)
    })?;

    ledger.mark_notified(hit.id);
    Some(ReviewAlert {
        update_id: hit.id,
        title: hit.title.clone(),
        reason: hit
            .rejection_reason
            .clone()
            .unwrap_or_else(|| "No reason given".to_string()),
    })
}

// ============================================================================
// Dashboard board state
// ============================================================================

/// One update on the dashboard, with the action menu already resolved
/// for the requesting user.
#[derive(Debug, Clone, Serialize)]
pub struct BoardEntry {
    #[serde(flatten)]
    pub update: Update,
    /// Actions the requesting user may take
    pub actions: Vec<ModerationAction>,
    /// Whether the requesting user created it
    pub is_own: bool,
}

/// One status tab on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct BoardTab {
    pub status: UpdateStatus,
    pub count: usize,
    pub updates: Vec<BoardEntry>,
}

/// Derived dashboard state over a snapshot: per-status tabs with
/// counts and per-update action menus.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateBoard {
    pub tabs: Vec<BoardTab>,
    pub total: usize,
}

impl UpdateBoard {
    /// Build the board for `user` from a snapshot. Tab order follows
    /// [`UpdateStatus::ALL`]; within a tab, updates keep the backend's
    /// newest-first order.
    pub fn build(updates: &[Update], user: &User) -> Self {
        let tabs: Vec<BoardTab> = UpdateStatus::ALL
            .iter()
            .map(|&status| {
                let entries: Vec<BoardEntry> = updates
                    .iter()
                    .filter(|u| u.status == status)
                    .map(|u| BoardEntry {
                        update: u.clone(),
                        actions: available_actions(u, user),
                        is_own: u.is_owned_by(user.id),
                    })
                    .collect();
                BoardTab {
                    status,
                    count: entries.len(),
                    updates: entries,
                }
            })
            .collect();

        UpdateBoard {
            total: updates.len(),
            tabs,
        }
    }
}

// ============================================================================
// Snapshot cache
// ============================================================================

/// Per-session view of the admin update list.
///
/// Snapshots live in a TTL cache keyed by session id: a hit inside the
/// poll interval serves the cached list, a miss fetches from the
/// backend, and concurrent callers of the same key coalesce onto a
/// single in-flight fetch. The background poll and a user clicking
/// refresh therefore share one `load` entry point and cannot stampede
/// the backend or double-trigger popups.
pub struct ModerationService {
    updates: Arc<dyn UpdatesApi>,
    snapshots: Cache<String, Arc<Vec<Update>>>,
}

impl ModerationService {
    /// Create the service. `poll_interval` is the snapshot lifetime.
    pub fn new(updates: Arc<dyn UpdatesApi>, poll_interval: Duration) -> Self {
        let snapshots = Cache::builder()
            .time_to_live(poll_interval)
            .max_capacity(4096)
            .build();
        Self { updates, snapshots }
    }

    /// Load the update list for a session, from cache when fresh.
    pub async fn load(
        &self,
        session_id: &str,
        token: &str,
    ) -> Result<Arc<Vec<Update>>, Arc<BackendError>> {
        let updates = Arc::clone(&self.updates);
        let token = token.to_string();
        self.snapshots
            .try_get_with(session_id.to_string(), async move {
                updates.list(&token).await.map(Arc::new)
            })
            .await
    }

    /// Force-refresh the session's snapshot (after any action).
    pub async fn refresh(
        &self,
        session_id: &str,
        token: &str,
    ) -> Result<Arc<Vec<Update>>, Arc<BackendError>> {
        self.snapshots.invalidate(session_id).await;
        self.load(session_id, token).await
    }

    /// Drop the session's snapshot (logout / teardown).
    pub async fn forget(&self, session_id: &str) {
        self.snapshots.invalidate(session_id).await;
    }

    /// Fetch a single update, bypassing the snapshot.
    pub async fn get(&self, token: &str, id: i64) -> Result<Update, BackendError> {
        self.updates.get(token, id).await
    }

    /// Apply a moderation action: validate against the table, call the
    /// backend, drop the stale snapshot. Local state is only touched
    /// after the backend confirmed.
    pub async fn act(
        &self,
        session_id: &str,
        token: &str,
        user: &User,
        update: &Update,
        action: ModerationAction,
        reason: Option<&str>,
    ) -> Result<UpdateStatus, ActionError> {
        let target = authorize(update, user, action, reason)?;
        self.updates
            .action(token, update.id, action, reason)
            .await?;
        self.snapshots.invalidate(session_id).await;

        tracing::info!(
            update_id = update.id,
            action = %action,
            from = %update.status,
            to = %target,
            by = user.id,
            "moderation action applied"
        );
        Ok(target)
    }
}

/// Error from [`ModerationService::act`]: either the table refused the
/// request, or the backend did.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Workflow(#[from] ModerationError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::models::UpdateCategory;

    fn update(id: i64, status: UpdateStatus, owner: i64) -> Update {
        Update {
            id,
            title: format!("Update {}", id),
            description: "Body".to_string(),
            category: UpdateCategory::Announcement,
            image: None,
            created_at: Utc::now(),
            created_by: Some(owner),
            team: "Youth Ministry".to_string(),
            status,
            rejection_reason: if status == UpdateStatus::Review {
                Some("Please fix typos".to_string())
            } else {
                None
            },
        }
    }

    fn manager() -> User {
        User {
            id: 1,
            username: "manager".to_string(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            is_staff: true,
            is_superuser: false,
            department: Some("HQ".to_string()),
        }
    }

    fn member(id: i64) -> User {
        User {
            id,
            username: format!("member{}", id),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            is_staff: false,
            is_superuser: false,
            department: Some("Youth Ministry".to_string()),
        }
    }

    // ------------------------------------------------------------------
    // Transition table
    // ------------------------------------------------------------------

    #[test]
    fn test_transition_targets() {
        use ModerationAction::*;
        use UpdateStatus::*;

        assert_eq!(transition(Pending, Approve), Some(Live));
        assert_eq!(transition(Pending, Deny), Some(Review));
        assert_eq!(transition(Live, Deactivate), Some(Inactive));
        assert_eq!(transition(Live, Deny), Some(Review));
        assert_eq!(transition(Inactive, Activate), Some(Live));
        assert_eq!(transition(Review, Activate), Some(Live));
        assert_eq!(transition(Inactive, Deny), Some(Review));
        assert_eq!(transition(Deleted, Restore), Some(Inactive));

        // A few rows that must not exist.
        assert_eq!(transition(Live, Approve), None);
        assert_eq!(transition(Deleted, Deny), None);
        assert_eq!(transition(Live, DeleteSoft), None);
        assert_eq!(transition(Inactive, DeleteSoft), None);
    }

    #[test]
    fn test_manager_actions_on_pending() {
        let u = update(1, UpdateStatus::Pending, 2);
        let actions = available_actions(&u, &manager());
        assert_eq!(
            actions,
            vec![
                ModerationAction::Approve,
                ModerationAction::Deny,
                ModerationAction::DeleteSoft
            ]
        );
    }

    #[test]
    fn test_owner_can_only_soft_delete_pending_and_review() {
        let owner = member(2);

        let pending = update(1, UpdateStatus::Pending, 2);
        assert_eq!(available_actions(&pending, &owner), vec![ModerationAction::DeleteSoft]);

        let review = update(2, UpdateStatus::Review, 2);
        assert_eq!(available_actions(&review, &owner), vec![ModerationAction::DeleteSoft]);

        for status in [UpdateStatus::Live, UpdateStatus::Inactive, UpdateStatus::Deleted] {
            let u = update(3, status, 2);
            assert!(available_actions(&u, &owner).is_empty(), "status {}", status);
        }
    }

    #[test]
    fn test_non_owner_member_gets_nothing() {
        let stranger = member(9);
        for status in UpdateStatus::ALL {
            let u = update(1, status, 2);
            assert!(available_actions(&u, &stranger).is_empty());
        }
    }

    #[test]
    fn test_authorize_rejects_forced_action() {
        let u = update(1, UpdateStatus::Pending, 2);
        let result = authorize(&u, &member(2), ModerationAction::Approve, None);
        assert_eq!(
            result.unwrap_err(),
            ModerationError::NotPermitted {
                action: ModerationAction::Approve
            }
        );
    }

    #[test]
    fn test_authorize_requires_deny_reason() {
        let u = update(1, UpdateStatus::Pending, 2);
        assert_eq!(
            authorize(&u, &manager(), ModerationAction::Deny, None).unwrap_err(),
            ModerationError::MissingReason
        );
        assert_eq!(
            authorize(&u, &manager(), ModerationAction::Deny, Some("  ")).unwrap_err(),
            ModerationError::MissingReason
        );
        assert_eq!(
            authorize(&u, &manager(), ModerationAction::Deny, Some("Please fix typos")).unwrap(),
            UpdateStatus::Review
        );
    }

    #[test]
    fn test_authorize_rejects_missing_row() {
        let u = update(1, UpdateStatus::Deleted, 2);
        let result = authorize(&u, &manager(), ModerationAction::Approve, None);
        assert!(matches!(
            result,
            Err(ModerationError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_resubmission_resets_review_to_pending() {
        let u = update(1, UpdateStatus::Review, 2);
        let input = apply_resubmission(
            &u,
            &member(2),
            EditUpdateInput {
                description: Some("Fixed the typos".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(input.status, Some(UpdateStatus::Pending));
        assert_eq!(input.rejection_reason, Some(None));
        assert_eq!(input.description.as_deref(), Some("Fixed the typos"));
    }

    #[test]
    fn test_resubmission_only_applies_to_owner_in_review() {
        // Someone else editing a review item does not resubmit it.
        let u = update(1, UpdateStatus::Review, 2);
        let input = apply_resubmission(&u, &manager(), EditUpdateInput::default());
        assert!(input.status.is_none());

        // The owner editing a pending item changes nothing either.
        let u = update(2, UpdateStatus::Pending, 2);
        let input = apply_resubmission(&u, &member(2), EditUpdateInput::default());
        assert!(input.status.is_none());
    }

    // ------------------------------------------------------------------
    // Notification protocol
    // ------------------------------------------------------------------

    #[test]
    fn test_alert_fires_once_per_id_per_session() {
        let owner = member(2);
        let mut ledger = NotificationLedger::default();
        let snapshot = vec![update(1, UpdateStatus::Review, 2)];

        let alert = next_review_alert(&snapshot, &owner, &mut ledger).unwrap();
        assert_eq!(alert.update_id, 1);
        assert_eq!(alert.reason, "Please fix typos");

        // Re-running against the same snapshot: silence.
        assert!(next_review_alert(&snapshot, &owner, &mut ledger).is_none());
    }

    #[test]
    fn test_alert_ignores_other_peoples_updates() {
        let mut ledger = NotificationLedger::default();
        let snapshot = vec![update(1, UpdateStatus::Review, 5)];
        assert!(next_review_alert(&snapshot, &member(2), &mut ledger).is_none());
    }

    #[test]
    fn test_self_triggered_denial_is_suppressed() {
        // A manager denying their own update marks the id before the
        // next snapshot check, so no popup ever fires for it.
        let hq_manager = manager();
        let mut ledger = NotificationLedger::default();
        ledger.mark_notified(4);

        let snapshot = vec![update(4, UpdateStatus::Review, hq_manager.id)];
        assert!(next_review_alert(&snapshot, &hq_manager, &mut ledger).is_none());
    }

    #[test]
    fn test_dismiss_all_blankets_new_ids() {
        let owner = member(2);
        let mut ledger = NotificationLedger::default();
        ledger.dismiss_all();

        // Even an id the ledger has never seen stays silent.
        let snapshot = vec![update(7, UpdateStatus::Review, 2)];
        assert!(next_review_alert(&snapshot, &owner, &mut ledger).is_none());
        assert!(!ledger.has_notified(7));
    }

    #[test]
    fn test_alert_surfaces_one_at_a_time() {
        let owner = member(2);
        let mut ledger = NotificationLedger::default();
        let snapshot = vec![
            update(1, UpdateStatus::Review, 2),
            update(2, UpdateStatus::Review, 2),
        ];

        let first = next_review_alert(&snapshot, &owner, &mut ledger).unwrap();
        assert_eq!(first.update_id, 1);
        let second = next_review_alert(&snapshot, &owner, &mut ledger).unwrap();
        assert_eq!(second.update_id, 2);
        assert!(next_review_alert(&snapshot, &owner, &mut ledger).is_none());
    }

    // ------------------------------------------------------------------
    // Board
    // ------------------------------------------------------------------

    #[test]
    fn test_board_counts_and_tabs() {
        let snapshot = vec![
            update(1, UpdateStatus::Pending, 2),
            update(2, UpdateStatus::Live, 2),
            update(3, UpdateStatus::Live, 3),
            update(4, UpdateStatus::Deleted, 2),
        ];
        let board = UpdateBoard::build(&snapshot, &manager());

        assert_eq!(board.total, 4);
        assert_eq!(board.tabs.len(), 5);
        let counts: Vec<(UpdateStatus, usize)> =
            board.tabs.iter().map(|t| (t.status, t.count)).collect();
        assert_eq!(
            counts,
            vec![
                (UpdateStatus::Pending, 1),
                (UpdateStatus::Live, 2),
                (UpdateStatus::Review, 0),
                (UpdateStatus::Inactive, 0),
                (UpdateStatus::Deleted, 1),
            ]
        );
    }

    #[test]
    fn test_board_resolves_action_menus() {
        let snapshot = vec![update(1, UpdateStatus::Pending, 2)];
        let board = UpdateBoard::build(&snapshot, &member(2));
        let entry = &board.tabs[0].updates[0];
        assert!(entry.is_own);
        assert_eq!(entry.actions, vec![ModerationAction::DeleteSoft]);
    }

    // ------------------------------------------------------------------
    // Full lifecycle scenario
    // ------------------------------------------------------------------

    #[test]
    fn test_deny_edit_approve_scenario() {
        let boss = manager();
        let owner = member(2);
        let mut u = update(10, UpdateStatus::Pending, 2);
        u.title = "Youth Conference Recap".to_string();
        u.rejection_reason = None;

        // Manager denies with a reason.
        let target = authorize(&u, &boss, ModerationAction::Deny, Some("Please fix typos")).unwrap();
        u.status = target;
        u.rejection_reason = Some("Please fix typos".to_string());
        assert_eq!(u.status, UpdateStatus::Review);

        // Owner edits and saves: implicit resubmission.
        let input = apply_resubmission(
            &u,
            &owner,
            EditUpdateInput {
                description: Some("Corrected".to_string()),
                ..Default::default()
            },
        );
        u.status = input.status.unwrap();
        u.rejection_reason = input.rejection_reason.unwrap();
        assert_eq!(u.status, UpdateStatus::Pending);
        assert!(u.rejection_reason.is_none());

        // Manager approves.
        let target = authorize(&u, &boss, ModerationAction::Approve, None).unwrap();
        assert_eq!(target, UpdateStatus::Live);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;
    use crate::models::UpdateCategory;

    fn status_strategy() -> impl Strategy<Value = UpdateStatus> {
        prop_oneof![
            Just(UpdateStatus::Pending),
            Just(UpdateStatus::Live),
            Just(UpdateStatus::Review),
            Just(UpdateStatus::Inactive),
            Just(UpdateStatus::Deleted),
        ]
    }

    fn action_strategy() -> impl Strategy<Value = ModerationAction> {
        prop_oneof![
            Just(ModerationAction::Approve),
            Just(ModerationAction::Deny),
            Just(ModerationAction::Activate),
            Just(ModerationAction::Deactivate),
            Just(ModerationAction::DeleteSoft),
            Just(ModerationAction::Restore),
        ]
    }

    fn user(id: i64, is_staff: bool, is_superuser: bool, hq: bool) -> User {
        User {
            id,
            username: format!("u{}", id),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            is_staff,
            is_superuser,
            department: Some(if hq { "HQ" } else { "GOQ" }.to_string()),
        }
    }

    fn update(status: UpdateStatus, owner: i64) -> Update {
        Update {
            id: 1,
            title: "T".to_string(),
            description: "D".to_string(),
            category: UpdateCategory::Gallery,
            image: None,
            created_at: Utc::now(),
            created_by: Some(owner),
            team: "GOQ".to_string(),
            status,
            rejection_reason: None,
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// An action is offered iff the table has the row and the user
        /// holds the required permission.
        #[test]
        fn property_menu_matches_table(
            status in status_strategy(),
            action in action_strategy(),
            is_staff in prop::bool::ANY,
            is_superuser in prop::bool::ANY,
            hq in prop::bool::ANY,
            owns in prop::bool::ANY,
        ) {
            let user = user(1, is_staff, is_superuser, hq);
            let update = update(status, if owns { 1 } else { 2 });
            let offered = available_actions(&update, &user).contains(&action);

            let row_exists = transition(status, action).is_some();
            prop_assert!(!offered || row_exists);

            // Non-managers only ever see soft delete, and only on
            // their own pending/review updates.
            if offered && !user.is_manager() {
                prop_assert_eq!(action, ModerationAction::DeleteSoft);
                prop_assert!(owns);
                prop_assert!(matches!(status, UpdateStatus::Pending | UpdateStatus::Review));
            }

            // Whatever the menu offers, authorize accepts (with a
            // reason supplied where needed) and vice versa.
            let reason = if action == ModerationAction::Deny { Some("reason") } else { None };
            prop_assert_eq!(authorize(&update, &user, action, reason).is_ok(), offered);
        }

        /// Every table row lands on a status in the closed set, and
        /// denial always lands on review.
        #[test]
        fn property_transitions_stay_in_closed_set(
            status in status_strategy(),
            action in action_strategy(),
        ) {
            if let Some(target) = transition(status, action) {
                prop_assert!(UpdateStatus::ALL.contains(&target));
                if action == ModerationAction::Deny {
                    prop_assert_eq!(target, UpdateStatus::Review);
                }
            }
        }

        /// The notification check never fires twice for one id within
        /// a session, whatever order snapshots arrive in.
        #[test]
        fn property_no_duplicate_alerts(ids in prop::collection::vec(1i64..20, 1..40)) {
            let owner = user(1, false, false, false);
            let mut ledger = NotificationLedger::default();
            let mut seen = std::collections::HashSet::new();

            for id in ids {
                let mut u = update(UpdateStatus::Review, 1);
                u.id = id;
                u.rejection_reason = Some("r".to_string());
                if let Some(alert) = next_review_alert(&[u], &owner, &mut ledger) {
                    prop_assert!(seen.insert(alert.update_id), "id {} alerted twice", alert.update_id);
                }
            }
        }
    }
}
