//! Business logic layer
//!
//! Everything between the HTTP handlers and the backend clients: the
//! moderation workflow, the admin session store, localization, and the
//! haversine helper for the locations page.

pub mod geo;
pub mod locale;
pub mod moderation;
pub mod session;
pub mod translator;

pub use locale::Lang;
pub use moderation::{ModerationService, ReviewAlert, UpdateBoard};
pub use session::{LoginAttempts, SessionStore};
