//! Domain models
//!
//! Every entity here is owned and mutated by the external backend (or
//! the events/locations provider); the portal holds transient copies
//! scoped to a single request, plus the in-memory session state.

pub mod event;
pub mod faq;
pub mod history;
pub mod prayer;
pub mod session;
pub mod update;
pub mod user;

pub use event::{ChurchLocation, LocationKind, NationalEvent, RawLocation};
pub use faq::{Faq, FaqCategory, FaqInput};
pub use history::{HistoryEvent, HistoryEventInput};
pub use prayer::{CreatePrayerInput, PrayerCategory, PrayerRequest};
pub use session::{NotificationLedger, PortalSession};
pub use update::{
    CreateUpdateInput, EditUpdateInput, ImageUpload, ModerationAction, Update, UpdateCategory,
    UpdateStatus,
};
pub use user::{CreateUserInput, EditUserInput, User};
