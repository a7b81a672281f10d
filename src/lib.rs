//! ADA Portal - church web portal for the African Assembly of God
//!
//! A presentation and workflow layer over the church's REST backend:
//! the public site (events, locations, prayer wall, history, FAQ) and
//! the admin dashboard API (update moderation, content management).
//! All data lives on the backend; this crate holds only per-session
//! state and short-lived caches.

pub mod api;
pub mod backend;
pub mod config;
pub mod models;
pub mod provider;
pub mod services;
