//! External data providers
//!
//! Read-only collaborators outside the church backend: the national
//! events/locations data service (static token, cached responses) and
//! the IP geolocation service used to pre-select a country on the
//! counselling form. Provider failures never take a page down; views
//! degrade to empty lists and the error goes to the log.

pub mod events;
pub mod geoip;
pub mod locations;

pub use events::EventsProvider;
pub use geoip::GeoIpClient;
pub use locations::LocationsProvider;
