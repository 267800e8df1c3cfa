//! Headless core of the Abhaya personal-safety app. All state, behavior,
//! and timer orchestration lives here; native shells render the
//! [`ViewModel`] and feed [`Event`]s back in.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod app;
pub mod capabilities;
pub mod contacts;
pub mod emergency;
pub mod event;
pub mod location;
pub mod model;
pub mod resources;
pub mod view;

use std::time::Duration;

pub use app::App;
pub use capabilities::{Capabilities, Effect, Timer, TimerId, TimerOperation, TimerOutput};
pub use contacts::{
    Contact, ContactError, ContactId, ContactsRegistry, DraftField, NewContactDraft, Relation,
};
pub use crux_core::{render::Render, App as CruxApp};
pub use emergency::{EmergencySession, EmergencyStatus};
pub use event::Event;
pub use location::{Coordinate, LiveLocation};
pub use model::{Model, SettingsState, Tab};
pub use view::ViewModel;

/// Seconds the SOS countdown runs before it exhausts.
pub const COUNTDOWN_SECONDS: u8 = 5;
pub const COUNTDOWN_TICK_INTERVAL: Duration = Duration::from_secs(1);
/// How long the simulated map provider takes to come up.
pub const MAP_INIT_DELAY: Duration = Duration::from_millis(1500);
pub const LOCATION_TICK_INTERVAL: Duration = Duration::from_secs(5);
/// Largest per-axis nudge one drift tick may apply, in degrees.
pub const LOCATION_DRIFT_DEGREES: f64 = 0.000_25;

pub const INITIAL_LATITUDE: f64 = 28.6139;
pub const INITIAL_LONGITUDE: f64 = 77.209;
pub const LOADING_ADDRESS: &str = "Loading address...";
pub const READY_ADDRESS: &str = "123 Connaught Place, New Delhi";

pub const PROFILE_NAME: &str = "Aanya Patel";
pub const PROFILE_EMAIL: &str = "aanya.patel@example.com";
