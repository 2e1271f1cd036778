//! UI layer: the event details page and its modals.

pub mod app;

pub use app::EventPageApp;
