//! Search UI for the Medlook desktop application.
//!
//! Hosts the headless search widget in an egui window: input row with
//! search button and busy spinner, result cards with copy buttons, and
//! a status bar.

pub mod actions;
pub mod app;
pub mod results;

pub use app::SearchApp;
