//! Conversation controller for the ZURT Agent assistant panel.
//!
//! The [`service::conversation::Conversation`] state machine is
//! platform-independent and shared by the terminal shell in this crate and
//! the Leptos panel in the `frontend` crate.

pub mod agent;
pub mod config;
pub mod errors;
pub mod input;
pub mod locale;
pub mod models;
pub mod service;
