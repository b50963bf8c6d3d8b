//! HTTP front end for [`docqa`].
//!
//! Loads a directory of text documents once at startup, embeds them, and
//! answers `POST /ask` requests against that fixed snapshot.

pub mod config;
pub mod providers;
pub mod server;
pub mod telemetry;

pub use config::ServerSettings;
pub use server::{AppState, AskRequest, AskResponse, app_router, run_server};
