//! HTTP front end for the audit engine.
//!
//! Owns everything around the core `audit(request)` contract: routing,
//! CORS, the health check and lead notifications.

pub mod config;
pub mod notify;
pub mod routes;

pub use config::{NotifierConfig, ServerConfig};
pub use notify::{EmailApiNotifier, Lead, LeadNotifier, LogNotifier, NotifyError, notifier_from_config};
pub use routes::{AppState, cors_layer, router};
