#![doc(test(attr(deny(warnings))))]

//! Rewards Console offers the state core behind a loyalty-platform admin
//! console: campaign wizards and templates, the approval queue, user and role
//! requests, and profile editing.

pub mod access;
pub mod approvals;
pub mod campaign;
pub mod config;
pub mod data;
pub mod errors;
pub mod forms;
pub mod notify;
pub mod profile;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Rewards Console tracing initialized.");
    });
}
