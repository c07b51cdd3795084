#![allow(dead_code)]

use std::sync::Mutex;

use once_cell::sync::Lazy;
use rewards_console::{
    approvals::ApprovalQueue,
    config::{ConfigManager, ConsoleConfig},
    data::{DataProvider, SeedData},
    forms::FormFieldStore,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a config manager rooted in a fresh temporary directory.
pub fn setup_test_env() -> (ConfigManager, ConsoleConfig) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let manager = ConfigManager::with_base_dir(base);
    let config = manager.load().expect("load default config");
    (manager, config)
}

/// Queue seeded with REQ-001..REQ-003.
pub fn seeded_queue() -> ApprovalQueue {
    ApprovalQueue::from_requests("REQ", SeedData.pending_requests())
}

pub fn store(entries: &[(&str, &str)]) -> FormFieldStore {
    FormFieldStore::from_entries(entries.iter().copied())
}
