use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::request::{ApprovalRequest, RequestStatus};

/// A decided request, kept after it leaves the pending queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub request: ApprovalRequest,
    pub decided_by: String,
    pub decided_at: DateTime<Utc>,
}

/// Append-only record of approve/reject decisions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, mut request: ApprovalRequest, status: RequestStatus, decided_by: &str) {
        request.status = status;
        self.entries.push(AuditEntry {
            request,
            decided_by: decided_by.to_string(),
            decided_at: Utc::now(),
        });
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a request with `id` has already been decided.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.request.id == id)
    }

    pub fn with_status(&self, status: RequestStatus) -> impl Iterator<Item = &AuditEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.request.status == status)
    }
}
