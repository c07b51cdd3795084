//! Pending authorization requests: submission, approve/reject, count
//! observers and the decision audit log.

pub mod audit;
pub mod queue;
pub mod request;

pub use audit::{AuditEntry, AuditLog};
pub use queue::{ApprovalCountObserver, ApprovalFilter, ApprovalQueue};
pub use request::{ApprovalRequest, ApprovalRequestInput, Priority, RequestStatus, RequestType};
