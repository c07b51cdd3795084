use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kinds of authorization requests routed through the approval queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    UserCreation,
    RoleChange,
    AccessRequest,
    CampaignApproval,
    PermissionChange,
}

impl RequestType {
    pub fn label(self) -> &'static str {
        match self {
            RequestType::UserCreation => "User Creation",
            RequestType::RoleChange => "Role Change",
            RequestType::AccessRequest => "Access Request",
            RequestType::CampaignApproval => "Campaign Approval",
            RequestType::PermissionChange => "Permission Change",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "urgent" => Some(Priority::Urgent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// A pending (or, inside the audit log, decided) authorization request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub id: String,
    pub request_type: RequestType,
    pub requested_by: String,
    pub requested_for: String,
    pub action: String,
    pub priority: Priority,
    pub submitted_at: DateTime<Utc>,
    pub department: String,
    pub details: String,
    pub status: RequestStatus,
}

/// Caller-supplied part of a new request; the queue fills in the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalRequestInput {
    pub request_type: RequestType,
    pub requested_by: String,
    pub requested_for: String,
    pub action: String,
    #[serde(default)]
    pub priority: Priority,
    pub department: String,
    #[serde(default)]
    pub details: String,
}

impl ApprovalRequestInput {
    pub fn new(
        request_type: RequestType,
        requested_by: impl Into<String>,
        requested_for: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            request_type,
            requested_by: requested_by.into(),
            requested_for: requested_for.into(),
            action: action.into(),
            priority: Priority::default(),
            department: String::new(),
            details: String::new(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }
}
