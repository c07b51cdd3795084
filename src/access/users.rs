use crate::approvals::{ApprovalQueue, ApprovalRequest, ApprovalRequestInput, Priority, RequestType};
use crate::errors::ValidationError;
use crate::forms::{FieldDescriptor, FieldKind, FieldValue, FormDescriptor, FormFieldStore, Validator};
use crate::notify::{NotificationSink, NotifyOptions};

pub const CONSOLE_ROLES: [&str; 5] = [
    "Administrator",
    "Campaign Manager",
    "Compliance Officer",
    "Support Agent",
    "Viewer",
];

const PRIORITIES: [&str; 4] = ["low", "medium", "high", "urgent"];

/// New-user request form. Submitting queues a `user_creation` approval
/// rather than creating the account.
pub struct UserAccessForm {
    descriptor: FormDescriptor,
    fields: FormFieldStore,
}

impl Default for UserAccessForm {
    fn default() -> Self {
        Self::new()
    }
}

impl UserAccessForm {
    pub fn new() -> Self {
        let roles = CONSOLE_ROLES.iter().map(|role| role.to_string()).collect();
        let priorities = PRIORITIES.iter().map(|p| p.to_string()).collect();
        let descriptor = FormDescriptor::new(
            "user_access",
            vec![
                FieldDescriptor::new("name", "Full name", FieldKind::Text, Validator::None)
                    .with_required(),
                FieldDescriptor::new("email", "Email", FieldKind::Text, Validator::Email)
                    .with_required(),
                FieldDescriptor::new("role", "Role", FieldKind::Choice(roles), Validator::None)
                    .with_required(),
                FieldDescriptor::new("department", "Department", FieldKind::Text, Validator::None)
                    .with_required(),
                FieldDescriptor::new(
                    "priority",
                    "Priority",
                    FieldKind::Choice(priorities),
                    Validator::None,
                ),
                FieldDescriptor::new(
                    "justification",
                    "Business justification",
                    FieldKind::Text,
                    Validator::None,
                )
                .with_help("Why the user needs console access."),
            ],
        );
        Self {
            descriptor,
            fields: FormFieldStore::new(),
        }
    }

    pub fn descriptor(&self) -> &FormDescriptor {
        &self.descriptor
    }

    pub fn fields(&self) -> &FormFieldStore {
        &self.fields
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.fields.set_field(name, value);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.descriptor.validate(&self.fields)
    }

    /// Validates and queues the request. On failure the error is reported
    /// through `sink` and the form keeps its input.
    pub fn submit(
        &mut self,
        queue: &mut ApprovalQueue,
        requested_by: &str,
        sink: &dyn NotificationSink,
    ) -> Option<ApprovalRequest> {
        if let Err(err) = self.validate() {
            tracing::warn!(%err, "user access request rejected by validation");
            sink.error(
                "Could not submit request",
                Some(NotifyOptions::described(err.message)),
            );
            return None;
        }

        let text = |key: &str| self.fields.non_empty_text(key).unwrap_or_default().to_string();
        let priority = Priority::parse(&text("priority")).unwrap_or_default();
        let mut details = format!("Email: {}", text("email"));
        let justification = text("justification");
        if !justification.is_empty() {
            details.push_str(&format!(". Justification: {justification}"));
        }
        let input = ApprovalRequestInput::new(
            RequestType::UserCreation,
            requested_by,
            text("name"),
            format!("Create {} account", text("role")),
        )
        .with_priority(priority)
        .with_department(text("department"))
        .with_details(details);

        let request = queue.submit(input);
        sink.success(
            "Request submitted for approval",
            Some(NotifyOptions::described(format!(
                "{} is pending as {}",
                request.requested_for, request.id
            ))),
        );
        self.fields.clear();
        Some(request)
    }
}
