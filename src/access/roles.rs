use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::approvals::{ApprovalQueue, ApprovalRequest, ApprovalRequestInput, Priority, RequestType};
use crate::errors::{ConsoleError, ConsoleResult, ValidationError};
use crate::forms::FormFieldStore;
use crate::utils::{contains_ignore_case, normalize_label};

pub const PERMISSIONS: [&str; 8] = [
    "campaigns.view",
    "campaigns.edit",
    "campaigns.approve",
    "users.view",
    "users.manage",
    "roles.manage",
    "reports.view",
    "audit.view",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
    pub user_count: usize,
}

/// Role catalogue with in-place permission edits.
#[derive(Debug, Clone, Default)]
pub struct RoleEditor {
    roles: Vec<Role>,
}

impl RoleEditor {
    pub fn new(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn find(&self, id: Uuid) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Role> {
        let normalized = normalize_label(name);
        self.roles
            .iter()
            .find(|role| normalize_label(&role.name) == normalized)
    }

    pub fn search(&self, query: &str) -> Vec<&Role> {
        self.roles
            .iter()
            .filter(|role| {
                contains_ignore_case(&role.name, query) || contains_ignore_case(&role.description, query)
            })
            .collect()
    }

    /// Creates a role from `name`, `description` and `permissions` fields.
    pub fn create_role(&mut self, fields: &FormFieldStore) -> Result<&Role, ValidationError> {
        let name = fields
            .non_empty_text("name")
            .ok_or_else(|| ValidationError::missing("name", "Role name"))?;
        if self.find_by_name(name).is_some() {
            return Err(ValidationError::for_field(
                "name",
                format!("Role `{name}` already exists"),
            ));
        }
        let permissions = fields.list("permissions").map(<[String]>::to_vec).unwrap_or_default();
        if let Some(unknown) = permissions.iter().find(|p| !is_known_permission(p)) {
            return Err(ValidationError::for_field(
                "permissions",
                format!("Unknown permission `{unknown}`"),
            ));
        }
        let role = Role {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: fields.non_empty_text("description").unwrap_or_default().to_string(),
            permissions,
            user_count: 0,
        };
        tracing::info!(role = %role.name, "role created");
        self.roles.push(role);
        Ok(&self.roles[self.roles.len() - 1])
    }

    /// Grants or revokes a single permission on a role.
    pub fn toggle_permission(
        &mut self,
        role_id: Uuid,
        permission: &str,
        included: bool,
    ) -> ConsoleResult<&Role> {
        if !is_known_permission(permission) {
            return Err(ValidationError::for_field(
                "permissions",
                format!("Unknown permission `{permission}`"),
            )
            .into());
        }
        let role = self
            .roles
            .iter_mut()
            .find(|role| role.id == role_id)
            .ok_or_else(|| ConsoleError::NotFound(format!("role {role_id}")))?;
        let present = role.permissions.iter().any(|p| p == permission);
        if included && !present {
            role.permissions.push(permission.to_string());
        } else if !included {
            role.permissions.retain(|p| p != permission);
        }
        tracing::debug!(role = %role.name, permission, included, "permission toggled");
        Ok(role)
    }

    /// Queues a request to move `user` into the named role.
    pub fn request_role_change(
        &self,
        queue: &mut ApprovalQueue,
        change: RoleChange<'_>,
    ) -> ConsoleResult<ApprovalRequest> {
        if change.user.trim().is_empty() {
            return Err(ValidationError::missing("user", "User").into());
        }
        let target = self
            .find_by_name(change.to_role)
            .ok_or_else(|| ConsoleError::NotFound(format!("role `{}`", change.to_role)))?;
        let action = match change.from_role {
            Some(from) => format!("Change role from {from} to {}", target.name),
            None => format!("Assign role {}", target.name),
        };
        let input = ApprovalRequestInput::new(
            RequestType::RoleChange,
            change.requested_by,
            change.user,
            action,
        )
        .with_priority(change.priority)
        .with_department(change.department)
        .with_details(change.reason);
        Ok(queue.submit(input))
    }
}

/// Parameters of a role-change request.
#[derive(Debug, Clone, Copy)]
pub struct RoleChange<'a> {
    pub requested_by: &'a str,
    pub user: &'a str,
    pub from_role: Option<&'a str>,
    pub to_role: &'a str,
    pub department: &'a str,
    pub reason: &'a str,
    pub priority: Priority,
}

fn is_known_permission(permission: &str) -> bool {
    PERMISSIONS.iter().any(|known| *known == permission)
}
