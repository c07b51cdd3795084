//! User-access requests and role management. Both feed the approval queue.

pub mod roles;
pub mod users;

pub use roles::{Role, RoleChange, RoleEditor, PERMISSIONS};
pub use users::{UserAccessForm, CONSOLE_ROLES};
