//! Operator profile editing: field edits, password change checks and the
//! simulated avatar upload.

pub mod upload;

pub use upload::{AvatarFile, AvatarUploadSlot, SimulatedUploader, UploadTicket};

use serde::{Deserialize, Serialize};

use crate::config::ConsoleConfig;
use crate::errors::{ConsoleError, ConsoleResult, ValidationError};
use crate::forms::{FieldDescriptor, FieldKind, FieldValue, FormDescriptor, FormFieldStore, Validator};
use crate::notify::{NotificationSink, NotifyOptions};

const CURRENT_PASSWORD: &str = "currentPassword";
const NEW_PASSWORD: &str = "newPassword";
const CONFIRM_PASSWORD: &str = "confirmPassword";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub title: String,
    pub bio: String,
    pub avatar_url: Option<String>,
}

impl UserProfile {
    fn to_fields(&self) -> FormFieldStore {
        FormFieldStore::from_entries([
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("department", self.department.as_str()),
            ("title", self.title.as_str()),
            ("bio", self.bio.as_str()),
        ])
    }
}

/// Edits a [`UserProfile`] through a form store and saves it atomically:
/// either every change (including a new avatar) lands, or none does.
pub struct ProfileEditor {
    profile: UserProfile,
    descriptor: FormDescriptor,
    fields: FormFieldStore,
    pending_avatar: Option<AvatarFile>,
    slot: AvatarUploadSlot,
    min_password_length: usize,
}

impl ProfileEditor {
    pub fn new(profile: UserProfile, min_password_length: usize) -> Self {
        let descriptor = FormDescriptor::new(
            "profile",
            vec![
                FieldDescriptor::new("name", "Full name", FieldKind::Text, Validator::None)
                    .with_required(),
                FieldDescriptor::new("email", "Email", FieldKind::Text, Validator::Email)
                    .with_required(),
                FieldDescriptor::new("phone", "Phone", FieldKind::Text, Validator::None),
                FieldDescriptor::new("department", "Department", FieldKind::Text, Validator::None),
                FieldDescriptor::new("title", "Job title", FieldKind::Text, Validator::None),
                FieldDescriptor::new("bio", "Bio", FieldKind::Text, Validator::None),
            ],
        );
        Self {
            fields: profile.to_fields(),
            profile,
            descriptor,
            pending_avatar: None,
            slot: AvatarUploadSlot::new(),
            min_password_length,
        }
    }

    pub fn from_config(profile: UserProfile, config: &ConsoleConfig) -> Self {
        Self::new(profile, config.min_password_length)
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn fields(&self) -> &FormFieldStore {
        &self.fields
    }

    /// Shared handle to the upload slot, e.g. to drive the trigger's enabled
    /// state or to tear the editor down.
    pub fn upload_slot(&self) -> AvatarUploadSlot {
        self.slot.clone()
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.fields.set_field(name, value);
    }

    /// Picks an avatar to upload on the next save.
    pub fn choose_avatar(&mut self, file: AvatarFile) {
        self.fields.set_field("avatar", file.file_name.as_str());
        self.pending_avatar = Some(file);
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.fields.has_unsaved_changes()
    }

    /// Password rules apply once any password field is filled: the current
    /// password must be given, new and confirmation must match, and the new
    /// password must meet the minimum length.
    pub fn validate_passwords(&self) -> Result<(), ValidationError> {
        let current = self.fields.text(CURRENT_PASSWORD).unwrap_or_default();
        let new = self.fields.text(NEW_PASSWORD).unwrap_or_default();
        let confirm = self.fields.text(CONFIRM_PASSWORD).unwrap_or_default();
        if current.is_empty() && new.is_empty() && confirm.is_empty() {
            return Ok(());
        }
        if current.is_empty() {
            return Err(ValidationError::missing(CURRENT_PASSWORD, "Current password"));
        }
        if new != confirm {
            return Err(ValidationError::for_field(
                CONFIRM_PASSWORD,
                "New passwords do not match",
            ));
        }
        if new.chars().count() < self.min_password_length {
            return Err(ValidationError::for_field(
                NEW_PASSWORD,
                format!(
                    "Password must be at least {} characters",
                    self.min_password_length
                ),
            ));
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.descriptor.validate(&self.fields)?;
        self.validate_passwords()
    }

    /// Saves the profile. When an avatar was chosen it is uploaded first and
    /// any upload failure aborts the whole save. Outcomes are reported through
    /// `sink`; on failure the form keeps its input.
    pub async fn save(
        &mut self,
        uploader: &SimulatedUploader,
        sink: &dyn NotificationSink,
    ) -> ConsoleResult<&UserProfile> {
        if let Err(err) = self.validate() {
            tracing::warn!(%err, "profile save rejected by validation");
            sink.error(
                "Could not save profile",
                Some(NotifyOptions::described(err.message.clone())),
            );
            return Err(err.into());
        }

        let avatar_url = match self.pending_avatar.clone() {
            Some(file) => match self.upload(uploader, &file).await {
                Ok(url) => Some(url),
                Err(err) => {
                    tracing::warn!(%err, "profile save aborted by avatar upload");
                    sink.error(
                        "Avatar upload failed",
                        Some(NotifyOptions::described(err.to_string())),
                    );
                    return Err(err);
                }
            },
            None => None,
        };

        self.apply(avatar_url);
        tracing::info!(email = %self.profile.email, "profile updated");
        sink.success("Profile updated", None);
        Ok(&self.profile)
    }

    async fn upload(&self, uploader: &SimulatedUploader, file: &AvatarFile) -> ConsoleResult<String> {
        let ticket = self.slot.begin()?;
        let result = uploader.upload(file).await;
        match self.slot.settle(ticket, result) {
            Some(result) => Ok(result?),
            None => Err(ConsoleError::InvalidState(
                "profile editor closed during upload".into(),
            )),
        }
    }

    fn apply(&mut self, avatar_url: Option<String>) {
        let text = |key: &str| self.fields.text(key).unwrap_or_default().trim().to_string();
        let updated = UserProfile {
            name: text("name"),
            email: text("email"),
            phone: text("phone"),
            department: text("department"),
            title: text("title"),
            bio: text("bio"),
            avatar_url: avatar_url.or_else(|| self.profile.avatar_url.clone()),
        };
        self.profile = updated;
        self.fields = self.profile.to_fields();
        self.pending_avatar = None;
    }
}
