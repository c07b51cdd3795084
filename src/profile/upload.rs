use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::ConsoleConfig;
use crate::errors::UploadError;

/// A file picked by the operator, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl AvatarFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// Stand-in for an upload endpoint: waits, then hands back a `data:` URL.
#[derive(Debug, Clone)]
pub struct SimulatedUploader {
    delay: Duration,
    max_bytes: usize,
    failure: Option<String>,
}

impl SimulatedUploader {
    pub fn new(delay: Duration, max_bytes: usize) -> Self {
        Self {
            delay,
            max_bytes,
            failure: None,
        }
    }

    /// Uses the configured latency and size limit.
    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self::new(config.upload_delay(), config.avatar_max_bytes)
    }

    /// Every upload through this instance fails with `reason`.
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }

    pub async fn upload(&self, file: &AvatarFile) -> Result<String, UploadError> {
        if !file.mime_type.starts_with("image/") {
            return Err(UploadError::UnsupportedType(file.mime_type.clone()));
        }
        if file.bytes.len() > self.max_bytes {
            return Err(UploadError::TooLarge {
                size: file.bytes.len(),
                limit: self.max_bytes,
            });
        }
        tokio::time::sleep(self.delay).await;
        if let Some(reason) = &self.failure {
            return Err(UploadError::Failed(reason.clone()));
        }
        tracing::debug!(file = %file.file_name, bytes = file.bytes.len(), "avatar uploaded");
        Ok(format!(
            "data:{};base64,{}",
            file.mime_type,
            STANDARD.encode(&file.bytes)
        ))
    }
}

#[derive(Debug, Default)]
struct SlotState {
    in_flight: bool,
    generation: u64,
}

/// Proof that an upload was started; hand it back to [`AvatarUploadSlot::settle`].
#[derive(Debug)]
pub struct UploadTicket {
    generation: u64,
}

/// Allows at most one avatar upload at a time and drops results that arrive
/// after the owning editor was torn down. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct AvatarUploadSlot {
    state: Arc<Mutex<SlotState>>,
}

impl AvatarUploadSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether the upload trigger should be enabled.
    pub fn is_trigger_enabled(&self) -> bool {
        !self.lock().in_flight
    }

    pub fn begin(&self) -> Result<UploadTicket, UploadError> {
        let mut state = self.lock();
        if state.in_flight {
            return Err(UploadError::InFlight);
        }
        state.in_flight = true;
        Ok(UploadTicket {
            generation: state.generation,
        })
    }

    /// Releases the slot. Returns `None` when the ticket belongs to a torn
    /// down editor, in which case the result must be dropped.
    pub fn settle<T>(&self, ticket: UploadTicket, result: T) -> Option<T> {
        let mut state = self.lock();
        if ticket.generation != state.generation {
            tracing::debug!("discarding upload result after teardown");
            return None;
        }
        state.in_flight = false;
        Some(result)
    }

    /// Invalidates outstanding tickets.
    pub fn teardown(&self) {
        let mut state = self.lock();
        state.generation += 1;
        state.in_flight = false;
    }
}
