use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ValidationError;
use crate::forms::FormFieldStore;

/// Field names used by campaign forms and templates.
pub mod keys {
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";
    pub const OBJECTIVE: &str = "objective";
    pub const DESCRIPTION: &str = "description";
    pub const START_DATE: &str = "startDate";
    pub const END_DATE: &str = "endDate";
    pub const TARGET_AUDIENCE: &str = "targetAudience";
    pub const TIERS: &str = "tiers";
    pub const POINTS_PER_ACTION: &str = "pointsPerAction";
    pub const EXPECTED_PARTICIPANTS: &str = "expectedParticipants";
    pub const BUDGET: &str = "budget";
    pub const CHANNELS: &str = "channels";
    pub const NOTIFICATIONS: &str = "notifications";
}

/// Immutable preset used to pre-populate a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub campaign_type: String,
    /// Human-readable run length, e.g. `"30 days"` or `"6 weeks"`.
    pub duration: String,
    pub engagement: String,
    pub config: FormFieldStore,
}

impl CampaignTemplate {
    /// Run length in days when `duration` reads as `<n> day(s)|week(s)`.
    pub fn duration_days(&self) -> Option<i64> {
        let mut parts = self.duration.split_whitespace();
        let amount = parts.next()?.parse::<i64>().ok()?;
        let unit = parts.next().unwrap_or("days").to_ascii_lowercase();
        match unit.trim_end_matches('s') {
            "day" => Some(amount),
            "week" => amount.checked_mul(7),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignStatus {
    #[default]
    Draft,
    Scheduled,
    Active,
    Paused,
    Completed,
}

/// Per-channel notification toggles kept as their own sub-record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub email: bool,
    pub sms: bool,
    pub push: bool,
    pub in_app: bool,
}

impl NotificationSettings {
    pub const KEYS: [&'static str; 4] = ["email", "sms", "push", "inApp"];

    fn from_fields(fields: &FormFieldStore) -> Self {
        let flag = |key: &str| {
            fields
                .flag(&format!("{}.{key}", keys::NOTIFICATIONS))
                .unwrap_or(false)
        };
        Self {
            email: flag("email"),
            sms: flag("sms"),
            push: flag("push"),
            in_app: flag("inApp"),
        }
    }
}

/// A finalized campaign record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub campaign_type: String,
    pub objective: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub target_audience: String,
    pub tiers: Vec<String>,
    pub points_per_action: f64,
    pub expected_participants: f64,
    pub total_budget: Option<f64>,
    pub channels: Vec<String>,
    pub notifications: NotificationSettings,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl Campaign {
    /// Builds a draft from collected fields. Required-field policy belongs to
    /// the caller; this only rejects malformed dates.
    pub fn from_fields(fields: &FormFieldStore, created_by: &str) -> Result<Self, ValidationError> {
        let text = |key: &str| fields.non_empty_text(key).unwrap_or_default().to_string();
        let start_date = parse_date(fields, keys::START_DATE)?;
        let end_date = parse_date(fields, keys::END_DATE)?;
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                return Err(ValidationError::for_field(
                    keys::END_DATE,
                    "End date cannot be before the start date",
                ));
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: text(keys::NAME),
            campaign_type: text(keys::TYPE),
            objective: text(keys::OBJECTIVE),
            description: text(keys::DESCRIPTION),
            start_date,
            end_date,
            target_audience: text(keys::TARGET_AUDIENCE),
            tiers: fields.list(keys::TIERS).map(<[String]>::to_vec).unwrap_or_default(),
            points_per_action: fields.number(keys::POINTS_PER_ACTION).unwrap_or(0.0),
            expected_participants: fields.number(keys::EXPECTED_PARTICIPANTS).unwrap_or(0.0),
            total_budget: fields.number(keys::BUDGET),
            channels: fields.list(keys::CHANNELS).map(<[String]>::to_vec).unwrap_or_default(),
            notifications: NotificationSettings::from_fields(fields),
            status: CampaignStatus::Draft,
            created_at: Utc::now(),
            created_by: created_by.to_string(),
        })
    }

    /// Fills a missing end date from a run length in days. A run length
    /// that falls outside the calendar leaves the end date open.
    pub fn with_default_end(mut self, days: Option<i64>) -> Self {
        if self.end_date.is_none() {
            self.end_date = self.start_date.zip(days).and_then(|(start, days)| {
                start.checked_add_signed(Duration::try_days(days)?)
            });
        }
        self
    }
}

fn parse_date(fields: &FormFieldStore, key: &str) -> Result<Option<NaiveDate>, ValidationError> {
    fields
        .non_empty_text(key)
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| ValidationError::for_field(key, "Use YYYY-MM-DD format"))
        })
        .transpose()
}
