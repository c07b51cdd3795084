use crate::config::ConsoleConfig;
use crate::errors::{ConsoleError, ValidationError};
use crate::forms::{
    FieldDescriptor, FieldKind, FieldValue, FormDescriptor, FormFieldStore, FormSummary, Validator,
};
use crate::notify::{Navigation, NotificationSink, NotifyOptions};
use crate::wizard::{ExitDecision, StepGate, WizardEvent, WizardFlow, WizardSession};

use super::list::CampaignList;
use super::metrics::CampaignMetrics;
use super::model::{keys, Campaign, NotificationSettings};

pub const CAMPAIGN_TYPES: [&str; 5] = [
    "Points Multiplier",
    "Cashback",
    "Tier Upgrade",
    "Referral",
    "Spend Challenge",
];

pub const CUSTOMER_TIERS: [&str; 4] = ["Silver", "Gold", "Platinum", "Private"];

pub const DELIVERY_CHANNELS: [&str; 5] = ["email", "sms", "push", "mobile", "web"];

/// Step schemas and record construction for campaign creation.
pub struct CampaignFlow {
    steps: Vec<FormDescriptor>,
    created_by: String,
}

impl CampaignFlow {
    pub fn new(created_by: impl Into<String>) -> Self {
        Self {
            steps: campaign_steps(),
            created_by: created_by.into(),
        }
    }
}

fn choices(options: &[&str]) -> Vec<String> {
    options.iter().map(|option| option.to_string()).collect()
}

fn campaign_steps() -> Vec<FormDescriptor> {
    let tiers = choices(&CUSTOMER_TIERS);
    let channels = choices(&DELIVERY_CHANNELS);
    let tier_check = tiers.clone();
    let channel_check = channels.clone();

    vec![
        FormDescriptor::new(
            "basics",
            vec![
                FieldDescriptor::new("name", "Campaign name", FieldKind::Text, Validator::None)
                    .with_required(),
                FieldDescriptor::new(
                    "type",
                    "Campaign type",
                    FieldKind::Choice(choices(&CAMPAIGN_TYPES)),
                    Validator::None,
                )
                .with_required(),
                FieldDescriptor::new("objective", "Objective", FieldKind::Text, Validator::None)
                    .with_required()
                    .with_help("What the campaign should achieve, e.g. grow card spend."),
                FieldDescriptor::new(
                    keys::DESCRIPTION,
                    "Description",
                    FieldKind::Text,
                    Validator::None,
                ),
            ],
        ),
        FormDescriptor::new(
            "audience",
            vec![
                FieldDescriptor::new(
                    keys::TARGET_AUDIENCE,
                    "Target audience",
                    FieldKind::Text,
                    Validator::None,
                ),
                FieldDescriptor::new(
                    keys::TIERS,
                    "Customer tiers",
                    FieldKind::MultiChoice(tiers),
                    subset_of(tier_check),
                ),
                FieldDescriptor::new(
                    keys::EXPECTED_PARTICIPANTS,
                    "Expected participants",
                    FieldKind::Number,
                    Validator::NonNegativeNumber,
                ),
            ],
        ),
        FormDescriptor::new(
            "rewards",
            vec![
                FieldDescriptor::new(
                    keys::POINTS_PER_ACTION,
                    "Points per action",
                    FieldKind::Number,
                    Validator::NonNegativeNumber,
                ),
                FieldDescriptor::new(
                    keys::BUDGET,
                    "Total budget",
                    FieldKind::Number,
                    Validator::NonNegativeNumber,
                ),
                FieldDescriptor::new(keys::START_DATE, "Start date", FieldKind::Date, Validator::Date),
                FieldDescriptor::new(keys::END_DATE, "End date", FieldKind::Date, Validator::Date),
            ],
        ),
        FormDescriptor::new(
            "channels",
            vec![
                FieldDescriptor::new(
                    keys::CHANNELS,
                    "Delivery channels",
                    FieldKind::MultiChoice(channels),
                    subset_of(channel_check),
                ),
                FieldDescriptor::new(
                    keys::NOTIFICATIONS,
                    "Notifications",
                    FieldKind::Group,
                    Validator::custom(|value| {
                        let unknown = value.as_group().and_then(|group| {
                            group
                                .keys()
                                .find(|key| {
                                    !NotificationSettings::KEYS
                                        .iter()
                                        .any(|known| *known == key.as_str())
                                })
                        });
                        match unknown {
                            Some(key) => Err(format!("Unknown notification setting `{key}`")),
                            None => Ok(()),
                        }
                    }),
                ),
            ],
        ),
        FormDescriptor::new("review", Vec::new()),
    ]
}

fn subset_of(allowed: Vec<String>) -> Validator {
    Validator::custom(move |value: &FieldValue| {
        let items = value.as_list().unwrap_or_default();
        match items.iter().find(|item| !allowed.contains(item)) {
            Some(item) => Err(format!(
                "`{item}` is not one of: {}",
                allowed.join(", ")
            )),
            None => Ok(()),
        }
    })
}

impl WizardFlow for CampaignFlow {
    type Output = Campaign;

    fn steps(&self) -> &[FormDescriptor] {
        &self.steps
    }

    fn commit(&self, fields: &FormFieldStore) -> Result<Campaign, ValidationError> {
        // Required fields first across all steps, in step order.
        for step in &self.steps {
            step.check_required(fields)?;
        }
        for step in &self.steps {
            step.validate(fields)?;
        }
        Campaign::from_fields(fields, &self.created_by)
    }
}

/// The five-step campaign creation wizard.
pub struct CampaignWizard {
    session: WizardSession<CampaignFlow>,
}

impl CampaignWizard {
    pub fn new(created_by: &str, gate: StepGate) -> Self {
        Self::with_fields(FormFieldStore::new(), created_by, gate)
    }

    /// Empty wizard attributed to the configured operator and gated per config.
    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self::new(&config.operator_name, config.step_gate)
    }

    pub fn with_fields(fields: FormFieldStore, created_by: &str, gate: StepGate) -> Self {
        Self {
            session: WizardSession::new(CampaignFlow::new(created_by), fields, gate),
        }
    }

    pub fn current_step(&self) -> usize {
        self.session.current_step()
    }

    pub fn total_steps(&self) -> usize {
        self.session.total_steps()
    }

    pub fn progress_percentage(&self) -> f64 {
        self.session.progress_percentage()
    }

    pub fn step_name(&self) -> &'static str {
        self.session
            .current_descriptor()
            .map(|descriptor| descriptor.name)
            .unwrap_or("review")
    }

    pub fn fields(&self) -> &FormFieldStore {
        self.session.fields()
    }

    /// Live projected cost and budget utilization.
    pub fn metrics(&self) -> CampaignMetrics {
        CampaignMetrics::from_fields(self.session.fields())
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.session.set_field(name, value);
    }

    pub fn set_list_field(&mut self, name: &str, item: &str, included: bool) {
        self.session.set_list_field(name, item, included);
    }

    pub fn set_notification(&mut self, channel: &str, enabled: bool) {
        self.session.set_group_field(keys::NOTIFICATIONS, channel, enabled);
    }

    pub fn advance(&mut self) -> Result<WizardEvent, ValidationError> {
        self.session.advance()
    }

    pub fn retreat(&mut self) -> WizardEvent {
        self.session.retreat()
    }

    pub fn summary(&self) -> FormSummary {
        self.session.summary()
    }

    /// Validates and finalizes the campaign from the review step. Failures
    /// are reported through `sink` and leave every field in place.
    pub fn submit(
        &mut self,
        list: &mut CampaignList,
        sink: &dyn NotificationSink,
        navigation: &dyn Navigation<Campaign>,
    ) -> Option<Campaign> {
        match self.session.submit() {
            Ok(campaign) => {
                tracing::info!(campaign = %campaign.id, name = %campaign.name, "campaign submitted");
                sink.success(
                    "Campaign created",
                    Some(NotifyOptions::described(format!(
                        "{} saved as draft",
                        campaign.name
                    ))),
                );
                list.add(campaign.clone());
                navigation.on_save(&campaign);
                Some(campaign)
            }
            Err(err) => {
                tracing::warn!(%err, "campaign submission failed");
                let description = match &err {
                    ConsoleError::Validation(validation) => validation.message.clone(),
                    other => other.to_string(),
                };
                sink.error(
                    "Could not create campaign",
                    Some(NotifyOptions::described(description)),
                );
                None
            }
        }
    }

    pub fn request_exit(&self) -> ExitDecision {
        self.session.request_exit()
    }

    /// Leaves the wizard, dropping input. Returns `false` when unsaved input
    /// exists and the discard was not confirmed.
    pub fn cancel(&mut self, confirmed: bool, navigation: &dyn Navigation<Campaign>) -> bool {
        if !self.session.discard(confirmed) {
            return false;
        }
        navigation.on_back();
        true
    }
}
