use crate::config::ConsoleConfig;
use crate::errors::ValidationError;
use crate::forms::FormFieldStore;
use crate::wizard::StepGate;

use super::model::{keys, Campaign, CampaignTemplate};
use super::wizard::CampaignWizard;

/// Turns a template plus operator customizations into a store, a finished
/// campaign, or a wizard ready for further editing.
pub struct TemplateApplier;

impl TemplateApplier {
    /// Right-biased shallow merge of `customizations` over the template
    /// config. The template itself is never modified.
    pub fn apply_template(
        template: &CampaignTemplate,
        customizations: &FormFieldStore,
    ) -> FormFieldStore {
        template.config.merged_with(customizations)
    }

    /// Builds the final record without opening the wizard. The operator must
    /// supply a non-empty `name` and `startDate`; template values for either
    /// do not count.
    pub fn create_directly(
        template: &CampaignTemplate,
        customizations: &FormFieldStore,
        created_by: &str,
    ) -> Result<Campaign, ValidationError> {
        if !customizations.is_present(keys::NAME) {
            return Err(ValidationError::missing(keys::NAME, "Campaign name"));
        }
        if !customizations.is_present(keys::START_DATE) {
            return Err(ValidationError::missing(keys::START_DATE, "Start date"));
        }
        let mut fields = Self::apply_template(template, customizations);
        if !fields.is_present(keys::TYPE) {
            fields.set_field(keys::TYPE, template.campaign_type.as_str());
        }
        let campaign =
            Campaign::from_fields(&fields, created_by)?.with_default_end(template.duration_days());
        tracing::info!(
            template = %template.id,
            campaign = %campaign.id,
            "campaign created directly from template"
        );
        Ok(campaign)
    }

    /// [`Self::customize_further`] attributed to the configured operator and
    /// using the configured step gate.
    pub fn customize_with_config(
        template: &CampaignTemplate,
        customizations: &FormFieldStore,
        config: &ConsoleConfig,
    ) -> CampaignWizard {
        Self::customize_further(
            template,
            customizations,
            &config.operator_name,
            config.step_gate,
        )
    }

    /// Same merge as [`Self::apply_template`], seeding a wizard at step 1.
    pub fn customize_further(
        template: &CampaignTemplate,
        customizations: &FormFieldStore,
        created_by: &str,
        gate: StepGate,
    ) -> CampaignWizard {
        let mut fields = Self::apply_template(template, customizations);
        if !fields.is_present(keys::TYPE) {
            fields.set_field(keys::TYPE, template.campaign_type.as_str());
            fields.mark_saved();
        }
        tracing::debug!(template = %template.id, "template opened in wizard");
        CampaignWizard::with_fields(fields, created_by, gate)
    }
}
