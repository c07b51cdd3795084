use crate::forms::FormFieldStore;
use crate::notify::{NotificationSink, NotifyOptions};
use crate::utils::contains_ignore_case;

use super::model::{Campaign, CampaignStatus, CampaignTemplate};
use super::template::TemplateApplier;

/// Client-side filter over the campaign list.
#[derive(Debug, Clone, Default)]
pub struct CampaignFilter {
    pub search: String,
    pub status: Option<CampaignStatus>,
    pub campaign_type: Option<String>,
}

impl CampaignFilter {
    fn matches(&self, campaign: &Campaign) -> bool {
        let text_hit = contains_ignore_case(&campaign.name, &self.search)
            || contains_ignore_case(&campaign.objective, &self.search);
        text_hit
            && self.status.map_or(true, |status| campaign.status == status)
            && self.campaign_type.as_deref().map_or(true, |kind| {
                campaign.campaign_type.eq_ignore_ascii_case(kind)
            })
    }
}

/// Campaigns shown in the list view, newest last.
#[derive(Debug, Clone, Default)]
pub struct CampaignList {
    campaigns: Vec<Campaign>,
}

impl CampaignList {
    pub fn new(campaigns: Vec<Campaign>) -> Self {
        Self { campaigns }
    }

    pub fn add(&mut self, campaign: Campaign) {
        self.campaigns.push(campaign);
    }

    pub fn all(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    pub fn filter(&self, filter: &CampaignFilter) -> Vec<&Campaign> {
        self.campaigns
            .iter()
            .filter(|campaign| filter.matches(campaign))
            .collect()
    }

    /// Submit handler for "create directly": builds the campaign, appends it,
    /// and reports the outcome through `sink`.
    pub fn create_from_template(
        &mut self,
        template: &CampaignTemplate,
        customizations: &FormFieldStore,
        created_by: &str,
        sink: &dyn NotificationSink,
    ) -> Option<&Campaign> {
        match TemplateApplier::create_directly(template, customizations, created_by) {
            Ok(campaign) => {
                sink.success(
                    "Campaign created from template",
                    Some(NotifyOptions::described(format!(
                        "{} is ready as a draft",
                        campaign.name
                    ))),
                );
                self.campaigns.push(campaign);
                self.campaigns.last()
            }
            Err(err) => {
                tracing::warn!(template = %template.id, %err, "direct creation rejected");
                sink.error(
                    "Could not create campaign",
                    Some(NotifyOptions::described(err.message)),
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::model::keys;
    use crate::notify::{NoticeKind, RecordingNotifier};

    fn campaign(name: &str, kind: &str, status: CampaignStatus) -> Campaign {
        let fields = FormFieldStore::from_entries([
            (keys::NAME, name),
            (keys::TYPE, kind),
            (keys::OBJECTIVE, "Grow spend"),
        ]);
        let mut campaign = Campaign::from_fields(&fields, "seed").unwrap();
        campaign.status = status;
        campaign
    }

    #[test]
    fn filters_combine() {
        let list = CampaignList::new(vec![
            campaign("Summer Cashback", "Cashback", CampaignStatus::Active),
            campaign("Winter Cashback", "Cashback", CampaignStatus::Draft),
            campaign("Gold Upgrade", "Tier Upgrade", CampaignStatus::Active),
        ]);

        let search = CampaignFilter {
            search: "cashback".into(),
            ..CampaignFilter::default()
        };
        assert_eq!(list.filter(&search).len(), 2);

        let active_cashback = CampaignFilter {
            search: "cashback".into(),
            status: Some(CampaignStatus::Active),
            ..CampaignFilter::default()
        };
        let hits = list.filter(&active_cashback);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Summer Cashback");

        let by_type = CampaignFilter {
            campaign_type: Some("tier upgrade".into()),
            ..CampaignFilter::default()
        };
        assert_eq!(list.filter(&by_type).len(), 1);
    }

    #[test]
    fn direct_creation_reports_failure() {
        let template = CampaignTemplate {
            id: "tpl".into(),
            name: "Referral".into(),
            description: String::new(),
            campaign_type: "Referral".into(),
            duration: "30 days".into(),
            engagement: "Medium".into(),
            config: FormFieldStore::new(),
        };
        let mut list = CampaignList::default();
        let sink = RecordingNotifier::new();

        let created = list.create_from_template(
            &template,
            &FormFieldStore::from_entries([(keys::START_DATE, "2024-01-01")]),
            "Admin User",
            &sink,
        );
        assert!(created.is_none());
        assert!(list.is_empty());
        let notice = sink.last().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.description.as_deref(), Some("Campaign name is required"));
    }
}
