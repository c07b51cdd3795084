//! Campaign records, templates, derived metrics and the creation wizard.

pub mod list;
pub mod metrics;
pub mod model;
pub mod template;
pub mod wizard;

pub use list::{CampaignFilter, CampaignList};
pub use metrics::CampaignMetrics;
pub use model::{keys, Campaign, CampaignStatus, CampaignTemplate, NotificationSettings};
pub use template::TemplateApplier;
pub use wizard::{CampaignFlow, CampaignWizard};
