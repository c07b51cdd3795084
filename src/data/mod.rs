//! Injected sources of seed data. Core types take collections from a
//! [`DataProvider`] instead of reaching for module-level lists.

mod seed;

pub use seed::SeedData;

use crate::access::Role;
use crate::approvals::ApprovalRequest;
use crate::campaign::{Campaign, CampaignTemplate};
use crate::profile::UserProfile;

/// Supplies the initial collections a console session starts from.
pub trait DataProvider {
    fn templates(&self) -> Vec<CampaignTemplate>;

    fn campaigns(&self) -> Vec<Campaign>;

    fn pending_requests(&self) -> Vec<ApprovalRequest>;

    fn roles(&self) -> Vec<Role>;

    fn current_profile(&self) -> UserProfile;

    fn template(&self, id: &str) -> Option<CampaignTemplate> {
        self.templates().into_iter().find(|template| template.id == id)
    }
}

/// Provider backed by caller-supplied collections; handy for tests and for
/// fixtures read from JSON.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    pub templates: Vec<CampaignTemplate>,
    pub campaigns: Vec<Campaign>,
    pub pending_requests: Vec<ApprovalRequest>,
    pub roles: Vec<Role>,
    pub profile: UserProfile,
}

impl DataProvider for InMemoryProvider {
    fn templates(&self) -> Vec<CampaignTemplate> {
        self.templates.clone()
    }

    fn campaigns(&self) -> Vec<Campaign> {
        self.campaigns.clone()
    }

    fn pending_requests(&self) -> Vec<ApprovalRequest> {
        self.pending_requests.clone()
    }

    fn roles(&self) -> Vec<Role> {
        self.roles.clone()
    }

    fn current_profile(&self) -> UserProfile {
        self.profile.clone()
    }
}
