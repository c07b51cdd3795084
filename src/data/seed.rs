use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::access::Role;
use crate::approvals::{ApprovalRequest, Priority, RequestStatus, RequestType};
use crate::campaign::{keys, Campaign, CampaignStatus, CampaignTemplate, NotificationSettings};
use crate::forms::{FieldValue, FormFieldStore};
use crate::profile::UserProfile;

use super::DataProvider;

static TEMPLATES: Lazy<Vec<CampaignTemplate>> = Lazy::new(|| {
    vec![
        template(
            "tpl-double-points",
            "Double Points Weekend",
            "Earn 2x points on every card purchase over the weekend.",
            "Points Multiplier",
            "3 days",
            "High",
            &[
                (keys::OBJECTIVE, "Increase weekend card spend".into()),
                (keys::POINTS_PER_ACTION, "2".into()),
                (keys::EXPECTED_PARTICIPANTS, "15000".into()),
                (keys::BUDGET, "50000".into()),
                (keys::CHANNELS, vec!["email", "push"].into()),
            ],
        ),
        template(
            "tpl-cashback-dining",
            "Dining Cashback",
            "5% cashback at partner restaurants.",
            "Cashback",
            "30 days",
            "Medium",
            &[
                (keys::OBJECTIVE, "Grow dining category share".into()),
                (keys::POINTS_PER_ACTION, "5".into()),
                (keys::EXPECTED_PARTICIPANTS, "8000".into()),
                (keys::BUDGET, "40000".into()),
                (keys::TIERS, vec!["Gold", "Platinum"].into()),
            ],
        ),
        template(
            "tpl-tier-upgrade",
            "Fast Track to Platinum",
            "Reduced spend threshold for a tier upgrade.",
            "Tier Upgrade",
            "8 weeks",
            "High",
            &[
                (keys::OBJECTIVE, "Move engaged Gold members to Platinum".into()),
                (keys::TIERS, vec!["Gold"].into()),
                (keys::POINTS_PER_ACTION, "500".into()),
                (keys::EXPECTED_PARTICIPANTS, "1200".into()),
                (keys::BUDGET, "600000".into()),
            ],
        ),
        template(
            "tpl-referral",
            "Refer a Friend",
            "Bonus points for each referred account opening.",
            "Referral",
            "Ongoing",
            "Medium",
            &[
                (keys::OBJECTIVE, "Acquire new current-account customers".into()),
                (keys::POINTS_PER_ACTION, "1000".into()),
                (keys::EXPECTED_PARTICIPANTS, "300".into()),
            ],
        ),
    ]
});

fn template(
    id: &str,
    name: &str,
    description: &str,
    campaign_type: &str,
    duration: &str,
    engagement: &str,
    config: &[(&str, FieldValue)],
) -> CampaignTemplate {
    let mut store = FormFieldStore::from_entries(
        config
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone())),
    );
    store.set_field(keys::TYPE, campaign_type);
    store.mark_saved();
    CampaignTemplate {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        campaign_type: campaign_type.into(),
        duration: duration.into(),
        engagement: engagement.into(),
        config: store,
    }
}

/// Built-in demo data for the console.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedData;

impl DataProvider for SeedData {
    fn templates(&self) -> Vec<CampaignTemplate> {
        TEMPLATES.clone()
    }

    fn campaigns(&self) -> Vec<Campaign> {
        let created_at = Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).single().unwrap_or_else(Utc::now);
        vec![Campaign {
            id: Uuid::new_v4(),
            name: "Spring Travel Bonus".into(),
            campaign_type: "Points Multiplier".into(),
            objective: "Boost travel spend before summer".into(),
            description: "3x points on airline and hotel purchases.".into(),
            start_date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1),
            end_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 30),
            target_audience: "Frequent travellers".into(),
            tiers: vec!["Gold".into(), "Platinum".into()],
            points_per_action: 3.0,
            expected_participants: 20000.0,
            total_budget: Some(120000.0),
            channels: vec!["email".into(), "mobile".into()],
            notifications: NotificationSettings {
                email: true,
                push: true,
                ..NotificationSettings::default()
            },
            status: CampaignStatus::Active,
            created_at,
            created_by: "Admin User".into(),
        }]
    }

    fn pending_requests(&self) -> Vec<ApprovalRequest> {
        let submitted_at = Utc
            .with_ymd_and_hms(2024, 6, 3, 14, 5, 0)
            .single()
            .unwrap_or_else(Utc::now);
        vec![
            ApprovalRequest {
                id: "REQ-001".into(),
                request_type: RequestType::UserCreation,
                requested_by: "Sarah Kim".into(),
                requested_for: "Michael Torres".into(),
                action: "Create Support Agent account".into(),
                priority: Priority::Medium,
                submitted_at,
                department: "Customer Service".into(),
                details: "New hire starting next Monday".into(),
                status: RequestStatus::Pending,
            },
            ApprovalRequest {
                id: "REQ-002".into(),
                request_type: RequestType::RoleChange,
                requested_by: "David Park".into(),
                requested_for: "Emily Watson".into(),
                action: "Change role from Viewer to Campaign Manager".into(),
                priority: Priority::High,
                submitted_at,
                department: "Marketing".into(),
                details: "Taking over the Q3 campaign calendar".into(),
                status: RequestStatus::Pending,
            },
            ApprovalRequest {
                id: "REQ-003".into(),
                request_type: RequestType::PermissionChange,
                requested_by: "Lisa Chen".into(),
                requested_for: "James Wilson".into(),
                action: "Grant audit.view".into(),
                priority: Priority::Urgent,
                submitted_at,
                department: "Compliance".into(),
                details: "Quarterly audit review".into(),
                status: RequestStatus::Pending,
            },
        ]
    }

    fn roles(&self) -> Vec<Role> {
        let role = |name: &str, description: &str, permissions: &[&str], user_count| Role {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            user_count,
        };
        vec![
            role(
                "Administrator",
                "Full console access",
                &["campaigns.view", "campaigns.edit", "campaigns.approve", "users.view", "users.manage", "roles.manage", "reports.view", "audit.view"],
                3,
            ),
            role(
                "Campaign Manager",
                "Creates and schedules rewards campaigns",
                &["campaigns.view", "campaigns.edit", "reports.view"],
                12,
            ),
            role(
                "Compliance Officer",
                "Reviews approvals and audit trails",
                &["campaigns.view", "campaigns.approve", "audit.view"],
                4,
            ),
            role("Viewer", "Read-only access", &["campaigns.view", "reports.view"], 25),
        ]
    }

    fn current_profile(&self) -> UserProfile {
        UserProfile {
            name: "Admin User".into(),
            email: "admin@rewards.bank.example".into(),
            phone: "+1 555 0100".into(),
            department: "Loyalty Programs".into(),
            title: "Platform Administrator".into(),
            bio: String::new(),
            avatar_url: None,
        }
    }
}
