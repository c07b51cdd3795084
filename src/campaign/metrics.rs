use serde::Serialize;

use crate::forms::FormFieldStore;

use super::model::keys;

/// Numbers derived from campaign inputs. Computed on read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CampaignMetrics {
    pub projected_cost: f64,
    pub budget_utilization: f64,
}

impl CampaignMetrics {
    pub fn from_fields(fields: &FormFieldStore) -> Self {
        let cost = projected_cost(fields);
        Self {
            projected_cost: cost,
            budget_utilization: budget_utilization(cost, fields.number(keys::BUDGET)),
        }
    }
}

/// `points_per_action * expected_participants`; absent inputs count as zero.
pub fn projected_cost(fields: &FormFieldStore) -> f64 {
    let points = fields.number(keys::POINTS_PER_ACTION).unwrap_or(0.0);
    let participants = fields.number(keys::EXPECTED_PARTICIPANTS).unwrap_or(0.0);
    points * participants
}

/// Percentage of the budget consumed by `cost`. Zero, negative, or missing
/// budgets yield 0.
pub fn budget_utilization(cost: f64, total_budget: Option<f64>) -> f64 {
    match total_budget {
        Some(budget) if budget > 0.0 => {
            let ratio = cost / budget * 100.0;
            if ratio.is_finite() {
                ratio
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}
