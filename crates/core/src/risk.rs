//! Overall risk aggregation.

use crate::constants::{
    EMERGENCY_DESCRIPTION, EMERGENCY_HIGH_COUNT, EMERGENCY_TOTAL_SCORE, HIGH_DESCRIPTION,
    LOW_DESCRIPTION, MODERATE_DESCRIPTION, MODERATE_TOTAL_SCORE, NO_CONCERNS_DESCRIPTION,
};
use crate::scorer::CategoryMatch;
use serde::{Deserialize, Serialize};
use vira_types::{RiskLevel, Urgency};

/// The single overall severity for a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub label: String,
    pub description: String,
}

impl RiskAssessment {
    fn new(level: RiskLevel, description: &str) -> Self {
        Self {
            level,
            label: level.label().to_string(),
            description: description.to_string(),
        }
    }
}

/// Derives the overall risk from the matched categories.
///
/// Rules apply in order:
/// 1. nothing matched: low, no concerns;
/// 2. two or more high-urgency categories, or a total score above 12: emergency;
/// 3. one high-urgency category: high;
/// 4. a total score above 6: moderate;
/// 5. otherwise low.
pub fn assess_risk(matches: &[CategoryMatch]) -> RiskAssessment {
    if matches.is_empty() {
        return RiskAssessment::new(RiskLevel::Low, NO_CONCERNS_DESCRIPTION);
    }

    let high_count = matches
        .iter()
        .filter(|m| m.urgency == Urgency::High)
        .count();
    let total_score: u32 = matches.iter().map(|m| m.score).sum();

    if high_count >= EMERGENCY_HIGH_COUNT || total_score > EMERGENCY_TOTAL_SCORE {
        RiskAssessment::new(RiskLevel::Emergency, EMERGENCY_DESCRIPTION)
    } else if high_count >= 1 {
        RiskAssessment::new(RiskLevel::High, HIGH_DESCRIPTION)
    } else if total_score > MODERATE_TOTAL_SCORE {
        RiskAssessment::new(RiskLevel::Moderate, MODERATE_DESCRIPTION)
    } else {
        RiskAssessment::new(RiskLevel::Low, LOW_DESCRIPTION)
    }
}
