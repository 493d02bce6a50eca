//! Recommendation building.

use crate::constants::{
    FALLBACK_RECOMMENDATION_ICON, FALLBACK_RECOMMENDATION_TEXT, MAX_CATEGORY_RECOMMENDATIONS,
    URGENT_RECOMMENDATION_ICON, URGENT_RECOMMENDATION_TEXT,
};
use crate::scorer::CategoryMatch;
use serde::{Deserialize, Serialize};
use vira_types::{Priority, RiskLevel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub text: String,
    pub icon: String,
}

impl Recommendation {
    /// The entry prepended when the overall risk is high or an emergency.
    pub fn urgent() -> Self {
        Self {
            priority: Priority::Urgent,
            text: URGENT_RECOMMENDATION_TEXT.into(),
            icon: URGENT_RECOMMENDATION_ICON.into(),
        }
    }

    /// The single entry returned when nothing matched.
    pub fn fallback() -> Self {
        Self {
            priority: Priority::Low,
            text: FALLBACK_RECOMMENDATION_TEXT.into(),
            icon: FALLBACK_RECOMMENDATION_ICON.into(),
        }
    }
}

impl From<&CategoryMatch> for Recommendation {
    fn from(m: &CategoryMatch) -> Self {
        Self {
            priority: m.urgency.into(),
            text: m.recommendation.clone(),
            icon: m.icon.clone(),
        }
    }
}

/// Builds the ordered recommendation list.
///
/// `ranked` must already be sorted by score, highest first. The urgent entry comes first when
/// warranted, then one entry per top-ranked category; the fallback appears only when the list
/// would otherwise be empty.
pub fn build_recommendations(level: RiskLevel, ranked: &[CategoryMatch]) -> Vec<Recommendation> {
    let mut recommendations = Vec::with_capacity(MAX_CATEGORY_RECOMMENDATIONS + 1);

    if level.is_urgent() {
        recommendations.push(Recommendation::urgent());
    }

    recommendations.extend(
        ranked
            .iter()
            .take(MAX_CATEGORY_RECOMMENDATIONS)
            .map(Recommendation::from),
    );

    if recommendations.is_empty() {
        recommendations.push(Recommendation::fallback());
    }

    recommendations
}
