//! Keyword scoring.
//!
//! Each category is scored independently: every keyword found in the lowercased user text, and
//! not preceded by a negation cue, adds a fixed weight. Categories that score nothing are
//! dropped, and the rest are ranked by score.

use crate::constants::KEYWORD_WEIGHT;
use crate::negation::is_negated;
use crate::taxonomy::{Category, Taxonomy};
use serde::{Deserialize, Serialize};
use vira_types::Urgency;

/// A category selected by the user's text, with its score and the evidence for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMatch {
    pub category_id: String,
    pub score: u32,
    pub matched_keywords: Vec<String>,
    /// Prefix of the category's disease list; longer for higher scores.
    pub possible_diseases: Vec<String>,
    pub urgency: Urgency,
    pub recommendation: String,
    pub icon: String,
}

/// Scores a single category against already-lowercased text.
///
/// Only the first occurrence of each keyword is considered. Returns `None` when no keyword
/// counts.
pub fn score_category(lower_text: &str, category: &Category) -> Option<CategoryMatch> {
    let mut score = 0;
    let mut matched_keywords: Vec<String> = Vec::new();

    for keyword in &category.keywords {
        let Some(start) = lower_text.find(keyword.as_str()) else {
            continue;
        };
        if is_negated(lower_text, start) {
            tracing::trace!(category = %category.id, keyword = %keyword, "negated keyword");
            continue;
        }
        score += KEYWORD_WEIGHT;
        if !matched_keywords.iter().any(|k| k == keyword) {
            matched_keywords.push(keyword.clone());
        }
    }

    if score == 0 {
        return None;
    }

    let reveal = (score as usize + 1).min(category.diseases.len());
    Some(CategoryMatch {
        category_id: category.id.clone(),
        score,
        matched_keywords,
        possible_diseases: category.diseases[..reveal].to_vec(),
        urgency: category.urgency,
        recommendation: category.recommendation.clone(),
        icon: category.icon.clone(),
    })
}

/// Scores every category in the taxonomy and ranks the matches by score, highest first.
///
/// Ties keep taxonomy order.
pub fn score_categories(text: &str, taxonomy: &Taxonomy) -> Vec<CategoryMatch> {
    let lower_text = text.to_lowercase();

    let mut matches: Vec<CategoryMatch> = taxonomy
        .categories()
        .iter()
        .filter_map(|category| score_category(&lower_text, category))
        .collect();

    // `sort_by` is stable, which keeps equal scores in taxonomy order.
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}
