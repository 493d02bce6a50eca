//! Request and response bodies exchanged over the API.
//!
//! These mirror the core types field for field so that the JSON a client receives is exactly
//! what `vira_core` serialises, while carrying OpenAPI schemas the core crate does not need.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;
use vira_core::{CategoryMatch, ClassificationResult, Recommendation, Taxonomy, Utterance};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// One transcript entry. Missing fields are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UtteranceReq {
    #[serde(default)]
    #[schema(example = "You")]
    pub role: Option<String>,
    #[serde(default)]
    #[schema(example = "I have a headache and a mild fever")]
    pub text: Option<String>,
}

impl From<UtteranceReq> for Utterance {
    fn from(req: UtteranceReq) -> Self {
        Utterance::new(req.role.unwrap_or_default(), req.text.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClassifyReq {
    #[serde(default)]
    pub transcript: Vec<UtteranceReq>,
}

impl ClassifyReq {
    pub fn into_utterances(self) -> Vec<Utterance> {
        self.transcript.into_iter().map(Utterance::from).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMatchRes {
    pub category_id: String,
    pub score: u32,
    pub matched_keywords: Vec<String>,
    pub possible_diseases: Vec<String>,
    #[schema(example = "moderate")]
    pub urgency: String,
    pub recommendation: String,
    pub icon: String,
}

impl From<CategoryMatch> for CategoryMatchRes {
    fn from(m: CategoryMatch) -> Self {
        Self {
            category_id: m.category_id,
            score: m.score,
            matched_keywords: m.matched_keywords,
            possible_diseases: m.possible_diseases,
            urgency: m.urgency.to_string(),
            recommendation: m.recommendation,
            icon: m.icon,
        }
    }
}

/// Ranked category matches, serialised as an object keyed by category id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMatchMap(pub Vec<CategoryMatchRes>);

impl Serialize for CategoryMatchMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for m in &self.0 {
            map.serialize_entry(&m.category_id, m)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RecommendationRes {
    #[schema(example = "urgent")]
    pub priority: String,
    pub text: String,
    pub icon: String,
}

impl From<Recommendation> for RecommendationRes {
    fn from(r: Recommendation) -> Self {
        Self {
            priority: r.priority.to_string(),
            text: r.text,
            icon: r.icon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRes {
    #[schema(example = "high")]
    pub risk_level: String,
    pub risk_label: String,
    pub risk_description: String,
    /// Category id to match, highest score first.
    #[schema(value_type = Object)]
    pub categories: CategoryMatchMap,
    pub recommendations: Vec<RecommendationRes>,
    pub analyzed_text_preview: String,
}

impl From<ClassificationResult> for ClassifyRes {
    fn from(result: ClassificationResult) -> Self {
        Self {
            risk_level: result.risk_level.to_string(),
            risk_label: result.risk_label,
            risk_description: result.risk_description,
            categories: CategoryMatchMap(
                result
                    .categories
                    .into_vec()
                    .into_iter()
                    .map(CategoryMatchRes::from)
                    .collect(),
            ),
            recommendations: result
                .recommendations
                .into_iter()
                .map(RecommendationRes::from)
                .collect(),
            analyzed_text_preview: result.analyzed_text_preview,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: String,
    pub icon: String,
    pub urgency: String,
    pub recommendation: String,
    pub keyword_count: usize,
    pub diseases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ListCategoriesRes {
    pub categories: Vec<CategorySummary>,
}

impl From<&Taxonomy> for ListCategoriesRes {
    fn from(taxonomy: &Taxonomy) -> Self {
        Self {
            categories: taxonomy
                .categories()
                .iter()
                .map(|c| CategorySummary {
                    id: c.id.clone(),
                    icon: c.icon.clone(),
                    urgency: c.urgency.to_string(),
                    recommendation: c.recommendation.clone(),
                    keyword_count: c.keywords.len(),
                    diseases: c.diseases.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vira_core::{ClassifierService, CoreConfig};

    fn service() -> ClassifierService {
        ClassifierService::new(Arc::new(CoreConfig::builtin().unwrap()))
    }

    #[test]
    fn test_classify_req_tolerates_missing_fields() {
        let req: ClassifyReq = serde_json::from_str(
            r#"{"transcript": [{"role": "You"}, {"text": "hello"}, {"role": null, "text": null}]}"#,
        )
        .unwrap();
        let utterances = req.into_utterances();
        assert_eq!(utterances[0], Utterance::new("You", ""));
        assert_eq!(utterances[1], Utterance::new("", "hello"));
        assert_eq!(utterances[2], Utterance::new("", ""));

        let empty: ClassifyReq = serde_json::from_str("{}").unwrap();
        assert!(empty.transcript.is_empty());
    }

    #[test]
    fn test_classify_res_matches_core_json() {
        let result = service().classify(&[
            Utterance::new("VIRA", "How are you?"),
            Utterance::new("You", "I have chest pain and a cough, no fever"),
        ]);
        let core_json = serde_json::to_string(&result).unwrap();
        let wire_json = serde_json::to_string(&ClassifyRes::from(result)).unwrap();
        assert_eq!(core_json, wire_json);
    }

    #[test]
    fn test_empty_result_matches_core_json() {
        let result = service().classify(&[]);
        let core_json = serde_json::to_string(&result).unwrap();
        let wire_json = serde_json::to_string(&ClassifyRes::from(result)).unwrap();
        assert_eq!(core_json, wire_json);
        assert!(wire_json.contains(r#""categories":{}"#));
    }

    #[test]
    fn test_list_categories_in_taxonomy_order() {
        let cfg = CoreConfig::builtin().unwrap();
        let res = ListCategoriesRes::from(cfg.taxonomy());
        assert_eq!(res.categories.len(), cfg.taxonomy().len());
        assert_eq!(res.categories[0].id, "oncology");
        assert_eq!(res.categories[0].urgency, "high");
        assert!(res.categories.iter().all(|c| c.keyword_count > 0));
    }
}
