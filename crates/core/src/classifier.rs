//! Transcript classification.
//!
//! Ties the pieces together: extract the user's text, score it against the taxonomy, aggregate
//! the overall risk and build recommendations. Classification is a pure function of the
//! transcript and the configuration; it holds no state between calls and never fails.

use crate::constants::TEXT_PREVIEW_CHARS;
use crate::recommendations::{build_recommendations, Recommendation};
use crate::risk::assess_risk;
use crate::scorer::{score_categories, CategoryMatch};
use crate::taxonomy::Taxonomy;
use crate::transcript::{user_text, Utterance};
use crate::CoreConfig;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use vira_types::RiskLevel;

/// Matched categories, highest score first.
///
/// Serialises as a JSON object keyed by category id, preserving rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedCategories(Vec<CategoryMatch>);

impl RankedCategories {
    pub fn as_slice(&self) -> &[CategoryMatch] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryMatch> {
        self.0.iter()
    }

    pub fn get(&self, category_id: &str) -> Option<&CategoryMatch> {
        self.0.iter().find(|m| m.category_id == category_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<CategoryMatch> {
        self.0
    }
}

impl Serialize for RankedCategories {
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

/// Everything the classifier says about one transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub risk_level: RiskLevel,
    pub risk_label: String,
    pub risk_description: String,
    pub categories: RankedCategories,
    pub recommendations: Vec<Recommendation>,
    /// The first characters of the analysed user text.
    pub analyzed_text_preview: String,
}

/// Returns the prefix of `text` holding at most `max_chars` characters.
fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Classifies a transcript against a taxonomy.
///
/// Only end-user utterances are analysed, and at most `max_input_chars` characters of their
/// concatenated text.
pub fn classify_transcript(
    transcript: &[Utterance],
    taxonomy: &Taxonomy,
    max_input_chars: usize,
) -> ClassificationResult {
    let full_text = user_text(transcript);
    let text = char_prefix(&full_text, max_input_chars);
    if text.len() < full_text.len() {
        tracing::warn!(
            max_input_chars,
            "user text exceeds input cap; analysing truncated text"
        );
    }

    let ranked = score_categories(text, taxonomy);
    let risk = assess_risk(&ranked);
    let recommendations = build_recommendations(risk.level, &ranked);

    tracing::debug!(
        utterances = transcript.len(),
        categories = ranked.len(),
        risk = %risk.level,
        "classified transcript"
    );

    ClassificationResult {
        risk_level: risk.level,
        risk_label: risk.label,
        risk_description: risk.description,
        categories: RankedCategories(ranked),
        recommendations,
        analyzed_text_preview: char_prefix(text, TEXT_PREVIEW_CHARS).to_string(),
    }
}

/// Stateless classifier over a shared, immutable configuration.
///
/// Cheap to clone and safe to call from any number of request handlers at once.
#[derive(Clone)]
pub struct ClassifierService {
    cfg: Arc<CoreConfig>,
}

impl ClassifierService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        self.cfg.taxonomy()
    }

    /// Classifies a full transcript.
    pub fn classify(&self, transcript: &[Utterance]) -> ClassificationResult {
        classify_transcript(transcript, self.cfg.taxonomy(), self.cfg.max_input_chars())
    }

    /// Classifies free text as if the user had said it in a single utterance.
    pub fn classify_text(&self, text: &str) -> ClassificationResult {
        self.classify(&[Utterance::new("user", text)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vira_types::{Priority, Urgency};

    fn service() -> ClassifierService {
        ClassifierService::new(Arc::new(CoreConfig::builtin().unwrap()))
    }

    fn you(text: &str) -> Utterance {
        Utterance::new("You", text)
    }

    fn assert_fallback_result(result: &ClassificationResult) {
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.risk_label, "Low");
        assert!(result.categories.is_empty());
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].priority, Priority::Low);
        assert_eq!(
            result.recommendations[0].text,
            "No specific concerns detected. Maintain healthy habits."
        );
    }

    #[test]
    fn test_empty_transcript_is_low_with_fallback() {
        let result = service().classify(&[]);
        assert_fallback_result(&result);
        assert_eq!(result.risk_description, "No specific concerns detected");
        assert_eq!(result.analyzed_text_preview, "");
    }

    #[test]
    fn test_transcript_without_user_turns_is_low_with_fallback() {
        let result = service().classify(&[
            Utterance::new("VIRA", "Do you have chest pain or a lump?"),
            Utterance::new("assistant", "Any fever or cough?"),
        ]);
        assert_fallback_result(&result);
    }

    #[test]
    fn test_neck_lump_scenario() {
        let result = service().classify(&[you(
            "I have a hard painless lump in my neck that's been growing for weeks",
        )]);

        assert!(result.risk_level >= RiskLevel::High);
        let oncology = result.categories.get("oncology").unwrap();
        assert_eq!(oncology.urgency, Urgency::High);
        assert_eq!(result.categories.as_slice()[0].category_id, "oncology");
        assert!(result.categories.get("thyroid").is_some());
        assert!(result.categories.get("lymphatic").is_some());

        assert_eq!(result.recommendations[0].priority, Priority::Urgent);
        assert_eq!(
            result.recommendations[0].text,
            "Please consult a healthcare professional soon."
        );
        assert_eq!(result.recommendations[1].text, oncology.recommendation);
    }

    #[test]
    fn test_anxiety_scenario() {
        let result = service().classify(&[you("I feel a bit anxious and can't sleep well")]);

        let mental = result.categories.get("mental_health").unwrap();
        assert_eq!(mental.urgency, Urgency::Moderate);
        assert_eq!(mental.score, 6);
        assert_eq!(result.categories.len(), 1);
        // Total score 6 is not above the moderate threshold.
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(result
            .recommendations
            .iter()
            .all(|r| r.priority != Priority::Urgent));
        assert_eq!(result.recommendations[0].priority, Priority::Moderate);
    }

    #[test]
    fn test_negated_chest_symptoms_scenario() {
        let result =
            service().classify(&[you("no chest pain, no palpitations, just a mild cough")]);
        assert!(result.categories.get("cardiac").is_none());
        assert!(result.categories.get("respiratory").is_some());
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_negated_fever_scenario() {
        let result = service().classify(&[you("no fever, but headache")]);
        assert!(result.categories.get("infectious").is_none());
        assert!(result.categories.get("respiratory").is_none());
        let neuro = result.categories.get("neurological").unwrap();
        assert_eq!(neuro.matched_keywords, vec!["headache"]);
    }

    #[test]
    fn test_single_high_category_is_high() {
        let result = service().classify(&[you("I have chest pain")]);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.risk_description, "Consult a doctor soon");
        assert_eq!(result.recommendations[0].priority, Priority::Urgent);
    }

    #[test]
    fn test_two_high_categories_is_emergency() {
        let result = service().classify(&[you("I have chest pain"), you("and a lump")]);
        let total: u32 = result.categories.iter().map(|m| m.score).sum();
        assert!(total <= 12);
        assert_eq!(result.risk_level, RiskLevel::Emergency);
        assert_eq!(result.risk_label, "Emergency");
    }

    #[test]
    fn test_high_total_score_is_emergency() {
        let result = service().classify_text(
            "cough wheezing sore throat runny nose congestion phlegm fever",
        );
        assert_eq!(result.categories.get("respiratory").unwrap().score, 14);
        assert_eq!(result.risk_level, RiskLevel::Emergency);
    }

    #[test]
    fn test_only_user_text_is_scored() {
        let result = service().classify(&[
            Utterance::new("VIRA", "Do you have chest pain?"),
            you("I have a rash"),
        ]);
        assert!(result.categories.get("cardiac").is_none());
        assert!(result.categories.get("dermatological").is_some());
        assert_eq!(result.analyzed_text_preview, "I have a rash");
    }

    #[test]
    fn test_preview_is_first_200_chars() {
        let long = "x".repeat(150);
        let result = service().classify(&[you(&long), you(&long)]);
        assert_eq!(result.analyzed_text_preview.chars().count(), 200);
        assert!(result.analyzed_text_preview.starts_with(&long));
        assert_eq!(result.analyzed_text_preview.chars().nth(150), Some(' '));
    }

    #[test]
    fn test_input_cap_truncates_analysed_text() {
        let cfg = CoreConfig::new(Taxonomy::builtin().unwrap(), 10).unwrap();
        let capped = ClassifierService::new(Arc::new(cfg));
        let result = capped.classify_text("aaaaaaaaaa chest pain");
        assert!(result.categories.is_empty());
        assert_eq!(result.analyzed_text_preview, "aaaaaaaaaa");
    }

    #[test]
    fn test_classification_is_idempotent() {
        let service = service();
        let transcript = vec![
            you("I get headaches and feel dizzy"),
            Utterance::new("VIRA", "How long?"),
            you("a week, with some nausea and a cough"),
        ];
        let first = serde_json::to_string(&service.classify(&transcript)).unwrap();
        let second = serde_json::to_string(&service.classify(&transcript)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialises_categories_as_ranked_object() {
        let result = service().classify_text("I have a hard painless lump in my neck");
        let json = serde_json::to_string(&result).unwrap();

        assert!(json.starts_with(r#"{"riskLevel":"high","riskLabel":"High","#));
        let oncology = json.find(r#""oncology":{"categoryId":"oncology""#).unwrap();
        let thyroid = json.find(r#""thyroid":{"#).unwrap();
        assert!(oncology < thyroid);
        assert!(json.contains(r#""matchedKeywords":["lump","painless"]"#));
        assert!(json.contains(r#""possibleDiseases":"#));
        assert!(json.contains(r#""analyzedTextPreview":"I have a hard painless lump in my neck""#));
        assert!(json.contains(r#"{"priority":"urgent","#));
    }
}
