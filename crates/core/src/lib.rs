//! # VIRA Core
//!
//! Rule-based symptom classification for the VIRA health assistant.
//!
//! This crate turns a conversation transcript into a ranked set of symptom categories, an
//! overall risk level and a list of recommendations:
//! - [`taxonomy`]: the declarative category table, validated once at load time
//! - [`scorer`]: keyword matching with negation suppression
//! - [`risk`]: overall risk aggregation
//! - [`recommendations`]: ordered, actionable guidance
//! - [`classifier`]: the stateless service tying these together
//!
//! **No API concerns**: HTTP servers and wire types belong in `api-rest` and `api-shared`.

pub mod classifier;
pub mod config;
pub mod constants;
pub mod error;
pub mod negation;
pub mod recommendations;
pub mod risk;
pub mod scorer;
pub mod taxonomy;
pub mod transcript;

pub use classifier::{
    classify_transcript, ClassificationResult, ClassifierService, RankedCategories,
};
pub use config::CoreConfig;
pub use error::{ClassifierError, ClassifierResult};
pub use recommendations::Recommendation;
pub use risk::RiskAssessment;
pub use scorer::CategoryMatch;
pub use taxonomy::{Category, Taxonomy};
pub use transcript::Utterance;
pub use vira_types::{Priority, RiskLevel, Urgency};
