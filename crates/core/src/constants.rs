//! Constants used throughout the VIRA core crate.
//!
//! Scoring weights, window sizes and fixed output strings live here so that the scorer, the
//! risk aggregator and the recommendation builder agree on them.

/// Points added to a category for each matched (non-negated) keyword.
pub const KEYWORD_WEIGHT: u32 = 2;

/// Number of characters inspected before a keyword match when looking for a negation cue.
pub const NEGATION_WINDOW_CHARS: usize = 25;

/// Number of top-ranked categories that contribute a recommendation.
pub const MAX_CATEGORY_RECOMMENDATIONS: usize = 3;

/// Number of characters of the analysed user text echoed back in the result.
pub const TEXT_PREVIEW_CHARS: usize = 200;

/// Default cap on the number of characters of user text analysed per call.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 20_000;

/// Roles (case-insensitive) that identify an utterance spoken by the end user.
pub const USER_ROLES: &[&str] = &["you", "user", "patient"];

/// Total score above which the overall risk becomes moderate.
pub const MODERATE_TOTAL_SCORE: u32 = 6;

/// Total score above which the overall risk becomes an emergency.
pub const EMERGENCY_TOTAL_SCORE: u32 = 12;

/// Number of high-urgency categories that on their own make the risk an emergency.
pub const EMERGENCY_HIGH_COUNT: usize = 2;

pub const NO_CONCERNS_DESCRIPTION: &str = "No specific concerns detected";
pub const EMERGENCY_DESCRIPTION: &str = "Seek immediate medical attention";
pub const HIGH_DESCRIPTION: &str = "Consult a doctor soon";
pub const MODERATE_DESCRIPTION: &str = "Monitor symptoms and consider a doctor visit";
pub const LOW_DESCRIPTION: &str = "Monitor symptoms. Maintain healthy habits.";

pub const URGENT_RECOMMENDATION_TEXT: &str = "Please consult a healthcare professional soon.";
pub const URGENT_RECOMMENDATION_ICON: &str = "🏥";
pub const FALLBACK_RECOMMENDATION_TEXT: &str =
    "No specific concerns detected. Maintain healthy habits.";
pub const FALLBACK_RECOMMENDATION_ICON: &str = "✅";

