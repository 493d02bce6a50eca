//! Conversation transcripts.
//!
//! A transcript is the ordered list of speaker-tagged utterances from a voice or text session.
//! Only what the end user said is evidence of symptoms; assistant turns are dropped before
//! scoring.

use crate::constants::USER_ROLES;
use serde::{Deserialize, Deserializer, Serialize};

/// One speaker-tagged utterance.
///
/// Missing or `null` fields deserialise as empty strings so that a partially-populated
/// transcript still classifies instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
}

impl Utterance {
    pub fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            text: text.into(),
        }
    }

    /// Whether this utterance was spoken by the end user rather than the assistant.
    pub fn is_from_user(&self) -> bool {
        let role = self.role.trim();
        USER_ROLES.iter().any(|r| role.eq_ignore_ascii_case(r))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Concatenates the end user's utterances, in order, separated by single spaces.
pub fn user_text(transcript: &[Utterance]) -> String {
    transcript
        .iter()
        .filter(|u| u.is_from_user())
        .map(|u| u.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
