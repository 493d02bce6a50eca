//! Shared value types for the VIRA classifier.
//!
//! These enums cross every crate boundary (taxonomy files, classifier output, REST payloads and
//! CLI output), so they live here with their string forms fixed in one place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors that can occur when parsing the shared value types from strings.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("unknown urgency: {0}")]
    UnknownUrgency(String),
    #[error("unknown risk level: {0}")]
    UnknownRiskLevel(String),
    #[error("unknown priority: {0}")]
    UnknownPriority(String),
}

/// Fixed urgency of a symptom category.
///
/// Urgency is part of the taxonomy and never computed at classification time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Moderate,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Moderate => "moderate",
            Urgency::High => "high",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "moderate" => Ok(Urgency::Moderate),
            "high" => Ok(Urgency::High),
            _ => Err(TypesError::UnknownUrgency(s.to_string())),
        }
    }
}

/// Overall risk derived from every matched category in a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Emergency,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Emergency => "emergency",
        }
    }

    /// Human-readable label shown alongside the level.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::Emergency => "Emergency",
        }
    }

    /// Whether this level warrants prompting the user to see a professional.
    pub fn is_urgent(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Emergency)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "moderate" => Ok(RiskLevel::Moderate),
            "high" => Ok(RiskLevel::High),
            "emergency" => Ok(RiskLevel::Emergency),
            _ => Err(TypesError::UnknownRiskLevel(s.to_string())),
        }
    }
}

/// Priority attached to a recommendation entry.
///
/// Category recommendations carry the category urgency; `Urgent` is reserved for the
/// see-a-professional entry prepended at high and emergency risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    Moderate,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Moderate => "moderate",
            Priority::Low => "low",
        }
    }
}

impl From<Urgency> for Priority {
    fn from(urgency: Urgency) -> Self {
        match urgency {
            Urgency::Low => Priority::Low,
            Urgency::Moderate => Priority::Moderate,
            Urgency::High => Priority::High,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "urgent" => Ok(Priority::Urgent),
            "high" => Ok(Priority::High),
            "moderate" => Ok(Priority::Moderate),
            "low" => Ok(Priority::Low),
            _ => Err(TypesError::UnknownPriority(s.to_string())),
        }
    }
}
