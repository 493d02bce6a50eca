//! Symptom category taxonomy.
//!
//! The taxonomy is declarative data: a YAML list of categories, each with the keywords that
//! select it, the diseases it suggests, a fixed urgency and a fixed recommendation. The built-in
//! table is embedded at compile time from `taxonomy/categories.yaml`; an alternative file can be
//! supplied at startup.
//!
//! Every loader validates the whole table before returning it, so a `Taxonomy` value is always
//! well formed and classification never has to re-check it.

use crate::{ClassifierError, ClassifierResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use vira_types::Urgency;

const BUILTIN_TAXONOMY_YAML: &str = include_str!("../taxonomy/categories.yaml");

/// A named bucket of related medical concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    /// Unique symbolic name, e.g. `cardiac`.
    pub id: String,
    /// Display glyph. Presentation only.
    #[serde(default)]
    pub icon: String,
    pub urgency: Urgency,
    pub recommendation: String,
    /// Lowercase substrings, scanned in order.
    pub keywords: Vec<String>,
    /// Candidate conditions, most likely first.
    pub diseases: Vec<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TaxonomyFile {
    categories: Vec<Category>,
}

/// A validated, immutable set of categories in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    categories: Vec<Category>,
}

impl Taxonomy {
    /// Builds a taxonomy from categories, validating every entry.
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::InvalidTaxonomy` if:
    /// - there are no categories,
    /// - a category id is empty, duplicated, or not made of `[a-z0-9_]`,
    /// - a category has no keywords, a blank or non-lowercase keyword, or a duplicate keyword,
    /// - a category has no diseases or a blank disease name,
    /// - a recommendation is blank.
    pub fn new(categories: Vec<Category>) -> ClassifierResult<Self> {
        if categories.is_empty() {
            return Err(ClassifierError::InvalidTaxonomy(
                "taxonomy must contain at least one category".into(),
            ));
        }

        let mut seen_ids = HashSet::new();
        for category in &categories {
            validate_category(category)?;
            if !seen_ids.insert(category.id.as_str()) {
                return Err(ClassifierError::InvalidTaxonomy(format!(
                    "duplicate category id '{}'",
                    category.id
                )));
            }
        }

        Ok(Self { categories })
    }

    /// Parses and validates a taxonomy from YAML text.
    pub fn from_yaml_str(yaml: &str) -> ClassifierResult<Self> {
        let file: TaxonomyFile =
            serde_yaml::from_str(yaml).map_err(ClassifierError::TaxonomyParse)?;
        Self::new(file.categories)
    }

    /// Reads, parses and validates a taxonomy YAML file.
    pub fn from_yaml_file(path: &Path) -> ClassifierResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(ClassifierError::TaxonomyRead)?;
        Self::from_yaml_str(&yaml)
    }

    /// The taxonomy compiled into the binary.
    pub fn builtin() -> ClassifierResult<Self> {
        Self::from_yaml_str(BUILTIN_TAXONOMY_YAML)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

fn invalid(category: &Category, reason: impl std::fmt::Display) -> ClassifierError {
    ClassifierError::InvalidTaxonomy(format!("category '{}': {}", category.id, reason))
}

fn validate_category(category: &Category) -> ClassifierResult<()> {
    if category.id.is_empty() {
        return Err(invalid(category, "id cannot be empty"));
    }
    let id_ok = category
        .id
        .bytes()
        .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_'));
    if !id_ok {
        return Err(invalid(
            category,
            "id contains invalid characters (only 'a'-'z', '0'-'9', '_' allowed)",
        ));
    }

    if category.keywords.is_empty() {
        return Err(invalid(category, "keyword list cannot be empty"));
    }
    let mut seen_keywords = HashSet::new();
    for keyword in &category.keywords {
        if keyword.trim().is_empty() {
            return Err(invalid(category, "keywords cannot be blank"));
        }
        if keyword.trim() != keyword.as_str() {
            return Err(invalid(
                category,
                format!("keyword '{keyword}' has leading or trailing whitespace"),
            ));
        }
        if keyword.to_lowercase() != *keyword {
            return Err(invalid(
                category,
                format!("keyword '{keyword}' must be lowercase"),
            ));
        }
        if !seen_keywords.insert(keyword.as_str()) {
            return Err(invalid(category, format!("duplicate keyword '{keyword}'")));
        }
    }

    if category.diseases.is_empty() {
        return Err(invalid(category, "disease list cannot be empty"));
    }
    if category.diseases.iter().any(|d| d.trim().is_empty()) {
        return Err(invalid(category, "disease names cannot be blank"));
    }

    // Blank recommendations would surface as empty advice entries.
    if category.recommendation.trim().is_empty() {
        return Err(invalid(category, "recommendation cannot be empty"));
    }

    Ok(())
}
