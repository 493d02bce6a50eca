//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the classifier
//! service. Request handling never reads environment variables; the helpers here take already
//! read values so that binaries and tests decide where those values come from.

use crate::constants::DEFAULT_MAX_INPUT_CHARS;
use crate::taxonomy::Taxonomy;
use crate::{ClassifierError, ClassifierResult};
use std::path::PathBuf;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    taxonomy: Taxonomy,
    max_input_chars: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::InvalidConfig` if `max_input_chars` is zero.
    pub fn new(taxonomy: Taxonomy, max_input_chars: usize) -> ClassifierResult<Self> {
        if max_input_chars == 0 {
            return Err(ClassifierError::InvalidConfig(
                "max_input_chars must be greater than zero".into(),
            ));
        }

        Ok(Self {
            taxonomy,
            max_input_chars,
        })
    }

    /// Configuration with the built-in taxonomy and default limits.
    pub fn builtin() -> ClassifierResult<Self> {
        Self::new(Taxonomy::builtin()?, DEFAULT_MAX_INPUT_CHARS)
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }
}

/// Resolve the taxonomy without reading environment variables.
///
/// If `override_path` is provided the YAML file at that path is loaded and validated; otherwise
/// the built-in taxonomy is used.
pub fn resolve_taxonomy(override_path: Option<PathBuf>) -> ClassifierResult<Taxonomy> {
    match override_path {
        Some(path) => {
            tracing::info!("loading taxonomy from {}", path.display());
            Taxonomy::from_yaml_file(&path)
        }
        None => Taxonomy::builtin(),
    }
}

/// Parse the input-length cap from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default cap.
pub fn max_input_chars_from_env_value(value: Option<String>) -> ClassifierResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let Some(value) = value else {
        return Ok(DEFAULT_MAX_INPUT_CHARS);
    };

    match value.parse::<usize>() {
        Ok(0) => Err(ClassifierError::InvalidConfig(
            "VIRA_MAX_INPUT_CHARS must be greater than zero".into(),
        )),
        Ok(n) => Ok(n),
        Err(e) => Err(ClassifierError::InvalidConfig(format!(
            "VIRA_MAX_INPUT_CHARS is not a valid number ({value}): {e}"
        ))),
    }
}
