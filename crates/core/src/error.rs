#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("invalid taxonomy: {0}")]
    InvalidTaxonomy(String),
    #[error("failed to read taxonomy file: {0}")]
    TaxonomyRead(std::io::Error),
    #[error("failed to parse taxonomy YAML: {0}")]
    TaxonomyParse(serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type ClassifierResult<T> = std::result::Result<T, ClassifierError>;
