/// Operational errors raised outside the validation run itself.
///
/// Findings about the drillhole data are never represented here; they are
/// [`crate::validation::report::ValidationError`] values in the summary.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
