#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("Verified contact registry read failed: {0}")]
    Registry(String),
    #[error("Invalid keyword table: {0}")]
    InvalidKeywordTable(String),
}
