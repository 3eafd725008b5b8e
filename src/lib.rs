pub mod assessor;
pub mod config;
pub mod config_loader;
pub mod contact;
pub mod error;
pub mod matcher;
pub mod similarity;
pub mod text_risk;

pub use assessor::{CompositeAssessment, CompositeRiskAssessor, ReportSubmission};
pub use config::EngineConfig;
pub use contact::{ContactClassifier, ContactType};
pub use error::AssessmentError;
pub use matcher::{
    ContactMatch, ContactMatcher, ContactRegistry, InMemoryRegistry, MatchResult,
    VerifiedContactRecord,
};
pub use similarity::SimilarityScorer;
pub use text_risk::{KeywordTable, RiskLevel, TextRiskResult, TextRiskScorer};
