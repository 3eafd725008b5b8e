//! Verified contact matching
//!
//! Compares a submitted contact against contacts moderators have already
//! confirmed as scam sources and reports how close the best one is.

use crate::contact::{ContactClassifier, ContactType};
use crate::error::AssessmentError;
use crate::similarity::SimilarityScorer;
use serde::{Deserialize, Serialize};

/// Minimum similarity for a verified contact to be disclosed as a match.
pub const MATCH_DISCLOSURE_THRESHOLD: u8 = 70;

/// Registry scan cap used when no explicit limit is configured.
pub const DEFAULT_SCAN_LIMIT: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedContactRecord {
    #[serde(default)]
    pub value: String,
    #[serde(rename = "type", default)]
    pub kind: ContactType,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub is_verified: bool,
}

impl VerifiedContactRecord {
    fn is_malformed(&self) -> bool {
        self.value.trim().is_empty() || self.kind == ContactType::Unknown
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: ContactType,
    pub source: String,
    pub similarity: u8,
    pub tags: Vec<String>,
    pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactMatch {
    pub best_percent: u8,
    pub matches: Vec<MatchResult>,
}

/// Read-only source of verified scam contacts.
pub trait ContactRegistry: Send + Sync {
    /// Verified records of the given type, at most `limit` of them.
    fn verified_contacts(
        &self,
        kind: ContactType,
        limit: usize,
    ) -> Result<Vec<VerifiedContactRecord>, AssessmentError>;
}

/// Registry snapshot held in memory, typically loaded from a YAML or JSON
/// file by `ConfigLoader::load_registry`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    records: Vec<VerifiedContactRecord>,
}

impl InMemoryRegistry {
    pub fn new(records: Vec<VerifiedContactRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[VerifiedContactRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ContactRegistry for InMemoryRegistry {
    fn verified_contacts(
        &self,
        kind: ContactType,
        limit: usize,
    ) -> Result<Vec<VerifiedContactRecord>, AssessmentError> {
        let mut candidates: Vec<VerifiedContactRecord> = self
            .records
            .iter()
            .filter(|r| r.kind == kind && r.is_verified)
            .take(limit.saturating_add(1))
            .cloned()
            .collect();

        if candidates.len() > limit {
            candidates.truncate(limit);
            log::debug!("Registry scan for {} capped at {} records", kind, limit);
        }

        Ok(candidates)
    }
}

pub struct ContactMatcher;

impl ContactMatcher {
    /// Match `raw` against `registry`. Output keeps registry order; sort
    /// explicitly if a ranking is needed.
    pub fn match_contact(raw: &str, registry: &[VerifiedContactRecord]) -> ContactMatch {
        if raw.trim().is_empty() {
            return ContactMatch::default();
        }

        let kind = ContactClassifier::classify(raw);
        let input_key =
            ContactClassifier::comparison_key(kind, &ContactClassifier::normalize(raw));

        let mut result = ContactMatch::default();

        for record in registry {
            if record.is_malformed() {
                log::debug!(
                    "Skipping malformed verified contact (value: {:?}, type: {})",
                    record.value,
                    record.kind
                );
                continue;
            }

            if record.kind != kind || !record.is_verified {
                continue;
            }

            let normalized = ContactClassifier::normalize(&record.value);
            let record_key = ContactClassifier::comparison_key(kind, &normalized);
            let sim = SimilarityScorer::similarity(&input_key, &record_key);

            if sim > result.best_percent {
                result.best_percent = sim;
            }

            if sim >= MATCH_DISCLOSURE_THRESHOLD {
                result.matches.push(MatchResult {
                    value: record.value.clone(),
                    kind: record.kind,
                    source: record.source.clone(),
                    similarity: sim,
                    tags: record.tags.clone(),
                    notes: record.notes.clone(),
                });
            }
        }

        log::debug!(
            "Contact {:?} ({}) best match {}%, {} disclosed",
            raw,
            kind,
            result.best_percent,
            result.matches.len()
        );

        result
    }
}
