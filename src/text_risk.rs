//! Keyword and pattern based text risk scoring
//!
//! The same scorer handles text typed into a scam report and text pulled
//! out of a screenshot by OCR; only the source of the text differs.

use crate::error::AssessmentError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

pub const URL_BONUS: i32 = 15;
pub const PHONE_BONUS: i32 = 10;

pub const HIGH_RISK_THRESHOLD: u8 = 70;
pub const MEDIUM_RISK_THRESHOLD: u8 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= HIGH_RISK_THRESHOLD => RiskLevel::High,
            s if s >= MEDIUM_RISK_THRESHOLD => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

/// Clamp an accumulated score into 0..=100.
pub fn clamp_score(total: i32) -> u8 {
    total.clamp(0, 100) as u8
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordWeight {
    pub keyword: String,
    pub weight: i32,
}

/// Ordered keyword table. Iteration order decides the order of
/// `matched_keywords`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    entries: Vec<KeywordWeight>,
}

impl KeywordTable {
    /// Build a table from raw entries. Keywords are trimmed and lower-cased;
    /// a repeated keyword keeps its first weight.
    pub fn new(entries: Vec<KeywordWeight>) -> Result<Self, AssessmentError> {
        let mut seen = HashSet::new();
        let mut table = Vec::with_capacity(entries.len());

        for entry in entries {
            let keyword = entry.keyword.trim().to_lowercase();
            if keyword.is_empty() {
                return Err(AssessmentError::InvalidKeywordTable(
                    "keyword must not be empty".to_string(),
                ));
            }

            if !seen.insert(keyword.clone()) {
                log::warn!("Duplicate keyword '{}' ignored, first weight kept", keyword);
                continue;
            }

            table.push(KeywordWeight {
                keyword,
                weight: entry.weight,
            });
        }

        Ok(Self { entries: table })
    }

    pub fn entries(&self) -> &[KeywordWeight] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        let defaults: &[(&str, i32)] = &[
            ("otp", 25),
            ("urgent", 15),
            ("kyc", 20),
            ("upi pin", 25),
            ("cvv", 25),
            ("password", 20),
            ("lottery", 25),
            ("winner", 20),
            ("prize", 20),
            ("cashback", 10),
            ("refund", 15),
            ("block", 15),
            ("suspended", 20),
            ("verify", 10),
            ("click here", 15),
            ("limited time", 10),
            ("act now", 15),
            ("gift card", 20),
            ("processing fee", 20),
            ("customs", 15),
            ("parcel", 10),
            ("work from home", 15),
            ("investment", 15),
            ("double your money", 30),
            ("crypto", 15),
            ("loan approved", 20),
            ("electricity bill", 15),
            ("remote access", 25),
            ("anydesk", 25),
        ];

        Self {
            entries: defaults
                .iter()
                .map(|(keyword, weight)| KeywordWeight {
                    keyword: keyword.to_string(),
                    weight: *weight,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRiskResult {
    pub score: u8,
    pub risk: RiskLevel,
    pub matched_keywords: Vec<String>,
    pub detected_urls: Vec<String>,
    pub detected_phones: Vec<String>,
}

impl TextRiskResult {
    pub fn empty() -> Self {
        Self {
            score: 0,
            risk: RiskLevel::Low,
            matched_keywords: Vec::new(),
            detected_urls: Vec::new(),
            detected_phones: Vec::new(),
        }
    }
}

pub struct TextRiskScorer {
    keywords: Arc<KeywordTable>,
    url_regex: Regex,
    phone_regex: Regex,
}

impl Default for TextRiskScorer {
    fn default() -> Self {
        Self::new(Arc::new(KeywordTable::default()))
    }
}

impl TextRiskScorer {
    pub fn new(keywords: Arc<KeywordTable>) -> Self {
        Self {
            keywords,
            url_regex: Regex::new(r"https?://\S+").unwrap(),
            phone_regex: Regex::new(r"\+?[0-9]{10,13}").unwrap(),
        }
    }

    pub fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    /// Score the title and description of a submitted report.
    pub fn score_report_text(&self, text: &str) -> TextRiskResult {
        self.score_text(text)
    }

    /// Score text extracted from a screenshot by an OCR step.
    pub fn score_extracted_text(&self, text: &str) -> TextRiskResult {
        self.score_text(text)
    }

    pub fn score_text(&self, text: &str) -> TextRiskResult {
        if text.trim().is_empty() {
            return TextRiskResult::empty();
        }

        let lower = text.to_lowercase();
        let mut total: i32 = 0;
        let mut matched_keywords = Vec::new();

        for entry in self.keywords.entries() {
            if lower.contains(&entry.keyword) {
                total = total.saturating_add(entry.weight);
                matched_keywords.push(entry.keyword.clone());
            }
        }

        let detected_urls: Vec<String> = self
            .url_regex
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect();
        if !detected_urls.is_empty() {
            total = total.saturating_add(URL_BONUS);
        }

        let detected_phones: Vec<String> = self
            .phone_regex
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect();
        if !detected_phones.is_empty() {
            total = total.saturating_add(PHONE_BONUS);
        }

        let score = clamp_score(total);

        TextRiskResult {
            score,
            risk: RiskLevel::from_score(score),
            matched_keywords,
            detected_urls,
            detected_phones,
        }
    }
}
