//! Composite Risk Assessor
//!
//! Combines the text score of a report, the loss signal and the verified
//! contact match into the final susceptibility score.

use crate::contact::ContactClassifier;
use crate::error::AssessmentError;
use crate::matcher::{
    ContactMatch, ContactMatcher, ContactRegistry, MatchResult, VerifiedContactRecord,
    DEFAULT_SCAN_LIMIT,
};
use crate::text_risk::{clamp_score, KeywordTable, RiskLevel, TextRiskScorer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const LOSS_BONUS: i32 = 35;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeAssessment {
    pub susceptibility_score: u8,
    pub risk_level: RiskLevel,
    pub contact_match_percent: u8,
    pub matched_verified_contacts: Vec<MatchResult>,
}

/// Fields of a filed scam report that feed the assessment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportSubmission {
    pub title: String,
    pub description: String,
    pub scam_type: Option<String>,
    pub platform: Option<String>,
    pub scammer_contact: String,
    pub loss_amount: Option<serde_json::Value>,
}

impl ReportSubmission {
    /// Loss amount as a number. Numeric strings are accepted; anything
    /// else counts as no loss.
    pub fn loss(&self) -> f64 {
        let parsed = match &self.loss_amount {
            Some(serde_json::Value::Number(n)) => n.as_f64(),
            Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
    }
}

/// Bonus for the best contact match; tiers do not stack.
pub fn contact_match_bonus(percent: u8) -> i32 {
    match percent {
        p if p >= 90 => 35,
        p if p >= 80 => 25,
        p if p >= 70 => 15,
        _ => 0,
    }
}

pub struct CompositeRiskAssessor {
    scorer: TextRiskScorer,
    scan_limit: usize,
}

impl Default for CompositeRiskAssessor {
    fn default() -> Self {
        Self::new(Arc::new(KeywordTable::default()))
    }
}

impl CompositeRiskAssessor {
    pub fn new(keywords: Arc<KeywordTable>) -> Self {
        Self {
            scorer: TextRiskScorer::new(keywords),
            scan_limit: DEFAULT_SCAN_LIMIT,
        }
    }

    pub fn with_scan_limit(mut self, scan_limit: usize) -> Self {
        self.scan_limit = scan_limit;
        self
    }

    pub fn scorer(&self) -> &TextRiskScorer {
        &self.scorer
    }

    pub fn scan_limit(&self) -> usize {
        self.scan_limit
    }

    /// Assess a report against an already fetched registry snapshot.
    pub fn assess_report(
        &self,
        title: &str,
        description: &str,
        loss_amount: f64,
        scammer_contact: &str,
        registry: &[VerifiedContactRecord],
    ) -> CompositeAssessment {
        let text = self
            .scorer
            .score_report_text(&format!("{} {}", title, description));
        let mut total = i32::from(text.score);

        if loss_amount > 0.0 {
            total += LOSS_BONUS;
        }

        let contact_match = if scammer_contact.trim().is_empty() {
            ContactMatch::default()
        } else {
            ContactMatcher::match_contact(scammer_contact, registry)
        };
        total += contact_match_bonus(contact_match.best_percent);

        let susceptibility_score = clamp_score(total);
        let risk_level = RiskLevel::from_score(susceptibility_score);

        log::debug!(
            "Report assessed: text={} loss={} contact={}% -> {} ({:?})",
            text.score,
            loss_amount > 0.0,
            contact_match.best_percent,
            susceptibility_score,
            risk_level
        );

        CompositeAssessment {
            susceptibility_score,
            risk_level,
            contact_match_percent: contact_match.best_percent,
            matched_verified_contacts: contact_match.matches,
        }
    }

    /// Assess a submission, pulling candidates for the contact's type from
    /// `registry`. Registry failures are returned, never scored as zero.
    pub fn assess_submission(
        &self,
        submission: &ReportSubmission,
        registry: &dyn ContactRegistry,
    ) -> Result<CompositeAssessment, AssessmentError> {
        let candidates = if submission.scammer_contact.trim().is_empty() {
            Vec::new()
        } else {
            let kind = ContactClassifier::classify(&submission.scammer_contact);
            registry.verified_contacts(kind, self.scan_limit)?
        };

        Ok(self.assess_report(
            &submission.title,
            &submission.description,
            submission.loss(),
            &submission.scammer_contact,
            &candidates,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::ContactType;
    use crate::matcher::InMemoryRegistry;

    fn verified_phone(value: &str) -> VerifiedContactRecord {
        VerifiedContactRecord {
            value: value.to_string(),
            kind: ContactType::Phone,
            source: "cyber cell".to_string(),
            tags: vec!["otp".to_string()],
            notes: String::new(),
            is_verified: true,
        }
    }

    struct FailingRegistry;

    impl ContactRegistry for FailingRegistry {
        fn verified_contacts(
            &self,
            _kind: ContactType,
            _limit: usize,
        ) -> Result<Vec<VerifiedContactRecord>, AssessmentError> {
            Err(AssessmentError::Registry("connection reset".to_string()))
        }
    }

    #[test]
    fn test_contact_bonus_tiers() {
        assert_eq!(contact_match_bonus(100), 35);
        assert_eq!(contact_match_bonus(90), 35);
        assert_eq!(contact_match_bonus(89), 25);
        assert_eq!(contact_match_bonus(80), 25);
        assert_eq!(contact_match_bonus(79), 15);
        assert_eq!(contact_match_bonus(70), 15);
        assert_eq!(contact_match_bonus(69), 0);
        assert_eq!(contact_match_bonus(0), 0);
    }

    #[test]
    fn test_otp_scam_with_known_number() {
        let assessor = CompositeRiskAssessor::default();
        let registry = vec![verified_phone("9876543210")];

        let assessment = assessor.assess_report(
            "Urgent OTP required",
            "Share your OTP now to avoid account block",
            5000.0,
            "+919876543210",
            &registry,
        );

        assert_eq!(assessment.contact_match_percent, 100);
        assert_eq!(assessment.susceptibility_score, 100);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.matched_verified_contacts.len(), 1);
        assert_eq!(assessment.matched_verified_contacts[0].similarity, 100);
    }

    #[test]
    fn test_no_signal_report() {
        let assessor = CompositeRiskAssessor::default();
        let assessment = assessor.assess_report("Lunch meeting", "See you at noon", 0.0, "", &[]);

        assert_eq!(assessment.susceptibility_score, 0);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert_eq!(assessment.contact_match_percent, 0);
        assert!(assessment.matched_verified_contacts.is_empty());
    }

    #[test]
    fn test_loss_bonus_applied_once() {
        let assessor = CompositeRiskAssessor::default();
        let small = assessor.assess_report("Lost money", "sent it", 1.0, "", &[]);
        let large = assessor.assess_report("Lost money", "sent it", 1_000_000.0, "", &[]);

        assert_eq!(small.susceptibility_score, 35);
        assert_eq!(large.susceptibility_score, 35);
        assert_eq!(small.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_partial_contact_match_tier() {
        let assessor = CompositeRiskAssessor::default();
        // one digit off in ten: 90%
        let registry = vec![verified_phone("9876543211")];
        let assessment =
            assessor.assess_report("Missed call", "", 0.0, "98765 43210", &registry);

        assert_eq!(assessment.contact_match_percent, 90);
        assert_eq!(assessment.susceptibility_score, 35);
    }

    #[test]
    fn test_deterministic_output() {
        let assessor = CompositeRiskAssessor::default();
        let registry = vec![verified_phone("9876543210"), verified_phone("9876543219")];

        let first = assessor.assess_report(
            "KYC pending",
            "Visit https://kyc.example now",
            10.0,
            "9876543210",
            &registry,
        );
        let second = assessor.assess_report(
            "KYC pending",
            "Visit https://kyc.example now",
            10.0,
            "9876543210",
            &registry,
        );

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_submission_uses_registry_provider() {
        let assessor = CompositeRiskAssessor::default();
        let registry = InMemoryRegistry::new(vec![verified_phone("9876543210")]);
        let submission: ReportSubmission = serde_json::from_str(
            r#"{
                "title": "Urgent OTP required",
                "description": "Share your OTP now",
                "scamType": "otp",
                "platform": "whatsapp",
                "scammerContact": "+91 98765 43210",
                "lossAmount": "2500"
            }"#,
        )
        .unwrap();

        let assessment = assessor.assess_submission(&submission, &registry).unwrap();
        assert_eq!(assessment.contact_match_percent, 100);
        assert_eq!(assessment.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_submission_registry_failure_is_reported() {
        let assessor = CompositeRiskAssessor::default();
        let submission = ReportSubmission {
            title: "Call from bank".to_string(),
            scammer_contact: "9876543210".to_string(),
            ..Default::default()
        };

        let err = assessor
            .assess_submission(&submission, &FailingRegistry)
            .unwrap_err();
        assert!(matches!(err, AssessmentError::Registry(_)));
    }

    #[test]
    fn test_submission_without_contact_skips_registry() {
        let assessor = CompositeRiskAssessor::default();
        let submission = ReportSubmission {
            title: "Lunch meeting".to_string(),
            description: "See you at noon".to_string(),
            ..Default::default()
        };

        let assessment = assessor
            .assess_submission(&submission, &FailingRegistry)
            .unwrap();
        assert_eq!(assessment.susceptibility_score, 0);
    }

    #[test]
    fn test_loss_parsing_is_lenient() {
        let mut submission = ReportSubmission::default();
        assert_eq!(submission.loss(), 0.0);

        submission.loss_amount = Some(serde_json::json!("abc"));
        assert_eq!(submission.loss(), 0.0);

        submission.loss_amount = Some(serde_json::json!(" 499.5 "));
        assert_eq!(submission.loss(), 499.5);

        submission.loss_amount = Some(serde_json::json!(-20));
        assert_eq!(submission.loss(), -20.0);
    }

    #[test]
    fn test_assessment_field_names() {
        let assessor = CompositeRiskAssessor::default();
        let json = serde_json::to_value(assessor.assess_report("a", "b", 0.0, "", &[])).unwrap();

        assert_eq!(json["susceptibilityScore"], 0);
        assert_eq!(json["riskLevel"], "LOW");
        assert_eq!(json["contactMatchPercent"], 0);
        assert!(json["matchedVerifiedContacts"].as_array().unwrap().is_empty());
    }
}
