use scam_radar::config_loader::ConfigLoader;
use scam_radar::{CompositeRiskAssessor, ReportSubmission, RiskLevel};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Testing report assessment against the sample registry...");

    let keywords = ConfigLoader::load_keywords(Some("config/keywords.yaml"))?;
    let registry = ConfigLoader::load_registry(Some("config/verified_contacts.yaml"))?;
    let assessor = CompositeRiskAssessor::new(Arc::new(keywords));

    let otp_scam: ReportSubmission = serde_json::from_str(
        r#"{
            "title": "Urgent OTP required",
            "description": "Share your OTP now to avoid account block",
            "scamType": "otp",
            "platform": "sms",
            "scammerContact": "+919876543210",
            "lossAmount": 5000
        }"#,
    )?;

    let assessment = assessor.assess_submission(&otp_scam, &registry)?;
    println!("{}", serde_json::to_string_pretty(&assessment)?);
    if assessment.risk_level == RiskLevel::High {
        println!("✅ OTP scam flagged as HIGH risk");
    } else {
        println!("❌ OTP scam scored {:?}", assessment.risk_level);
    }

    let harmless = ReportSubmission {
        title: "Lunch meeting".to_string(),
        description: "See you at noon".to_string(),
        ..Default::default()
    };

    let assessment = assessor.assess_submission(&harmless, &registry)?;
    println!("{}", serde_json::to_string_pretty(&assessment)?);
    if assessment.risk_level == RiskLevel::Low {
        println!("✅ Harmless message stays LOW risk");
    } else {
        println!("❌ Harmless message scored {:?}", assessment.risk_level);
    }

    let screenshot = "Dear customer your electricity bill is pending. \
                      Call 9123456789 or visit http://pay-bill.example today";
    let scan = assessor.scorer().score_extracted_text(screenshot);
    println!("Screenshot text: {} ({:?})", scan.score, scan.risk);

    Ok(())
}
