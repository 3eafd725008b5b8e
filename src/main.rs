use clap::{Arg, Command};
use log::LevelFilter;
use scam_radar::config_loader::ConfigLoader;
use scam_radar::{
    CompositeRiskAssessor, ContactClassifier, ContactMatcher, ContactRegistry, EngineConfig,
    ReportSubmission,
};
use std::fs;
use std::process;
use std::sync::Arc;

fn main() {
    let matches = Command::new("scam-radar")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Scam report risk scoring and verified scam contact matching")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("scam-radar.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Validate configuration, keyword table and registry")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("score-text")
                .long("score-text")
                .value_name("TEXT")
                .help("Score report text and print the result as JSON")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("screenshot-text")
                .long("screenshot-text")
                .value_name("FILE")
                .help("Score OCR-extracted screenshot text read from a file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("classify")
                .long("classify")
                .value_name("CONTACT")
                .help("Show the detected type and normalized form of a contact")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("match")
                .long("match")
                .value_name("CONTACT")
                .help("Match a contact against the verified contact registry")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("assess")
                .long("assess")
                .value_name("FILE")
                .help("Assess a scam report submission (JSON file)")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("scam-radar.yaml");

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        init_logging(matches.get_flag("verbose"), None);
        generate_default_config(generate_path);
        return;
    }

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            init_logging(matches.get_flag("verbose"), None);
            eprintln!("Error loading configuration: {e:#}");
            process::exit(1);
        }
    };

    init_logging(matches.get_flag("verbose"), config.log_level());

    if let Some(contact) = matches.get_one::<String>("classify") {
        let output = serde_json::json!({
            "type": ContactClassifier::classify(contact),
            "normalized": ContactClassifier::normalize(contact),
        });
        print_json(&output);
        return;
    }

    let keywords = match ConfigLoader::load_keywords(config.keywords_file.as_deref()) {
        Ok(table) => Arc::new(table),
        Err(e) => {
            eprintln!("Error loading keyword table: {e:#}");
            process::exit(1);
        }
    };
    let assessor = CompositeRiskAssessor::new(keywords).with_scan_limit(config.registry_scan_limit);

    if let Some(text) = matches.get_one::<String>("score-text") {
        print_json(&assessor.scorer().score_report_text(text));
        return;
    }

    if let Some(path) = matches.get_one::<String>("screenshot-text") {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error reading screenshot text '{path}': {e}");
                process::exit(1);
            }
        };
        print_json(&assessor.scorer().score_extracted_text(&text));
        return;
    }

    let registry = match ConfigLoader::load_registry(config.registry_file.as_deref()) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error loading verified contact registry: {e:#}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        println!("Configuration: {config_path}");
        println!("Keywords loaded: {}", assessor.scorer().keywords().len());
        println!("Verified contacts loaded: {}", registry.len());
        println!("Registry scan limit: {}", assessor.scan_limit());
        println!("Configuration is valid.");
        return;
    }

    if let Some(contact) = matches.get_one::<String>("match") {
        let kind = ContactClassifier::classify(contact);
        match registry.verified_contacts(kind, assessor.scan_limit()) {
            Ok(candidates) => print_json(&ContactMatcher::match_contact(contact, &candidates)),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        return;
    }

    if let Some(path) = matches.get_one::<String>("assess") {
        let submission = match load_submission(path) {
            Ok(submission) => submission,
            Err(e) => {
                eprintln!("Error reading report submission: {e:#}");
                process::exit(1);
            }
        };

        match assessor.assess_submission(&submission, &registry) {
            Ok(assessment) => {
                log::info!(
                    "Report '{}' scored {} ({:?})",
                    submission.title,
                    assessment.susceptibility_score,
                    assessment.risk_level
                );
                print_json(&assessment);
            }
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        return;
    }

    eprintln!("Nothing to do. Use --help to list available commands.");
    process::exit(2);
}

fn init_logging(verbose: bool, configured: Option<LevelFilter>) {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        configured.unwrap_or(LevelFilter::Info)
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .init();
}

fn load_config(path: &str) -> anyhow::Result<EngineConfig> {
    if std::path::Path::new(path).exists() {
        EngineConfig::from_file(path)
    } else {
        log::warn!("Configuration file '{path}' not found, using default configuration");
        Ok(EngineConfig::default())
    }
}

fn load_submission(path: &str) -> anyhow::Result<ReportSubmission> {
    use anyhow::Context;

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path))?;
    let submission = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse '{}'", path))?;
    Ok(submission)
}

fn generate_default_config(path: &str) {
    let config = EngineConfig::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Please edit the configuration file to suit your needs.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e:#}");
            process::exit(1);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing output: {e}");
            process::exit(1);
        }
    }
}
