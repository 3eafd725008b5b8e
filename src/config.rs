use crate::matcher::DEFAULT_SCAN_LIMIT;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// YAML keyword table. The built-in table is used when unset.
    pub keywords_file: Option<String>,
    /// YAML or JSON list of verified scam contacts.
    pub registry_file: Option<String>,
    /// Upper bound on registry candidates scanned per contact match.
    pub registry_scan_limit: usize,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            keywords_file: Some("config/keywords.yaml".to_string()),
            registry_file: Some("config/verified_contacts.yaml".to_string()),
            registry_scan_limit: DEFAULT_SCAN_LIMIT,
            logging: Some(LoggingConfig {
                level: "info".to_string(),
            }),
        }
    }
}

impl EngineConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path))?;
        let config: EngineConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write '{}'", path))?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.registry_scan_limit == 0 {
            anyhow::bail!("registry_scan_limit must be greater than zero");
        }
        Ok(())
    }

    pub fn log_level(&self) -> Option<log::LevelFilter> {
        self.logging
            .as_ref()
            .and_then(|l| l.level.parse::<log::LevelFilter>().ok())
    }
}
