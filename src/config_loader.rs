use crate::matcher::{InMemoryRegistry, VerifiedContactRecord};
use crate::text_risk::{KeywordTable, KeywordWeight};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct KeywordTableFile {
    pub keywords: Vec<KeywordWeight>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegistryFile {
    pub verified_contacts: Vec<VerifiedContactRecord>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the keyword table, falling back to the built-in one when no
    /// file is configured.
    pub fn load_keywords(path: Option<&str>) -> anyhow::Result<KeywordTable> {
        let Some(path) = path else {
            return Ok(KeywordTable::default());
        };

        if !Path::new(path).exists() {
            log::warn!("Keyword file '{}' not found, using built-in table", path);
            return Ok(KeywordTable::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read keyword file '{}'", path))?;
        Self::parse_keywords(&content).with_context(|| format!("Invalid keyword file '{}'", path))
    }

    pub fn parse_keywords(content: &str) -> anyhow::Result<KeywordTable> {
        let file: KeywordTableFile = serde_yaml::from_str(content)?;
        let table = KeywordTable::new(file.keywords)?;
        log::info!("Loaded {} scam keywords", table.len());
        Ok(table)
    }

    /// Load verified contacts. `.json` files are parsed as JSON, everything
    /// else as YAML. A missing file yields an empty registry.
    pub fn load_registry(path: Option<&str>) -> anyhow::Result<InMemoryRegistry> {
        let Some(path) = path else {
            return Ok(InMemoryRegistry::default());
        };

        if !Path::new(path).exists() {
            log::warn!("Registry file '{}' not found, no verified contacts loaded", path);
            return Ok(InMemoryRegistry::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read registry file '{}'", path))?;
        let is_json = Path::new(path)
            .extension()
            .map(|ext| ext == "json")
            .unwrap_or(false);

        let file: RegistryFile = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid registry file '{}'", path))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid registry file '{}'", path))?
        };

        log::info!(
            "Loaded {} verified contacts from {}",
            file.verified_contacts.len(),
            path
        );
        Ok(InMemoryRegistry::new(file.verified_contacts))
    }
}
