//! Design export and import.
//!
//! An export is a JSON snapshot of one design: the product it belongs to,
//! its base price and every placement. Re-importing an export and pricing it
//! against the same catalog yields the same breakdown.

use std::path::Path;

use anyhow::{Context, Result};
use beadsmith_core::Catalog;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::model::{DesignMode, DesignState};
use crate::pricing::{PriceBreakdown, PricingRules};

/// Export format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Errors raised when an export does not fit the session importing it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Design is a {found} design, expected {expected}")]
    ModeMismatch {
        expected: DesignMode,
        found: DesignMode,
    },

    #[error("Unsupported design format version: {0}")]
    UnsupportedVersion(String),
}

/// Export metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignMetadata {
    pub design_id: Uuid,
    #[serde(default)]
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl DesignMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            design_id: Uuid::new_v4(),
            name: name.into(),
            created: now,
            modified: now,
        }
    }
}

/// Serializable snapshot of a design, for persistence or cart submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignExport {
    pub version: String,
    pub product_id: String,
    pub base_price_minor: u64,
    #[serde(flatten)]
    pub design: DesignState,
    pub metadata: DesignMetadata,
}

impl DesignExport {
    pub fn new(product_id: impl Into<String>, base_price_minor: u64, design: DesignState) -> Self {
        let product_id = product_id.into();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: DesignMetadata::new(product_id.clone()),
            product_id,
            base_price_minor,
            design,
        }
    }

    pub fn mode(&self) -> DesignMode {
        self.design.mode()
    }

    /// Prices the exported design.
    pub fn price(&self, rules: &PricingRules, catalog: &Catalog) -> PriceBreakdown {
        rules.price(self.base_price_minor, &self.design, catalog)
    }

    /// Checks the export can seed a session of the given mode.
    pub fn check_compatible(&self, expected: DesignMode) -> std::result::Result<(), ImportError> {
        if self.version != FILE_FORMAT_VERSION {
            return Err(ImportError::UnsupportedVersion(self.version.clone()));
        }
        let found = self.mode();
        if found != expected {
            return Err(ImportError::ModeMismatch { expected, found });
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize design")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse design")
    }

    /// Save design to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write design file {}", path.display()))?;
        tracing::info!("Saved design {} to {}", self.metadata.design_id, path.display());
        Ok(())
    }

    /// Load design from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read design file {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Bumps the modified timestamp.
    pub fn touch(&mut self) {
        self.metadata.modified = Utc::now();
    }
}
