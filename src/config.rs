//! Record-type catalogue.
//!
//! Loaded from JSON by the host application, e.g.
//!
//! ```json
//! { "record_types": [ { "id": 1, "label": "WR", "scope_rank": 0, "active": true } ] }
//! ```

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{RecordType, RecordTypeId};

/// Problems with a record-type catalogue.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON could not be decoded.
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two record types share an id.
    #[error("record type id {0} is used more than once")]
    DuplicateId(RecordTypeId),
    /// Two record types share a label.
    #[error("record type label `{0}` is used more than once")]
    DuplicateLabel(String),
    /// A record type has an empty label.
    #[error("record type {0} has an empty label")]
    EmptyLabel(RecordTypeId),
}

/// Engine configuration owned by the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Record types the engine may award.
    pub record_types: Vec<RecordType>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let record_type = |id, label: &str, scope_rank| RecordType {
            id,
            label: label.to_string(),
            scope_rank,
            active: true,
        };

        Self {
            record_types: vec![
                record_type(1, "WR", 0),
                record_type(2, "CR", 1),
                record_type(3, "NR", 2),
            ],
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON catalogue.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects duplicate ids, duplicate labels, and empty labels.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut ids = HashSet::new();
        let mut labels = HashSet::new();

        for rt in &self.record_types {
            if rt.label.trim().is_empty() {
                return Err(ConfigError::EmptyLabel(rt.id));
            }
            if !ids.insert(rt.id) {
                return Err(ConfigError::DuplicateId(rt.id));
            }
            if !labels.insert(rt.label.as_str()) {
                return Err(ConfigError::DuplicateLabel(rt.label.clone()));
            }
        }

        Ok(())
    }

    /// Active record types, broadest scope first.
    pub fn active_record_types(&self) -> Vec<&RecordType> {
        let mut active: Vec<&RecordType> = self.record_types.iter().filter(|rt| rt.active).collect();
        active.sort_by_key(|rt| rt.scope_rank);
        active
    }

    /// Looks up a record type by label.
    pub fn record_type(&self, label: &str) -> Option<&RecordType> {
        self.record_types.iter().find(|rt| rt.label == label)
    }
}
