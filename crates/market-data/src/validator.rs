//! Asset record validation.
//!
//! Validates live rows before they enter a snapshot:
//! - Non-negative, finite price, market cap and volume
//! - Non-empty, unique ids and non-empty names
//! - Finite 24h change when present

use std::collections::HashSet;

use log::warn;

use crate::models::AssetRecord;

/// A single reason a record was rejected.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationIssue {
    pub id: String,
    pub message: String,
}

/// Record validator.
///
/// Rejected rows are dropped and logged; the remaining rows keep their order.
#[derive(Clone, Debug, Default)]
pub struct RecordValidator;

impl RecordValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check one record in isolation.
    pub fn check(&self, record: &AssetRecord) -> Result<(), ValidationIssue> {
        let issue = |message: String| ValidationIssue {
            id: record.id.clone(),
            message,
        };

        if record.id.trim().is_empty() {
            return Err(issue("Empty id".to_string()));
        }
        if record.name.trim().is_empty() {
            return Err(issue("Empty name".to_string()));
        }

        for (field, value) in [
            ("current_price", record.current_price),
            ("market_cap", record.market_cap),
            ("total_volume", record.total_volume),
        ] {
            if !value.is_finite() {
                return Err(issue(format!("{} is not finite", field)));
            }
            if value < 0.0 {
                return Err(issue(format!("{} is negative: {}", field, value)));
            }
        }

        if let Some(change) = record.price_change_percentage_24h {
            if !change.is_finite() {
                return Err(issue("price_change_percentage_24h is not finite".to_string()));
            }
        }

        Ok(())
    }

    /// Keep the valid records, dropping invalid rows and repeated ids.
    pub fn validate(&self, records: Vec<AssetRecord>) -> Vec<AssetRecord> {
        let original_count = records.len();
        let mut seen: HashSet<String> = HashSet::with_capacity(original_count);
        let mut valid = Vec::with_capacity(original_count);

        for record in records {
            if let Err(issue) = self.check(&record) {
                warn!("Dropping asset '{}': {}", issue.id, issue.message);
                continue;
            }
            if !seen.insert(record.id.clone()) {
                warn!("Dropping duplicate asset id '{}'", record.id);
                continue;
            }
            valid.push(record);
        }

        if valid.len() < original_count {
            warn!(
                "{} of {} assets failed validation",
                original_count - valid.len(),
                original_count
            );
        }

        valid
    }
}
