//! Display selection over a snapshot: name filter, optional sort, top-N limit.
//!
//! Applied in that order. The reported row count is taken after the filter
//! and before the limit, matching the "Data Dimension" line of the table view.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::MAX_PER_PAGE;
use crate::errors::InputError;
use crate::models::{AssetRecord, MarketSnapshot, ASSET_RECORD_COLUMNS};

/// Column to sort the selected rows by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Ascending, case-insensitive.
    Name,
    /// Descending.
    Price,
    /// Descending.
    MarketCap,
    /// Descending.
    Volume,
    /// Descending, missing values last.
    Change24h,
}

impl FromStr for SortKey {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "price" | "current_price" => Ok(Self::Price),
            "market_cap" | "marketcap" => Ok(Self::MarketCap),
            "volume" | "total_volume" => Ok(Self::Volume),
            "change" | "change24h" | "price_change_percentage_24h" => Ok(Self::Change24h),
            _ => Err(InputError::UnknownSortKey(s.to_string())),
        }
    }
}

/// What to show from a snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    /// Asset names to keep; `None` keeps every asset.
    pub names: Option<Vec<String>>,
    /// Number of rows to show, `1..=100`.
    pub limit: usize,
    pub sort: Option<SortKey>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            names: None,
            limit: MAX_PER_PAGE,
            sort: None,
        }
    }
}

/// Size of the filtered table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
}

/// Rows chosen for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectedTable {
    pub records: Vec<AssetRecord>,
    pub dimensions: Dimensions,
}

/// Sorted asset names of a snapshot, the options of the name filter.
pub fn available_names(snapshot: &MarketSnapshot) -> Vec<String> {
    let mut names: Vec<String> = snapshot.records.iter().map(|r| r.name.clone()).collect();
    names.sort();
    names.dedup();
    names
}

impl Selection {
    pub fn validate(&self) -> Result<(), InputError> {
        if self.limit == 0 || self.limit > MAX_PER_PAGE {
            return Err(InputError::LimitOutOfRange {
                value: self.limit,
                max: MAX_PER_PAGE,
            });
        }
        Ok(())
    }

    /// Apply the selection to `snapshot`.
    pub fn apply(&self, snapshot: &MarketSnapshot) -> Result<SelectedTable, InputError> {
        self.validate()?;

        let mut records: Vec<AssetRecord> = match &self.names {
            Some(names) => {
                let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();
                snapshot
                    .records
                    .iter()
                    .filter(|r| wanted.contains(r.name.as_str()))
                    .cloned()
                    .collect()
            }
            None => snapshot.records.clone(),
        };

        let dimensions = Dimensions {
            rows: records.len(),
            columns: ASSET_RECORD_COLUMNS.len(),
        };

        if let Some(key) = self.sort {
            // Stable sort keeps market-cap order among ties
            records.sort_by(|a, b| compare(key, a, b));
        }
        records.truncate(self.limit);

        Ok(SelectedTable {
            records,
            dimensions,
        })
    }
}

fn compare(key: SortKey, a: &AssetRecord, b: &AssetRecord) -> Ordering {
    let descending = |x: f64, y: f64| y.total_cmp(&x);
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Price => descending(a.current_price, b.current_price),
        SortKey::MarketCap => descending(a.market_cap, b.market_cap),
        SortKey::Volume => descending(a.total_volume, b.total_volume),
        SortKey::Change24h => match (a.price_change_percentage_24h, b.price_change_percentage_24h) {
            (Some(x), Some(y)) => descending(x, y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}
