//! Chart projections of the selected table.
//!
//! These are data series only. Drawing them is up to the consumer.

use serde::{Deserialize, Serialize};

use crate::models::AssetRecord;

/// Slices pulled out of the pie, counted from the largest asset.
const PIE_PULLED_SLICES: usize = 3;
const PIE_PULL: f64 = 0.1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub label: String,
    pub value: f64,
}

/// A labelled series for bar, line or histogram charts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub title: String,
    pub points: Vec<Point>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Percent of the total, 0 when the total is 0.
    pub share: f64,
    /// Radial offset of the slice.
    pub pull: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub label: String,
    pub value: f64,
    pub size: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScatterChart {
    pub title: String,
    pub points: Vec<ScatterPoint>,
}

/// Every projection of one selected table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSet {
    pub price_bar: Series,
    pub market_cap_line: Series,
    pub volume_histogram: Series,
    pub market_cap_pie: PieChart,
    pub change_scatter: ScatterChart,
}

fn series(title: &str, records: &[AssetRecord], value: impl Fn(&AssetRecord) -> f64) -> Series {
    Series {
        title: title.to_string(),
        points: records
            .iter()
            .map(|r| Point {
                label: r.name.clone(),
                value: value(r),
            })
            .collect(),
    }
}

pub fn price_bar(records: &[AssetRecord]) -> Series {
    series("Current Price of Selected Cryptocurrencies", records, |r| r.current_price)
}

pub fn market_cap_line(records: &[AssetRecord]) -> Series {
    series("Market Cap of Selected Cryptocurrencies", records, |r| r.market_cap)
}

pub fn volume_histogram(records: &[AssetRecord]) -> Series {
    series("Total Volume of Selected Cryptocurrencies", records, |r| r.total_volume)
}

pub fn market_cap_pie(records: &[AssetRecord]) -> PieChart {
    let total: f64 = records.iter().map(|r| r.market_cap).sum();
    let slices = records
        .iter()
        .enumerate()
        .map(|(i, r)| PieSlice {
            label: r.name.clone(),
            value: r.market_cap,
            share: if total > 0.0 {
                r.market_cap / total * 100.0
            } else {
                0.0
            },
            pull: if i < PIE_PULLED_SLICES { PIE_PULL } else { 0.0 },
        })
        .collect();

    PieChart {
        title: "Market Cap Distribution of Selected Cryptocurrencies".to_string(),
        slices,
    }
}

pub fn change_scatter(records: &[AssetRecord]) -> ScatterChart {
    ScatterChart {
        title: "24h Price Change Percentage vs Market Cap".to_string(),
        points: records
            .iter()
            .map(|r| ScatterPoint {
                label: r.name.clone(),
                value: r.change_24h_or_zero(),
                size: r.market_cap,
            })
            .collect(),
    }
}

impl ChartSet {
    pub fn from_records(records: &[AssetRecord]) -> Self {
        Self {
            price_bar: price_bar(records),
            market_cap_line: market_cap_line(records),
            volume_histogram: volume_histogram(records),
            market_cap_pie: market_cap_pie(records),
            change_scatter: change_scatter(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<AssetRecord> {
        vec![
            AssetRecord::new("bitcoin", "Bitcoin", 65_000.0, 600.0, 30.0, Some(1.0)),
            AssetRecord::new("ethereum", "Ethereum", 3_500.0, 200.0, 15.0, Some(-3.0)),
            AssetRecord::new("tether", "Tether", 1.0, 100.0, 45.0, None),
            AssetRecord::new("solana", "Solana", 150.0, 100.0, 2.0, Some(5.0)),
        ]
    }

    #[test]
    fn test_series_follow_row_order() {
        let bar = price_bar(&records());
        let labels: Vec<_> = bar.points.iter().map(|p| p.label.as_str()).collect();

        assert_eq!(labels, vec!["Bitcoin", "Ethereum", "Tether", "Solana"]);
        assert_eq!(bar.points[1].value, 3_500.0);
        assert_eq!(volume_histogram(&records()).points[2].value, 45.0);
        assert_eq!(market_cap_line(&records()).points[0].value, 600.0);
    }

    #[test]
    fn test_pie_shares_and_pull() {
        let pie = market_cap_pie(&records());
        let total_share: f64 = pie.slices.iter().map(|s| s.share).sum();

        assert!((total_share - 100.0).abs() < 1e-9);
        assert!((pie.slices[0].share - 60.0).abs() < 1e-9);
        let pulls: Vec<_> = pie.slices.iter().map(|s| s.pull).collect();
        assert_eq!(pulls, vec![0.1, 0.1, 0.1, 0.0]);
    }

    #[test]
    fn test_pie_with_zero_total() {
        let zero = vec![AssetRecord::new("dust", "Dust", 0.0, 0.0, 0.0, None)];
        assert_eq!(market_cap_pie(&zero).slices[0].share, 0.0);
    }

    #[test]
    fn test_scatter_reads_missing_change_as_zero() {
        let scatter = change_scatter(&records());

        assert_eq!(scatter.points[2].value, 0.0);
        assert_eq!(scatter.points[3].size, 100.0);
    }

    #[test]
    fn test_chart_set_on_empty_selection() {
        let charts = ChartSet::from_records(&[]);
        assert!(charts.price_bar.points.is_empty());
        assert!(charts.market_cap_pie.slices.is_empty());
    }
}
