//! In-memory aggregation over rows already read from the store.

use serde::Serialize;
use std::collections::BTreeMap;

use super::models::{AnalystRating, Company, MarginSnapshot};

/// Label used for ratings stored without one.
pub const UNKNOWN_RATING: &str = "Unknown";

/// Round to 2 decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Arithmetic mean rounded with [`round2`], `None` for an empty input.
pub fn rounded_mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| round2(sum / count as f64))
}

/// Distribution and average target over one company's ratings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Consensus {
    pub total_ratings: usize,
    pub distribution: BTreeMap<String, usize>,
    pub avg_target_price: Option<f64>,
}

impl Consensus {
    pub fn from_ratings(ratings: &[AnalystRating]) -> Self {
        let mut distribution = BTreeMap::new();
        for rating in ratings {
            let label = rating.rating.as_deref().unwrap_or(UNKNOWN_RATING);
            *distribution.entry(label.to_string()).or_insert(0) += 1;
        }

        Self {
            total_ratings: ratings.len(),
            distribution,
            avg_target_price: rounded_mean(ratings.iter().filter_map(|r| r.target_price)),
        }
    }
}

/// Sector-level summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorOverview {
    pub sector: String,
    pub company_count: usize,
    pub tickers: Vec<String>,
    pub avg_market_cap: Option<f64>,
    pub avg_gross_margin: Option<f64>,
    pub avg_operating_margin: Option<f64>,
}

impl SectorOverview {
    /// Build the summary from the matched companies and each one's latest
    /// margins (`None` when the company has no report).
    ///
    /// Each average only counts companies that carry that value.
    pub fn build(sector: &str, companies: &[Company], margins: &[Option<MarginSnapshot>]) -> Self {
        let latest = margins.iter().flatten();

        Self {
            sector: sector.to_string(),
            company_count: companies.len(),
            tickers: companies.iter().map(|c| c.ticker.clone()).collect(),
            avg_market_cap: rounded_mean(
                companies.iter().filter_map(|c| c.market_cap).map(|v| v as f64),
            ),
            avg_gross_margin: rounded_mean(latest.clone().filter_map(|m| m.gross_margin)),
            avg_operating_margin: rounded_mean(latest.filter_map(|m| m.operating_margin)),
        }
    }
}
