//! Typed records for the four store tables.
//!
//! Numeric columns arrive either as JSON numbers or, for `numeric` SQL
//! columns, as decimal strings; both decode into `f64` and are emitted as
//! JSON numbers. Optional columns decode to `None` when absent or null.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A listed company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(deserialize_with = "numeric::id")]
    pub id: String,
    pub ticker: String,
    pub name: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default, deserialize_with = "numeric::opt_i64")]
    pub market_cap: Option<i64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub ceo: Option<String>,
    #[serde(default, deserialize_with = "numeric::opt_i64")]
    pub employees: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Reporting period within a fiscal year.
///
/// Variant order matches label order, so sorting by label and sorting by
/// period agree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum FiscalQuarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl FiscalQuarter {
    pub const ALL: [FiscalQuarter; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }

    /// Parse an exact label (`"Q1"`..`"Q4"`).
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.as_str() == label)
    }
}

impl fmt::Display for FiscalQuarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quarterly financial statement summary for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialReport {
    #[serde(default, deserialize_with = "numeric::opt_id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "numeric::id")]
    pub company_id: String,
    pub fiscal_year: i32,
    pub fiscal_quarter: FiscalQuarter,
    #[serde(default, deserialize_with = "numeric::opt_f64")]
    pub revenue: Option<f64>,
    #[serde(default, deserialize_with = "numeric::opt_f64")]
    pub net_income: Option<f64>,
    #[serde(default, deserialize_with = "numeric::opt_f64")]
    pub eps: Option<f64>,
    #[serde(default, deserialize_with = "numeric::opt_f64")]
    pub gross_margin: Option<f64>,
    #[serde(default, deserialize_with = "numeric::opt_f64")]
    pub operating_margin: Option<f64>,
    #[serde(default, deserialize_with = "numeric::opt_f64")]
    pub debt_to_equity: Option<f64>,
    #[serde(default, deserialize_with = "numeric::opt_f64")]
    pub free_cash_flow: Option<f64>,
    #[serde(default)]
    pub report_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Margin columns only, as read for sector aggregation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MarginSnapshot {
    #[serde(default, deserialize_with = "numeric::opt_f64")]
    pub gross_margin: Option<f64>,
    #[serde(default, deserialize_with = "numeric::opt_f64")]
    pub operating_margin: Option<f64>,
}

/// One trading day of OHLCV data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPrice {
    #[serde(default, deserialize_with = "numeric::opt_id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "numeric::id")]
    pub company_id: String,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "numeric::opt_f64")]
    pub open: Option<f64>,
    #[serde(default, deserialize_with = "numeric::opt_f64")]
    pub high: Option<f64>,
    #[serde(default, deserialize_with = "numeric::opt_f64")]
    pub low: Option<f64>,
    #[serde(default, deserialize_with = "numeric::opt_f64")]
    pub close: Option<f64>,
    #[serde(default, deserialize_with = "numeric::opt_i64")]
    pub volume: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// An analyst firm's rating of a company.
///
/// Labels run from strongly negative to strongly positive
/// (e.g. "Sell", "Underweight", "Hold", "Overweight", "Buy", "Strong Buy")
/// and are kept as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalystRating {
    #[serde(default, deserialize_with = "numeric::opt_id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "numeric::id")]
    pub company_id: String,
    pub analyst_firm: String,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub previous_rating: Option<String>,
    #[serde(default, deserialize_with = "numeric::opt_f64")]
    pub target_price: Option<f64>,
    #[serde(default)]
    pub rating_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<String>,
}

pub(crate) mod numeric {
    use serde::de::{self, Deserializer};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Float(f64),
        Text(String),
    }

    /// Accept a number, a numeric string, or null.
    pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Float(v)) => Ok(Some(v)),
            Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(Raw::Text(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid numeric value: {}", s))),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Text(String),
    }

    /// Accept a text or integer key; integers are kept as their decimal text.
    pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawId::deserialize(deserializer)? {
            RawId::Int(v) => Ok(v.to_string()),
            RawId::Text(s) => Ok(s),
        }
    }

    /// Like [`id`], allowing null.
    pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<RawId>::deserialize(deserializer)? {
            None => None,
            Some(RawId::Int(v)) => Some(v.to_string()),
            Some(RawId::Text(s)) => Some(s),
        })
    }

    /// Accept an integer, an integral string, or null.
    pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match opt_f64(deserializer)? {
            None => Ok(None),
            Some(v) if v.fract() == 0.0 && v.is_finite() => Ok(Some(v as i64)),
            Some(v) => Err(de::Error::custom(format!("expected integer, got {}", v))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_accepts_numeric_strings() {
        let report: FinancialReport = serde_json::from_value(json!({
            "id": "rpt-1",
            "company_id": "abc-123",
            "fiscal_year": 2024,
            "fiscal_quarter": "Q4",
            "revenue": "119000000000.00",
            "eps": 2.18,
            "gross_margin": "46.20",
            "debt_to_equity": null,
            "report_date": "2024-10-31"
        }))
        .unwrap();

        assert_eq!(report.fiscal_quarter, FiscalQuarter::Q4);
        assert_eq!(report.revenue, Some(119_000_000_000.0));
        assert_eq!(report.eps, Some(2.18));
        assert_eq!(report.gross_margin, Some(46.2));
        assert_eq!(report.debt_to_equity, None);
        assert_eq!(report.operating_margin, None);
        assert_eq!(
            report.report_date,
            NaiveDate::from_ymd_opt(2024, 10, 31)
        );
    }

    #[test]
    fn test_report_serializes_numbers_and_dates() {
        let report: FinancialReport = serde_json::from_value(json!({
            "company_id": "abc-123",
            "fiscal_year": 2023,
            "fiscal_quarter": "Q1",
            "revenue": "10.50",
            "report_date": "2023-03-31"
        }))
        .unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["revenue"], json!(10.5));
        assert_eq!(value["report_date"], json!("2023-03-31"));
        assert_eq!(value["fiscal_quarter"], json!("Q1"));
        assert!(value["net_income"].is_null());
    }

    #[test]
    fn test_company_market_cap_from_integer_or_string() {
        let a: Company = serde_json::from_value(json!({
            "id": "1", "ticker": "AAPL", "name": "Apple Inc.", "market_cap": 3200000000000_i64
        }))
        .unwrap();
        let b: Company = serde_json::from_value(json!({
            "id": "2", "ticker": "MSFT", "name": "Microsoft", "market_cap": "3100000000000"
        }))
        .unwrap();
        assert_eq!(a.market_cap, Some(3_200_000_000_000));
        assert_eq!(b.market_cap, Some(3_100_000_000_000));
        assert_eq!(a.sector, None);
    }

    #[test]
    fn test_integer_keys_decode_as_text() {
        let company: Company = serde_json::from_value(json!({
            "id": 7, "ticker": "AAPL", "name": "Apple Inc."
        }))
        .unwrap();
        assert_eq!(company.id, "7");

        let price: StockPrice = serde_json::from_value(json!({
            "id": 1001, "company_id": 7, "date": "2024-01-02", "close": "185.64"
        }))
        .unwrap();
        assert_eq!(price.id.as_deref(), Some("1001"));
        assert_eq!(price.company_id, "7");

        let rating: AnalystRating = serde_json::from_value(json!({
            "id": null, "company_id": "c-uuid", "analyst_firm": "Goldman Sachs"
        }))
        .unwrap();
        assert_eq!(rating.id, None);
        assert_eq!(rating.company_id, "c-uuid");
    }

    #[test]
    fn test_invalid_quarter_rejected() {
        let result: Result<FinancialReport, _> = serde_json::from_value(json!({
            "company_id": "abc", "fiscal_year": 2024, "fiscal_quarter": "Q5"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_fiscal_quarter_label_order_matches_period_order() {
        let mut labels: Vec<&str> = FiscalQuarter::ALL.iter().map(|q| q.as_str()).collect();
        labels.sort();
        assert_eq!(labels, vec!["Q1", "Q2", "Q3", "Q4"]);
        assert!(FiscalQuarter::Q4 > FiscalQuarter::Q1);
        assert_eq!(FiscalQuarter::parse("Q3"), Some(FiscalQuarter::Q3));
        assert_eq!(FiscalQuarter::parse("q3"), None);
    }
}
