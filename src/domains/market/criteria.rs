//! Validated inputs for the query layer.
//!
//! Each type is built eagerly from raw tool arguments; construction either
//! yields a normalized value or a validation error naming the offending
//! field. Nothing here touches the store.

use chrono::NaiveDate;
use serde_json::json;

use super::models::FiscalQuarter;
use crate::domains::tools::{ErrorDetails, ToolError};

pub const MIN_FISCAL_YEAR: i64 = 2000;
pub const MAX_FISCAL_YEAR: i64 = 2030;
pub const MIN_COMPARE_TICKERS: usize = 2;
pub const MAX_COMPARE_TICKERS: usize = 5;
pub const MAX_PRICE_LIMIT: i64 = 365;
pub const DEFAULT_PRICE_LIMIT: i64 = 30;

/// Metrics compared when the caller names none.
pub const DEFAULT_METRICS: [&str; 4] = ["revenue", "net_income", "eps", "gross_margin"];

fn invalid(field: &str, message: impl Into<String>) -> ToolError {
    let mut details = ErrorDetails::new();
    details.insert("field".to_string(), json!(field));
    ToolError::validation(message).with_details(details)
}

/// Trim a required text field, rejecting blanks.
fn required_text(field: &str, raw: &str) -> Result<String, ToolError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid(field, format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field; blank counts as absent.
fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn non_negative_f64(field: &str, value: Option<f64>) -> Result<Option<f64>, ToolError> {
    match value {
        Some(v) if !v.is_finite() => Err(invalid(field, format!("{} must be a finite number", field))),
        Some(v) if v < 0.0 => Err(invalid(
            field,
            format!("{} must be greater than or equal to 0", field),
        )),
        other => Ok(other),
    }
}

/// Upper-cased, trimmed ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker(String);

impl Ticker {
    pub fn parse(raw: &str) -> Result<Self, ToolError> {
        Self::parse_field("ticker", raw)
    }

    fn parse_field(field: &str, raw: &str) -> Result<Self, ToolError> {
        required_text(field, raw).map(|t| Self(t.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ticker or (partial) company name, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyIdentifier(String);

impl CompanyIdentifier {
    pub fn parse(raw: &str) -> Result<Self, ToolError> {
        required_text("identifier", raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Company search filters, at least one present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanySearch {
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub min_market_cap: Option<i64>,
    pub max_market_cap: Option<i64>,
    pub country: Option<String>,
}

impl CompanySearch {
    pub fn new(
        sector: Option<&str>,
        industry: Option<&str>,
        min_market_cap: Option<i64>,
        max_market_cap: Option<i64>,
        country: Option<&str>,
    ) -> Result<Self, ToolError> {
        for (field, value) in [
            ("min_market_cap", min_market_cap),
            ("max_market_cap", max_market_cap),
        ] {
            if value.is_some_and(|v| v < 0) {
                return Err(invalid(
                    field,
                    format!("{} must be greater than or equal to 0", field),
                ));
            }
        }

        let search = Self {
            sector: optional_text(sector),
            industry: optional_text(industry),
            min_market_cap,
            max_market_cap,
            country: optional_text(country),
        };

        if !search.has_any_filter() {
            return Err(ToolError::validation("At least one search filter is required"));
        }
        Ok(search)
    }

    pub fn has_any_filter(&self) -> bool {
        self.sector.is_some()
            || self.industry.is_some()
            || self.min_market_cap.is_some()
            || self.max_market_cap.is_some()
            || self.country.is_some()
    }
}

/// Reports for one ticker, optionally narrowed to a year and/or quarter.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFilter {
    pub ticker: Ticker,
    pub fiscal_year: Option<i32>,
    pub fiscal_quarter: Option<FiscalQuarter>,
}

impl ReportFilter {
    pub fn new(
        ticker: &str,
        fiscal_year: Option<i64>,
        fiscal_quarter: Option<&str>,
    ) -> Result<Self, ToolError> {
        let ticker = Ticker::parse(ticker)?;

        let fiscal_year = match fiscal_year {
            Some(y) if !(MIN_FISCAL_YEAR..=MAX_FISCAL_YEAR).contains(&y) => {
                return Err(invalid(
                    "fiscal_year",
                    format!(
                        "fiscal_year must be between {} and {}",
                        MIN_FISCAL_YEAR, MAX_FISCAL_YEAR
                    ),
                ));
            }
            Some(y) => Some(y as i32),
            None => None,
        };

        let fiscal_quarter = fiscal_quarter
            .map(|q| {
                FiscalQuarter::parse(q).ok_or_else(|| {
                    invalid(
                        "fiscal_quarter",
                        format!("fiscal_quarter must be one of Q1, Q2, Q3, Q4 (got '{}')", q),
                    )
                })
            })
            .transpose()?;

        Ok(Self {
            ticker,
            fiscal_year,
            fiscal_quarter,
        })
    }
}

/// Side-by-side comparison request.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Caller order is preserved.
    pub tickers: Vec<Ticker>,
    pub metrics: Vec<String>,
}

impl Comparison {
    pub fn new(tickers: &[String], metrics: Option<&[String]>) -> Result<Self, ToolError> {
        if !(MIN_COMPARE_TICKERS..=MAX_COMPARE_TICKERS).contains(&tickers.len()) {
            return Err(invalid(
                "tickers",
                format!(
                    "tickers must contain between {} and {} symbols (got {})",
                    MIN_COMPARE_TICKERS,
                    MAX_COMPARE_TICKERS,
                    tickers.len()
                ),
            ));
        }

        let tickers = tickers
            .iter()
            .map(|t| Ticker::parse_field("tickers", t))
            .collect::<Result<Vec<_>, _>>()?;

        let metrics: Vec<String> = metrics
            .unwrap_or_default()
            .iter()
            .filter_map(|m| optional_text(Some(m)))
            .collect();
        let metrics = if metrics.is_empty() {
            DEFAULT_METRICS.iter().map(|m| m.to_string()).collect()
        } else {
            metrics
        };

        Ok(Self { tickers, metrics })
    }
}

/// Price history window.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistoryQuery {
    pub ticker: Ticker,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: usize,
}

impl PriceHistoryQuery {
    pub fn new(
        ticker: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Self, ToolError> {
        let ticker = Ticker::parse(ticker)?;
        let start_date = start_date.map(|d| parse_date("start_date", d)).transpose()?;
        let end_date = end_date.map(|d| parse_date("end_date", d)).transpose()?;

        let limit = limit.unwrap_or(DEFAULT_PRICE_LIMIT);
        if !(1..=MAX_PRICE_LIMIT).contains(&limit) {
            return Err(invalid(
                "limit",
                format!("limit must be between 1 and {}", MAX_PRICE_LIMIT),
            ));
        }

        Ok(Self {
            ticker,
            start_date,
            end_date,
            limit: limit as usize,
        })
    }
}

/// `YYYY-MM-DD` with a real calendar date behind it.
fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, ToolError> {
    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    shaped
        .then(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .flatten()
        .ok_or_else(|| {
            invalid(
                field,
                format!("{} must be a valid date in YYYY-MM-DD format (got '{}')", field, raw),
            )
        })
}

/// Ratings for one ticker, optionally restricted to a firm.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingsQuery {
    pub ticker: Ticker,
    pub firm: Option<String>,
}

impl RatingsQuery {
    pub fn new(ticker: &str, firm: Option<&str>) -> Result<Self, ToolError> {
        Ok(Self {
            ticker: Ticker::parse(ticker)?,
            firm: optional_text(firm),
        })
    }
}

/// Thresholds applied to each company's latest report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenCriteria {
    pub min_revenue: Option<f64>,
    pub min_eps: Option<f64>,
    pub min_gross_margin: Option<f64>,
    pub max_debt_to_equity: Option<f64>,
    pub sector: Option<String>,
}

impl ScreenCriteria {
    pub fn new(
        min_revenue: Option<f64>,
        min_eps: Option<f64>,
        min_gross_margin: Option<f64>,
        max_debt_to_equity: Option<f64>,
        sector: Option<&str>,
    ) -> Result<Self, ToolError> {
        let min_revenue = non_negative_f64("min_revenue", min_revenue)?;
        if min_eps.is_some_and(|v| !v.is_finite()) {
            return Err(invalid("min_eps", "min_eps must be a finite number"));
        }
        let min_gross_margin = non_negative_f64("min_gross_margin", min_gross_margin)?;
        if min_gross_margin.is_some_and(|v| v > 100.0) {
            return Err(invalid(
                "min_gross_margin",
                "min_gross_margin must be between 0 and 100",
            ));
        }
        let max_debt_to_equity = non_negative_f64("max_debt_to_equity", max_debt_to_equity)?;

        Ok(Self {
            min_revenue,
            min_eps,
            min_gross_margin,
            max_debt_to_equity,
            sector: optional_text(sector),
        })
    }
}

/// Sector name (or fragment), trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorName(String);

impl SectorName {
    pub fn parse(raw: &str) -> Result<Self, ToolError> {
        required_text("sector", raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
