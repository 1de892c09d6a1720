//! Query layer: validated inputs in, typed results out.
//!
//! Every per-company operation first resolves its ticker(s) against the
//! `companies` table. Reads are issued sequentially against the shared
//! [`Store`] handle; store failures are wrapped into `DATABASE_ERROR`
//! with the name of the failing operation, while not-found errors raised
//! along the way propagate unchanged.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::aggregate::{Consensus, SectorOverview};
use super::criteria::{
    CompanyIdentifier, CompanySearch, Comparison, PriceHistoryQuery, RatingsQuery, ReportFilter,
    ScreenCriteria, SectorName, Ticker,
};
use super::models::{AnalystRating, Company, FinancialReport, MarginSnapshot, StockPrice, numeric};
use crate::core::store::{Row, Select, Store, tables};
use crate::domains::tools::{StoreContext, ToolError};

/// Result of a company lookup by ticker or name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "match", rename_all = "snake_case")]
pub enum CompanyMatch {
    Single { company: Company },
    Multiple { companies: Vec<Company>, count: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyList {
    pub companies: Vec<Company>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// One entry per requested ticker, in request order. Each carries
    /// `ticker`, `company_name` and one key per metric (null if absent).
    pub comparisons: Vec<Row>,
    pub metrics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingsResult {
    pub ratings: Vec<AnalystRating>,
    pub consensus: Consensus,
}

/// Excerpt of the latest report shown in screening results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportExcerpt {
    pub fiscal_year: i32,
    pub fiscal_quarter: String,
    pub revenue: Option<f64>,
    pub net_income: Option<f64>,
    pub eps: Option<f64>,
    pub gross_margin: Option<f64>,
    pub debt_to_equity: Option<f64>,
}

impl From<&FinancialReport> for ReportExcerpt {
    fn from(report: &FinancialReport) -> Self {
        Self {
            fiscal_year: report.fiscal_year,
            fiscal_quarter: report.fiscal_quarter.to_string(),
            revenue: report.revenue,
            net_income: report.net_income,
            eps: report.eps,
            gross_margin: report.gross_margin,
            debt_to_equity: report.debt_to_equity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenMatch {
    pub ticker: String,
    pub name: String,
    pub sector: Option<String>,
    pub market_cap: Option<i64>,
    pub latest_report: ReportExcerpt,
}

/// Row of the company listing resource.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct CompanySummary {
    pub ticker: String,
    pub name: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default, deserialize_with = "numeric::opt_i64")]
    pub market_cap: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    pub company: Company,
    pub latest_report: Option<FinancialReport>,
}

impl ScreenCriteria {
    /// Whether a report passes every threshold. A missing field fails the
    /// threshold that reads it.
    pub fn admits(&self, report: &FinancialReport) -> bool {
        fn at_least(threshold: Option<f64>, value: Option<f64>) -> bool {
            threshold.is_none_or(|t| value.is_some_and(|v| v >= t))
        }

        at_least(self.min_revenue, report.revenue)
            && at_least(self.min_eps, report.eps)
            && at_least(self.min_gross_margin, report.gross_margin)
            && self
                .max_debt_to_equity
                .is_none_or(|t| report.debt_to_equity.is_some_and(|v| v <= t))
    }
}

/// Read-only financial queries over a shared store handle.
#[derive(Clone)]
pub struct MarketQueries {
    store: Arc<dyn Store>,
}

impl MarketQueries {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn fetch<T: DeserializeOwned>(&self, query: Select, operation: &str) -> Result<Vec<T>, ToolError> {
        let rows = self.store.select(&query).await.context(operation)?;
        debug!(table = %query.table, rows = rows.len(), "store select");
        decode_rows(rows).context(operation)
    }

    /// Look up one company by ticker, failing with `NOT_FOUND`.
    pub async fn resolve_ticker(&self, ticker: &Ticker) -> Result<Company, ToolError> {
        let query = Select::from(tables::COMPANIES).eq("ticker", ticker.as_str());
        let mut companies: Vec<Company> = self
            .fetch(query, &format!("Failed to look up ticker {}", ticker))
            .await?;

        if companies.is_empty() {
            return Err(ToolError::not_found(format!(
                "Company with ticker '{}' not found",
                ticker
            )));
        }
        Ok(companies.swap_remove(0))
    }

    /// Most recent report for a company, if any.
    async fn latest_report(
        &self,
        company_id: &str,
        operation: &str,
    ) -> Result<Option<FinancialReport>, ToolError> {
        let reports: Vec<FinancialReport> = self.fetch(latest_report_query(company_id), operation).await?;
        Ok(reports.into_iter().next())
    }

    /// Ticker match first, then name substring match.
    pub async fn company_profile(&self, identifier: &CompanyIdentifier) -> Result<CompanyMatch, ToolError> {
        const OPERATION: &str = "Failed to look up company";

        let by_ticker = Select::from(tables::COMPANIES).eq("ticker", identifier.as_str().to_uppercase());
        let mut companies: Vec<Company> = self.fetch(by_ticker, OPERATION).await?;
        if !companies.is_empty() {
            return Ok(CompanyMatch::Single {
                company: companies.swap_remove(0),
            });
        }

        let by_name = Select::from(tables::COMPANIES).ilike("name", identifier.as_str());
        let mut companies: Vec<Company> = self.fetch(by_name, OPERATION).await?;
        match companies.len() {
            0 => Err(ToolError::not_found(format!(
                "No company found matching '{}'",
                identifier.as_str()
            ))),
            1 => Ok(CompanyMatch::Single {
                company: companies.swap_remove(0),
            }),
            count => Ok(CompanyMatch::Multiple { companies, count }),
        }
    }

    pub async fn search_companies(&self, search: &CompanySearch) -> Result<CompanyList, ToolError> {
        let mut query = Select::from(tables::COMPANIES);
        if let Some(sector) = &search.sector {
            query = query.ilike("sector", sector.as_str());
        }
        if let Some(industry) = &search.industry {
            query = query.ilike("industry", industry.as_str());
        }
        if let Some(min) = search.min_market_cap {
            query = query.gte("market_cap", min);
        }
        if let Some(max) = search.max_market_cap {
            query = query.lte("market_cap", max);
        }
        if let Some(country) = &search.country {
            query = query.ilike("country", country.as_str());
        }

        let companies: Vec<Company> = self.fetch(query, "Company search failed").await?;
        Ok(CompanyList {
            count: companies.len(),
            companies,
        })
    }

    /// Reports ordered newest first by (fiscal_year, fiscal_quarter).
    pub async fn financial_reports(&self, filter: &ReportFilter) -> Result<Vec<FinancialReport>, ToolError> {
        let company = self.resolve_ticker(&filter.ticker).await?;

        let mut query = Select::from(tables::FINANCIAL_REPORTS)
            .eq("company_id", company.id.as_str())
            .order_desc("fiscal_year")
            .order_desc("fiscal_quarter");
        if let Some(year) = filter.fiscal_year {
            query = query.eq("fiscal_year", year);
        }
        if let Some(quarter) = filter.fiscal_quarter {
            query = query.eq("fiscal_quarter", quarter.as_str());
        }

        self.fetch(query, "Failed to fetch financial reports").await
    }

    /// Latest report per ticker, projected onto the requested metrics.
    /// Any unresolved ticker fails the whole comparison.
    pub async fn compare_companies(&self, comparison: &Comparison) -> Result<ComparisonResult, ToolError> {
        let mut comparisons = Vec::with_capacity(comparison.tickers.len());

        for ticker in &comparison.tickers {
            let company = self.resolve_ticker(ticker).await?;
            let report = self
                .latest_report(&company.id, &format!("Failed to fetch data for {}", ticker))
                .await?;
            let report = match report {
                Some(r) => serde_json::to_value(r)
                    .map_err(|e| ToolError::database(format!("Failed to fetch data for {}: {}", ticker, e)))?,
                None => Value::Null,
            };

            let mut entry = Row::new();
            entry.insert("ticker".to_string(), Value::from(ticker.as_str()));
            entry.insert("company_name".to_string(), Value::from(company.name));
            for metric in &comparison.metrics {
                let value = report.get(metric).cloned().unwrap_or(Value::Null);
                entry.insert(metric.clone(), value);
            }
            comparisons.push(entry);
        }

        Ok(ComparisonResult {
            comparisons,
            metrics: comparison.metrics.clone(),
        })
    }

    /// Most recent `limit` prices within the optional date window.
    pub async fn stock_prices(&self, query: &PriceHistoryQuery) -> Result<Vec<StockPrice>, ToolError> {
        let company = self.resolve_ticker(&query.ticker).await?;

        let mut select = Select::from(tables::STOCK_PRICES)
            .eq("company_id", company.id.as_str())
            .order_desc("date")
            .limit(query.limit);
        if let Some(start) = query.start_date {
            select = select.gte("date", start.to_string());
        }
        if let Some(end) = query.end_date {
            select = select.lte("date", end.to_string());
        }

        self.fetch(select, "Failed to fetch stock prices").await
    }

    pub async fn analyst_ratings(&self, query: &RatingsQuery) -> Result<RatingsResult, ToolError> {
        let company = self.resolve_ticker(&query.ticker).await?;

        let mut select = Select::from(tables::ANALYST_RATINGS)
            .eq("company_id", company.id.as_str())
            .order_desc("rating_date");
        if let Some(firm) = &query.firm {
            select = select.ilike("analyst_firm", firm.as_str());
        }

        let ratings: Vec<AnalystRating> = self.fetch(select, "Failed to fetch analyst ratings").await?;
        Ok(RatingsResult {
            consensus: Consensus::from_ratings(&ratings),
            ratings,
        })
    }

    /// Companies whose latest report clears every threshold. Companies
    /// without a report are skipped.
    pub async fn screen_stocks(&self, criteria: &ScreenCriteria) -> Result<Vec<ScreenMatch>, ToolError> {
        const OPERATION: &str = "Stock screening failed";

        let mut query = Select::from(tables::COMPANIES);
        if let Some(sector) = &criteria.sector {
            query = query.ilike("sector", sector.as_str());
        }
        let companies: Vec<Company> = self.fetch(query, OPERATION).await?;

        let mut matches = Vec::new();
        for company in companies {
            let Some(report) = self.latest_report(&company.id, OPERATION).await? else {
                continue;
            };
            if !criteria.admits(&report) {
                continue;
            }
            matches.push(ScreenMatch {
                latest_report: ReportExcerpt::from(&report),
                ticker: company.ticker,
                name: company.name,
                sector: company.sector,
                market_cap: company.market_cap,
            });
        }

        debug!(matched = matches.len(), "screening complete");
        Ok(matches)
    }

    pub async fn sector_overview(&self, sector: &SectorName) -> Result<SectorOverview, ToolError> {
        const OPERATION: &str = "Failed to build sector overview";

        let query = Select::from(tables::COMPANIES).ilike("sector", sector.as_str());
        let companies: Vec<Company> = self.fetch(query, OPERATION).await?;
        if companies.is_empty() {
            return Err(ToolError::not_found(format!(
                "No companies found in sector '{}'",
                sector.as_str()
            )));
        }

        let mut margins = Vec::with_capacity(companies.len());
        for company in &companies {
            let query = latest_report_query(&company.id).columns(&["gross_margin", "operating_margin"]);
            let snapshot: Vec<MarginSnapshot> = self.fetch(query, OPERATION).await?;
            margins.push(snapshot.into_iter().next());
        }

        Ok(SectorOverview::build(sector.as_str(), &companies, &margins))
    }

    /// Every company, ordered by ticker.
    pub async fn list_companies(&self) -> Result<Vec<CompanySummary>, ToolError> {
        let query = Select::from(tables::COMPANIES)
            .columns(&["ticker", "name", "sector", "market_cap"])
            .order_asc("ticker");
        self.fetch(query, "Failed to list companies").await
    }

    /// Company plus its latest report; `None` if the ticker is unknown.
    pub async fn company_detail(&self, ticker: &Ticker) -> Result<Option<CompanyDetail>, ToolError> {
        let company = match self.resolve_ticker(ticker).await {
            Ok(company) => company,
            Err(ToolError::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };
        let latest_report = self
            .latest_report(&company.id, "Failed to fetch latest report")
            .await?;
        Ok(Some(CompanyDetail {
            company,
            latest_report,
        }))
    }
}

fn latest_report_query(company_id: &str) -> Select {
    Select::from(tables::FINANCIAL_REPORTS)
        .eq("company_id", company_id)
        .order_desc("fiscal_year")
        .order_desc("fiscal_quarter")
        .limit(1)
}

fn decode_rows<T: DeserializeOwned>(rows: Vec<Row>) -> crate::core::store::StoreResult<Vec<T>> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(Value::Object(row))
                .map_err(|e| crate::core::store::StoreError::decode(e.to_string()))
        })
        .collect()
}
