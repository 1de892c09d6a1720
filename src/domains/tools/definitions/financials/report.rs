//! Quarterly financial reports for one company.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::market::{FinancialReport, MarketQueries, ReportFilter};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::MarketTool;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FinancialReportParams {
    #[schemars(description = "Ticker symbol (e.g. AAPL)")]
    pub ticker: String,

    #[schemars(description = "Fiscal year filter (2000-2030)")]
    #[serde(default, deserialize_with = "crate::domains::market::models::numeric::opt_i64")]
    #[schemars(with = "Option<i64>")]
    pub fiscal_year: Option<i64>,

    #[schemars(description = "Fiscal quarter filter: Q1, Q2, Q3 or Q4")]
    #[serde(default)]
    pub fiscal_quarter: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FinancialReportTool;

#[async_trait]
impl MarketTool for FinancialReportTool {
    const NAME: &'static str = "get_financial_report";

    const DESCRIPTION: &'static str = "Get quarterly financial reports (revenue, net income, EPS, margins, debt-to-equity, free cash flow) for a company, newest first. Optionally narrow to a fiscal year and/or quarter.";

    type Params = FinancialReportParams;
    type Output = Vec<FinancialReport>;

    async fn run(params: Self::Params, queries: &MarketQueries) -> Result<Self::Output, ToolError> {
        let filter = ReportFilter::new(
            &params.ticker,
            params.fiscal_year,
            params.fiscal_quarter.as_deref(),
        )?;
        queries.financial_reports(&filter).await
    }
}
