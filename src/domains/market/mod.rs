//! Financial market data: records, validated inputs, queries and
//! aggregation.

pub mod aggregate;
pub mod criteria;
pub mod models;
pub mod queries;

#[cfg(test)]
pub(crate) mod fixtures;

pub use aggregate::{Consensus, SectorOverview};
pub use criteria::{
    CompanyIdentifier, CompanySearch, Comparison, PriceHistoryQuery, RatingsQuery, ReportFilter,
    ScreenCriteria, SectorName, Ticker,
};
pub use models::{AnalystRating, Company, FinancialReport, FiscalQuarter, StockPrice};
pub use queries::{CompanyMatch, MarketQueries};
