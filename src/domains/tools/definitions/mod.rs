//! Tool definitions module.
//!
//! Each tool is defined in its own file and implements [`MarketTool`].

pub mod common;
pub mod company;
pub mod financials;

pub use common::MarketTool;
pub use company::{CompareCompaniesTool, CompanyProfileTool, SearchCompaniesTool, SectorOverviewTool};
pub use financials::{AnalystRatingsTool, FinancialReportTool, PriceHistoryTool, ScreenStocksTool};
