//! Per-company financial data tools and screening.

pub mod prices;
pub mod ratings;
pub mod report;
pub mod screen;

pub use prices::{PriceHistoryParams, PriceHistoryTool};
pub use ratings::{AnalystRatingsParams, AnalystRatingsTool};
pub use report::{FinancialReportParams, FinancialReportTool};
pub use screen::{ScreenStocksParams, ScreenStocksTool};
