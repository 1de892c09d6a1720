//! Shared sample data for tests.

use serde_json::json;

use crate::core::store::{MemoryStore, tables};

/// Four companies (three in Technology), quarterly reports, ten days of
/// AAPL prices and a handful of ratings.
pub fn sample_store() -> MemoryStore {
    MemoryStore::new()
        .with_rows(
            tables::COMPANIES,
            vec![
                json!({"id": "c-aapl", "ticker": "AAPL", "name": "Apple Inc.", "sector": "Technology",
                       "industry": "Consumer Electronics", "market_cap": 3_000_000_000_000_i64, "country": "USA"}),
                json!({"id": "c-msft", "ticker": "MSFT", "name": "Microsoft Corporation", "sector": "Technology",
                       "industry": "Software", "market_cap": 2_800_000_000_000_i64, "country": "USA"}),
                json!({"id": "c-jpm", "ticker": "JPM", "name": "JPMorgan Chase & Co.", "sector": "Financial Services",
                       "industry": "Banks", "market_cap": 500_000_000_000_i64, "country": "USA"}),
                json!({"id": "c-new", "ticker": "NEWC", "name": "New Corp", "sector": "Technology",
                       "market_cap": null, "country": "Canada"}),
            ],
        )
        .with_rows(
            tables::FINANCIAL_REPORTS,
            vec![
                json!({"company_id": "c-aapl", "fiscal_year": 2024, "fiscal_quarter": "Q3",
                       "revenue": "85000000000", "net_income": 21000000000_i64, "eps": 1.40,
                       "gross_margin": 46.0, "operating_margin": 29.5, "debt_to_equity": 1.8}),
                json!({"company_id": "c-aapl", "fiscal_year": 2024, "fiscal_quarter": "Q4",
                       "revenue": "95000000000", "net_income": 24000000000_i64, "eps": 1.64,
                       "gross_margin": 46.2, "operating_margin": 31.0, "debt_to_equity": 1.9}),
                json!({"company_id": "c-aapl", "fiscal_year": 2023, "fiscal_quarter": "Q4",
                       "revenue": "89000000000", "eps": 1.46, "gross_margin": 45.2}),
                json!({"company_id": "c-msft", "fiscal_year": 2024, "fiscal_quarter": "Q4",
                       "revenue": 65000000000_i64, "eps": 3.10, "gross_margin": 69.8,
                       "operating_margin": null, "debt_to_equity": 0.3}),
                json!({"company_id": "c-jpm", "fiscal_year": 2024, "fiscal_quarter": "Q4",
                       "revenue": 42000000000_i64, "eps": 4.40, "gross_margin": null,
                       "operating_margin": 35.0}),
            ],
        )
        .with_rows(
            tables::STOCK_PRICES,
            (1..=10).map(|day| {
                json!({"company_id": "c-aapl", "date": format!("2024-01-{:02}", day),
                       "open": 180.0, "high": 185.0, "low": 178.0, "close": 180.0 + day as f64,
                       "volume": 50_000_000})
            }),
        )
        .with_rows(
            tables::ANALYST_RATINGS,
            vec![
                json!({"company_id": "c-aapl", "analyst_firm": "Goldman Sachs", "rating": "Buy",
                       "target_price": 250.0, "rating_date": "2024-10-01"}),
                json!({"company_id": "c-aapl", "analyst_firm": "Morgan Stanley", "rating": "Overweight",
                       "target_price": 245.5, "rating_date": "2024-09-15"}),
                json!({"company_id": "c-aapl", "analyst_firm": "Goldman Sachs", "rating": "Hold",
                       "target_price": null, "rating_date": "2024-06-01"}),
                json!({"company_id": "c-msft", "analyst_firm": "Jefferies", "rating": "Buy",
                       "target_price": null, "rating_date": "2024-10-02"}),
            ],
        )
}
