//! Two-company comparison prompt.

use super::PromptDefinition;
use crate::domains::prompts::templates::required_arg;
use rmcp::model::PromptArgument;

pub struct CompareCompaniesPrompt;

impl PromptDefinition for CompareCompaniesPrompt {
    const NAME: &'static str = "compare_companies";
    const DESCRIPTION: &'static str = "Generate a comparison prompt for two companies.";

    fn template() -> &'static str {
        "Please compare {{ticker1|upper}} and {{ticker2|upper}} on the following dimensions:\n\
         1. Company profiles (sector, size, market cap)\n\
         2. Financial metrics (revenue, net income, EPS, margins)\n\
         3. Recent stock price performance\n\
         4. Analyst sentiment and target prices\n\
         5. Which company appears to be the stronger investment and why?\n\n\
         Use the available financial data tools to gather the information."
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            required_arg("ticker1", "Ticker symbol of the first company"),
            required_arg("ticker2", "Ticker symbol of the second company"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_companies_metadata() {
        let names: Vec<_> = CompareCompaniesPrompt::arguments()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["ticker1", "ticker2"]);
    }
}
