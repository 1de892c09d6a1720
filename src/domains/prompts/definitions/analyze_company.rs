//! Single-company analysis prompt.

use super::PromptDefinition;
use crate::domains::prompts::templates::required_arg;
use rmcp::model::PromptArgument;

pub struct AnalyzeCompanyPrompt;

impl PromptDefinition for AnalyzeCompanyPrompt {
    const NAME: &'static str = "analyze_company";
    const DESCRIPTION: &'static str =
        "Generate a comprehensive analysis prompt for a given company ticker.";

    fn template() -> &'static str {
        "Please provide a comprehensive analysis of {{ticker|upper}} including:\n\
         1. Company profile and business overview\n\
         2. Recent financial performance (revenue, earnings, margins)\n\
         3. Stock price trends\n\
         4. Analyst ratings and consensus target price\n\
         5. Key strengths and risks\n\n\
         Use the available financial data tools to gather the information."
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![required_arg("ticker", "Ticker symbol of the company to analyze")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_company_metadata() {
        assert_eq!(AnalyzeCompanyPrompt::NAME, "analyze_company");
        let args = AnalyzeCompanyPrompt::arguments();
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].name, "ticker");
        assert_eq!(args[0].required, Some(true));
        assert!(AnalyzeCompanyPrompt::template().contains("{{ticker|upper}}"));
    }
}
