//! Prompt service implementation.
//!
//! Holds the registered templates and renders them on request. Prompts are
//! static text; rendering never touches the store.

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};
use std::collections::HashMap;
use tracing::info;

use super::error::PromptError;
use super::registry::get_all_prompts;
use super::templates::PromptTemplate;

/// Service for listing and rendering prompts.
pub struct PromptService {
    /// Registered prompts, in registration order.
    prompts: Vec<PromptTemplate>,
}

impl PromptService {
    pub fn new() -> Self {
        info!("Initializing PromptService");
        Self {
            prompts: get_all_prompts(),
        }
    }

    /// List all available prompts.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        self.prompts
            .iter()
            .map(|template| Prompt {
                name: template.name.clone(),
                title: None,
                description: template.description.clone(),
                arguments: Some(template.arguments.clone()),
                icons: None,
                meta: None,
            })
            .collect()
    }

    /// Get a prompt with arguments substituted.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        let template = self
            .prompts
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| PromptError::not_found(name))?;

        let arguments = arguments.unwrap_or_default();

        for arg in &template.arguments {
            let present = arguments
                .get(&arg.name)
                .is_some_and(|v| !v.trim().is_empty());
            if arg.required.unwrap_or(false) && !present {
                return Err(PromptError::missing_argument(&arg.name));
            }
        }

        let content = template.render(&arguments)?;

        Ok(GetPromptResult {
            description: template.description.clone(),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }
}

impl Default for PromptService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::PromptMessageContent;

    fn text(result: &GetPromptResult) -> &str {
        match &result.messages[0].content {
            PromptMessageContent::Text { text } => text,
            other => panic!("expected text message, got {:?}", other),
        }
    }

    fn args(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_list_prompts() {
        let prompts = PromptService::new().list_prompts().await;
        let names: Vec<_> = prompts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["analyze_company", "compare_companies"]);
    }

    #[tokio::test]
    async fn test_analyze_company_uppercases_ticker() {
        let result = PromptService::new()
            .get_prompt("analyze_company", args(&[("ticker", "nvda")]))
            .await
            .unwrap();
        let body = text(&result);
        assert!(body.starts_with("Please provide a comprehensive analysis of NVDA including:"));
        assert!(body.ends_with("Use the available financial data tools to gather the information."));
    }

    #[tokio::test]
    async fn test_compare_companies_prompt() {
        let result = PromptService::new()
            .get_prompt("compare_companies", args(&[("ticker1", "aapl"), ("ticker2", "msft")]))
            .await
            .unwrap();
        assert!(text(&result).starts_with("Please compare AAPL and MSFT"));
    }

    #[tokio::test]
    async fn test_missing_or_blank_argument() {
        let service = PromptService::new();
        assert!(matches!(
            service.get_prompt("analyze_company", None).await,
            Err(PromptError::MissingArgument(_))
        ));
        assert!(matches!(
            service
                .get_prompt("compare_companies", args(&[("ticker1", "AAPL"), ("ticker2", " ")]))
                .await,
            Err(PromptError::MissingArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_get_nonexistent_prompt() {
        let result = PromptService::new().get_prompt("nonexistent", None).await;
        assert!(matches!(result, Err(PromptError::NotFound(_))));
    }
}
