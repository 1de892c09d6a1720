//! Prompt templates module.
//!
//! Templates use `{{variable}}` placeholders. A placeholder may carry a
//! filter, `{{variable|upper}}`, applied to the value before substitution.

use rmcp::model::PromptArgument;
use std::collections::HashMap;

use super::error::PromptError;

/// A prompt template that can be instantiated with arguments.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The unique name of the prompt.
    pub name: String,

    /// A description of what the prompt does.
    pub description: Option<String>,

    /// The arguments that this prompt accepts.
    pub arguments: Vec<PromptArgument>,

    /// The template string with placeholders.
    pub template: String,
}

impl PromptTemplate {
    /// Create a new prompt template.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        arguments: Vec<PromptArgument>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            arguments,
            template: template.into(),
        }
    }

    /// Render the template with the given arguments.
    ///
    /// Values are trimmed. Placeholders without a value render as empty.
    pub fn render(&self, arguments: &HashMap<String, String>) -> Result<String, PromptError> {
        let mut result = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after
                .find("}}")
                .ok_or_else(|| PromptError::template("Unclosed placeholder"))?;

            let (variable, filter) = match after[..end].split_once('|') {
                Some((variable, filter)) => (variable.trim(), Some(filter.trim())),
                None => (after[..end].trim(), None),
            };
            let value = arguments.get(variable).map(|v| v.trim()).unwrap_or("");
            result.push_str(&apply_filter(value, filter)?);

            rest = &after[end + 2..];
        }
        result.push_str(rest);

        Ok(result)
    }
}

fn apply_filter(value: &str, filter: Option<&str>) -> Result<String, PromptError> {
    match filter {
        None => Ok(value.to_string()),
        Some("upper") => Ok(value.to_uppercase()),
        Some("lower") => Ok(value.to_lowercase()),
        Some(other) => Err(PromptError::template(format!("Unknown filter: {}", other))),
    }
}

/// Build a required argument.
pub fn required_arg(name: &str, description: &str) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        title: None,
        description: Some(description.to_string()),
        required: Some(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_simple_substitution() {
        let template = PromptTemplate::new("test", None, vec![], "Hello, {{name}}!");
        let result = template.render(&args(&[("name", "World")])).unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_upper_filter_and_trim() {
        let template = PromptTemplate::new("test", None, vec![], "Analyze {{ticker|upper}} now");
        let result = template.render(&args(&[("ticker", " aapl ")])).unwrap();
        assert_eq!(result, "Analyze AAPL now");
    }

    #[test]
    fn test_missing_value_renders_empty() {
        let template = PromptTemplate::new("test", None, vec![], "[{{missing}}]");
        assert_eq!(template.render(&HashMap::new()).unwrap(), "[]");
    }

    #[test]
    fn test_template_errors() {
        let unclosed = PromptTemplate::new("test", None, vec![], "Hello {{name");
        assert!(unclosed.render(&HashMap::new()).is_err());

        let unknown = PromptTemplate::new("test", None, vec![], "{{name|shout}}");
        assert!(matches!(
            unknown.render(&args(&[("name", "x")])),
            Err(PromptError::TemplateError(_))
        ));
    }
}
