use super::parse::parse_labels;
use super::prompt::build_prompt;
use super::{LlmProvider, Message};
use crate::errors::ClassifyError;
use crate::models::Classification;

/// Turns free-text ticket descriptions into a category/priority pair using an
/// [`LlmProvider`].
pub struct Classifier {
    llm: Box<dyn LlmProvider>,
}

impl Classifier {
    pub fn new(llm: Box<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Classifies `description`, falling back to `general`/`medium` on any
    /// transport, endpoint or format failure. Never fails.
    pub async fn classify(&self, description: &str) -> Classification {
        match self.try_classify(description).await {
            Ok(classification) => classification,
            Err(e) => {
                tracing::warn!(
                    description_len = description.len(),
                    "ticket classification failed, using defaults: {e}"
                );
                Classification::default()
            }
        }
    }

    /// Single attempt against the provider. Out-of-set labels are already
    /// repaired in the returned value; only unusable replies are errors.
    pub async fn try_classify(&self, description: &str) -> Result<Classification, ClassifyError> {
        let messages = [Message::user(build_prompt(description))];
        let reply = self.llm.complete(&messages).await?;
        let classification = parse_labels(&reply)?;

        tracing::debug!(
            category = classification.category.as_str(),
            priority = classification.priority.as_str(),
            "classified ticket"
        );

        Ok(classification)
    }
}
