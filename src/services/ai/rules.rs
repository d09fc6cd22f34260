//! Keyword-driven stand-in for a hosted model.
//!
//! Applies the same decision procedure the prompt asks the model to follow and
//! answers in the same raw-JSON format, so it can replace a remote endpoint for
//! offline use and for deterministic tests.

use async_trait::async_trait;

use super::prompt::embedded_description;
use super::{LlmProvider, Message};
use crate::errors::LlmError;
use crate::models::{Category, Classification, Priority};

/// Descriptions with fewer words than this are treated as too vague to classify.
const MIN_WORDS: usize = 3;

const BILLING: &[&str] = &[
    "billing", "billed", "bill", "charge", "charged", "charges", "invoice", "invoices", "refund",
    "refunds", "payment", "payments", "paid", "pay", "subscription", "subscriptions", "pricing",
    "price", "plan upgrade", "plan downgrade", "credit card", "card declined", "transaction",
    "receipt", "discount", "coupon",
];

const TECHNICAL: &[&str] = &[
    "error", "errors", "bug", "bugs", "crash", "crashes", "crashed", "crashing", "broken", "not working",
    "doesnt work", "does nothing", "fails", "failing", "failed", "failure", "down", "outage", "slow",
    "timeout", "timed out", "api", "integration", "webhook", "500", "exception", "glitch", "freezes",
    "blank page", "wrong", "incorrect", "not loading", "wont load",
];

/// Login and identity problems. These decide `account` even when the text also reads like a bug.
const LOGIN: &[&str] = &[
    "login", "log in", "logging in", "sign in", "signin", "password", "2fa", "two factor",
    "locked out", "username", "verification email", "reset link",
];

/// Weaker account signals, only used when nothing looks broken.
const ACCOUNT: &[&str] = &[
    "permission", "permissions", "access", "profile", "account",
];

const SERVICE_WIDE: &[&str] = &[
    "all users", "all customers", "everyone", "nobody", "no one", "whole team", "entire team",
    "all of our", "everybody", "all accounts",
];

const CRITICAL: &[&str] = &[
    "outage", "completely down", "production is down", "production down", "site is down",
    "system is down", "service is down", "data loss", "lost data", "losing data", "security breach",
    "breach", "hacked", "down for all", "cant work",
];

const HIGH: &[&str] = &[
    "urgent", "asap", "immediately", "blocked", "blocking", "deadline", "multiple users",
    "charged twice", "double charged", "cannot access", "cant access", "down",
];

const FEATURE_REQUEST: &[&str] = &[
    "feature request", "would be nice", "would be great", "it would help", "suggestion",
    "suggest", "could you add", "can you add", "please add", "wish", "idea",
];

/// Provider that classifies with [`evaluate`] instead of calling a model.
pub struct RulesProvider;

#[async_trait]
impl LlmProvider for RulesProvider {
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        let prompt = messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
            .unwrap_or("");
        let description = embedded_description(prompt).unwrap_or(prompt);
        let c = evaluate(description);

        Ok(serde_json::json!({
            "category": c.category.as_str(),
            "priority": c.priority.as_str(),
        })
        .to_string())
    }
}

/// Classifies a ticket description using keyword signals.
pub fn evaluate(description: &str) -> Classification {
    let text = normalize(description);

    if text.split_whitespace().count() < MIN_WORDS {
        return Classification::new(Category::General, Priority::Low);
    }

    let category = category_for(&text);
    let priority = priority_for(&text, category);

    Classification::new(category, priority)
}

fn category_for(text: &str) -> Category {
    let login = matches_any(text, LOGIN);
    let service_wide = matches_any(text, SERVICE_WIDE);

    if matches_any(text, BILLING) {
        Category::Billing
    } else if login && !service_wide {
        Category::Account
    } else if login || matches_any(text, TECHNICAL) {
        Category::Technical
    } else if matches_any(text, ACCOUNT) {
        Category::Account
    } else {
        Category::General
    }
}

fn priority_for(text: &str, category: Category) -> Priority {
    if matches_any(text, CRITICAL) {
        Priority::Critical
    } else if matches_any(text, FEATURE_REQUEST) {
        Priority::Low
    } else if matches_any(text, HIGH) || (category == Category::Technical && matches_any(text, SERVICE_WIDE)) {
        Priority::High
    } else if category == Category::General {
        Priority::Low
    } else {
        Priority::Medium
    }
}

/// Lowercases, drops apostrophes and turns punctuation into single spaces,
/// padded so phrases can be matched on word boundaries.
fn normalize(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { ' ' })
        .collect();
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    format!(" {} ", words.join(" "))
}

fn matches_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| text.contains(&format!(" {p} ")))
}
