use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Billing,
    Technical,
    Account,
    #[default]
    General,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Billing,
        Category::Technical,
        Category::Account,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Billing => "billing",
            Category::Technical => "technical",
            Category::Account => "account",
            Category::General => "general",
        }
    }

    /// Exact match against the closed label set.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

/// A category/priority pair. Both fields are always members of their closed sets,
/// and `Default` is the fallback used whenever classification fails.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct Classification {
    pub category: Category,
    pub priority: Priority,
}

impl Classification {
    pub fn new(category: Category, priority: Priority) -> Self {
        Self { category, priority }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_general_medium() {
        let c = Classification::default();
        assert_eq!(c.category, Category::General);
        assert_eq!(c.priority, Priority::Medium);
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(Category::parse("billing"), Some(Category::Billing));
        assert_eq!(Category::parse("Billing"), None);
        assert_eq!(Category::parse("invoice"), None);
        assert_eq!(Priority::parse("critical"), Some(Priority::Critical));
        assert_eq!(Priority::parse(" high"), None);
    }

    #[test]
    fn test_serializes_as_lowercase_labels() {
        let c = Classification::new(Category::Technical, Priority::Critical);
        let json = serde_json::to_value(c).unwrap();
        assert_eq!(json, serde_json::json!({"category": "technical", "priority": "critical"}));
    }
}
