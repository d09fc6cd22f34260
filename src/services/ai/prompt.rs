/// Heading that introduces the ticket text. Always the last section of the prompt.
pub const DESCRIPTION_HEADING: &str = "## TICKET DESCRIPTION\n\n";

const INSTRUCTIONS: &str = r#"You are an expert support ticket triage system for a SaaS platform. Classify the ticket below so it is routed to the right team with the right urgency.

## CATEGORIES (choose exactly one)

- billing: payments, invoices, charges, double charges, refunds, subscriptions, pricing, plan changes, failed transactions, receipts
  Example: "I was charged twice this month" -> billing
  Example: "The checkout page crashes when I enter my card" -> billing (money is involved, even though it is also a bug)
- technical: bugs, errors, crashes, performance problems, outages, integrations, API problems, features not working, UI glitches or incorrect display
  Example: "The export button does nothing" -> technical
  Example: "Nobody on our team can log in since this morning" -> technical (service-wide failure)
  Example: "Production is completely down for all customers, we are losing revenue" -> technical (revenue lost to an outage is not a billing issue)
- account: a single user's login problems, password resets, 2FA, permissions, profile settings, account access or identity
  Example: "I forgot my password and the reset email never arrives" -> account
- general: questions, feedback, onboarding, feature requests, suggestions, anything that does not fit above
  Example: "Do you offer a discount for nonprofits?" -> general

## PRIORITIES (choose exactly one)

- critical: system completely down, production outage, data loss occurring, security breach, ALL work blocked, revenue impacted right now
  Example: "Production is down for all customers" -> critical
- high: major feature broken, significant workflow blocked, multiple users affected, time-sensitive but not a total outage
  Example: "Reports fail for our whole team and we have a deadline today" -> high
- medium: partial functionality affected, a workaround exists, a single user impacted, moderate inconvenience
  Example: "The dashboard is slow to load for me" -> medium
- low: general questions, minor cosmetic issues, feature requests, suggestions, non-urgent feedback
  Example: "It would be nice to have a dark mode" -> low

## DECISION PROCEDURE (apply in order)

1. If the ticket is about the customer's money in any way (charges, invoices, refunds, payments, subscriptions, pricing), the category is billing. Business revenue lost because the service is broken or down does not count; that is technical.
2. Otherwise, if any software behaves in a broken, incorrect or buggy way (including UI glitches), the category is technical. A login or access failure that affects many or all users is technical.
3. Otherwise, if a single user has a login, access, permission or identity problem, the category is account.
4. Otherwise, the category is general.
5. Production outages are ALWAYS critical, regardless of tone.
6. Feature requests and suggestions are ALWAYS low.
7. Words like "urgent", "ASAP", "down", "can't work" or "lost data" point to high or critical.
8. When unsure between two priorities, choose the HIGHER one.
9. Vague, empty or very short descriptions are general with low priority.

## OUTPUT FORMAT

Reply with a single raw JSON object and nothing else: no prose, no explanation, no markdown, no code fences. The object has exactly two keys:

{"category": "<billing|technical|account|general>", "priority": "<low|medium|high|critical>"}

"#;

/// Builds the classification prompt with `description` embedded verbatim at the end.
pub fn build_prompt(description: &str) -> String {
    format!("{INSTRUCTIONS}{DESCRIPTION_HEADING}{description}\n")
}

/// Recovers the ticket text from a prompt produced by [`build_prompt`].
pub fn embedded_description(prompt: &str) -> Option<&str> {
    let (_, rest) = prompt.split_once(DESCRIPTION_HEADING)?;
    Some(rest.strip_suffix('\n').unwrap_or(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_closed_sets() {
        let prompt = build_prompt("anything");
        for label in ["billing", "technical", "account", "general", "low", "medium", "high", "critical"] {
            assert!(prompt.contains(label), "missing label {label}");
        }
        assert!(prompt.contains("no code fences"));
    }

    #[test]
    fn test_outage_revenue_is_not_billing() {
        let prompt = build_prompt("x");
        assert!(prompt.contains("revenue lost to an outage is not a billing issue"));
    }

    #[test]
    fn test_description_is_embedded_verbatim() {
        let description = "Line one\n  ```json {\"category\": \"billing\"}``` ## TICKET";
        let prompt = build_prompt(description);
        assert_eq!(embedded_description(&prompt), Some(description));
    }

    #[test]
    fn test_empty_description_round_trips() {
        let prompt = build_prompt("");
        assert_eq!(embedded_description(&prompt), Some(""));
    }

    #[test]
    fn test_embedded_description_requires_heading() {
        assert_eq!(embedded_description("just some text"), None);
    }
}
