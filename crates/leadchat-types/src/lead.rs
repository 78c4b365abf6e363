//! Lead information captured mid-conversation.

use serde::{Deserialize, Serialize};

/// Prospective-customer contact details from one form submission.
///
/// Fields are free text and deliberately unvalidated: empty values are
/// forwarded to the notifier as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize_empty() {
        let lead: LeadInfo = serde_json::from_str(r#"{"name":"A"}"#).unwrap();
        assert_eq!(lead.name, "A");
        assert!(lead.company.is_empty());
        assert!(lead.phone.is_empty());
        assert!(lead.email.is_empty());
    }
}
