//! Return condition codes and their transition rules
//!
//! The canonical persisted codes are `Good | service | dispose | exchange`.
//! Human-readable labels ("To Be Serviced", ...) are a pure presentation
//! mapping and are never written to the database.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Disposition of a returned unit (matches database enum)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize, ToSchema)]
#[sqlx(type_name = "return_condition")]
pub enum ReturnCondition {
    #[sqlx(rename = "Good")]
    #[serde(rename = "Good")]
    Good,
    #[sqlx(rename = "service")]
    #[serde(rename = "service")]
    Service,
    #[sqlx(rename = "dispose")]
    #[serde(rename = "dispose")]
    Dispose,
    #[sqlx(rename = "exchange")]
    #[serde(rename = "exchange")]
    Exchange,
}

impl ReturnCondition {
    pub const ALL: [ReturnCondition; 4] = [
        ReturnCondition::Good,
        ReturnCondition::Service,
        ReturnCondition::Dispose,
        ReturnCondition::Exchange,
    ];

    /// Canonical persisted code
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnCondition::Good => "Good",
            ReturnCondition::Service => "service",
            ReturnCondition::Dispose => "dispose",
            ReturnCondition::Exchange => "exchange",
        }
    }

    /// Human-readable label for display layers
    pub fn display_label(&self) -> &'static str {
        match self {
            ReturnCondition::Good => "Good",
            ReturnCondition::Service => "To Be Serviced",
            ReturnCondition::Dispose => "To Be Disposed",
            ReturnCondition::Exchange => "To Be Exchanged",
        }
    }

    /// Parse either the canonical code or the display label.
    /// Clients send both, so the engine normalizes here.
    pub fn parse(input: &str) -> Option<ReturnCondition> {
        match input.trim() {
            "Good" => Some(ReturnCondition::Good),
            "service" | "To Be Serviced" => Some(ReturnCondition::Service),
            "dispose" | "To Be Disposed" => Some(ReturnCondition::Dispose),
            "exchange" | "To Be Exchanged" => Some(ReturnCondition::Exchange),
            _ => None,
        }
    }

    /// Transition table for a pending return: any condition may be changed
    /// to any other until the admin takes the terminal action (after which
    /// the returned record no longer exists).
    pub fn can_change_to(&self, _next: ReturnCondition) -> bool {
        true
    }
}

impl std::fmt::Display for ReturnCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReturnCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReturnCondition::parse(s).ok_or_else(|| format!("Unknown return condition: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_codes() {
        assert_eq!(ReturnCondition::Good.as_str(), "Good");
        assert_eq!(ReturnCondition::Service.as_str(), "service");
        assert_eq!(ReturnCondition::Dispose.as_str(), "dispose");
        assert_eq!(ReturnCondition::Exchange.as_str(), "exchange");
    }

    #[test]
    fn test_parse_accepts_codes_and_labels() {
        for condition in ReturnCondition::ALL {
            assert_eq!(ReturnCondition::parse(condition.as_str()), Some(condition));
            assert_eq!(
                ReturnCondition::parse(condition.display_label()),
                Some(condition)
            );
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(ReturnCondition::parse("broken"), None);
        assert_eq!(ReturnCondition::parse(""), None);
        // Lowercase "good" is not canonical
        assert_eq!(ReturnCondition::parse("good"), None);
    }

    #[test]
    fn test_free_transitions_before_approval() {
        for from in ReturnCondition::ALL {
            for to in ReturnCondition::ALL {
                assert!(from.can_change_to(to));
            }
        }
    }

    #[test]
    fn test_serde_wire_format_is_canonical() {
        let json = serde_json::to_string(&ReturnCondition::Service).unwrap();
        assert_eq!(json, "\"service\"");
        let json = serde_json::to_string(&ReturnCondition::Good).unwrap();
        assert_eq!(json, "\"Good\"");

        let parsed: ReturnCondition = serde_json::from_str("\"dispose\"").unwrap();
        assert_eq!(parsed, ReturnCondition::Dispose);
    }

    #[test]
    fn test_display_labels_never_equal_codes_except_good() {
        assert_eq!(
            ReturnCondition::Good.as_str(),
            ReturnCondition::Good.display_label()
        );
        for condition in [
            ReturnCondition::Service,
            ReturnCondition::Dispose,
            ReturnCondition::Exchange,
        ] {
            assert_ne!(condition.as_str(), condition.display_label());
        }
    }
}
