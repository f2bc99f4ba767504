// error.rs — Error types for intent lookups.
//
// A failed lookup always carries the best list of ids the reader could
// recover, so the gate can turn it into a self-correcting denial message.

use std::fmt;

use thiserror::Error;

/// The intent ids a caller may choose from, as far as the registry allows us to tell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailableIds {
    /// Ids parsed from a well-formed registry file.
    Listed(Vec<String>),
    /// The registry could not be parsed; ids were scraped from the raw text.
    Recovered { ids: Vec<String>, reason: String },
    /// The registry file itself could not be read.
    Unreadable(String),
}

impl AvailableIds {
    /// The listed or recovered ids, or an empty slice when the registry was unreadable.
    pub fn ids(&self) -> &[String] {
        match self {
            AvailableIds::Listed(ids) | AvailableIds::Recovered { ids, .. } => ids,
            AvailableIds::Unreadable(_) => &[],
        }
    }
}

impl fmt::Display for AvailableIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailableIds::Listed(ids) if ids.is_empty() => write!(f, "(none defined)"),
            AvailableIds::Listed(ids) => write!(f, "{}", ids.join(", ")),
            AvailableIds::Recovered { ids, reason } => {
                let listed = if ids.is_empty() {
                    "(none recovered)".to_string()
                } else {
                    ids.join(", ")
                };
                write!(f, "{} (registry could not be parsed: {})", listed, reason)
            }
            AvailableIds::Unreadable(reason) => {
                write!(f, "(unavailable: registry file could not be read: {})", reason)
            }
        }
    }
}

/// Errors that can occur while resolving intents.
#[derive(Debug, Error)]
pub enum IntentError {
    /// The requested intent id is not declared in the registry.
    #[error("intent '{intent_id}' not found; available intent IDs: {available}")]
    NotFound {
        intent_id: String,
        available: AvailableIds,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_ids_render_comma_separated() {
        let ids = AvailableIds::Listed(vec!["INT-001".into(), "INT-002".into()]);
        assert_eq!(ids.to_string(), "INT-001, INT-002");
    }

    #[test]
    fn empty_list_renders_placeholder() {
        assert_eq!(AvailableIds::Listed(vec![]).to_string(), "(none defined)");
    }

    #[test]
    fn recovered_ids_carry_parse_reason() {
        let ids = AvailableIds::Recovered {
            ids: vec!["INT-001".into()],
            reason: "invalid type: string".into(),
        };
        assert_eq!(
            ids.to_string(),
            "INT-001 (registry could not be parsed: invalid type: string)"
        );
        assert_eq!(ids.ids(), ["INT-001".to_string()]);
    }

    #[test]
    fn unreadable_registry_is_explicit() {
        let ids = AvailableIds::Unreadable("permission denied".into());
        assert!(ids.to_string().contains("could not be read"));
        assert!(ids.ids().is_empty());
    }
}
