use thiserror::Error;

use crate::graph::NodeId;

/// Convenient result alias for the roadnav library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a node identifier is not registered in the network.
    #[error("unknown node: {id}")]
    UnknownNode { id: NodeId },

    /// Raised when `add_node` is called with an identifier that already exists.
    #[error("node {id} already exists")]
    DuplicateNode { id: NodeId },

    /// Raised when a road weight is negative, NaN, or infinite.
    #[error("invalid weight {weight} for road {from} <-> {to}; weights must be finite and >= 0")]
    InvalidWeight {
        from: NodeId,
        to: NodeId,
        weight: f64,
    },

    /// Raised when a road would connect a node to itself.
    #[error("road from node {node} to itself is not allowed")]
    SelfLoop { node: NodeId },

    /// Raised when a location name could not be resolved.
    #[error("unknown location: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a network definition is structurally unusable.
    #[error("invalid network definition: {message}")]
    InvalidNetworkDefinition { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_location_without_suggestions() {
        let err = Error::UnknownLocation {
            name: "Nowhere".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(err.to_string(), "unknown location: Nowhere");
    }

    #[test]
    fn unknown_location_lists_suggestions() {
        let single = Error::UnknownLocation {
            name: "Oak St".to_string(),
            suggestions: vec!["Oak St & 3rd Ave".to_string()],
        };
        assert!(single
            .to_string()
            .ends_with(". Did you mean 'Oak St & 3rd Ave'?"));

        let many = Error::UnknownLocation {
            name: "St".to_string(),
            suggestions: vec!["A St".to_string(), "B St".to_string()],
        };
        assert!(many
            .to_string()
            .ends_with(". Did you mean one of: 'A St', 'B St'?"));
    }

    #[test]
    fn invalid_weight_mentions_both_endpoints() {
        let err = Error::InvalidWeight {
            from: 1,
            to: 2,
            weight: -1.0,
        };
        let message = err.to_string();
        assert!(message.contains("-1"));
        assert!(message.contains("1 <-> 2"));
    }
}
