//! Zenith tuple wire format
//!
//! Converts between the criteria tree in [`crate::criteria`] and the positional JSON
//! tuples the Zenith server exchanges. Parsing is fallible and returns structured
//! errors; serializing is total.

pub mod error;
pub mod field_tags;
pub mod parse;
pub mod progress;
pub mod serializer;
pub mod tags;
pub mod values;

pub use error::{ParseErrorClass, ParseFailure, ParseResult, ZenithParseError, ZenithParseErrorCode};
pub use parse::ParsedBoolean;
pub use progress::{ParseProgress, ParsedNode};
pub use serializer::{from_numeric_node, from_numeric_operand};

use crate::config::runtime_config;
use crate::criteria::BooleanNode;
use crate::logging::{codes, safe_log_critical};
use serde_json::Value;

/// Internal invariant violation: report it and abort the conversion
pub(crate) fn internal_error(message: &str) -> ! {
    safe_log_critical(codes::system::INTERNAL_ERROR, message);
    panic!("internal error: {}", message);
}

/// Parse a wire tuple into a boolean criteria node
pub fn parse_boolean(value: &Value) -> Result<ParsedBoolean, ParseFailure> {
    let result = parse::parse(value);
    let preferences = &runtime_config().converter;

    if preferences.log_conversions {
        match &result {
            Ok(parsed) => {
                crate::log_success!(
                    codes::success::PARSE_COMPLETE,
                    "Criteria tuple parsed",
                    "root" => parsed.node.type_id(),
                    "nodes" => parsed.progress.tuple_node_count()
                );
            }
            Err(failure) => {
                crate::log_error!(
                    failure.error.error_code(),
                    &failure.error.to_string(),
                    "id" => failure.code().id(),
                    "nodes" => failure.progress.tuple_node_count()
                );
            }
        }
    }

    if preferences.log_parse_trail {
        let progress = match &result {
            Ok(parsed) => &parsed.progress,
            Err(failure) => &failure.progress,
        };
        for node in progress.parsed_nodes() {
            crate::log_debug!(
                "Parse trail",
                "depth" => node.node_depth,
                "tag" => node.wire_tag,
                "resolved" => node.resolved.map(|id| id.to_string()).unwrap_or_else(|| "<unresolved>".to_string())
            );
        }
    }

    result
}

/// Serialize a boolean criteria node to its wire tuple
pub fn from_boolean_node(node: &BooleanNode) -> Value {
    let tuple = serializer::from_boolean_node(node);

    if runtime_config().converter.log_conversions {
        crate::log_success!(
            codes::success::SERIALIZE_COMPLETE,
            "Criteria node serialized",
            "root" => node.type_id(),
            "nodes" => node.node_count()
        );
    }

    tuple
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_then_serialize() {
        let wire = json!(["And", ["IsIndex", false], [">=", "Volume", 1000.0]]);
        let parsed = parse_boolean(&wire).unwrap();
        assert_eq!(from_boolean_node(&parsed.node), wire);
    }

    #[test]
    #[should_panic(expected = "internal error")]
    fn test_internal_error_panics() {
        internal_error("unreachable field mapping");
    }
}
