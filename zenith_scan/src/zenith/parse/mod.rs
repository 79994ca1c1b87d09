//! Wire tuple to criteria tree parser
//!
//! Recursive descent over `serde_json::Value`. Every tuple-typed node is entered,
//! logged and exited on a shared [`ParseProgress`], so a failure still reports how
//! far the parse got.

mod boolean;
mod field;
mod helpers;
mod numeric;

use super::error::ParseFailure;
use super::progress::ParseProgress;
use crate::criteria::BooleanNode;
use serde::Serialize;
use serde_json::Value;

/// A successful parse and the trail it left
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedBoolean {
    pub node: BooleanNode,
    pub progress: ParseProgress,
}

pub(crate) fn parse(value: &Value) -> Result<ParsedBoolean, ParseFailure> {
    let mut progress = ParseProgress::new();
    match boolean::try_to_expected_boolean_node(value, &mut progress) {
        Ok(node) => Ok(ParsedBoolean { node, progress }),
        Err(error) => Err(ParseFailure { error, progress }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zenith::error::ZenithParseErrorCode;
    use serde_json::json;

    #[test]
    fn test_success_keeps_resolved_trail() {
        let parsed = parse(&json!(["Not", ["IsIndex"]])).unwrap();
        assert_eq!(parsed.progress.parsed_nodes().len(), 2);
        assert_eq!(parsed.progress.unresolved().count(), 0);
        assert_eq!(parsed.progress.depth(), 0);
    }

    #[test]
    fn test_failure_carries_progress() {
        let failure = parse(&json!(["Or", ["Volume", 1], ["=", 5]])).unwrap_err();
        assert_eq!(
            failure.code(),
            ZenithParseErrorCode::NumericComparisonDoesNotHave2Operands
        );

        let unresolved: Vec<&str> = failure
            .progress
            .unresolved()
            .map(|node| node.wire_tag.as_str())
            .collect();
        assert_eq!(unresolved, ["Or", "="]);
    }
}
