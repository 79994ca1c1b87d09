// Internal modules
pub mod config;
pub mod criteria;
#[macro_use]
pub mod logging;
pub mod zenith;

// Re-export key types for library consumers
pub use criteria::{BooleanNode, FieldId, NodeTypeId, NumericNode, NumericOperand};
pub use zenith::{
    from_boolean_node, parse_boolean, ParseFailure, ParseProgress, ParsedBoolean,
    ZenithParseError, ZenithParseErrorCode,
};
