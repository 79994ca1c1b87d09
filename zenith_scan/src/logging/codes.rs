//! Consolidated error codes and classification system
//!
//! Single source of truth for every code the converter logs or attaches to an error,
//! together with its behavioral metadata.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Critical" => Some(Severity::Critical),
            "High" => Some(Severity::High),
            "Medium" => Some(Severity::Medium),
            "Low" => Some(Severity::Low),
            _ => None,
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Wire tuple parsing error codes, one per failure class
pub mod parse {
    use super::Code;

    pub const STRUCTURAL: Code = Code::new("Z301");
    pub const UNKNOWN_TAG: Code = Code::new("Z302");
    pub const TYPE_MISMATCH: Code = Code::new("Z303");
    pub const ARITY: Code = Code::new("Z304");
    pub const RANGE: Code = Code::new("Z305");
    pub const FORMAT: Code = Code::new("Z306");
    pub const OBJECT_NULLITY: Code = Code::new("Z307");
    pub const LIMIT_EXCEEDED: Code = Code::new("Z308");
}

/// Wire tuple serialization codes
pub mod serialize {
    use super::Code;

    pub const NON_FINITE_LITERAL: Code = Code::new("Z401");
}

/// Consumer (command line and embedding application) error codes
pub mod consumer {
    use super::Code;

    pub const INPUT_READ_ERROR: Code = Code::new("C001");
    pub const INPUT_JSON_ERROR: Code = Code::new("C002");
    pub const ROUND_TRIP_MISMATCH: Code = Code::new("C003");
    pub const OUTPUT_WRITE_ERROR: Code = Code::new("C004");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const PARSE_COMPLETE: Code = Code::new("I300");
    pub const SERIALIZE_COMPLETE: Code = Code::new("I400");
    pub const ROUND_TRIP_VERIFIED: Code = Code::new("I401");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        registry.insert(
            "ERR001",
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Internal converter invariant violated",
                "File a bug report with the node or field that triggered it",
            ),
        );
        registry.insert(
            "ERR002",
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "Logging or configuration initialization failure",
                "Check ZENITH_* environment settings and initialize only once",
            ),
        );

        // Parse errors
        registry.insert(
            "Z301",
            ErrorMetadata::new(
                "Z301",
                "Parse",
                Severity::Medium,
                true,
                false,
                "Tuple node is not a non-empty array headed by a string tag",
                "Send each node as [tag, ...params] with a string tag",
            ),
        );
        registry.insert(
            "Z302",
            ErrorMetadata::new(
                "Z302",
                "Parse",
                Severity::Medium,
                true,
                false,
                "Unknown tuple tag, field or sub-field name",
                "Check the tag against the supported Zenith scan criteria vocabulary",
            ),
        );
        registry.insert(
            "Z303",
            ErrorMetadata::new(
                "Z303",
                "Parse",
                Severity::Medium,
                true,
                false,
                "Parameter has the wrong JSON type",
                "Use a number, string or boolean as the field's data type requires",
            ),
        );
        registry.insert(
            "Z304",
            ErrorMetadata::new(
                "Z304",
                "Parse",
                Severity::Medium,
                true,
                false,
                "Wrong number of parameters for the tuple node",
                "Match the parameter count required by the node or field kind",
            ),
        );
        registry.insert(
            "Z305",
            ErrorMetadata::new(
                "Z305",
                "Parse",
                Severity::Medium,
                true,
                false,
                "Range has neither a minimum nor a maximum",
                "Supply Min, Max or both",
            ),
        );
        registry.insert(
            "Z306",
            ErrorMetadata::new(
                "Z306",
                "Parse",
                Severity::Medium,
                true,
                false,
                "Date value is not a valid ISO-8601 string",
                "Use YYYY-MM-DD or an RFC 3339 date-time",
            ),
        );
        registry.insert(
            "Z307",
            ErrorMetadata::new(
                "Z307",
                "Parse",
                Severity::Medium,
                true,
                false,
                "Named parameter object is null",
                "Send an object, or omit the parameter",
            ),
        );
        registry.insert(
            "Z308",
            ErrorMetadata::new(
                "Z308",
                "Parse",
                Severity::High,
                true,
                false,
                "Tuple exceeds a configured parser limit",
                "Simplify the criteria or raise the limit in the build profile",
            ),
        );

        // Serialize warnings
        registry.insert(
            "Z401",
            ErrorMetadata::new(
                "Z401",
                "Serialize",
                Severity::Low,
                true,
                false,
                "Numeric literal is not finite and was written as null",
                "Replace NaN or infinite literals before sending criteria",
            ),
        );

        // Consumer errors
        registry.insert(
            "C001",
            ErrorMetadata::new(
                "C001",
                "Consumer",
                Severity::Medium,
                true,
                false,
                "Input could not be read",
                "Check the input path and permissions",
            ),
        );
        registry.insert(
            "C002",
            ErrorMetadata::new(
                "C002",
                "Consumer",
                Severity::Medium,
                true,
                false,
                "Input is not valid JSON",
                "Fix the JSON syntax of the input document",
            ),
        );
        registry.insert(
            "C003",
            ErrorMetadata::new(
                "C003",
                "Consumer",
                Severity::High,
                true,
                false,
                "Re-serialized criteria did not parse back to the same tree",
                "Report the input tuple; the converter lost information",
            ),
        );
        registry.insert(
            "C004",
            ErrorMetadata::new(
                "C004",
                "Consumer",
                Severity::Medium,
                true,
                false,
                "Report could not be written",
                "Check that the output stream is still open",
            ),
        );

        // Success codes
        registry.insert(
            "I004",
            ErrorMetadata::new(
                "I004",
                "System",
                Severity::Low,
                true,
                false,
                "Logging system initialized",
                "Continue",
            ),
        );
        registry.insert(
            "I300",
            ErrorMetadata::new(
                "I300",
                "Parse",
                Severity::Low,
                true,
                false,
                "Boolean tuple parsed into a criteria tree",
                "Continue",
            ),
        );
        registry.insert(
            "I400",
            ErrorMetadata::new(
                "I400",
                "Serialize",
                Severity::Low,
                true,
                false,
                "Criteria tree serialized into a boolean tuple",
                "Continue",
            ),
        );
        registry.insert(
            "I401",
            ErrorMetadata::new(
                "I401",
                "Consumer",
                Severity::Low,
                true,
                false,
                "Criteria survived a parse and serialize round trip",
                "Continue",
            ),
        );

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_parse_code_has_metadata() {
        let codes = [
            parse::STRUCTURAL,
            parse::UNKNOWN_TAG,
            parse::TYPE_MISMATCH,
            parse::ARITY,
            parse::RANGE,
            parse::FORMAT,
            parse::OBJECT_NULLITY,
            parse::LIMIT_EXCEEDED,
        ];
        for code in codes {
            let metadata = get_error_metadata(code.as_str()).expect("metadata registered");
            assert_eq!(metadata.category, "Parse");
            assert!(metadata.recoverable);
            assert!(!metadata.requires_halt);
        }
    }

    #[test]
    fn test_consumer_codes_are_distinct() {
        let codes = [
            consumer::INPUT_READ_ERROR,
            consumer::INPUT_JSON_ERROR,
            consumer::ROUND_TRIP_MISMATCH,
            consumer::OUTPUT_WRITE_ERROR,
        ];
        let ids: std::collections::HashSet<_> = codes.iter().map(|code| code.as_str()).collect();
        assert_eq!(ids.len(), codes.len());
        for code in codes {
            let metadata = get_error_metadata(code.as_str()).expect("metadata registered");
            assert_eq!(metadata.category, "Consumer");
        }
    }

    #[test]
    fn test_internal_error_is_fatal() {
        assert_eq!(
            get_severity(system::INTERNAL_ERROR.as_str()),
            Severity::Critical
        );
        assert!(requires_halt(system::INTERNAL_ERROR.as_str()));
        assert!(!is_recoverable(system::INTERNAL_ERROR.as_str()));
    }

    #[test]
    fn test_unknown_code_fallbacks() {
        assert_eq!(get_description("Z999"), "Unknown error");
        assert_eq!(get_category("Z999"), "Unknown");
        assert_eq!(get_action("Z999"), "No specific action available");
        assert_eq!(get_severity("Z999"), Severity::Medium);
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!(Severity::parse("High"), Some(Severity::High));
        assert_eq!(Severity::parse("high"), None);
        assert_eq!(Severity::Low.as_str(), "Low");
    }
}
