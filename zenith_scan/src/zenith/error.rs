//! Parse error types with global logging integration
//!
//! Every failure carries a specific `ZenithParseErrorCode` (stable id plus default
//! English message) and a free-form context string. The failure class, and from it
//! the registry `Code`, follows from the specific code.

use super::progress::ParseProgress;
use crate::logging::{codes, Code};
use serde::{Deserialize, Serialize};

pub type ParseResult<T> = Result<T, ZenithParseError>;

/// Failure classes of the wire parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParseErrorClass {
    Structural,
    UnknownTag,
    TypeMismatch,
    Arity,
    Range,
    Format,
    ObjectNullity,
    Limit,
}

impl ParseErrorClass {
    pub fn code(&self) -> Code {
        match self {
            Self::Structural => codes::parse::STRUCTURAL,
            Self::UnknownTag => codes::parse::UNKNOWN_TAG,
            Self::TypeMismatch => codes::parse::TYPE_MISMATCH,
            Self::Arity => codes::parse::ARITY,
            Self::Range => codes::parse::RANGE,
            Self::Format => codes::parse::FORMAT,
            Self::ObjectNullity => codes::parse::OBJECT_NULLITY,
            Self::Limit => codes::parse::LIMIT_EXCEEDED,
        }
    }
}

macro_rules! parse_error_codes {
    ($($variant:ident => ($class:ident, $message:literal)),+ $(,)?) => {
        /// Specific parse failure
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum ZenithParseErrorCode {
            $($variant),+
        }

        impl ZenithParseErrorCode {
            /// Stable identifier, usable as a localization key
            pub fn id(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }

            /// Default English message
            pub fn message(&self) -> &'static str {
                match self {
                    $(Self::$variant => $message),+
                }
            }

            pub fn class(&self) -> ParseErrorClass {
                match self {
                    $(Self::$variant => ParseErrorClass::$class),+
                }
            }
        }
    };
}

parse_error_codes! {
    BooleanTupleNotAnArray => (Structural, "boolean tuple is not an array"),
    TupleArrayIsZeroLength => (Structural, "tuple array is zero length"),
    TupleNodeTypeIsNotString => (Structural, "tuple node type is not a string"),

    UnknownBooleanTupleNodeType => (UnknownTag, "unknown boolean tuple node type"),
    UnknownNumericTupleNodeType => (UnknownTag, "unknown numeric tuple node type"),
    UnknownNumericField => (UnknownTag, "unknown numeric field"),
    UnknownPriceSubField => (UnknownTag, "unknown price sub-field"),
    UnknownDateSubField => (UnknownTag, "unknown date sub-field"),
    UnknownAltCodeSubField => (UnknownTag, "unknown alt code sub-field"),
    UnknownAttributeSubField => (UnknownTag, "unknown attribute sub-field"),
    UnknownTextContainsAs => (UnknownTag, "unknown text contains as"),

    NumericOperandTypeIsNotValid => (TypeMismatch, "numeric operand is not a number, numeric field or tuple"),
    NumericValueIsNotNumber => (TypeMismatch, "numeric value is not a number"),
    DateValueIsNotString => (TypeMismatch, "date value is not a string"),
    TextValueIsNotString => (TypeMismatch, "text value is not a string"),
    BooleanValueIsNotBoolean => (TypeMismatch, "boolean field value is not a boolean"),
    SubFieldIsNotString => (TypeMismatch, "sub-field is not a string"),
    TextContainsAsIsNotString => (TypeMismatch, "text contains as is not a string"),
    TextContainsIgnoreCaseIsNotBoolean => (TypeMismatch, "text contains ignore case is not a boolean"),
    NamedParametersIsNotObject => (TypeMismatch, "named parameters is not an object"),

    LogicalBooleanMissingOperands => (Arity, "logical boolean missing operands"),
    LogicalNotHasMoreThanOneOperand => (Arity, "logical not has more than one operand"),
    NumericComparisonDoesNotHave2Operands => (Arity, "numeric comparison does not have 2 operands"),
    ConstantBooleanHasParameters => (Arity, "constant boolean has parameters"),
    BinaryArithmeticDoesNotHave2Operands => (Arity, "binary arithmetic operation does not have 2 operands"),
    UnaryArithmeticDoesNotHave1Operand => (Arity, "unary arithmetic operation does not have 1 operand"),
    NumericIfTupleHasInvalidLength => (Arity, "numeric if tuple has invalid length"),
    FieldHasTooManyParameters => (Arity, "field has too many parameters"),
    SubFieldMissing => (Arity, "sub-field missing"),

    RangeMinAndMaxBothUndefined => (Range, "range min and max both undefined"),
    NamedAtCombinedWithRange => (Range, "named parameters combine At with Min or Max"),
    BooleanFieldHasRange => (Range, "boolean field does not accept a range"),

    DateValueIsNotIso8601 => (Format, "date value is not ISO-8601"),

    NamedParametersObjectIsNull => (ObjectNullity, "named parameters object is null"),

    TupleDepthLimitExceeded => (Limit, "tuple nesting depth limit exceeded"),
    TupleNodeCountLimitExceeded => (Limit, "tuple node count limit exceeded"),
    TupleLengthLimitExceeded => (Limit, "tuple length limit exceeded"),
    NumericIfArmLimitExceeded => (Limit, "numeric if arm limit exceeded"),
}

impl std::fmt::Display for ZenithParseErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

fn describe(code: &ZenithParseErrorCode, context: &str) -> String {
    if context.is_empty() {
        code.message().to_string()
    } else {
        format!("{}: {}", code.message(), context)
    }
}

/// Recoverable parse failure, one variant per failure class
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ZenithParseError {
    #[error("{}", describe(.code, .context))]
    Structural {
        code: ZenithParseErrorCode,
        context: String,
    },

    #[error("{}", describe(.code, .context))]
    UnknownTag {
        code: ZenithParseErrorCode,
        context: String,
    },

    #[error("{}", describe(.code, .context))]
    TypeMismatch {
        code: ZenithParseErrorCode,
        context: String,
    },

    #[error("{}", describe(.code, .context))]
    Arity {
        code: ZenithParseErrorCode,
        context: String,
    },

    #[error("{}", describe(.code, .context))]
    Range {
        code: ZenithParseErrorCode,
        context: String,
    },

    #[error("{}", describe(.code, .context))]
    Format {
        code: ZenithParseErrorCode,
        context: String,
    },

    #[error("{}", describe(.code, .context))]
    ObjectNullity {
        code: ZenithParseErrorCode,
        context: String,
    },

    #[error("{}", describe(.code, .context))]
    Limit {
        code: ZenithParseErrorCode,
        context: String,
    },
}

impl ZenithParseError {
    /// Create an error of the class implied by `code`
    pub fn new(code: ZenithParseErrorCode, context: impl Into<String>) -> Self {
        let context = context.into();
        match code.class() {
            ParseErrorClass::Structural => Self::Structural { code, context },
            ParseErrorClass::UnknownTag => Self::UnknownTag { code, context },
            ParseErrorClass::TypeMismatch => Self::TypeMismatch { code, context },
            ParseErrorClass::Arity => Self::Arity { code, context },
            ParseErrorClass::Range => Self::Range { code, context },
            ParseErrorClass::Format => Self::Format { code, context },
            ParseErrorClass::ObjectNullity => Self::ObjectNullity { code, context },
            ParseErrorClass::Limit => Self::Limit { code, context },
        }
    }

    pub fn code(&self) -> ZenithParseErrorCode {
        match self {
            Self::Structural { code, .. }
            | Self::UnknownTag { code, .. }
            | Self::TypeMismatch { code, .. }
            | Self::Arity { code, .. }
            | Self::Range { code, .. }
            | Self::Format { code, .. }
            | Self::ObjectNullity { code, .. }
            | Self::Limit { code, .. } => *code,
        }
    }

    pub fn context(&self) -> &str {
        match self {
            Self::Structural { context, .. }
            | Self::UnknownTag { context, .. }
            | Self::TypeMismatch { context, .. }
            | Self::Arity { context, .. }
            | Self::Range { context, .. }
            | Self::Format { context, .. }
            | Self::ObjectNullity { context, .. }
            | Self::Limit { context, .. } => context,
        }
    }

    pub fn class(&self) -> ParseErrorClass {
        self.code().class()
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        self.class().code()
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn description(&self) -> &'static str {
        codes::get_description(self.error_code().as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    /// Message with the specific id and the recommended action
    pub fn enhanced_message(&self) -> String {
        format!(
            "[{}/{}] {}. {}",
            self.error_code(),
            self.code().id(),
            self,
            self.recommended_action()
        )
    }
}

/// A failed parse together with the progress made before the failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct ParseFailure {
    pub error: ZenithParseError,
    pub progress: ParseProgress,
}

impl ParseFailure {
    pub fn code(&self) -> ZenithParseErrorCode {
        self.error.code()
    }

    /// Enhanced error message, followed by the progress trail when preferences ask for it
    pub fn enhanced_message(&self) -> String {
        let mut message = self.error.enhanced_message();
        if crate::config::runtime_config().converter.include_trail_in_errors
            && !self.progress.parsed_nodes().is_empty()
        {
            message.push_str("\nParse trail:\n");
            message.push_str(&self.progress.render_trail());
        }
        message
    }
}
