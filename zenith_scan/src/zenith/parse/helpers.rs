//! Shared tuple checks and literal decoding

use crate::config::compile_time::parser::{
    MAX_TUPLE_DEPTH, MAX_TUPLE_LENGTH, MAX_TUPLE_NODE_COUNT,
};
use crate::criteria::{DateValue, TextContainsAsId};
use crate::zenith::error::{ParseResult, ZenithParseError, ZenithParseErrorCode as Code};
use crate::zenith::progress::ParseProgress;
use crate::zenith::tags::named;
use crate::zenith::values;
use serde_json::{Map, Value};

pub(super) fn error<T>(code: Code, context: impl Into<String>) -> ParseResult<T> {
    Err(ZenithParseError::new(code, context))
}

/// Short rendering of a wire value for error context
pub(super) fn describe(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() > 64 {
        let head: String = text.chars().take(61).collect();
        format!("{}...", head)
    } else {
        text
    }
}

/// Type tag of a tuple: element 0, which must be a string
pub(super) fn tuple_tag(tuple: &[Value]) -> ParseResult<&str> {
    match tuple.first() {
        None => error(Code::TupleArrayIsZeroLength, ""),
        Some(Value::String(tag)) => Ok(tag),
        Some(other) => error(Code::TupleNodeTypeIsNotString, describe(other)),
    }
}

/// Enter a tuple node and log it, then enforce the configured limits
pub(super) fn enter_tuple_node(
    progress: &mut ParseProgress,
    tag: &str,
    tuple_length: usize,
) -> ParseResult<usize> {
    progress.enter_tuple_node();
    let index = progress.add_parsed_node(tag);

    if progress.depth() > MAX_TUPLE_DEPTH {
        return error(
            Code::TupleDepthLimitExceeded,
            format!("depth {} exceeds {}", progress.depth(), MAX_TUPLE_DEPTH),
        );
    }
    if progress.tuple_node_count() > MAX_TUPLE_NODE_COUNT {
        return error(
            Code::TupleNodeCountLimitExceeded,
            format!(
                "{} nodes exceed {}",
                progress.tuple_node_count(),
                MAX_TUPLE_NODE_COUNT
            ),
        );
    }
    if tuple_length > MAX_TUPLE_LENGTH {
        return error(
            Code::TupleLengthLimitExceeded,
            format!("{} length {} exceeds {}", tag, tuple_length, MAX_TUPLE_LENGTH),
        );
    }

    Ok(index)
}

// === LITERALS ===

pub(super) fn number(value: &Value, context: &str) -> ParseResult<f64> {
    match value.as_f64() {
        Some(number) => Ok(number),
        None => error(
            Code::NumericValueIsNotNumber,
            format!("{} {}", context, describe(value)),
        ),
    }
}

pub(super) fn date(value: &Value, context: &str) -> ParseResult<DateValue> {
    match value {
        Value::String(text) => match values::try_date_to_value(text) {
            Some(date) => Ok(date),
            None => error(Code::DateValueIsNotIso8601, format!("{} \"{}\"", context, text)),
        },
        other => error(
            Code::DateValueIsNotString,
            format!("{} {}", context, describe(other)),
        ),
    }
}

pub(super) fn text<'a>(value: &'a Value, context: &str) -> ParseResult<&'a str> {
    match value {
        Value::String(text) => Ok(text),
        other => error(
            Code::TextValueIsNotString,
            format!("{} {}", context, describe(other)),
        ),
    }
}

pub(super) fn boolean(value: &Value, context: &str) -> ParseResult<bool> {
    match value {
        Value::Bool(flag) => Ok(*flag),
        other => error(
            Code::BooleanValueIsNotBoolean,
            format!("{} {}", context, describe(other)),
        ),
    }
}

pub(super) fn text_contains_as(value: &Value, context: &str) -> ParseResult<TextContainsAsId> {
    match value {
        Value::String(text) => match values::try_text_contains_as_to_id(text) {
            Some(as_id) => Ok(as_id),
            None => error(Code::UnknownTextContainsAs, format!("{} \"{}\"", context, text)),
        },
        other => error(
            Code::TextContainsAsIsNotString,
            format!("{} {}", context, describe(other)),
        ),
    }
}

pub(super) fn ignore_case(value: &Value, context: &str) -> ParseResult<bool> {
    match value {
        Value::Bool(flag) => Ok(*flag),
        other => error(
            Code::TextContainsIgnoreCaseIsNotBoolean,
            format!("{} {}", context, describe(other)),
        ),
    }
}

// === NAMED PARAMETERS ===

/// What a numeric or date named-parameter object selects
#[derive(Debug, PartialEq)]
pub(super) enum NamedTarget<T> {
    At(T),
    Range(Option<T>, Option<T>),
}

/// Named-parameter object, or an ObjectNullity error for `null`
pub(super) fn named_object<'a>(
    value: &'a Value,
    context: &str,
) -> ParseResult<&'a Map<String, Value>> {
    match value {
        Value::Object(object) => Ok(object),
        Value::Null => error(Code::NamedParametersObjectIsNull, context),
        other => error(
            Code::NamedParametersIsNotObject,
            format!("{} {}", context, describe(other)),
        ),
    }
}

/// Key lookup where an explicit `null` counts as absent
fn named_value<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

/// `{At}` selects Equals; `{Min?, Max?}` selects InRange. Unknown keys are ignored.
pub(super) fn named_target<T>(
    object: &Map<String, Value>,
    context: &str,
    convert: impl Fn(&Value, &str) -> ParseResult<T>,
) -> ParseResult<NamedTarget<T>> {
    let at = named_value(object, named::AT);
    let min = named_value(object, named::MIN);
    let max = named_value(object, named::MAX);

    match (at, min, max) {
        (Some(at), None, None) => Ok(NamedTarget::At(convert(at, context)?)),
        (Some(_), _, _) => error(Code::NamedAtCombinedWithRange, context),
        (None, None, None) => error(Code::RangeMinAndMaxBothUndefined, context),
        (None, min, max) => Ok(NamedTarget::Range(
            min.map(|v| convert(v, context)).transpose()?,
            max.map(|v| convert(v, context)).transpose()?,
        )),
    }
}

/// Positional `min, max` pair; `null` means that bound is absent
pub(super) fn positional_range<T>(
    min: &Value,
    max: &Value,
    context: &str,
    convert: impl Fn(&Value, &str) -> ParseResult<T>,
) -> ParseResult<(Option<T>, Option<T>)> {
    if min.is_null() && max.is_null() {
        return error(Code::RangeMinAndMaxBothUndefined, context);
    }

    let bound = |value: &Value| -> ParseResult<Option<T>> {
        if value.is_null() {
            Ok(None)
        } else {
            convert(value, context).map(Some)
        }
    };

    Ok((bound(min)?, bound(max)?))
}

/// `{As?, IgnoreCase?}` text options, defaulting to `None` and `false`
pub(super) fn text_options(value: &Value, context: &str) -> ParseResult<(TextContainsAsId, bool)> {
    let object = named_object(value, context)?;

    let as_id = named_value(object, named::AS)
        .map(|v| text_contains_as(v, context))
        .transpose()?
        .unwrap_or_default();
    let ignore = named_value(object, named::IGNORE_CASE)
        .map(|v| ignore_case(v, context))
        .transpose()?
        .unwrap_or(false);

    Ok((as_id, ignore))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tuple_tag() {
        assert_eq!(tuple_tag(&[json!("And")]).unwrap(), "And");
        assert_eq!(
            tuple_tag(&[]).unwrap_err().code(),
            Code::TupleArrayIsZeroLength
        );
        assert_eq!(
            tuple_tag(&[json!(1)]).unwrap_err().code(),
            Code::TupleNodeTypeIsNotString
        );
    }

    #[test]
    fn test_named_target() {
        let at = json!({"At": 5});
        let target = named_target(at.as_object().unwrap(), "x", number).unwrap();
        assert_eq!(target, NamedTarget::At(5.0));

        let range = json!({"Max": 9, "Other": true});
        let target = named_target(range.as_object().unwrap(), "x", number).unwrap();
        assert_eq!(target, NamedTarget::Range(None, Some(9.0)));

        let mixed = json!({"At": 1, "Min": 0});
        assert_eq!(
            named_target(mixed.as_object().unwrap(), "x", number).unwrap_err().code(),
            Code::NamedAtCombinedWithRange
        );

        let empty = json!({"Min": null});
        assert_eq!(
            named_target(empty.as_object().unwrap(), "x", number).unwrap_err().code(),
            Code::RangeMinAndMaxBothUndefined
        );
    }

    #[test]
    fn test_positional_range() {
        let (min, max) = positional_range(&json!(null), &json!(3), "x", number).unwrap();
        assert_eq!((min, max), (None, Some(3.0)));
        assert_eq!(
            positional_range(&json!(null), &json!(null), "x", number).unwrap_err().code(),
            Code::RangeMinAndMaxBothUndefined
        );
        assert_eq!(
            positional_range(&json!("a"), &json!(null), "x", number).unwrap_err().code(),
            Code::NumericValueIsNotNumber
        );
    }

    #[test]
    fn test_text_options() {
        assert_eq!(
            text_options(&json!({}), "x").unwrap(),
            (TextContainsAsId::None, false)
        );
        assert_eq!(
            text_options(&json!({"As": "Exact", "IgnoreCase": true}), "x").unwrap(),
            (TextContainsAsId::Exact, true)
        );
        assert_eq!(
            text_options(&json!(null), "x").unwrap_err().code(),
            Code::NamedParametersObjectIsNull
        );
        assert_eq!(
            text_options(&json!({"As": "Middle"}), "x").unwrap_err().code(),
            Code::UnknownTextContainsAs
        );
    }

    #[test]
    fn test_date_literal() {
        assert!(date(&json!("2023-01-01"), "x").is_ok());
        assert_eq!(
            date(&json!("yesterday"), "x").unwrap_err().code(),
            Code::DateValueIsNotIso8601
        );
        assert_eq!(
            date(&json!(20230101), "x").unwrap_err().code(),
            Code::DateValueIsNotString
        );
    }
}
