//! Field-matching nodes, dispatched on parameter count
//!
//! Plain fields and subbed fields use different parameter layouts; see the
//! individual functions for the layouts each count accepts.

use super::helpers::{
    boolean, date, describe, error, ignore_case, named_object, named_target, number,
    positional_range, text, text_contains_as, text_options, NamedTarget,
};
use crate::criteria::{
    AltCodeSubFieldId, AttributeSubFieldId, BooleanNode, DateSubFieldId, FieldDataTypeId,
    FieldId, PriceSubFieldId, TextContainsAsId,
};
use crate::zenith::error::{ParseResult, ZenithParseErrorCode as Code};
use crate::zenith::values;
use serde_json::Value;

fn too_many(tag: &str, params: &[Value]) -> ParseResult<BooleanNode> {
    error(
        Code::FieldHasTooManyParameters,
        format!("{} has {} parameters", tag, params.len()),
    )
}

// === PLAIN FIELDS ===

pub(super) fn try_to_plain_field_node(
    field_id: FieldId,
    tag: &str,
    params: &[Value],
) -> ParseResult<BooleanNode> {
    match field_id.data_type_id() {
        FieldDataTypeId::Boolean => boolean_field(field_id, tag, params),
        FieldDataTypeId::Numeric => numeric_field(field_id, tag, params),
        FieldDataTypeId::Date => date_field(field_id, tag, params),
        FieldDataTypeId::Text => text_field(field_id, tag, params),
    }
}

/// `[f]` is shorthand for `[f, true]`; `[f, {At}]` is the named form of `[f, value]`
fn boolean_field(field_id: FieldId, tag: &str, params: &[Value]) -> ParseResult<BooleanNode> {
    let target = match params {
        [] => true,
        [named @ (Value::Object(_) | Value::Null)] => {
            let object = named_object(named, tag)?;
            match named_target(object, tag, boolean)? {
                NamedTarget::At(target) => target,
                NamedTarget::Range(..) => return error(Code::BooleanFieldHasRange, tag),
            }
        }
        [target] => boolean(target, tag)?,
        _ => return too_many(tag, params),
    };
    Ok(BooleanNode::BooleanFieldEquals { field_id, target })
}

/// `[f]`, `[f, value]`, `[f, {At | Min, Max}]` or `[f, min, max]`
fn numeric_field(field_id: FieldId, tag: &str, params: &[Value]) -> ParseResult<BooleanNode> {
    match params {
        [] => Ok(BooleanNode::FieldHasValue { field_id }),
        [Value::Number(_)] => Ok(BooleanNode::NumericFieldEquals {
            field_id,
            target: number(&params[0], tag)?,
        }),
        [named] => {
            let object = named_object(named, tag)?;
            Ok(match named_target(object, tag, number)? {
                NamedTarget::At(target) => BooleanNode::NumericFieldEquals { field_id, target },
                NamedTarget::Range(min, max) => {
                    BooleanNode::NumericFieldInRange { field_id, min, max }
                }
            })
        }
        [min, max] => {
            let (min, max) = positional_range(min, max, tag, number)?;
            Ok(BooleanNode::NumericFieldInRange { field_id, min, max })
        }
        _ => too_many(tag, params),
    }
}

/// `[f]`, `[f, date]`, `[f, {At | Min, Max}]` or `[f, min, max]`
fn date_field(field_id: FieldId, tag: &str, params: &[Value]) -> ParseResult<BooleanNode> {
    match params {
        [] => Ok(BooleanNode::FieldHasValue { field_id }),
        [Value::String(_)] => Ok(BooleanNode::DateFieldEquals {
            field_id,
            target: date(&params[0], tag)?,
        }),
        [named] => {
            let object = named_object(named, tag)?;
            Ok(match named_target(object, tag, date)? {
                NamedTarget::At(target) => BooleanNode::DateFieldEquals { field_id, target },
                NamedTarget::Range(min, max) => BooleanNode::DateFieldInRange { field_id, min, max },
            })
        }
        [min, max] => {
            let (min, max) = positional_range(min, max, tag, date)?;
            Ok(BooleanNode::DateFieldInRange { field_id, min, max })
        }
        _ => too_many(tag, params),
    }
}

/// `[f]`, `[f, value]`, `[f, value, {As, IgnoreCase}]` or `[f, value, as, ignoreCase]`
fn text_field(field_id: FieldId, tag: &str, params: &[Value]) -> ParseResult<BooleanNode> {
    let (value, as_id, ignore) = match params {
        [] => return Ok(BooleanNode::FieldHasValue { field_id }),
        [value] => (text(value, tag)?, Default::default(), false),
        [value, options] => {
            let (as_id, ignore) = text_options(options, tag)?;
            (text(value, tag)?, as_id, ignore)
        }
        [value, as_id, ignore] => (
            text(value, tag)?,
            text_contains_as(as_id, tag)?,
            ignore_case(ignore, tag)?,
        ),
        _ => return too_many(tag, params),
    };

    Ok(BooleanNode::TextFieldContains {
        field_id,
        value: value.to_string(),
        as_id,
        ignore_case: ignore,
    })
}

// === SUBBED FIELDS ===

pub(super) fn try_to_subbed_field_node(
    field_id: FieldId,
    tag: &str,
    params: &[Value],
) -> ParseResult<BooleanNode> {
    match field_id {
        FieldId::Price => price_field(tag, params),
        FieldId::Date => date_sub_field(tag, params),
        FieldId::AltCode => alt_code_field(tag, params),
        FieldId::Attribute => attribute_field(tag, params),
        _ => crate::zenith::internal_error(&format!("{} is not a subbed field", field_id)),
    }
}

/// Sub-field name; must be a string
fn sub_field_name<'a>(value: &'a Value, tag: &str) -> ParseResult<&'a str> {
    match value {
        Value::String(name) => Ok(name),
        other => error(
            Code::SubFieldIsNotString,
            format!("{} {}", tag, describe(other)),
        ),
    }
}

fn price_sub_field(value: &Value, tag: &str) -> ParseResult<PriceSubFieldId> {
    let name = sub_field_name(value, tag)?;
    match values::try_price_sub_field_to_id(name) {
        Some(id) => Ok(id),
        None => error(Code::UnknownPriceSubField, name),
    }
}

fn date_sub_field_id(value: &Value, tag: &str) -> ParseResult<DateSubFieldId> {
    let name = sub_field_name(value, tag)?;
    match values::try_date_sub_field_to_id(name) {
        Some(id) => Ok(id),
        None => error(Code::UnknownDateSubField, name),
    }
}

fn alt_code_sub_field(value: &Value, tag: &str) -> ParseResult<AltCodeSubFieldId> {
    let name = sub_field_name(value, tag)?;
    match values::try_alt_code_sub_field_to_id(name) {
        Some(id) => Ok(id),
        None => error(Code::UnknownAltCodeSubField, name),
    }
}

fn attribute_sub_field(value: &Value, tag: &str) -> ParseResult<AttributeSubFieldId> {
    let name = sub_field_name(value, tag)?;
    match values::try_attribute_sub_field_to_id(name) {
        Some(id) => Ok(id),
        None => error(Code::UnknownAttributeSubField, name),
    }
}

/// Equals or InRange on a numeric sub-field from a single value or named object
fn price_value(
    sub_field_id: PriceSubFieldId,
    value: &Value,
    tag: &str,
) -> ParseResult<BooleanNode> {
    if let Value::Number(_) = value {
        return Ok(BooleanNode::PriceSubFieldEquals {
            sub_field_id,
            target: number(value, tag)?,
        });
    }

    let object = named_object(value, tag)?;
    Ok(match named_target(object, tag, number)? {
        NamedTarget::At(target) => BooleanNode::PriceSubFieldEquals {
            sub_field_id,
            target,
        },
        NamedTarget::Range(min, max) => BooleanNode::PriceSubFieldInRange {
            sub_field_id,
            min,
            max,
        },
    })
}

/// `[Price]`, `[Price, sub | value | named]`, `[Price, sub, value | named]`
/// or `[Price, sub, min, max]`; the default sub-field is `Last`
fn price_field(tag: &str, params: &[Value]) -> ParseResult<BooleanNode> {
    match params {
        [] => Ok(BooleanNode::PriceSubFieldHasValue {
            sub_field_id: PriceSubFieldId::Last,
        }),
        [Value::String(_)] => Ok(BooleanNode::PriceSubFieldHasValue {
            sub_field_id: price_sub_field(&params[0], tag)?,
        }),
        [value] => price_value(PriceSubFieldId::Last, value, tag),
        [sub_field, value] => price_value(price_sub_field(sub_field, tag)?, value, tag),
        [sub_field, min, max] => {
            let sub_field_id = price_sub_field(sub_field, tag)?;
            let (min, max) = positional_range(min, max, tag, number)?;
            Ok(BooleanNode::PriceSubFieldInRange {
                sub_field_id,
                min,
                max,
            })
        }
        _ => too_many(tag, params),
    }
}

fn date_value(sub_field_id: DateSubFieldId, value: &Value, tag: &str) -> ParseResult<BooleanNode> {
    if let Value::String(_) = value {
        return Ok(BooleanNode::DateSubFieldEquals {
            sub_field_id,
            target: date(value, tag)?,
        });
    }

    let object = named_object(value, tag)?;
    Ok(match named_target(object, tag, date)? {
        NamedTarget::At(target) => BooleanNode::DateSubFieldEquals {
            sub_field_id,
            target,
        },
        NamedTarget::Range(min, max) => BooleanNode::DateSubFieldInRange {
            sub_field_id,
            min,
            max,
        },
    })
}

/// Same layouts as `Price`, with dates; the default sub-field is `Dividend`.
/// A lone string is a sub-field name if it names one, else a date.
fn date_sub_field(tag: &str, params: &[Value]) -> ParseResult<BooleanNode> {
    match params {
        [] => Ok(BooleanNode::DateSubFieldHasValue {
            sub_field_id: DateSubFieldId::Dividend,
        }),
        [Value::String(name)] => match values::try_date_sub_field_to_id(name) {
            Some(sub_field_id) => Ok(BooleanNode::DateSubFieldHasValue { sub_field_id }),
            None => date_value(DateSubFieldId::Dividend, &params[0], tag),
        },
        [value] => date_value(DateSubFieldId::Dividend, value, tag),
        [sub_field, value] => date_value(date_sub_field_id(sub_field, tag)?, value, tag),
        [sub_field, min, max] => {
            let sub_field_id = date_sub_field_id(sub_field, tag)?;
            let (min, max) = positional_range(min, max, tag, date)?;
            Ok(BooleanNode::DateSubFieldInRange {
                sub_field_id,
                min,
                max,
            })
        }
        _ => too_many(tag, params),
    }
}

/// Text-contains payload from the parameters following the sub-field
fn contains_payload(
    rest: &[Value],
    tag: &str,
) -> ParseResult<(String, TextContainsAsId, bool)> {
    match rest {
        [value] => Ok((text(value, tag)?.to_string(), Default::default(), false)),
        [value, options] => {
            let (as_id, ignore) = text_options(options, tag)?;
            Ok((text(value, tag)?.to_string(), as_id, ignore))
        }
        [value, as_id, ignore] => Ok((
            text(value, tag)?.to_string(),
            text_contains_as(as_id, tag)?,
            ignore_case(ignore, tag)?,
        )),
        _ => error(
            Code::FieldHasTooManyParameters,
            format!("{} has {} parameters", tag, rest.len() + 1),
        ),
    }
}

/// `[AltCode, sub]`, `[AltCode, sub, value]`, `[AltCode, sub, value, {As, IgnoreCase}]`
/// or `[AltCode, sub, value, as, ignoreCase]`; the sub-field is mandatory
fn alt_code_field(tag: &str, params: &[Value]) -> ParseResult<BooleanNode> {
    let Some((sub_field, rest)) = params.split_first() else {
        return error(Code::SubFieldMissing, tag);
    };
    let sub_field_id = alt_code_sub_field(sub_field, tag)?;

    if rest.is_empty() {
        return Ok(BooleanNode::AltCodeSubFieldHasValue { sub_field_id });
    }

    let (value, as_id, ignore_case) = contains_payload(rest, tag)?;
    Ok(BooleanNode::AltCodeSubFieldContains {
        sub_field_id,
        value,
        as_id,
        ignore_case,
    })
}

/// Same layouts as `AltCode`
fn attribute_field(tag: &str, params: &[Value]) -> ParseResult<BooleanNode> {
    let Some((sub_field, rest)) = params.split_first() else {
        return error(Code::SubFieldMissing, tag);
    };
    let sub_field_id = attribute_sub_field(sub_field, tag)?;

    if rest.is_empty() {
        return Ok(BooleanNode::AttributeSubFieldHasValue { sub_field_id });
    }

    let (value, as_id, ignore_case) = contains_payload(rest, tag)?;
    Ok(BooleanNode::AttributeSubFieldContains {
        sub_field_id,
        value,
        as_id,
        ignore_case,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zenith::error::ZenithParseError;
    use crate::zenith::values::try_date_to_value;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn plain(tag: &str, params: Value) -> ParseResult<BooleanNode> {
        let field_id = crate::zenith::field_tags::try_matching_to_id(tag).unwrap();
        try_to_plain_field_node(field_id, tag, params.as_array().unwrap())
    }

    fn subbed(tag: &str, params: Value) -> ParseResult<BooleanNode> {
        let field_id = crate::zenith::field_tags::try_subbed_to_id(tag).unwrap();
        try_to_subbed_field_node(field_id, tag, params.as_array().unwrap())
    }

    #[test]
    fn test_plain_has_value_and_boolean_shorthand() {
        assert_eq!(
            plain("Name", json!([])).unwrap(),
            BooleanNode::FieldHasValue {
                field_id: FieldId::Name
            }
        );
        assert_eq!(
            plain("IsIndex", json!([])).unwrap(),
            BooleanNode::BooleanFieldEquals {
                field_id: FieldId::IsIndex,
                target: true
            }
        );
        assert_eq!(
            plain("IsIndex", json!([false])).unwrap(),
            BooleanNode::BooleanFieldEquals {
                field_id: FieldId::IsIndex,
                target: false
            }
        );
        assert_eq!(
            plain("IsIndex", json!(["yes"])).unwrap_err().code(),
            Code::BooleanValueIsNotBoolean
        );
    }

    #[test]
    fn test_boolean_named_at() {
        assert_eq!(
            plain("IsIndex", json!([{"At": true}])).unwrap(),
            BooleanNode::BooleanFieldEquals {
                field_id: FieldId::IsIndex,
                target: true
            }
        );
        assert_eq!(
            plain("IsIndex", json!([{"At": false, "Note": 1}])).unwrap(),
            BooleanNode::BooleanFieldEquals {
                field_id: FieldId::IsIndex,
                target: false
            }
        );
        assert_eq!(
            plain("IsIndex", json!([{"At": "true"}])).unwrap_err().code(),
            Code::BooleanValueIsNotBoolean
        );
        assert_eq!(
            plain("IsIndex", json!([{"Min": true}])).unwrap_err().code(),
            Code::BooleanFieldHasRange
        );
        assert_eq!(
            plain("IsIndex", json!([{}])).unwrap_err().code(),
            Code::RangeMinAndMaxBothUndefined
        );
        assert_eq!(
            plain("IsIndex", json!([null])).unwrap_err().code(),
            Code::NamedParametersObjectIsNull
        );
    }

    #[test]
    fn test_numeric_forms() {
        assert_eq!(
            plain("LotSize", json!([100])).unwrap(),
            BooleanNode::NumericFieldEquals {
                field_id: FieldId::LotSize,
                target: 100.0
            }
        );
        assert_eq!(
            plain("LotSize", json!([{"At": 5}])).unwrap(),
            BooleanNode::NumericFieldEquals {
                field_id: FieldId::LotSize,
                target: 5.0
            }
        );
        assert_eq!(
            plain("Volume", json!([{"Min": 1, "Max": 2}])).unwrap(),
            BooleanNode::NumericFieldInRange {
                field_id: FieldId::Volume,
                min: Some(1.0),
                max: Some(2.0)
            }
        );
        assert_eq!(
            plain("Volume", json!([null, 2])).unwrap(),
            BooleanNode::NumericFieldInRange {
                field_id: FieldId::Volume,
                min: None,
                max: Some(2.0)
            }
        );
        assert_matches!(
            plain("Volume", json!([null])),
            Err(ZenithParseError::ObjectNullity { .. })
        );
        assert_matches!(
            plain("Volume", json!(["ten"])),
            Err(ZenithParseError::TypeMismatch { .. })
        );
        assert_matches!(
            plain("Volume", json!([1, 2, 3])),
            Err(ZenithParseError::Arity { .. })
        );
    }

    #[test]
    fn test_date_forms() {
        let expected = try_date_to_value("2023-01-01").unwrap();
        assert_eq!(
            plain("ExpiryDate", json!([{"Min": "2023-01-01"}])).unwrap(),
            BooleanNode::DateFieldInRange {
                field_id: FieldId::ExpiryDate,
                min: Some(expected),
                max: None
            }
        );
        assert_eq!(
            plain("ExpiryDate", json!(["2023-01-01"])).unwrap(),
            BooleanNode::DateFieldEquals {
                field_id: FieldId::ExpiryDate,
                target: expected
            }
        );
        let error = plain("ExpiryDate", json!([{}])).unwrap_err();
        assert_matches!(error, ZenithParseError::Range { .. });
        assert!(error.to_string().contains("range min and max both undefined"));

        assert_matches!(
            plain("ExpiryDate", json!(["31/12/2023"])),
            Err(ZenithParseError::Format { .. })
        );
    }

    #[test]
    fn test_text_forms() {
        assert_eq!(
            plain("Code", json!(["ABC", "FromStart", true])).unwrap(),
            BooleanNode::TextFieldContains {
                field_id: FieldId::Code,
                value: "ABC".to_string(),
                as_id: TextContainsAsId::FromStart,
                ignore_case: true
            }
        );
        assert_eq!(
            plain("Name", json!(["BHP", {"As": "Exact"}])).unwrap(),
            BooleanNode::TextFieldContains {
                field_id: FieldId::Name,
                value: "BHP".to_string(),
                as_id: TextContainsAsId::Exact,
                ignore_case: false
            }
        );
        assert_eq!(
            plain("Name", json!(["BHP"])).unwrap(),
            BooleanNode::TextFieldContains {
                field_id: FieldId::Name,
                value: "BHP".to_string(),
                as_id: TextContainsAsId::None,
                ignore_case: false
            }
        );
        assert_matches!(
            plain("Name", json!(["BHP", null])),
            Err(ZenithParseError::ObjectNullity { .. })
        );
        assert_matches!(
            plain("Name", json!(["a", "None", false, 1])),
            Err(ZenithParseError::Arity { .. })
        );
    }

    #[test]
    fn test_price_forms() {
        assert_eq!(
            subbed("Price", json!(["Last", 5])).unwrap(),
            BooleanNode::PriceSubFieldEquals {
                sub_field_id: PriceSubFieldId::Last,
                target: 5.0
            }
        );
        assert_eq!(
            subbed("Price", json!([])).unwrap(),
            BooleanNode::PriceSubFieldHasValue {
                sub_field_id: PriceSubFieldId::Last
            }
        );
        assert_eq!(
            subbed("Price", json!([{"Max": 3}])).unwrap(),
            BooleanNode::PriceSubFieldInRange {
                sub_field_id: PriceSubFieldId::Last,
                min: None,
                max: Some(3.0)
            }
        );
        assert_eq!(
            subbed("Price", json!(["Last", 1, null])).unwrap(),
            BooleanNode::PriceSubFieldInRange {
                sub_field_id: PriceSubFieldId::Last,
                min: Some(1.0),
                max: None
            }
        );
        assert_eq!(
            subbed("Price", json!(["Bid", 5])).unwrap_err().code(),
            Code::UnknownPriceSubField
        );
    }

    #[test]
    fn test_date_sub_field_forms() {
        assert_eq!(
            subbed("Date", json!(["Dividend"])).unwrap(),
            BooleanNode::DateSubFieldHasValue {
                sub_field_id: DateSubFieldId::Dividend
            }
        );
        assert_eq!(
            subbed("Date", json!(["2024-03-01"])).unwrap(),
            BooleanNode::DateSubFieldEquals {
                sub_field_id: DateSubFieldId::Dividend,
                target: try_date_to_value("2024-03-01").unwrap()
            }
        );
        assert_matches!(
            subbed("Date", json!(["Dividend", {"At": "2024-03-01", "Max": "2024-04-01"}])),
            Err(ZenithParseError::Range { .. })
        );
    }

    #[test]
    fn test_alt_code_and_attribute_forms() {
        assert_eq!(
            subbed("AltCode", json!(["RIC"])).unwrap(),
            BooleanNode::AltCodeSubFieldHasValue {
                sub_field_id: AltCodeSubFieldId::Ric
            }
        );
        assert_eq!(
            subbed("AltCode", json!(["ISIN", "AU000", {"As": "FromStart", "IgnoreCase": true}]))
                .unwrap(),
            BooleanNode::AltCodeSubFieldContains {
                sub_field_id: AltCodeSubFieldId::Isin,
                value: "AU000".to_string(),
                as_id: TextContainsAsId::FromStart,
                ignore_case: true
            }
        );
        assert_eq!(
            subbed("Attribute", json!(["Sector", "Mining", "Exact", false])).unwrap(),
            BooleanNode::AttributeSubFieldContains {
                sub_field_id: AttributeSubFieldId::Sector,
                value: "Mining".to_string(),
                as_id: TextContainsAsId::Exact,
                ignore_case: false
            }
        );
        assert_eq!(
            subbed("AltCode", json!([])).unwrap_err().code(),
            Code::SubFieldMissing
        );
        assert_eq!(
            subbed("Attribute", json!([7])).unwrap_err().code(),
            Code::SubFieldIsNotString
        );
        assert_eq!(
            subbed("Attribute", json!(["Colour", "Red"])).unwrap_err().code(),
            Code::UnknownAttributeSubField
        );
        assert_matches!(
            subbed("AltCode", json!(["Ticker", "A", "None", false, 1])),
            Err(ZenithParseError::Arity { .. })
        );
    }
}
