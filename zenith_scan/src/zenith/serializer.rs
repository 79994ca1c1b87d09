//! Criteria tree to wire tuple serializer
//!
//! Total over every constructible tree. Field lookups go through the `*_from_id`
//! tables, so a node naming a field of the wrong category is an internal error.

use super::field_tags;
use super::tags::{named, BooleanTag, NumericTag};
use super::values;
use crate::criteria::{
    BooleanNode, DateValue, FieldId, NumericNode, NumericOperand, TextContainsAsId,
};
use crate::logging::codes;
use serde_json::{json, Map, Number, Value};

pub fn from_boolean_node(node: &BooleanNode) -> Value {
    match node {
        BooleanNode::And { operands } => logical(BooleanTag::And, operands),
        BooleanNode::Or { operands } => logical(BooleanTag::Or, operands),
        BooleanNode::Not { operand } => json!([BooleanTag::Not.as_str(), from_boolean_node(operand)]),
        BooleanNode::All => json!([BooleanTag::All.as_str()]),
        BooleanNode::None => json!([BooleanTag::None.as_str()]),

        BooleanNode::NumericEquals { left, right } => comparison(BooleanTag::Equals, left, right),
        BooleanNode::NumericGreaterThan { left, right } => {
            comparison(BooleanTag::GreaterThan, left, right)
        }
        BooleanNode::NumericGreaterThanOrEqual { left, right } => {
            comparison(BooleanTag::GreaterThanOrEqual, left, right)
        }
        BooleanNode::NumericLessThan { left, right } => comparison(BooleanTag::LessThan, left, right),
        BooleanNode::NumericLessThanOrEqual { left, right } => {
            comparison(BooleanTag::LessThanOrEqual, left, right)
        }

        BooleanNode::FieldHasValue { field_id } => json!([field_tags::matching_from_id(*field_id)]),
        BooleanNode::BooleanFieldEquals { field_id, target } => {
            json!([field_tags::boolean_from_id(*field_id), target])
        }
        BooleanNode::NumericFieldEquals { field_id, target } => {
            json!([field_tags::numeric_from_id(*field_id), number(*target)])
        }
        BooleanNode::NumericFieldInRange { field_id, min, max } => json!([
            field_tags::numeric_from_id(*field_id),
            range(min.map(number), max.map(number))
        ]),
        BooleanNode::DateFieldEquals { field_id, target } => {
            json!([field_tags::date_from_id(*field_id), date(target)])
        }
        BooleanNode::DateFieldInRange { field_id, min, max } => json!([
            field_tags::date_from_id(*field_id),
            range(min.as_ref().map(date), max.as_ref().map(date))
        ]),
        BooleanNode::TextFieldContains {
            field_id,
            value,
            as_id,
            ignore_case,
        } => json!([
            field_tags::text_from_id(*field_id),
            value,
            text_options(*as_id, *ignore_case)
        ]),

        BooleanNode::PriceSubFieldHasValue { sub_field_id } => json!([
            field_tags::subbed_from_id(FieldId::Price),
            values::price_sub_field_from_id(*sub_field_id)
        ]),
        BooleanNode::PriceSubFieldEquals {
            sub_field_id,
            target,
        } => json!([
            field_tags::subbed_from_id(FieldId::Price),
            values::price_sub_field_from_id(*sub_field_id),
            number(*target)
        ]),
        BooleanNode::PriceSubFieldInRange {
            sub_field_id,
            min,
            max,
        } => json!([
            field_tags::subbed_from_id(FieldId::Price),
            values::price_sub_field_from_id(*sub_field_id),
            range(min.map(number), max.map(number))
        ]),
        BooleanNode::DateSubFieldHasValue { sub_field_id } => json!([
            field_tags::subbed_from_id(FieldId::Date),
            values::date_sub_field_from_id(*sub_field_id)
        ]),
        BooleanNode::DateSubFieldEquals {
            sub_field_id,
            target,
        } => json!([
            field_tags::subbed_from_id(FieldId::Date),
            values::date_sub_field_from_id(*sub_field_id),
            date(target)
        ]),
        BooleanNode::DateSubFieldInRange {
            sub_field_id,
            min,
            max,
        } => json!([
            field_tags::subbed_from_id(FieldId::Date),
            values::date_sub_field_from_id(*sub_field_id),
            range(min.as_ref().map(date), max.as_ref().map(date))
        ]),
        BooleanNode::AltCodeSubFieldHasValue { sub_field_id } => json!([
            field_tags::subbed_from_id(FieldId::AltCode),
            values::alt_code_sub_field_from_id(*sub_field_id)
        ]),
        BooleanNode::AltCodeSubFieldContains {
            sub_field_id,
            value,
            as_id,
            ignore_case,
        } => json!([
            field_tags::subbed_from_id(FieldId::AltCode),
            values::alt_code_sub_field_from_id(*sub_field_id),
            value,
            text_options(*as_id, *ignore_case)
        ]),
        BooleanNode::AttributeSubFieldHasValue { sub_field_id } => json!([
            field_tags::subbed_from_id(FieldId::Attribute),
            values::attribute_sub_field_from_id(*sub_field_id)
        ]),
        BooleanNode::AttributeSubFieldContains {
            sub_field_id,
            value,
            as_id,
            ignore_case,
        } => json!([
            field_tags::subbed_from_id(FieldId::Attribute),
            values::attribute_sub_field_from_id(*sub_field_id),
            value,
            text_options(*as_id, *ignore_case)
        ]),
    }
}

/// Literal passthrough, or a nested arithmetic tuple
pub fn from_numeric_operand(operand: &NumericOperand) -> Value {
    match operand {
        NumericOperand::Number(value) => number(*value),
        NumericOperand::Node(node) => from_numeric_node(node),
    }
}

/// Field reads serialize as the bare field tag; everything else is a tuple
pub fn from_numeric_node(node: &NumericNode) -> Value {
    match node {
        NumericNode::Add { left, right } => binary(NumericTag::Add, left, right),
        NumericNode::Sub { left, right } => binary(NumericTag::Sub, left, right),
        NumericNode::Mul { left, right } => binary(NumericTag::Mul, left, right),
        NumericNode::Div { left, right } => binary(NumericTag::Div, left, right),
        NumericNode::Mod { left, right } => binary(NumericTag::Mod, left, right),
        NumericNode::Neg { operand } => unary(NumericTag::Neg, operand),
        NumericNode::Pos { operand } => unary(NumericTag::Pos, operand),
        NumericNode::Abs { operand } => unary(NumericTag::Abs, operand),
        NumericNode::NumericFieldValueGet { field_id } => {
            Value::String(field_tags::numeric_from_id(*field_id).to_string())
        }
        NumericNode::NumericIf {
            true_arms,
            false_arm,
        } => {
            let mut tuple = Vec::with_capacity(3 + 2 * true_arms.len());
            tuple.push(Value::from(NumericTag::If.as_str()));
            for arm in true_arms.iter().chain(std::iter::once(false_arm.as_ref())) {
                tuple.push(from_boolean_node(&arm.condition));
                tuple.push(from_numeric_operand(&arm.value));
            }
            Value::Array(tuple)
        }
    }
}

fn logical(tag: BooleanTag, operands: &[BooleanNode]) -> Value {
    let mut tuple = Vec::with_capacity(operands.len() + 1);
    tuple.push(Value::from(tag.as_str()));
    tuple.extend(operands.iter().map(from_boolean_node));
    Value::Array(tuple)
}

fn comparison(tag: BooleanTag, left: &NumericOperand, right: &NumericOperand) -> Value {
    json!([tag.as_str(), from_numeric_operand(left), from_numeric_operand(right)])
}

fn binary(tag: NumericTag, left: &NumericOperand, right: &NumericOperand) -> Value {
    json!([tag.as_str(), from_numeric_operand(left), from_numeric_operand(right)])
}

fn unary(tag: NumericTag, operand: &NumericOperand) -> Value {
    json!([tag.as_str(), from_numeric_operand(operand)])
}

/// JSON number, or `null` for NaN and infinities
fn number(value: f64) -> Value {
    match Number::from_f64(value) {
        Some(number) => Value::Number(number),
        None => {
            crate::log_warning!(
                code = codes::serialize::NON_FINITE_LITERAL,
                "Non-finite numeric literal serialized as null",
                "value" => value
            );
            Value::Null
        }
    }
}

fn date(value: &DateValue) -> Value {
    Value::String(values::date_from_value(value))
}

/// `{Min?, Max?}` with absent bounds omitted
fn range(min: Option<Value>, max: Option<Value>) -> Value {
    let mut object = Map::new();
    if let Some(min) = min {
        object.insert(named::MIN.to_string(), min);
    }
    if let Some(max) = max {
        object.insert(named::MAX.to_string(), max);
    }
    Value::Object(object)
}

fn text_options(as_id: TextContainsAsId, ignore_case: bool) -> Value {
    let mut object = Map::new();
    object.insert(
        named::AS.to_string(),
        Value::from(values::text_contains_as_from_id(as_id)),
    );
    object.insert(named::IGNORE_CASE.to_string(), Value::Bool(ignore_case));
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{AltCodeSubFieldId, NonEmpty, NumericIfArm, PriceSubFieldId};

    fn field(field_id: FieldId) -> NumericOperand {
        NumericNode::NumericFieldValueGet { field_id }.into()
    }

    #[test]
    fn test_comparison_serializes_both_operands() {
        let node = BooleanNode::NumericGreaterThan {
            left: field(FieldId::LastPrice),
            right: NumericOperand::Number(10.5),
        };
        assert_eq!(from_boolean_node(&node), json!([">", "LastPrice", 10.5]));
    }

    #[test]
    fn test_numeric_if_is_flat() {
        let arm = |condition, value: f64| NumericIfArm {
            condition,
            value: value.into(),
        };
        let node = NumericNode::NumericIf {
            true_arms: NonEmpty::from_first(
                arm(BooleanNode::All, 1.0),
                [arm(BooleanNode::None, 2.0)],
            ),
            false_arm: Box::new(arm(BooleanNode::All, 3.0)),
        };
        let tuple = from_numeric_node(&node);
        assert_eq!(
            tuple,
            json!(["If", ["All"], 1.0, ["None"], 2.0, ["All"], 3.0])
        );
        assert_eq!(tuple.as_array().map(Vec::len), Some(7));
    }

    #[test]
    fn test_range_omits_absent_bounds() {
        let node = BooleanNode::NumericFieldInRange {
            field_id: FieldId::Volume,
            min: None,
            max: Some(100.0),
        };
        assert_eq!(from_boolean_node(&node), json!(["Volume", {"Max": 100.0}]));
    }

    #[test]
    fn test_text_options_always_written() {
        let node = BooleanNode::AltCodeSubFieldContains {
            sub_field_id: AltCodeSubFieldId::Ticker,
            value: "BHP".to_string(),
            as_id: TextContainsAsId::None,
            ignore_case: false,
        };
        assert_eq!(
            from_boolean_node(&node),
            json!(["AltCode", "Ticker", "BHP", {"As": "None", "IgnoreCase": false}])
        );
    }

    #[test]
    fn test_subbed_and_dates() {
        let node = BooleanNode::PriceSubFieldEquals {
            sub_field_id: PriceSubFieldId::Last,
            target: 5.0,
        };
        assert_eq!(from_boolean_node(&node), json!(["Price", "Last", 5.0]));

        let target = values::try_date_to_value("2023-01-01").unwrap();
        let node = BooleanNode::DateFieldEquals {
            field_id: FieldId::ExpiryDate,
            target,
        };
        assert_eq!(
            from_boolean_node(&node),
            json!(["ExpiryDate", "2023-01-01T00:00:00Z"])
        );
    }

    #[test]
    fn test_non_finite_literal_becomes_null() {
        let node = BooleanNode::NumericFieldEquals {
            field_id: FieldId::Trades,
            target: f64::NAN,
        };
        assert_eq!(from_boolean_node(&node), json!(["Trades", null]));
    }

    #[test]
    #[should_panic(expected = "is not a numeric field")]
    fn test_out_of_category_field_panics() {
        from_boolean_node(&BooleanNode::NumericFieldEquals {
            field_id: FieldId::Name,
            target: 1.0,
        });
    }
}
