//! Numeric operand and arithmetic tuple parsing

use super::boolean::try_to_expected_boolean_node;
use super::helpers::{describe, enter_tuple_node, error, tuple_tag};
use crate::config::compile_time::parser::MAX_IF_ARMS;
use crate::criteria::{NonEmpty, NumericIfArm, NumericNode, NumericOperand};
use crate::zenith::error::{ParseResult, ZenithParseErrorCode as Code};
use crate::zenith::field_tags;
use crate::zenith::progress::ParseProgress;
use crate::zenith::tags::NumericTag;
use serde_json::Value;

/// Literal, numeric field name, or nested arithmetic tuple
pub(super) fn try_to_numeric_operand(
    value: &Value,
    progress: &mut ParseProgress,
) -> ParseResult<NumericOperand> {
    match value {
        Value::Number(number) => match number.as_f64() {
            Some(number) => Ok(NumericOperand::Number(number)),
            None => error(Code::NumericValueIsNotNumber, number.to_string()),
        },
        Value::String(tag) => match field_tags::try_numeric_to_id(tag) {
            Some(field_id) => Ok(NumericNode::NumericFieldValueGet { field_id }.into()),
            None => error(Code::UnknownNumericField, tag.as_str()),
        },
        Value::Array(tuple) => try_to_expected_numeric_node(tuple, progress).map(Into::into),
        other => error(Code::NumericOperandTypeIsNotValid, describe(other)),
    }
}

fn try_to_expected_numeric_node(
    tuple: &[Value],
    progress: &mut ParseProgress,
) -> ParseResult<NumericNode> {
    let tag = tuple_tag(tuple)?;
    let index = enter_tuple_node(progress, tag, tuple.len())?;

    let node = match NumericTag::parse(tag) {
        Some(numeric_tag) => try_to_numeric_node(numeric_tag, tuple, progress)?,
        None => return error(Code::UnknownNumericTupleNodeType, tag),
    };

    progress.exit_tuple_node(index, node.type_id());
    Ok(node)
}

fn try_to_numeric_node(
    tag: NumericTag,
    tuple: &[Value],
    progress: &mut ParseProgress,
) -> ParseResult<NumericNode> {
    match tag {
        NumericTag::Add
        | NumericTag::Sub
        | NumericTag::Mul
        | NumericTag::Div
        | NumericTag::Mod => {
            let (left, right) = binary_operands(tag, tuple, progress)?;
            Ok(match tag {
                NumericTag::Add => NumericNode::Add { left, right },
                NumericTag::Sub => NumericNode::Sub { left, right },
                NumericTag::Mul => NumericNode::Mul { left, right },
                NumericTag::Div => NumericNode::Div { left, right },
                _ => NumericNode::Mod { left, right },
            })
        }
        NumericTag::Neg | NumericTag::Pos | NumericTag::Abs => {
            if tuple.len() != 2 {
                return error(
                    Code::UnaryArithmeticDoesNotHave1Operand,
                    format!("{} has {}", tag.as_str(), tuple.len() - 1),
                );
            }
            let operand = try_to_numeric_operand(&tuple[1], progress)?;
            Ok(match tag {
                NumericTag::Neg => NumericNode::Neg { operand },
                NumericTag::Pos => NumericNode::Pos { operand },
                _ => NumericNode::Abs { operand },
            })
        }
        NumericTag::If => try_to_numeric_if(tuple, progress),
    }
}

fn binary_operands(
    tag: NumericTag,
    tuple: &[Value],
    progress: &mut ParseProgress,
) -> ParseResult<(NumericOperand, NumericOperand)> {
    if tuple.len() != 3 {
        return error(
            Code::BinaryArithmeticDoesNotHave2Operands,
            format!("{} has {}", tag.as_str(), tuple.len() - 1),
        );
    }
    let left = try_to_numeric_operand(&tuple[1], progress)?;
    let right = try_to_numeric_operand(&tuple[2], progress)?;
    Ok((left, right))
}

/// `[If, c1, v1, ..., cN, vN]`; the last pair is the false arm
fn try_to_numeric_if(tuple: &[Value], progress: &mut ParseProgress) -> ParseResult<NumericNode> {
    let length = tuple.len();
    if length < 5 || (length - 1) % 2 != 0 {
        return error(
            Code::NumericIfTupleHasInvalidLength,
            format!("length {}", length),
        );
    }

    let arm_count = (length - 1) / 2;
    if arm_count > MAX_IF_ARMS {
        return error(
            Code::NumericIfArmLimitExceeded,
            format!("{} arms exceed {}", arm_count, MAX_IF_ARMS),
        );
    }

    let mut arms = Vec::with_capacity(arm_count);
    for pair in tuple[1..].chunks_exact(2) {
        let condition = try_to_expected_boolean_node(&pair[0], progress)?;
        let value = try_to_numeric_operand(&pair[1], progress)?;
        arms.push(NumericIfArm { condition, value });
    }

    // length >= 5 guarantees at least two arms
    let (Some(false_arm), Some(true_arms)) = (arms.pop(), NonEmpty::new(arms)) else {
        return error(Code::NumericIfTupleHasInvalidLength, format!("length {}", length));
    };

    Ok(NumericNode::NumericIf {
        true_arms,
        false_arm: Box::new(false_arm),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{BooleanNode, FieldId};
    use assert_matches::assert_matches;
    use serde_json::json;

    fn operand(value: Value) -> ParseResult<NumericOperand> {
        try_to_numeric_operand(&value, &mut ParseProgress::new())
    }

    #[test]
    fn test_literal_and_field_operands() {
        assert_eq!(operand(json!(2.5)).unwrap(), NumericOperand::Number(2.5));
        assert_eq!(
            operand(json!("VWAP")).unwrap(),
            NumericOperand::from(NumericNode::NumericFieldValueGet {
                field_id: FieldId::Vwap
            })
        );
        assert_eq!(
            operand(json!("Name")).unwrap_err().code(),
            Code::UnknownNumericField
        );
        assert_eq!(
            operand(json!(true)).unwrap_err().code(),
            Code::NumericOperandTypeIsNotValid
        );
    }

    #[test]
    fn test_binary_reads_both_operands() {
        let parsed = operand(json!(["-", "LastPrice", 3])).unwrap();
        assert_eq!(
            parsed,
            NumericOperand::from(NumericNode::Sub {
                left: NumericNode::NumericFieldValueGet {
                    field_id: FieldId::LastPrice
                }
                .into(),
                right: NumericOperand::Number(3.0),
            })
        );
    }

    #[test]
    fn test_arity_errors() {
        assert_eq!(
            operand(json!(["+", 1])).unwrap_err().code(),
            Code::BinaryArithmeticDoesNotHave2Operands
        );
        assert_eq!(
            operand(json!(["Abs", 1, 2])).unwrap_err().code(),
            Code::UnaryArithmeticDoesNotHave1Operand
        );
        assert_eq!(
            operand(json!(["Sqrt", 4])).unwrap_err().code(),
            Code::UnknownNumericTupleNodeType
        );
    }

    #[test]
    fn test_if_shapes() {
        let parsed = operand(json!(["If", ["All"], 1, ["None"], 2])).unwrap();
        assert_matches!(parsed, NumericOperand::Node(node) => {
            assert_matches!(node.as_ref(), NumericNode::NumericIf { true_arms, false_arm } => {
                assert_eq!(true_arms.len(), 1);
                assert_eq!(true_arms[0].condition, BooleanNode::All);
                assert_eq!(false_arm.condition, BooleanNode::None);
                assert_eq!(false_arm.value, NumericOperand::Number(2.0));
            });
        });

        for bad in [
            json!(["If", ["All"], 1]),
            json!(["If", ["All"], 1, ["None"]]),
            json!(["If", ["All"], 1, ["None"], 2, ["All"]]),
        ] {
            assert_eq!(
                operand(bad).unwrap_err().code(),
                Code::NumericIfTupleHasInvalidLength
            );
        }
    }

    #[test]
    fn test_progress_tracks_nested_tuples() {
        let mut progress = ParseProgress::new();
        try_to_numeric_operand(&json!(["Neg", ["+", 1, 2]]), &mut progress).unwrap();

        let tags: Vec<&str> = progress
            .parsed_nodes()
            .iter()
            .map(|node| node.wire_tag.as_str())
            .collect();
        assert_eq!(tags, ["Neg", "+"]);
        assert_eq!(progress.parsed_nodes()[1].node_depth, 2);
        assert_eq!(progress.depth(), 0);
    }
}
