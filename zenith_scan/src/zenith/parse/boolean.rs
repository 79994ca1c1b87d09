//! Boolean tuple dispatch: combinators, comparisons, constants and fields

use super::field::{try_to_plain_field_node, try_to_subbed_field_node};
use super::helpers::{describe, enter_tuple_node, error, tuple_tag};
use super::numeric::try_to_numeric_operand;
use crate::criteria::{BooleanNode, NonEmpty};
use crate::zenith::error::{ParseResult, ZenithParseErrorCode as Code};
use crate::zenith::field_tags;
use crate::zenith::progress::ParseProgress;
use crate::zenith::tags::BooleanTag;
use serde_json::Value;

/// Validate tuple shape, then parse it as a boolean node
pub(crate) fn try_to_expected_boolean_node(
    value: &Value,
    progress: &mut ParseProgress,
) -> ParseResult<BooleanNode> {
    let tuple = match value {
        Value::Array(tuple) => tuple.as_slice(),
        other => return error(Code::BooleanTupleNotAnArray, describe(other)),
    };
    let tag = tuple_tag(tuple)?;
    let index = enter_tuple_node(progress, tag, tuple.len())?;

    let node = try_to_boolean_node(tag, tuple, progress)?;

    progress.exit_tuple_node(index, node.type_id());
    Ok(node)
}

fn try_to_boolean_node(
    tag: &str,
    tuple: &[Value],
    progress: &mut ParseProgress,
) -> ParseResult<BooleanNode> {
    let params = &tuple[1..];

    let Some(boolean_tag) = BooleanTag::parse(tag) else {
        return try_to_field_boolean_node(tag, params);
    };

    match boolean_tag {
        BooleanTag::And => Ok(BooleanNode::And {
            operands: logical_operands(tag, params, progress)?,
        }),
        BooleanTag::Or => Ok(BooleanNode::Or {
            operands: logical_operands(tag, params, progress)?,
        }),
        BooleanTag::Not => match params {
            [] => error(Code::LogicalBooleanMissingOperands, tag),
            [operand] => Ok(BooleanNode::Not {
                operand: Box::new(try_to_expected_boolean_node(operand, progress)?),
            }),
            _ => error(
                Code::LogicalNotHasMoreThanOneOperand,
                format!("{} operands", params.len()),
            ),
        },
        BooleanTag::Equals
        | BooleanTag::GreaterThan
        | BooleanTag::GreaterThanOrEqual
        | BooleanTag::LessThan
        | BooleanTag::LessThanOrEqual => {
            let [left, right] = params else {
                return error(
                    Code::NumericComparisonDoesNotHave2Operands,
                    format!("{} has {}", tag, params.len()),
                );
            };
            let left = try_to_numeric_operand(left, progress)?;
            let right = try_to_numeric_operand(right, progress)?;

            Ok(match boolean_tag {
                BooleanTag::Equals => BooleanNode::NumericEquals { left, right },
                BooleanTag::GreaterThan => BooleanNode::NumericGreaterThan { left, right },
                BooleanTag::GreaterThanOrEqual => {
                    BooleanNode::NumericGreaterThanOrEqual { left, right }
                }
                BooleanTag::LessThan => BooleanNode::NumericLessThan { left, right },
                _ => BooleanNode::NumericLessThanOrEqual { left, right },
            })
        }
        BooleanTag::All | BooleanTag::None => {
            if !params.is_empty() {
                return error(
                    Code::ConstantBooleanHasParameters,
                    format!("{} has {}", tag, params.len()),
                );
            }
            Ok(match boolean_tag {
                BooleanTag::All => BooleanNode::All,
                _ => BooleanNode::None,
            })
        }
    }
}

fn logical_operands(
    tag: &str,
    params: &[Value],
    progress: &mut ParseProgress,
) -> ParseResult<NonEmpty<BooleanNode>> {
    let operands = params
        .iter()
        .map(|operand| try_to_expected_boolean_node(operand, progress))
        .collect::<ParseResult<Vec<_>>>()?;
    match NonEmpty::new(operands) {
        Some(operands) => Ok(operands),
        None => error(Code::LogicalBooleanMissingOperands, tag),
    }
}

/// Plain fields first, then subbed fields; anything else is an unknown tag
fn try_to_field_boolean_node(tag: &str, params: &[Value]) -> ParseResult<BooleanNode> {
    if let Some(field_id) = field_tags::try_matching_to_id(tag) {
        try_to_plain_field_node(field_id, tag, params)
    } else if let Some(field_id) = field_tags::try_subbed_to_id(tag) {
        try_to_subbed_field_node(field_id, tag, params)
    } else {
        error(Code::UnknownBooleanTupleNodeType, tag)
    }
}
