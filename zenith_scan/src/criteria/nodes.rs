//! Scan-criteria expression tree
//!
//! Boolean predicates and numeric expressions over instrument fields. Nodes are
//! plain owned values: a tree is never shared and never cyclic.

use super::field::{AltCodeSubFieldId, AttributeSubFieldId, DateSubFieldId, FieldId, PriceSubFieldId};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;

/// Offset-aware date used by date predicates
pub type DateValue = DateTime<FixedOffset>;

// === NODE TYPE IDS ===

/// Discriminant of every boolean and numeric node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeTypeId {
    And,
    Or,
    Not,
    All,
    None,
    NumericEquals,
    NumericGreaterThan,
    NumericGreaterThanOrEqual,
    NumericLessThan,
    NumericLessThanOrEqual,
    FieldHasValue,
    BooleanFieldEquals,
    NumericFieldEquals,
    NumericFieldInRange,
    DateFieldEquals,
    DateFieldInRange,
    TextFieldContains,
    PriceSubFieldHasValue,
    PriceSubFieldEquals,
    PriceSubFieldInRange,
    DateSubFieldHasValue,
    DateSubFieldEquals,
    DateSubFieldInRange,
    AltCodeSubFieldHasValue,
    AltCodeSubFieldContains,
    AttributeSubFieldHasValue,
    AttributeSubFieldContains,
    NumericAdd,
    NumericSub,
    NumericMul,
    NumericDiv,
    NumericMod,
    NumericNeg,
    NumericPos,
    NumericAbs,
    NumericFieldValueGet,
    NumericIf,
}

impl NodeTypeId {
    pub const ALL: [NodeTypeId; 37] = [
        Self::And,
        Self::Or,
        Self::Not,
        Self::All,
        Self::None,
        Self::NumericEquals,
        Self::NumericGreaterThan,
        Self::NumericGreaterThanOrEqual,
        Self::NumericLessThan,
        Self::NumericLessThanOrEqual,
        Self::FieldHasValue,
        Self::BooleanFieldEquals,
        Self::NumericFieldEquals,
        Self::NumericFieldInRange,
        Self::DateFieldEquals,
        Self::DateFieldInRange,
        Self::TextFieldContains,
        Self::PriceSubFieldHasValue,
        Self::PriceSubFieldEquals,
        Self::PriceSubFieldInRange,
        Self::DateSubFieldHasValue,
        Self::DateSubFieldEquals,
        Self::DateSubFieldInRange,
        Self::AltCodeSubFieldHasValue,
        Self::AltCodeSubFieldContains,
        Self::AttributeSubFieldHasValue,
        Self::AttributeSubFieldContains,
        Self::NumericAdd,
        Self::NumericSub,
        Self::NumericMul,
        Self::NumericDiv,
        Self::NumericMod,
        Self::NumericNeg,
        Self::NumericPos,
        Self::NumericAbs,
        Self::NumericFieldValueGet,
        Self::NumericIf,
    ];

    /// True for node kinds that evaluate to a number
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::NumericAdd
                | Self::NumericSub
                | Self::NumericMul
                | Self::NumericDiv
                | Self::NumericMod
                | Self::NumericNeg
                | Self::NumericPos
                | Self::NumericAbs
                | Self::NumericFieldValueGet
                | Self::NumericIf
        )
    }
}

impl fmt::Display for NodeTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// === TEXT MATCHING ===

/// Where a text-contains predicate anchors its match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextContainsAsId {
    #[default]
    None,
    FromStart,
    FromEnd,
    Exact,
}

// === NON-EMPTY LISTS ===

/// Owned list holding at least one element
///
/// Used for combinator operands and `If` arms, whose wire forms have no
/// encoding for an empty list.
#[derive(Debug, Clone, PartialEq)]
pub struct NonEmpty<T>(Vec<T>);

impl<T> NonEmpty<T> {
    /// `None` when `items` is empty
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self(items))
        }
    }

    pub fn from_first(first: T, rest: impl IntoIterator<Item = T>) -> Self {
        let mut items = vec![first];
        items.extend(rest);
        Self(items)
    }

    pub fn first(&self) -> &T {
        &self.0[0]
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Deref for NonEmpty<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> From<T> for NonEmpty<T> {
    fn from(item: T) -> Self {
        Self(vec![item])
    }
}

impl<T: Serialize> Serialize for NonEmpty<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NonEmpty<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Self::new(items)
            .ok_or_else(|| serde::de::Error::invalid_length(0, &"at least one element"))
    }
}

// === BOOLEAN NODES ===

/// Boolean predicate node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "typeId")]
pub enum BooleanNode {
    And {
        operands: NonEmpty<BooleanNode>,
    },
    Or {
        operands: NonEmpty<BooleanNode>,
    },
    Not {
        operand: Box<BooleanNode>,
    },
    All,
    None,

    NumericEquals {
        left: NumericOperand,
        right: NumericOperand,
    },
    NumericGreaterThan {
        left: NumericOperand,
        right: NumericOperand,
    },
    NumericGreaterThanOrEqual {
        left: NumericOperand,
        right: NumericOperand,
    },
    NumericLessThan {
        left: NumericOperand,
        right: NumericOperand,
    },
    NumericLessThanOrEqual {
        left: NumericOperand,
        right: NumericOperand,
    },

    FieldHasValue {
        field_id: FieldId,
    },
    BooleanFieldEquals {
        field_id: FieldId,
        target: bool,
    },
    NumericFieldEquals {
        field_id: FieldId,
        target: f64,
    },
    NumericFieldInRange {
        field_id: FieldId,
        min: Option<f64>,
        max: Option<f64>,
    },
    DateFieldEquals {
        field_id: FieldId,
        target: DateValue,
    },
    DateFieldInRange {
        field_id: FieldId,
        min: Option<DateValue>,
        max: Option<DateValue>,
    },
    TextFieldContains {
        field_id: FieldId,
        value: String,
        as_id: TextContainsAsId,
        ignore_case: bool,
    },

    PriceSubFieldHasValue {
        sub_field_id: PriceSubFieldId,
    },
    PriceSubFieldEquals {
        sub_field_id: PriceSubFieldId,
        target: f64,
    },
    PriceSubFieldInRange {
        sub_field_id: PriceSubFieldId,
        min: Option<f64>,
        max: Option<f64>,
    },
    DateSubFieldHasValue {
        sub_field_id: DateSubFieldId,
    },
    DateSubFieldEquals {
        sub_field_id: DateSubFieldId,
        target: DateValue,
    },
    DateSubFieldInRange {
        sub_field_id: DateSubFieldId,
        min: Option<DateValue>,
        max: Option<DateValue>,
    },
    AltCodeSubFieldHasValue {
        sub_field_id: AltCodeSubFieldId,
    },
    AltCodeSubFieldContains {
        sub_field_id: AltCodeSubFieldId,
        value: String,
        as_id: TextContainsAsId,
        ignore_case: bool,
    },
    AttributeSubFieldHasValue {
        sub_field_id: AttributeSubFieldId,
    },
    AttributeSubFieldContains {
        sub_field_id: AttributeSubFieldId,
        value: String,
        as_id: TextContainsAsId,
        ignore_case: bool,
    },
}

impl BooleanNode {
    pub fn type_id(&self) -> NodeTypeId {
        match self {
            Self::And { .. } => NodeTypeId::And,
            Self::Or { .. } => NodeTypeId::Or,
            Self::Not { .. } => NodeTypeId::Not,
            Self::All => NodeTypeId::All,
            Self::None => NodeTypeId::None,
            Self::NumericEquals { .. } => NodeTypeId::NumericEquals,
            Self::NumericGreaterThan { .. } => NodeTypeId::NumericGreaterThan,
            Self::NumericGreaterThanOrEqual { .. } => NodeTypeId::NumericGreaterThanOrEqual,
            Self::NumericLessThan { .. } => NodeTypeId::NumericLessThan,
            Self::NumericLessThanOrEqual { .. } => NodeTypeId::NumericLessThanOrEqual,
            Self::FieldHasValue { .. } => NodeTypeId::FieldHasValue,
            Self::BooleanFieldEquals { .. } => NodeTypeId::BooleanFieldEquals,
            Self::NumericFieldEquals { .. } => NodeTypeId::NumericFieldEquals,
            Self::NumericFieldInRange { .. } => NodeTypeId::NumericFieldInRange,
            Self::DateFieldEquals { .. } => NodeTypeId::DateFieldEquals,
            Self::DateFieldInRange { .. } => NodeTypeId::DateFieldInRange,
            Self::TextFieldContains { .. } => NodeTypeId::TextFieldContains,
            Self::PriceSubFieldHasValue { .. } => NodeTypeId::PriceSubFieldHasValue,
            Self::PriceSubFieldEquals { .. } => NodeTypeId::PriceSubFieldEquals,
            Self::PriceSubFieldInRange { .. } => NodeTypeId::PriceSubFieldInRange,
            Self::DateSubFieldHasValue { .. } => NodeTypeId::DateSubFieldHasValue,
            Self::DateSubFieldEquals { .. } => NodeTypeId::DateSubFieldEquals,
            Self::DateSubFieldInRange { .. } => NodeTypeId::DateSubFieldInRange,
            Self::AltCodeSubFieldHasValue { .. } => NodeTypeId::AltCodeSubFieldHasValue,
            Self::AltCodeSubFieldContains { .. } => NodeTypeId::AltCodeSubFieldContains,
            Self::AttributeSubFieldHasValue { .. } => NodeTypeId::AttributeSubFieldHasValue,
            Self::AttributeSubFieldContains { .. } => NodeTypeId::AttributeSubFieldContains,
        }
    }

    /// Number of nodes in this tree, numeric sub-expressions included
    pub fn node_count(&self) -> usize {
        1 + match self {
            Self::And { operands } | Self::Or { operands } => {
                operands.iter().map(BooleanNode::node_count).sum()
            }
            Self::Not { operand } => operand.node_count(),
            Self::NumericEquals { left, right }
            | Self::NumericGreaterThan { left, right }
            | Self::NumericGreaterThanOrEqual { left, right }
            | Self::NumericLessThan { left, right }
            | Self::NumericLessThanOrEqual { left, right } => {
                left.node_count() + right.node_count()
            }
            _ => 0,
        }
    }
}

// === NUMERIC NODES ===

/// A numeric position: either a literal or a nested expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericOperand {
    Number(f64),
    Node(Box<NumericNode>),
}

impl NumericOperand {
    fn node_count(&self) -> usize {
        match self {
            Self::Number(_) => 0,
            Self::Node(node) => node.node_count(),
        }
    }
}

impl From<f64> for NumericOperand {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<NumericNode> for NumericOperand {
    fn from(node: NumericNode) -> Self {
        Self::Node(Box::new(node))
    }
}

/// One condition/value pair of a `NumericIf`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericIfArm {
    pub condition: BooleanNode,
    pub value: NumericOperand,
}

/// Numeric expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "typeId")]
pub enum NumericNode {
    Add {
        left: NumericOperand,
        right: NumericOperand,
    },
    Sub {
        left: NumericOperand,
        right: NumericOperand,
    },
    Mul {
        left: NumericOperand,
        right: NumericOperand,
    },
    Div {
        left: NumericOperand,
        right: NumericOperand,
    },
    Mod {
        left: NumericOperand,
        right: NumericOperand,
    },
    Neg {
        operand: NumericOperand,
    },
    Pos {
        operand: NumericOperand,
    },
    Abs {
        operand: NumericOperand,
    },
    NumericFieldValueGet {
        field_id: FieldId,
    },
    /// The false arm's condition is carried for round-tripping only; it is never evaluated
    NumericIf {
        true_arms: NonEmpty<NumericIfArm>,
        false_arm: Box<NumericIfArm>,
    },
}

impl NumericNode {
    pub fn type_id(&self) -> NodeTypeId {
        match self {
            Self::Add { .. } => NodeTypeId::NumericAdd,
            Self::Sub { .. } => NodeTypeId::NumericSub,
            Self::Mul { .. } => NodeTypeId::NumericMul,
            Self::Div { .. } => NodeTypeId::NumericDiv,
            Self::Mod { .. } => NodeTypeId::NumericMod,
            Self::Neg { .. } => NodeTypeId::NumericNeg,
            Self::Pos { .. } => NodeTypeId::NumericPos,
            Self::Abs { .. } => NodeTypeId::NumericAbs,
            Self::NumericFieldValueGet { .. } => NodeTypeId::NumericFieldValueGet,
            Self::NumericIf { .. } => NodeTypeId::NumericIf,
        }
    }

    fn node_count(&self) -> usize {
        1 + match self {
            Self::Add { left, right }
            | Self::Sub { left, right }
            | Self::Mul { left, right }
            | Self::Div { left, right }
            | Self::Mod { left, right } => left.node_count() + right.node_count(),
            Self::Neg { operand } | Self::Pos { operand } | Self::Abs { operand } => {
                operand.node_count()
            }
            Self::NumericFieldValueGet { .. } => 0,
            Self::NumericIf {
                true_arms,
                false_arm,
            } => true_arms
                .iter()
                .chain(std::iter::once(false_arm.as_ref()))
                .map(|arm| arm.condition.node_count() + arm.value.node_count())
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ids() {
        assert_eq!(BooleanNode::All.type_id(), NodeTypeId::All);
        let node = NumericNode::Neg {
            operand: NumericOperand::Number(1.0),
        };
        assert_eq!(node.type_id(), NodeTypeId::NumericNeg);
        assert!(node.type_id().is_numeric());
        assert!(!NodeTypeId::TextFieldContains.is_numeric());
    }

    #[test]
    fn test_text_contains_as_defaults_to_none() {
        assert_eq!(TextContainsAsId::default(), TextContainsAsId::None);
    }

    #[test]
    fn test_node_count_walks_numeric_operands() {
        let node = BooleanNode::And {
            operands: NonEmpty::from_first(
                BooleanNode::All,
                [BooleanNode::NumericGreaterThan {
                    left: NumericNode::NumericFieldValueGet {
                        field_id: FieldId::LastPrice,
                    }
                    .into(),
                    right: 10.0.into(),
                }],
            ),
        };
        assert_eq!(node.node_count(), 4);
    }

    #[test]
    fn test_non_empty_rejects_empty_lists() {
        assert!(NonEmpty::<BooleanNode>::new(Vec::new()).is_none());

        let operands = NonEmpty::new(vec![BooleanNode::All, BooleanNode::None]).unwrap();
        assert_eq!(operands.len(), 2);
        assert_eq!(operands.first(), &BooleanNode::All);
        assert_eq!(NonEmpty::from(BooleanNode::None).into_vec(), vec![BooleanNode::None]);

        let empty_and = serde_json::json!({"typeId": "And", "operands": []});
        assert!(serde_json::from_value::<BooleanNode>(empty_and).is_err());
    }

    #[test]
    fn test_serde_uses_type_id_tag() {
        let node = BooleanNode::FieldHasValue {
            field_id: FieldId::Name,
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["typeId"], "FieldHasValue");
        assert_eq!(json["field_id"], "Name");

        let back: BooleanNode = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }
}
