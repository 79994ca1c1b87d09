//! Scan-criteria data model: fields, sub-fields and the expression tree

pub mod field;
pub mod nodes;

pub use field::{
    AltCodeSubFieldId, AttributeSubFieldId, DateSubFieldId, FieldDataTypeId, FieldId,
    PriceSubFieldId,
};
pub use nodes::{
    BooleanNode, DateValue, NodeTypeId, NonEmpty, NumericIfArm, NumericNode, NumericOperand,
    TextContainsAsId,
};
