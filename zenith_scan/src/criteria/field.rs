//! Field model for scan criteria
//!
//! Every predicate field belongs to exactly one primitive data type. A handful of
//! fields are "subbed": they are qualified by a sub-field drawn from a universe
//! private to that field.

use serde::{Deserialize, Serialize};
use std::fmt;

// === DATA TYPES ===

/// Primitive data type of a field's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldDataTypeId {
    Numeric,
    Text,
    Date,
    Boolean,
}

impl FieldDataTypeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "Numeric",
            Self::Text => "Text",
            Self::Date => "Date",
            Self::Boolean => "Boolean",
        }
    }
}

// === FIELDS ===

/// Identifier of every field a criteria node can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldId {
    // Numeric
    AuctionPrice,
    AuctionQuantity,
    BestAskCount,
    BestAskPrice,
    BestAskQuantity,
    BestBidCount,
    BestBidPrice,
    BestBidQuantity,
    ClosePrice,
    ContractSize,
    HighPrice,
    LastPrice,
    LotSize,
    LowPrice,
    MarketCap,
    OpenInterest,
    OpenPrice,
    PreviousClose,
    Remainder,
    ShareIssue,
    StrikePrice,
    Trades,
    Value,
    Volume,
    Vwap,
    // Text
    Board,
    CallOrPut,
    Category,
    Cfi,
    Class,
    Code,
    Currency,
    Data,
    Exchange,
    ExerciseType,
    Leg,
    Market,
    Name,
    QuotationBasis,
    State,
    StateAllows,
    StatusNote,
    TradingMarket,
    // Date
    ExpiryDate,
    // Boolean
    IsIndex,
    // Subbed
    Price,
    Date,
    AltCode,
    Attribute,
}

impl FieldId {
    pub const NUMERIC: [FieldId; 25] = [
        Self::AuctionPrice,
        Self::AuctionQuantity,
        Self::BestAskCount,
        Self::BestAskPrice,
        Self::BestAskQuantity,
        Self::BestBidCount,
        Self::BestBidPrice,
        Self::BestBidQuantity,
        Self::ClosePrice,
        Self::ContractSize,
        Self::HighPrice,
        Self::LastPrice,
        Self::LotSize,
        Self::LowPrice,
        Self::MarketCap,
        Self::OpenInterest,
        Self::OpenPrice,
        Self::PreviousClose,
        Self::Remainder,
        Self::ShareIssue,
        Self::StrikePrice,
        Self::Trades,
        Self::Value,
        Self::Volume,
        Self::Vwap,
    ];

    pub const TEXT: [FieldId; 18] = [
        Self::Board,
        Self::CallOrPut,
        Self::Category,
        Self::Cfi,
        Self::Class,
        Self::Code,
        Self::Currency,
        Self::Data,
        Self::Exchange,
        Self::ExerciseType,
        Self::Leg,
        Self::Market,
        Self::Name,
        Self::QuotationBasis,
        Self::State,
        Self::StateAllows,
        Self::StatusNote,
        Self::TradingMarket,
    ];

    pub const DATE: [FieldId; 1] = [Self::ExpiryDate];

    pub const BOOLEAN: [FieldId; 1] = [Self::IsIndex];

    pub const SUBBED: [FieldId; 4] = [Self::Price, Self::Date, Self::AltCode, Self::Attribute];

    /// Every field, plain categories first
    pub fn all() -> impl Iterator<Item = FieldId> {
        Self::NUMERIC
            .into_iter()
            .chain(Self::TEXT)
            .chain(Self::DATE)
            .chain(Self::BOOLEAN)
            .chain(Self::SUBBED)
    }

    /// Data type of the field's value; for subbed fields, the type of the sub-field value
    pub fn data_type_id(&self) -> FieldDataTypeId {
        match self {
            Self::AuctionPrice
            | Self::AuctionQuantity
            | Self::BestAskCount
            | Self::BestAskPrice
            | Self::BestAskQuantity
            | Self::BestBidCount
            | Self::BestBidPrice
            | Self::BestBidQuantity
            | Self::ClosePrice
            | Self::ContractSize
            | Self::HighPrice
            | Self::LastPrice
            | Self::LotSize
            | Self::LowPrice
            | Self::MarketCap
            | Self::OpenInterest
            | Self::OpenPrice
            | Self::PreviousClose
            | Self::Remainder
            | Self::ShareIssue
            | Self::StrikePrice
            | Self::Trades
            | Self::Value
            | Self::Volume
            | Self::Vwap
            | Self::Price => FieldDataTypeId::Numeric,

            Self::Board
            | Self::CallOrPut
            | Self::Category
            | Self::Cfi
            | Self::Class
            | Self::Code
            | Self::Currency
            | Self::Data
            | Self::Exchange
            | Self::ExerciseType
            | Self::Leg
            | Self::Market
            | Self::Name
            | Self::QuotationBasis
            | Self::State
            | Self::StateAllows
            | Self::StatusNote
            | Self::TradingMarket
            | Self::AltCode
            | Self::Attribute => FieldDataTypeId::Text,

            Self::ExpiryDate | Self::Date => FieldDataTypeId::Date,

            Self::IsIndex => FieldDataTypeId::Boolean,
        }
    }

    /// True for fields that take a sub-field qualifier
    pub fn is_subbed(&self) -> bool {
        matches!(
            self,
            Self::Price | Self::Date | Self::AltCode | Self::Attribute
        )
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// === SUB-FIELDS ===

/// Sub-fields of the `Price` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceSubFieldId {
    Last,
}

/// Sub-fields of the `Date` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateSubFieldId {
    Dividend,
}

/// Alternate instrument codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AltCodeSubFieldId {
    Ticker,
    Isin,
    Base,
    Gics,
    Ric,
    Short,
    Long,
    Uid,
}

impl AltCodeSubFieldId {
    pub const ALL: [AltCodeSubFieldId; 8] = [
        Self::Ticker,
        Self::Isin,
        Self::Base,
        Self::Gics,
        Self::Ric,
        Self::Short,
        Self::Long,
        Self::Uid,
    ];
}

/// Instrument attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeSubFieldId {
    Category,
    Class,
    Delivery,
    Sector,
    Short,
    ShortSuspended,
    SubSector,
    MaxRss,
}

impl AttributeSubFieldId {
    pub const ALL: [AttributeSubFieldId; 8] = [
        Self::Category,
        Self::Class,
        Self::Delivery,
        Self::Sector,
        Self::Short,
        Self::ShortSuspended,
        Self::SubSector,
        Self::MaxRss,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_categories_are_disjoint_and_complete() {
        let all: Vec<FieldId> = FieldId::all().collect();
        let unique: HashSet<FieldId> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len());
        assert_eq!(all.len(), 49);
    }

    #[test]
    fn test_plain_category_data_types() {
        for field in FieldId::NUMERIC {
            assert_eq!(field.data_type_id(), FieldDataTypeId::Numeric);
            assert!(!field.is_subbed());
        }
        for field in FieldId::TEXT {
            assert_eq!(field.data_type_id(), FieldDataTypeId::Text);
        }
        assert_eq!(FieldId::ExpiryDate.data_type_id(), FieldDataTypeId::Date);
        assert_eq!(FieldId::IsIndex.data_type_id(), FieldDataTypeId::Boolean);
    }

    #[test]
    fn test_subbed_fields() {
        assert!(FieldId::SUBBED.iter().all(FieldId::is_subbed));
        assert_eq!(FieldId::Price.data_type_id(), FieldDataTypeId::Numeric);
        assert_eq!(FieldId::Date.data_type_id(), FieldDataTypeId::Date);
        assert_eq!(FieldId::AltCode.data_type_id(), FieldDataTypeId::Text);
        assert_eq!(FieldId::Attribute.data_type_id(), FieldDataTypeId::Text);
    }
}
