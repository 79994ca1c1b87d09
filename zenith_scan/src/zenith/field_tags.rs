//! Field wire tags
//!
//! `try_*_to_id` lookups are partial: `None` means "not a field of this category"
//! so callers can cascade. `*_from_id` lookups are total over their category and
//! treat any other field as an internal invariant violation.

use super::internal_error;
use crate::criteria::FieldId;

/// Wire tag of any field
fn wire_tag(field_id: FieldId) -> &'static str {
    match field_id {
        FieldId::AuctionPrice => "AuctionPrice",
        FieldId::AuctionQuantity => "AuctionQuantity",
        FieldId::BestAskCount => "BestAskCount",
        FieldId::BestAskPrice => "BestAskPrice",
        FieldId::BestAskQuantity => "BestAskQuantity",
        FieldId::BestBidCount => "BestBidCount",
        FieldId::BestBidPrice => "BestBidPrice",
        FieldId::BestBidQuantity => "BestBidQuantity",
        FieldId::ClosePrice => "ClosePrice",
        FieldId::ContractSize => "ContractSize",
        FieldId::HighPrice => "HighPrice",
        FieldId::LastPrice => "LastPrice",
        FieldId::LotSize => "LotSize",
        FieldId::LowPrice => "LowPrice",
        FieldId::MarketCap => "MarketCap",
        FieldId::OpenInterest => "OpenInterest",
        FieldId::OpenPrice => "OpenPrice",
        FieldId::PreviousClose => "PreviousClose",
        FieldId::Remainder => "Remainder",
        FieldId::ShareIssue => "ShareIssue",
        FieldId::StrikePrice => "StrikePrice",
        FieldId::Trades => "Trades",
        FieldId::Value => "Value",
        FieldId::Volume => "Volume",
        FieldId::Vwap => "VWAP",
        FieldId::Board => "Board",
        FieldId::CallOrPut => "CallOrPut",
        FieldId::Category => "Category",
        FieldId::Cfi => "CFI",
        FieldId::Class => "Class",
        FieldId::Code => "Code",
        FieldId::Currency => "Currency",
        FieldId::Data => "Data",
        FieldId::Exchange => "Exchange",
        FieldId::ExerciseType => "ExerciseType",
        FieldId::Leg => "Leg",
        FieldId::Market => "Market",
        FieldId::Name => "Name",
        FieldId::QuotationBasis => "QuotationBasis",
        FieldId::State => "State",
        FieldId::StateAllows => "StateAllows",
        FieldId::StatusNote => "StatusNote",
        FieldId::TradingMarket => "TradingMarket",
        FieldId::ExpiryDate => "ExpiryDate",
        FieldId::IsIndex => "IsIndex",
        FieldId::Price => "Price",
        FieldId::Date => "Date",
        FieldId::AltCode => "AltCode",
        FieldId::Attribute => "Attribute",
    }
}

fn find(category: &[FieldId], tag: &str) -> Option<FieldId> {
    category.iter().copied().find(|field| wire_tag(*field) == tag)
}

fn from_category(category: &[FieldId], name: &str, field_id: FieldId) -> &'static str {
    if category.contains(&field_id) {
        wire_tag(field_id)
    } else {
        internal_error(&format!("{} is not a {} field", field_id, name))
    }
}

pub fn try_numeric_to_id(tag: &str) -> Option<FieldId> {
    find(&FieldId::NUMERIC, tag)
}

pub fn numeric_from_id(field_id: FieldId) -> &'static str {
    from_category(&FieldId::NUMERIC, "numeric", field_id)
}

pub fn try_text_to_id(tag: &str) -> Option<FieldId> {
    find(&FieldId::TEXT, tag)
}

pub fn text_from_id(field_id: FieldId) -> &'static str {
    from_category(&FieldId::TEXT, "text", field_id)
}

pub fn try_date_to_id(tag: &str) -> Option<FieldId> {
    find(&FieldId::DATE, tag)
}

pub fn date_from_id(field_id: FieldId) -> &'static str {
    from_category(&FieldId::DATE, "date", field_id)
}

pub fn try_boolean_to_id(tag: &str) -> Option<FieldId> {
    find(&FieldId::BOOLEAN, tag)
}

pub fn boolean_from_id(field_id: FieldId) -> &'static str {
    from_category(&FieldId::BOOLEAN, "boolean", field_id)
}

/// Any plain (non-subbed) field, categories tried in order
pub fn try_matching_to_id(tag: &str) -> Option<FieldId> {
    try_numeric_to_id(tag)
        .or_else(|| try_text_to_id(tag))
        .or_else(|| try_date_to_id(tag))
        .or_else(|| try_boolean_to_id(tag))
}

pub fn matching_from_id(field_id: FieldId) -> &'static str {
    if field_id.is_subbed() {
        internal_error(&format!("{} is not a plain field", field_id))
    } else {
        wire_tag(field_id)
    }
}

pub fn try_subbed_to_id(tag: &str) -> Option<FieldId> {
    find(&FieldId::SUBBED, tag)
}

pub fn subbed_from_id(field_id: FieldId) -> &'static str {
    from_category(&FieldId::SUBBED, "subbed", field_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::FieldDataTypeId;

    #[test]
    fn test_every_field_has_one_home() {
        for field in FieldId::all() {
            let tag = wire_tag(field);
            let plain = try_matching_to_id(tag);
            let subbed = try_subbed_to_id(tag);
            if field.is_subbed() {
                assert_eq!(plain, None, "{tag}");
                assert_eq!(subbed, Some(field));
                assert_eq!(subbed_from_id(field), tag);
            } else {
                assert_eq!(plain, Some(field), "{tag}");
                assert_eq!(subbed, None);
                assert_eq!(matching_from_id(field), tag);
            }
        }
    }

    #[test]
    fn test_category_lookups_cascade() {
        assert_eq!(try_numeric_to_id("VWAP"), Some(FieldId::Vwap));
        assert_eq!(try_numeric_to_id("Name"), None);
        assert_eq!(try_text_to_id("CFI"), Some(FieldId::Cfi));
        assert_eq!(try_date_to_id("ExpiryDate"), Some(FieldId::ExpiryDate));
        assert_eq!(try_boolean_to_id("IsIndex"), Some(FieldId::IsIndex));
        assert_eq!(try_matching_to_id("Vwap"), None);
        assert_eq!(
            try_matching_to_id("Code").map(|f| f.data_type_id()),
            Some(FieldDataTypeId::Text)
        );
    }

    #[test]
    #[should_panic(expected = "is not a numeric field")]
    fn test_numeric_from_id_asserts_category() {
        numeric_from_id(FieldId::Name);
    }

    #[test]
    #[should_panic(expected = "is not a plain field")]
    fn test_matching_from_id_rejects_subbed() {
        matching_from_id(FieldId::Price);
    }
}
