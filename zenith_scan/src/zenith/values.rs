//! Literal value converters: dates, text-contains modes and sub-field names

use crate::criteria::{
    AltCodeSubFieldId, AttributeSubFieldId, DateSubFieldId, DateValue, PriceSubFieldId,
    TextContainsAsId,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat};

// === DATES ===

/// Date-times without an offset, read as UTC
const UTC_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// ISO-8601 wire form of a date; UTC renders with a `Z` suffix
pub fn date_from_value(date: &DateValue) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse an ISO-8601 date or date-time
///
/// Accepts RFC 3339, an offset time with minute precision, a date-time with
/// no offset or a `Z` suffix (UTC), and a bare `YYYY-MM-DD` (midnight UTC).
pub fn try_date_to_value(text: &str) -> Option<DateValue> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date);
    }
    if let Ok(date) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M%:z") {
        return Some(date);
    }

    let utc = text.strip_suffix('Z').unwrap_or(text);
    if let Some(date) = UTC_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(utc, format).ok())
    {
        return Some(date.and_utc().fixed_offset());
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().fixed_offset())
}

// === TEXT CONTAINS ===

pub fn try_text_contains_as_to_id(text: &str) -> Option<TextContainsAsId> {
    match text {
        "None" => Some(TextContainsAsId::None),
        "FromStart" => Some(TextContainsAsId::FromStart),
        "FromEnd" => Some(TextContainsAsId::FromEnd),
        "Exact" => Some(TextContainsAsId::Exact),
        _ => None,
    }
}

pub fn text_contains_as_from_id(as_id: TextContainsAsId) -> &'static str {
    match as_id {
        TextContainsAsId::None => "None",
        TextContainsAsId::FromStart => "FromStart",
        TextContainsAsId::FromEnd => "FromEnd",
        TextContainsAsId::Exact => "Exact",
    }
}

// === SUB-FIELDS ===

pub fn try_price_sub_field_to_id(text: &str) -> Option<PriceSubFieldId> {
    match text {
        "Last" => Some(PriceSubFieldId::Last),
        _ => None,
    }
}

pub fn price_sub_field_from_id(id: PriceSubFieldId) -> &'static str {
    match id {
        PriceSubFieldId::Last => "Last",
    }
}

pub fn try_date_sub_field_to_id(text: &str) -> Option<DateSubFieldId> {
    match text {
        "Dividend" => Some(DateSubFieldId::Dividend),
        _ => None,
    }
}

pub fn date_sub_field_from_id(id: DateSubFieldId) -> &'static str {
    match id {
        DateSubFieldId::Dividend => "Dividend",
    }
}

pub fn try_alt_code_sub_field_to_id(text: &str) -> Option<AltCodeSubFieldId> {
    AltCodeSubFieldId::ALL
        .into_iter()
        .find(|id| alt_code_sub_field_from_id(*id) == text)
}

pub fn alt_code_sub_field_from_id(id: AltCodeSubFieldId) -> &'static str {
    match id {
        AltCodeSubFieldId::Ticker => "Ticker",
        AltCodeSubFieldId::Isin => "ISIN",
        AltCodeSubFieldId::Base => "Base",
        AltCodeSubFieldId::Gics => "GICS",
        AltCodeSubFieldId::Ric => "RIC",
        AltCodeSubFieldId::Short => "Short",
        AltCodeSubFieldId::Long => "Long",
        AltCodeSubFieldId::Uid => "UID",
    }
}

pub fn try_attribute_sub_field_to_id(text: &str) -> Option<AttributeSubFieldId> {
    AttributeSubFieldId::ALL
        .into_iter()
        .find(|id| attribute_sub_field_from_id(*id) == text)
}

pub fn attribute_sub_field_from_id(id: AttributeSubFieldId) -> &'static str {
    match id {
        AttributeSubFieldId::Category => "Category",
        AttributeSubFieldId::Class => "Class",
        AttributeSubFieldId::Delivery => "Delivery",
        AttributeSubFieldId::Sector => "Sector",
        AttributeSubFieldId::Short => "Short",
        AttributeSubFieldId::ShortSuspended => "ShortSuspended",
        AttributeSubFieldId::SubSector => "SubSector",
        AttributeSubFieldId::MaxRss => "MaxRSS",
    }
}
