use assert_matches::assert_matches;
use serde_json::{json, Value};
use zenith_scan::config::compile_time::parser::{
    MAX_IF_ARMS, MAX_TUPLE_DEPTH, MAX_TUPLE_LENGTH,
};
use zenith_scan::criteria::{BooleanNode, DateValue, FieldId, PriceSubFieldId, TextContainsAsId};
use zenith_scan::parse_boolean;
use zenith_scan::zenith::{ParseErrorClass, ZenithParseError, ZenithParseErrorCode};

fn error_of(value: Value) -> ZenithParseError {
    match parse_boolean(&value) {
        Ok(parsed) => panic!("{} parsed as {:?}", value, parsed.node),
        Err(failure) => failure.error,
    }
}

#[test]
fn documented_failures_have_default_messages() {
    let cases = [
        (json!([]), "tuple array is zero length"),
        (json!(["And"]), "logical boolean missing operands"),
        (json!(["=", 5]), "numeric comparison does not have 2 operands"),
        (json!(["Frobnicate"]), "unknown boolean tuple node type"),
        (json!(["ExpiryDate", {}]), "range min and max both undefined"),
    ];

    for (value, message) in cases {
        let error = error_of(value.clone());
        assert!(
            error.to_string().starts_with(message),
            "{} gave \"{}\"",
            value,
            error
        );
    }
}

#[test]
fn documented_successes() {
    assert_eq!(
        parse_boolean(&json!(["Price", "Last", 5])).unwrap().node,
        BooleanNode::PriceSubFieldEquals {
            sub_field_id: PriceSubFieldId::Last,
            target: 5.0
        }
    );

    let min: DateValue = "2023-01-01T00:00:00Z".parse().unwrap();
    assert_eq!(
        parse_boolean(&json!(["ExpiryDate", {"Min": "2023-01-01"}]))
            .unwrap()
            .node,
        BooleanNode::DateFieldInRange {
            field_id: FieldId::ExpiryDate,
            min: Some(min),
            max: None
        }
    );

    assert_eq!(
        parse_boolean(&json!(["Code", "ABC", "FromStart", true]))
            .unwrap()
            .node,
        BooleanNode::TextFieldContains {
            field_id: FieldId::Code,
            value: "ABC".to_string(),
            as_id: TextContainsAsId::FromStart,
            ignore_case: true
        }
    );
}

#[test]
fn date_times_without_seconds_or_offset_parse_as_utc() {
    let ten_am: DateValue = "2023-01-01T10:00:00Z".parse().unwrap();
    for text in ["2023-01-01T10:00:00", "2023-01-01T10:00Z", "2023-01-01T10:00"] {
        assert_eq!(
            parse_boolean(&json!(["ExpiryDate", text])).unwrap().node,
            BooleanNode::DateFieldEquals {
                field_id: FieldId::ExpiryDate,
                target: ten_am
            },
            "{}",
            text
        );
    }
}

#[test]
fn each_class_is_reachable() {
    let cases = [
        (json!("And"), ParseErrorClass::Structural),
        (json!(["Price", "Bid"]), ParseErrorClass::UnknownTag),
        (json!(["Name", 5]), ParseErrorClass::TypeMismatch),
        (json!(["Not", ["All"], ["None"]]), ParseErrorClass::Arity),
        (json!(["Volume", null, null]), ParseErrorClass::Range),
        (json!(["ExpiryDate", "tomorrow"]), ParseErrorClass::Format),
        (json!(["LotSize", null]), ParseErrorClass::ObjectNullity),
    ];

    for (value, class) in cases {
        assert_eq!(error_of(value.clone()).class(), class, "{}", value);
    }
}

#[test]
fn nesting_beyond_depth_limit_is_rejected() {
    let mut value = json!(["All"]);
    for _ in 0..MAX_TUPLE_DEPTH {
        value = json!(["Not", value]);
    }

    let failure = parse_boolean(&value).unwrap_err();
    assert_matches!(
        failure.error,
        ZenithParseError::Limit {
            code: ZenithParseErrorCode::TupleDepthLimitExceeded,
            ..
        }
    );
    assert_eq!(failure.progress.depth(), MAX_TUPLE_DEPTH + 1);
}

#[test]
fn nesting_at_depth_limit_is_accepted() {
    let mut value = json!(["All"]);
    for _ in 1..MAX_TUPLE_DEPTH {
        value = json!(["Not", value]);
    }
    assert!(parse_boolean(&value).is_ok());
}

#[test]
fn overlong_tuple_is_rejected() {
    let mut tuple = vec![json!("Or")];
    tuple.extend(std::iter::repeat(json!(["All"])).take(MAX_TUPLE_LENGTH));

    assert_eq!(
        error_of(Value::Array(tuple)).code(),
        ZenithParseErrorCode::TupleLengthLimitExceeded
    );
}

#[test]
fn too_many_if_arms_is_rejected() {
    let mut tuple = vec![json!("If")];
    for _ in 0..=MAX_IF_ARMS {
        tuple.push(json!(["All"]));
        tuple.push(json!(1));
    }
    let value = json!(["=", Value::Array(tuple), 1]);

    assert_eq!(
        error_of(value).code(),
        ZenithParseErrorCode::NumericIfArmLimitExceeded
    );
}

#[test]
fn failure_trail_marks_innermost_node() {
    let failure = parse_boolean(&json!([
        "And",
        ["IsIndex"],
        [">", ["+", "LastPrice", ["Sqrt", 4]], 1]
    ]))
    .unwrap_err();

    assert_eq!(
        failure.code(),
        ZenithParseErrorCode::UnknownNumericTupleNodeType
    );
    let innermost = failure.progress.unresolved().last().unwrap();
    assert_eq!(innermost.wire_tag, "Sqrt");
    assert_eq!(innermost.node_depth, 4);

    let message = failure.enhanced_message();
    assert!(message.starts_with("[Z302/UnknownNumericTupleNodeType]"));
}

#[test]
#[should_panic(expected = "is not a date field")]
fn serializing_out_of_category_field_panics() {
    zenith_scan::from_boolean_node(&BooleanNode::DateFieldEquals {
        field_id: FieldId::Volume,
        target: "2023-01-01T00:00:00Z".parse().unwrap(),
    });
}
