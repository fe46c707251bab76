//! Schema defects are reported when a codec is built, never per value.

mod common;

use common::*;
use jadn::{ApiValue, Codec, Profile, SchemaError};
use serde_json::{json, Value};

fn build(types: Value) -> Result<Codec, SchemaError> {
    init_test_env();
    Codec::new(schema("unittests-Defects", types), true, true)
}

#[test]
fn test_fixture_schemas_compile() {
    for schema in [
        basic_schema(),
        compound_schema(),
        selector_schema(),
        cardinality_schema(),
        format_schema(),
    ] {
        let module = schema.meta.module.clone();
        assert!(Codec::new(schema, false, false).is_ok(), "{} failed to compile", module);
    }
}

#[test]
fn test_option_defects() {
    assert!(matches!(
        build(json!([["Name", "String", ["%x"], ""]])),
        Err(SchemaError::UnknownOption(_))
    ));
    assert!(matches!(
        build(json!([["Name", "String", ["]many"], ""]])),
        Err(SchemaError::InvalidOptionValue { option: "max", .. })
    ));
    assert!(matches!(
        build(json!([["Flag", "Boolean", ["[1"], ""]])),
        Err(SchemaError::UnsupportedOption { option: "min", .. })
    ));
    assert!(matches!(
        build(json!([["Rec", "Record", [], "", [[1, "a", "String", ["*Colors"], ""]]]])),
        Err(SchemaError::UnsupportedOption { option: "rtype", .. })
    ));
    assert!(matches!(
        build(json!([["List", "ArrayOf", [], ""]])),
        Err(SchemaError::MissingOption { .. })
    ));
}

#[test]
fn test_format_defects() {
    assert!(matches!(
        build(json!([["Addr", "String", ["@zipcode"], ""]])),
        Err(SchemaError::UnsupportedFormat { .. })
    ));
    assert!(matches!(
        build(json!([["Addr", "Integer", ["@email"], ""]])),
        Err(SchemaError::UnsupportedFormat { .. })
    ));
    assert!(matches!(
        build(json!([["Bin", "Binary", [".rot13"], ""]])),
        Err(SchemaError::UnsupportedFormat { .. })
    ));
    assert!(matches!(
        build(json!([["Code", "String", ["$[A-Z"], ""]])),
        Err(SchemaError::InvalidPattern { .. })
    ));
}

#[test]
fn test_field_defects() {
    assert!(matches!(
        build(json!([["Rec", "Record", [], "", [
            [1, "a", "String", [], ""],
            [3, "b", "String", [], ""]
        ]]])),
        Err(SchemaError::TagOrdinalMismatch { tag: 3, expected: 2, .. })
    ));
    assert!(matches!(
        build(json!([["Menu", "Choice", [], "", [
            [1, "a", "String", [], ""],
            [1, "b", "String", [], ""]
        ]]])),
        Err(SchemaError::DuplicateTag { tag: 1, .. })
    ));
    assert!(matches!(
        build(json!([["Map", "Map", [], "", [
            [1, "a", "String", [], ""],
            [2, "a", "String", [], ""]
        ]]])),
        Err(SchemaError::DuplicateField { .. })
    ));
    assert!(matches!(
        build(json!([["Arr", "Array", [], "", [
            [1, "kind", "String", [], ""],
            [2, "value", "Menu", ["&species"], ""]
        ]], ["Menu", "Choice", [], "", [[1, "a", "String", [], ""]]]])),
        Err(SchemaError::UnknownField { .. })
    ));
}

#[test]
fn test_type_defects() {
    assert!(matches!(
        build(json!([["Name", "String", [], ""], ["Name", "Integer", [], ""]])),
        Err(SchemaError::DuplicateType(_))
    ));
    assert!(matches!(
        build(json!([["$1", "String", [], ""]])),
        Err(SchemaError::InvalidTypeName(_))
    ));
    assert!(matches!(
        build(json!([["Name", "String", ["[5", "]2"], ""]])),
        Err(SchemaError::InvalidDefinition { .. })
    ));
}

#[test]
fn test_built_schema_matches_parsed_form() {
    let parsed = schema(
        "unittests-Builders",
        json!([
            ["Pair", "Record", [], "labelled count", [
                [1, "count", "Integer", ["[0"], ""],
                [2, "label", "String", ["[0"], ""]
            ]],
            ["Shade", "Enumerated", [], "", [
                [1, "light", ""],
                [2, "dark", ""]
            ]]
        ]),
    );
    assert_eq!(built_schema(), parsed);

    let pair = ApiValue::map([("count", ApiValue::Integer(3)), ("label", ApiValue::from("dim"))]);
    let concise = codec(&built_schema(), Profile::CONCISE);
    assert_round_trip(&concise, "Pair", &pair, &json!([3, "dim"]));
    assert_round_trip(&concise, "Shade", &ApiValue::from("dark"), &json!("dark"));

    let minified = codec(&built_schema(), Profile::MINIFIED);
    assert_round_trip(&minified, "Shade", &ApiValue::from("dark"), &json!(2));
    let sparse = ApiValue::map([("label", ApiValue::from("dim"))]);
    assert_round_trip(&minified, "Pair", &sparse, &json!([null, "dim"]));
}
