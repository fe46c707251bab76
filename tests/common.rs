//! Shared fixtures for the integration suites.
//!
//! Schemas are written in the compact list notation and parsed through the
//! same serde path a loader would use.

#![allow(dead_code)]

use jadn::{ApiValue, BaseKind, Codec, CodecError, FieldDef, Profile, Schema, TypeDef};
use serde_json::{json, Value};

pub fn init_test_env() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn schema(module: &str, types: Value) -> Schema {
    serde_json::from_value(json!({"meta": {"module": module}, "types": types}))
        .expect("fixture schema should deserialize")
}

pub fn codec(schema: &Schema, profile: Profile) -> Codec {
    init_test_env();
    Codec::new(schema.clone(), profile.verbose_records, profile.verbose_identifiers)
        .expect("fixture schema should compile")
}

/// The four (record shape, identifier shape) combinations.
pub const ALL_PROFILES: [Profile; 4] = [
    Profile::VERBOSE,
    Profile::CONCISE,
    Profile::MINIFIED,
    Profile::new(true, false),
];

/// Asserts `api` encodes to `ser` and `ser` decodes back to `api`.
pub fn assert_round_trip(codec: &Codec, type_name: &str, api: &ApiValue, ser: &Value) {
    assert_eq!(&codec.encode(type_name, api).unwrap(), ser, "encode {}", type_name);
    assert_eq!(&codec.decode(type_name, ser).unwrap(), api, "decode {}", type_name);
}

pub fn encode_err(codec: &Codec, type_name: &str, api: &ApiValue) -> CodecError {
    match codec.encode(type_name, api) {
        Ok(v) => panic!("{} encoded {:?} to {}", type_name, api, v),
        Err(e) => e,
    }
}

pub fn decode_err(codec: &Codec, type_name: &str, ser: &Value) -> CodecError {
    match codec.decode(type_name, ser) {
        Ok(v) => panic!("{} decoded {} to {:?}", type_name, ser, v),
        Err(e) => e,
    }
}

pub fn basic_schema() -> Schema {
    schema(
        "unittests-BasicTypes",
        json!([
            ["t_bool", "Boolean", [], ""],
            ["t_int", "Integer", [], ""],
            ["t_num", "Number", [], ""],
            ["t_str", "String", [], ""],
            ["t_bin", "Binary", [], ""],
            ["t_array_of", "ArrayOf", ["*Integer"], ""],
            ["t_choice", "Choice", [], "", [
                [1, "type1", "String", [], ""],
                [4, "type2", "Boolean", [], ""],
                [7, "type3", "Integer", [], ""]
            ]],
            ["t_choice_c", "Choice", ["="], "", [
                [1, "type1", "String", [], ""],
                [2, "type2", "Boolean", [], ""],
                [3, "type3", "Integer", [], ""]
            ]],
            ["t_enum", "Enumerated", [], "", [
                [1, "first", ""],
                [15, "extra", ""],
                [8, "Chunk", ""]
            ]],
            ["t_enum_c", "Enumerated", ["="], "", [
                [1, "first", ""],
                [15, "extra", ""],
                [8, "Chunk", ""]
            ]],
            ["t_array", "Array", [], "", [
                [1, "fbool", "Boolean", ["[0"], ""],
                [2, "fint", "Integer", [], ""],
                [3, "fnum", "Number", [], ""],
                [4, "fstr", "String", ["[0"], ""],
                [5, "farr", "t_aoa", ["[0"], ""],
                [6, "fao", "t_aoi", ["[0"], ""]
            ]],
            ["t_aoa", "Array", [], "", [
                [1, "count", "Integer", [], ""],
                [2, "label", "String", [], ""]
            ]],
            ["t_aoi", "ArrayOf", ["*Integer"], ""],
            ["t_map_rgba", "Map", [], "", [
                [2, "red", "Integer", [], ""],
                [4, "green", "Integer", ["[0"], ""],
                [6, "blue", "Integer", [], ""],
                [9, "alpha", "Integer", ["[0"], ""]
            ]],
            ["t_arr_rgba", "Array", [], "", [
                [1, "red", "Integer", [], ""],
                [2, "green", "Integer", ["[0"], ""],
                [3, "blue", "Integer", [], ""],
                [4, "alpha", "Integer", ["[0"], ""]
            ]],
            ["t_rec_rgba", "Record", [], "", [
                [1, "red", "Integer", [], ""],
                [2, "green", "Integer", ["[0"], ""],
                [3, "blue", "Integer", [], ""],
                [4, "alpha", "Integer", ["[0"], ""]
            ]]
        ]),
    )
}

pub fn compound_schema() -> Schema {
    schema(
        "unittests-Compound",
        json!([
            ["t_choice", "Choice", [], "", [
                [10, "rec", "t_crec", [], ""],
                [11, "map", "t_cmap", [], ""],
                [12, "array", "t_carray", [], ""],
                [13, "choice", "t_cchoice", [], ""]
            ]],
            ["t_crec", "Record", [], "", [
                [1, "a", "Integer", [], ""],
                [2, "b", "String", [], ""]
            ]],
            ["t_cmap", "Map", [], "", [
                [4, "c", "Integer", [], ""],
                [6, "d", "String", [], ""]
            ]],
            ["t_carray", "Array", [], "", [
                [1, "e", "Integer", [], ""],
                [2, "f", "String", [], ""]
            ]],
            ["t_cchoice", "Choice", [], "", [
                [7, "g", "Integer", [], ""],
                [8, "h", "String", [], ""]
            ]],
            ["t_trailing", "Record", [], "", [
                [1, "a", "String", ["[0"], ""],
                [2, "b", "String", ["[0"], ""],
                [3, "c", "String", ["[0"], ""],
                [4, "d", "String", ["[0"], ""]
            ]],
            ["t_bounded", "Map", ["[1", "]2"], "", [
                [1, "x", "Integer", ["[0"], ""],
                [2, "y", "Integer", ["[0"], ""],
                [3, "z", "Integer", ["[0"], ""]
            ]],
            ["t_dangling", "Record", [], "", [
                [1, "x", "Nowhere", [], ""]
            ]]
        ]),
    )
}

pub fn selector_schema() -> Schema {
    schema(
        "unittests-Selectors",
        json!([
            ["t_attr_arr_tag", "Array", [], "", [
                [1, "type", "Integer", [], ""],
                [2, "value", "Menu_tag", ["&1"], ""]
            ]],
            ["t_attr_arr_name", "Array", [], "", [
                [1, "type", "Enumerated", ["*Menu_name"], ""],
                [2, "value", "Menu_name", ["&1"], ""]
            ]],
            ["t_attr_arr_names", "Array", [], "", [
                [1, "type", "Enumerated", ["*Menu_name"], ""],
                [2, "values", "Menu_name", ["&1", "]0"], ""]
            ]],
            ["t_attr_rec_name", "Record", [], "", [
                [1, "type", "Enumerated", ["*Menu_name"], ""],
                [2, "value", "Menu_name", ["&type"], ""]
            ]],
            ["t_property_implicit_primitive", "Record", [], "", [
                [1, "foo", "String", [], ""],
                [2, "<", "Primitive", [], ""]
            ]],
            ["t_property_explicit_primitive", "Record", [], "", [
                [1, "foo", "String", [], ""],
                [2, "data", "Primitive", [], ""]
            ]],
            ["t_property_implicit_category", "Record", [], "", [
                [1, "foo", "String", [], ""],
                [2, "<", "Category", [], ""]
            ]],
            ["Menu_tag", "Choice", ["="], "", [
                [1, "name", "String", [], ""],
                [2, "flag", "Boolean", [], ""],
                [3, "count", "Integer", [], ""],
                [4, "color", "Colors", [], ""],
                [5, "animal", "Animals", [], ""]
            ]],
            ["Menu_name", "Choice", [], "", [
                [9, "name", "String", [], ""],
                [4, "flag", "Boolean", [], ""],
                [7, "count", "Integer", [], ""],
                [6, "color", "Colors", [], ""],
                [5, "animal", "Animals", [], ""]
            ]],
            ["Primitive", "Choice", [], "", [
                [9, "name", "String", [], ""],
                [4, "flag", "Boolean", [], ""],
                [7, "count", "Integer", [], ""]
            ]],
            ["Category", "Choice", [], "", [
                [2, "animal", "Animals", [], ""],
                [6, "color", "Colors", [], ""]
            ]],
            ["Animals", "Map", [], "", [
                [3, "cat", "String", ["[0"], ""],
                [4, "dog", "Integer", ["[0"], ""],
                [5, "rat", "Rattrs", ["[0"], ""]
            ]],
            ["Colors", "Enumerated", [], "", [
                [2, "red", ""],
                [3, "green", ""],
                [4, "blue", ""]
            ]],
            ["Rattrs", "Record", [], "", [
                [1, "length", "Integer", [], ""],
                [2, "weight", "Number", [], ""]
            ]]
        ]),
    )
}

pub fn cardinality_schema() -> Schema {
    schema(
        "unittests-ListCardinality",
        json!([
            ["t_array0", "ArrayOf", ["*String", "[0", "]2"], ""],
            ["t_array1", "ArrayOf", ["*String", "]2"], ""],
            ["t_opt_list0", "Record", [], "", [
                [1, "string", "String", [], ""],
                [2, "list", "t_array0", ["[0"], ""]
            ]],
            ["t_opt_list1", "Record", [], "", [
                [1, "string", "String", [], ""],
                [2, "list", "t_array1", ["[0"], ""]
            ]],
            ["t_list_1_2", "Record", [], "", [
                [1, "string", "String", [], ""],
                [2, "list", "String", ["]2"], ""]
            ]],
            ["t_list_0_2", "Record", [], "", [
                [1, "string", "String", [], ""],
                [2, "list", "String", ["[0", "]2"], ""]
            ]],
            ["t_list_2_3", "Record", [], "", [
                [1, "string", "String", [], ""],
                [2, "list", "String", ["[2", "]3"], ""]
            ]],
            ["t_list_1_n", "Record", [], "", [
                [1, "string", "String", [], ""],
                [2, "list", "String", ["]0"], ""]
            ]]
        ]),
    )
}

pub fn format_schema() -> Schema {
    schema(
        "unittests-Format",
        json!([
            ["t_bin", "Binary", [], ""],
            ["t_bin_x", "Binary", [".x"], ""],
            ["t_ipv4_addr", "Binary", [".ipv4-addr"], ""],
            ["t_ip_addr", "Binary", ["@ip-addr", ".ip-addr"], ""],
            ["t_ipv6_b64", "Binary", ["@ip-addr"], ""],
            ["t_ipv4_net", "Array", [".ipv4-net"], "", [
                [1, "addr", "Binary", [], ""],
                [2, "prefix", "Integer", [], ""]
            ]],
            ["t_ipv6_net", "Array", [".ipv6-net"], "", [
                [1, "addr", "Binary", [], ""],
                [2, "prefix", "Integer", [], ""]
            ]],
            ["t_mac", "Binary", ["@mac-addr"], ""],
            ["t_mac_x", "Binary", ["@mac-addr", ".x"], ""],
            ["t_email", "String", ["@email"], ""],
            ["t_hostname", "String", ["@hostname"], ""],
            ["t_uri", "String", ["@uri"], ""],
            ["t_port", "Integer", ["@port"], ""],
            ["t_code", "String", ["$^[A-Z]{3}$"], ""],
            ["t_short", "String", ["[2", "]4"], ""],
            ["t_percent", "Integer", ["[0", "]100"], ""],
            ["t_ratio", "Number", ["[0", "]1"], ""],
            ["t_big", "Integer", ["[-9007199254740992", "]9007199254740992"], ""],
            ["t_big_num", "Number", ["]9007199254740992"], ""],
            ["t_int_any", "Integer", [], ""]
        ]),
    )
}

/// The same shape as a hand-written schema, assembled in code.
pub fn built_schema() -> Schema {
    Schema::new(
        "unittests-Builders",
        vec![
            TypeDef::new("Pair", BaseKind::Record, &[])
                .with_description("labelled count")
                .with_fields(vec![
                    FieldDef::field(1, "count", "Integer", &["[0"]),
                    FieldDef::field(2, "label", "String", &["[0"]),
                ]),
            TypeDef::new("Shade", BaseKind::Enumerated, &[])
                .with_fields(vec![FieldDef::item(1, "light"), FieldDef::item(2, "dark")]),
        ],
    )
}

pub fn bytes(hex_text: &str) -> ApiValue {
    ApiValue::Binary(hex::decode(hex_text).expect("fixture hex"))
}
