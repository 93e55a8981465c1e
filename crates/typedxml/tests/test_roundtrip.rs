use typedxml::{Json2Xml, JsonNode, Result, Xml2Json, from_json_str};

fn roundtrip(json: &str) -> Result<JsonNode> {
    let node = from_json_str(json)?;
    let xml = Json2Xml::default().to_xml(&node)?.to_xml()?;
    Xml2Json::default().to_json_str(&xml)
}

fn assert_roundtrip(json: &str) {
    let original = from_json_str(json).unwrap();
    let restored = roundtrip(json).unwrap();
    assert_eq!(restored, original, "round trip changed {}", json);
}

#[test]
fn test_scalar_type_fidelity() {
    assert_roundtrip(r#"{"n": 3}"#);
    assert_roundtrip(r#"{"n": 3.14}"#);
    assert_roundtrip(r#"{"n": true}"#);
    assert_roundtrip(r#"{"n": null}"#);
    assert_roundtrip(r#"{"n": "x"}"#);
}

#[test]
fn test_compound_structures_survive() {
    assert_roundtrip(r#"{"a": {"b": {"c": 1}}}"#);
    assert_roundtrip(r#"{"k": [1, 2]}"#);
    assert_roundtrip(r#"{"k": [{"a": 1}, {"a": 1}]}"#);
    assert_roundtrip(r#"{"k": {}}"#);
    assert_roundtrip("{}");
    assert_roundtrip("[]");
    assert_roundtrip(r#"[[1], [2]]"#);
}

#[test]
fn test_heterogeneous_array_loses_no_data() {
    // Divergent items fork into repeated siblings and fold back together.
    assert_roundtrip(r#"{"k": [{"a": 1}, {"b": 2}]}"#);
    assert_roundtrip(r#"{"k": [{"a": 1}, {"a": 2}]}"#);
}

#[test]
fn test_binary_survives() -> Result<()> {
    let original = JsonNode::Object(vec![(
        "data".to_string(),
        JsonNode::Binary(vec![0, 1, 2, 250, 251, 252]),
    )]);
    let xml = Json2Xml::default().to_xml(&original)?.to_xml()?;
    let restored = Xml2Json::default().to_json_str(&xml)?;
    assert_eq!(restored, original);
    Ok(())
}

#[test]
fn test_text_key_survives_modulo_field_order() -> Result<()> {
    // Attributes come back before the element's text content.
    let restored = roundtrip(r##"{"#text": "hello", "id": 3}"##)?;
    assert_eq!(
        restored,
        JsonNode::Object(vec![
            ("id".to_string(), JsonNode::Int(3)),
            ("#text".to_string(), JsonNode::Text("hello".to_string())),
        ])
    );
    Ok(())
}

#[test]
fn test_large_integers_survive_exactly() {
    assert_roundtrip(r#"{"n": 9223372036854775807}"#);
    assert_roundtrip(r#"{"n": -9223372036854775808}"#);
    assert_roundtrip(r#"{"n": 18446744073709551615}"#);
}

#[test]
fn test_field_order_is_preserved() -> Result<()> {
    let restored = roundtrip(r#"{"z": 1, "a": 2, "m": 3}"#)?;
    let JsonNode::Object(fields) = restored else {
        panic!("expected object");
    };
    let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
    Ok(())
}

#[test]
fn test_text_requiring_escaping_survives() {
    assert_roundtrip(r#"{"s": "a < b & \"c\""}"#);
    assert_roundtrip(r#"{"k": ["<tag>", "&amp;"]}"#);
}

#[test]
fn test_single_scalar_array_reads_back_as_the_scalar() -> Result<()> {
    // A one-element scalar array forks into a single typed element, which
    // is indistinguishable from a plain scalar field on read-back.
    let restored = roundtrip(r#"{"c": [3]}"#)?;
    assert_eq!(
        restored,
        JsonNode::Object(vec![("c".to_string(), JsonNode::Int(3))])
    );
    Ok(())
}

#[test]
fn test_text_content_whitespace_is_preserved() -> Result<()> {
    let restored = roundtrip(r##"{"id": 1, "#text": " x "}"##)?;
    assert_eq!(
        restored,
        JsonNode::Object(vec![
            ("id".to_string(), JsonNode::Int(1)),
            ("#text".to_string(), JsonNode::Text(" x ".to_string())),
        ])
    );
    Ok(())
}

#[test]
fn test_deeply_nested_mixture_survives() {
    // Scalar fields listed before compounds, matching the read-back order
    // of attributes before child elements. Multi-element scalar arrays
    // only: a one-element array reads back as the bare scalar.
    assert_roundtrip(
        r#"{"e": false, "a": [{"d": "x", "b": {"c": [1, 2]}}, {"d": "y", "b": {"c": [3, 4]}}]}"#,
    );
}
