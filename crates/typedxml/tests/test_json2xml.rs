use typedxml::{
    Json2Xml, Json2XmlSettings, JsonNode, ParentKeyPolicy, Result, from_json_str, to_xml_string,
};

fn convert(json: &str) -> Result<String> {
    to_xml_string(&from_json_str(json)?)
}

#[test]
fn test_scalar_fields_become_typed_attributes() -> Result<()> {
    assert_eq!(
        convert(r#"{"n": 3}"#)?,
        r#"<root xmlns:Int="http://www.w3.org/2001/XMLSchema/integer" Int:n="3"/>"#
    );
    assert_eq!(
        convert(r#"{"n": 3.14}"#)?,
        r#"<root xmlns:Real="http://www.w3.org/2001/XMLSchema/decimal" Real:n="3.14"/>"#
    );
    assert_eq!(
        convert(r#"{"n": true}"#)?,
        r#"<root xmlns:Bool="http://www.w3.org/2001/XMLSchema/boolean" Bool:n="true"/>"#
    );
    assert_eq!(
        convert(r#"{"n": "x"}"#)?,
        r#"<root xmlns:Text="http://www.w3.org/2001/XMLSchema/string" Text:n="x"/>"#
    );
    Ok(())
}

#[test]
fn test_null_field_becomes_empty_attribute() -> Result<()> {
    assert_eq!(
        convert(r#"{"n": null}"#)?,
        r#"<root xmlns:null="http://www.w3.org/2001/XMLSchema" null:n=""/>"#
    );
    Ok(())
}

#[test]
fn test_binary_field_is_base64_encoded() -> Result<()> {
    let node = JsonNode::Object(vec![("data".to_string(), JsonNode::Binary(b"hello".to_vec()))]);
    assert_eq!(
        to_xml_string(&node)?,
        r#"<root xmlns:Binary="http://www.w3.org/2001/XMLSchema/binary" Binary:data="aGVsbG8="/>"#
    );
    Ok(())
}

#[test]
fn test_text_key_becomes_element_text_content() -> Result<()> {
    assert_eq!(
        convert(r##"{"#text": "hello", "id": 3}"##)?,
        concat!(
            r#"<Text:root xmlns:Int="http://www.w3.org/2001/XMLSchema/integer""#,
            r#" xmlns:Text="http://www.w3.org/2001/XMLSchema/string""#,
            r#" Int:id="3">hello</Text:root>"#
        )
    );
    Ok(())
}

#[test]
fn test_empty_array_at_root_is_degenerate_document() -> Result<()> {
    assert_eq!(
        convert("[]")?,
        r#"<Array:root xmlns:Array="http://www.w3.org/2001/XMLSchema/list"/>"#
    );
    Ok(())
}

#[test]
fn test_empty_array_at_root_in_loose_mode_is_plain() -> Result<()> {
    let doc = Json2Xml::default()
        .with_loose_type_info(true)
        .to_xml(&from_json_str("[]")?)?;
    assert_eq!(doc.to_xml()?, "<root/>");
    Ok(())
}

#[test]
fn test_bare_array_of_scalars() -> Result<()> {
    assert_eq!(
        convert(r#"[1, "x"]"#)?,
        concat!(
            r#"<root xmlns:Int="http://www.w3.org/2001/XMLSchema/integer""#,
            r#" xmlns:Text="http://www.w3.org/2001/XMLSchema/string">"#,
            "<Int:item>1</Int:item><Text:item>x</Text:item></root>"
        )
    );
    Ok(())
}

#[test]
fn test_nested_arrays_get_item_wrappers() -> Result<()> {
    assert_eq!(
        convert("[[1],[2]]")?,
        concat!(
            r#"<root xmlns:Int="http://www.w3.org/2001/XMLSchema/integer">"#,
            "<item><Int:item>1</Int:item></item>",
            "<item><Int:item>2</Int:item></item></root>"
        )
    );
    Ok(())
}

#[test]
fn test_consistent_object_array_collapses_under_shared_wrapper() -> Result<()> {
    assert_eq!(
        convert(r#"{"k": [{"a": 1}, {"a": 1}]}"#)?,
        concat!(
            r#"<root xmlns:Int="http://www.w3.org/2001/XMLSchema/integer">"#,
            r#"<k><item Int:a="1"/><item Int:a="1"/></k></root>"#
        )
    );
    Ok(())
}

#[test]
fn test_heterogeneous_object_array_forks_per_item() -> Result<()> {
    // Divergent field sets must not share a wrapper shape; each item keeps
    // its own element and data.
    assert_eq!(
        convert(r#"{"k": [{"a": 1}, {"b": 2}]}"#)?,
        concat!(
            r#"<root xmlns:Int="http://www.w3.org/2001/XMLSchema/integer">"#,
            r#"<k Int:a="1"/><k Int:b="2"/></root>"#
        )
    );
    Ok(())
}

#[test]
fn test_scalar_array_field_forks_per_item() -> Result<()> {
    assert_eq!(
        convert(r#"{"k": [1, 2]}"#)?,
        concat!(
            r#"<root xmlns:Int="http://www.w3.org/2001/XMLSchema/integer">"#,
            "<Int:k>1</Int:k><Int:k>2</Int:k></root>"
        )
    );
    Ok(())
}

#[test]
fn test_nested_empty_array_is_element_with_no_children() -> Result<()> {
    assert_eq!(convert(r#"{"k": []}"#)?, "<root><k/></root>");
    Ok(())
}

#[test]
fn test_nested_objects_become_child_elements() -> Result<()> {
    assert_eq!(
        convert(r#"{"a": {"b": {"c": 1}}}"#)?,
        r#"<root xmlns:Int="http://www.w3.org/2001/XMLSchema/integer"><a><b Int:c="1"/></a></root>"#
    );
    Ok(())
}

#[test]
fn test_loose_mode_strips_all_type_info() -> Result<()> {
    let doc = Json2Xml::default()
        .with_loose_type_info(true)
        .to_xml(&from_json_str(r#"{"n": 3, "s": "x", "k": [1]}"#)?)?;
    let xml = doc.to_xml()?;
    assert_eq!(xml, r#"<root n="3" s="x"><k>1</k></root>"#);
    assert!(!xml.contains("xmlns"));
    Ok(())
}

#[test]
fn test_namespace_declarations_are_minimal() -> Result<()> {
    let doc = Json2Xml::default().to_xml(&from_json_str(r#"{"a": 1, "b": "x"}"#)?)?;
    let declared: Vec<&str> = doc.bindings.iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(declared, vec!["Int", "Text"]);
    Ok(())
}

#[test]
fn test_conversion_is_deterministic() -> Result<()> {
    let node = from_json_str(r##"{"a": [1, {"b": true}], "c": {"#text": "t", "d": null}}"##)?;
    let converter = Json2Xml::default();
    let first = converter.to_xml(&node)?.to_xml()?;
    let second = converter.to_xml(&node)?.to_xml()?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_parent_key_policy_forks_consistent_arrays_too() -> Result<()> {
    let doc = Json2Xml::default()
        .with_parent_key_policy(ParentKeyPolicy::PreserveParentKey)
        .to_xml(&from_json_str(r#"{"k": [{"a": 1}, {"a": 1}]}"#)?)?;
    assert_eq!(
        doc.to_xml()?,
        concat!(
            r#"<root xmlns:Int="http://www.w3.org/2001/XMLSchema/integer">"#,
            r#"<k Int:a="1"/><k Int:a="1"/></root>"#
        )
    );
    Ok(())
}

#[test]
fn test_configured_prefix_names() -> Result<()> {
    let settings = Json2XmlSettings {
        int_prefix: "I".to_string(),
        root_name: "data".to_string(),
        ..Default::default()
    };
    let doc = Json2Xml::new(settings).to_xml(&from_json_str(r#"{"n": 3}"#)?)?;
    assert_eq!(
        doc.to_xml()?,
        r#"<data xmlns:I="http://www.w3.org/2001/XMLSchema/integer" I:n="3"/>"#
    );
    Ok(())
}

#[test]
fn test_default_namespace_is_declared_first() -> Result<()> {
    let settings = Json2XmlSettings {
        namespace: Some("http://example.org/data".to_string()),
        ..Default::default()
    };
    let doc = Json2Xml::new(settings).to_xml(&from_json_str(r#"{"n": 3}"#)?)?;
    assert_eq!(
        doc.to_xml()?,
        concat!(
            r#"<root xmlns="http://example.org/data""#,
            r#" xmlns:Int="http://www.w3.org/2001/XMLSchema/integer" Int:n="3"/>"#
        )
    );
    Ok(())
}

#[test]
fn test_attribute_names_are_sanitized() -> Result<()> {
    assert_eq!(
        convert(r#"{"a key!": 1}"#)?,
        r#"<root xmlns:Int="http://www.w3.org/2001/XMLSchema/integer" Int:akey="1"/>"#
    );
    Ok(())
}

#[test]
fn test_missing_sentinel_is_skipped() -> Result<()> {
    let node = JsonNode::Object(vec![
        ("gone".to_string(), JsonNode::Missing),
        ("n".to_string(), JsonNode::Int(1)),
    ]);
    assert_eq!(
        to_xml_string(&node)?,
        r#"<root xmlns:Int="http://www.w3.org/2001/XMLSchema/integer" Int:n="1"/>"#
    );
    Ok(())
}

#[test]
fn test_unusable_field_key_is_an_error() {
    let result = convert(r#"{"1 bad key": {"a": 1}}"#);
    assert!(result.is_err());
}

#[test]
fn test_compound_text_key_field_is_an_error() {
    let err = convert(r##"{"#text": {"a": 1}}"##).unwrap_err();
    assert!(err.to_string().contains("reserved"));
    let err = convert(r##"{"#text": [1, 2]}"##).unwrap_err();
    assert!(err.to_string().contains("reserved"));
}

#[test]
fn test_root_scalar_becomes_typed_item() -> Result<()> {
    assert_eq!(
        convert("3")?,
        r#"<root xmlns:Int="http://www.w3.org/2001/XMLSchema/integer"><Int:item>3</Int:item></root>"#
    );
    Ok(())
}
