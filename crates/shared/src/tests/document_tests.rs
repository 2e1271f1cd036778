use super::*;

#[test]
fn parses_slate_document_and_keeps_marks() {
    let raw = r#"[{"type":"paragraph","children":[{"text":"Hello "},{"text":"world","bold":true}]}]"#;
    let document = Document::from_json_str(raw).expect("parse document");

    assert_eq!(document.plain_text(), "Hello world");
    let reserialized = document.to_json_string().expect("serialize document");
    let value: Value = serde_json::from_str(&reserialized).expect("json");
    assert_eq!(value[0]["children"][1]["bold"], Value::Bool(true));
    assert_eq!(value[0]["type"], Value::String("paragraph".to_string()));
}

#[test]
fn nested_elements_contribute_to_plain_text() {
    let raw = r#"[{"type":"bulleted-list","children":[{"type":"list-item","children":[{"text":"one"}]},{"type":"list-item","children":[{"text":"two"}]}]}]"#;
    let document = Document::from_json_str(raw).expect("parse document");
    assert_eq!(document.plain_text(), "onetwo");
}

#[test]
fn plain_text_reads_only_the_first_block() {
    let document = Document::from_plain_lines("Launch party\nsecond line");
    assert_eq!(document.plain_text(), "Launch party");
    assert_eq!(document.full_text(), "Launch party\nsecond line");
}

#[test]
fn missing_or_blank_description_keeps_placeholder() {
    assert_eq!(
        Document::from_description(None),
        Document::placeholder_description()
    );
    assert_eq!(
        Document::from_description(Some("   ")),
        Document::placeholder_description()
    );
}

#[test]
fn non_document_description_becomes_paragraph() {
    let document = Document::from_description(Some("Bring snacks"));
    assert_eq!(document, Document::paragraph("Bring snacks"));
}

#[test]
fn empty_document_array_is_rejected() {
    assert!(matches!(
        Document::from_json_str("[]"),
        Err(DocumentError::Empty)
    ));
}

#[test]
fn heading_is_a_single_heading_block() {
    let document = Document::heading("Rust meetup");
    match &document.0[0] {
        Node::Element(element) => assert_eq!(element.kind, "heading"),
        Node::Text(_) => panic!("expected element"),
    }
    assert_eq!(document.plain_text(), "Rust meetup");
}

const RICH_DESCRIPTION: &str = r#"[{"type":"paragraph","children":[{"text":"Talks and pizza","bold":true}],"align":"center"},{"type":"bulleted-list","children":[{"type":"list-item","children":[{"text":"one"}]},{"type":"list-item","children":[{"text":"two"}]}]}]"#;

#[test]
fn blocks_mark_nested_content_read_only() {
    let document = Document::from_json_str(RICH_DESCRIPTION).expect("parse document");
    assert_eq!(
        document.blocks(),
        vec![
            TextBlock {
                text: "Talks and pizza".to_string(),
                editable: true,
            },
            TextBlock {
                text: "onetwo".to_string(),
                editable: false,
            },
        ]
    );
}

#[test]
fn block_edit_keeps_marks_and_attributes() {
    let mut document = Document::from_json_str(RICH_DESCRIPTION).expect("parse document");
    document
        .set_block_text(0, "Talks, pizza and demos")
        .expect("flat block is editable");

    let value: Value =
        serde_json::from_str(&document.to_json_string().expect("serialize")).expect("json");
    assert_eq!(value[0]["children"][0]["text"], "Talks, pizza and demos");
    assert_eq!(value[0]["children"][0]["bold"], Value::Bool(true));
    assert_eq!(value[0]["align"], "center");
    assert_eq!(value[1]["children"][1]["children"][0]["text"], "two");
}

#[test]
fn edit_then_revert_restores_identical_json() {
    let original = Document::from_json_str(RICH_DESCRIPTION).expect("parse document");
    let mut document = original.clone();
    document.set_block_text(0, "Talks").expect("edit");
    document.set_block_text(0, "Talks and pizza").expect("revert");

    assert_eq!(document, original);
    assert_eq!(
        document.to_json_string().expect("serialize"),
        original.to_json_string().expect("serialize")
    );
}

#[test]
fn nested_or_missing_blocks_reject_text_edits() {
    let mut document = Document::from_json_str(RICH_DESCRIPTION).expect("parse document");
    assert!(matches!(
        document.set_block_text(1, "flattened"),
        Err(DocumentError::ReadOnlyBlock(1))
    ));
    assert!(matches!(
        document.set_block_text(5, "x"),
        Err(DocumentError::NoSuchBlock(5))
    ));
    assert_eq!(document.blocks()[1].text, "onetwo");
}

#[test]
fn title_placeholder_is_a_heading() {
    assert_eq!(
        Document::placeholder_title(),
        Document::heading(TITLE_PLACEHOLDER)
    );
}
