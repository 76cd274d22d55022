use serde_json::{Value, json};

use crate::DynamicForm;

fn notes_form() -> DynamicForm {
    let schema = json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "tags": { "type": "array", "items": { "type": "string" } },
        },
    });
    DynamicForm::new("notes", &schema).expect("notes schema resolves")
}

#[test]
fn malformed_json_keeps_previous_state() {
    let mut form = notes_form().with_document(&json!({ "title": "draft" }));
    let err = form.load_from_json("{\"title\": ").expect_err("malformed input");
    assert!(err.to_string().starts_with("invalid document: "));
    assert_eq!(form.get("title"), Some(&json!("draft")));
    assert_eq!(form.document(), json!({ "title": "draft" }));
}

#[test]
fn pasted_json_replaces_the_whole_store() {
    let mut form = notes_form().with_document(&json!({
        "title": "draft",
        "tags": ["a", "b"],
    }));
    form.load_from_json("{\"title\": \"final\"}")
        .expect("well-formed input");
    assert_eq!(form.get("title"), Some(&json!("final")));
    assert_eq!(form.get("tags[0]"), None);
    assert_eq!(form.document(), json!({ "title": "final" }));
}

#[test]
fn json_view_round_trips_through_load() {
    let document = json!({
        "title": "plan",
        "tags": ["x", "y"],
    });
    let mut form = notes_form().with_document(&document);
    let rendered = form.document_json();
    form.load_from_json(&rendered).expect("own output parses");
    assert_eq!(form.document(), document);
}

#[test]
fn loads_accept_keys_outside_the_schema() {
    let mut form = notes_form();
    form.load_from_document(&json!({ "unknown": { "deep": 1 } }));
    assert_eq!(form.get("unknown.deep"), Some(&json!(1)));
    assert_eq!(form.document(), json!({ "unknown": { "deep": 1 } }));
}

#[test]
fn parse_errors_carry_the_reason() {
    let mut form = notes_form();
    let err = form
        .load_from_json("not json at all")
        .expect_err("malformed input");
    assert!(!err.message.is_empty());
    let rendered: Value = serde_json::from_str(&form.document_json()).expect("view stays valid");
    assert_eq!(rendered, json!({}));
}
