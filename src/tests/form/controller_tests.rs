use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Value, json};

use crate::{DynamicForm, PlaceholderValidator, SubmitOutcome};

fn profile_schema() -> Value {
    json!({
        "type": "object",
        "title": "User Profile",
        "properties": {
            "personalDetails": {
                "type": "object",
                "title": "Personal Details",
                "properties": {
                    "firstName": { "type": "string", "title": "First Name" },
                    "lastName": { "type": "string", "title": "Last Name" },
                    "birthDate": { "type": "string", "format": "date" },
                },
            },
            "employment": {
                "type": "array",
                "title": "Employment",
                "items": {
                    "type": "object",
                    "properties": {
                        "company": { "type": "string" },
                        "years": { "type": "number" },
                    },
                },
            },
            "skills": {
                "type": "array",
                "items": { "type": "string", "enum": ["rust", "sql", "design"] },
            },
            "active": { "type": "boolean" },
        },
    })
}

fn profile_form() -> DynamicForm {
    DynamicForm::new("profile", &profile_schema()).expect("profile schema resolves")
}

#[test]
fn edits_compose_into_a_nested_document() {
    let schema = json!({
        "type": "object",
        "properties": {
            "a": { "type": "string" },
            "b": {
                "type": "array",
                "items": { "type": "object", "properties": { "c": { "type": "number" } } },
            },
        },
    });
    let mut form = DynamicForm::new("demo", &schema).expect("schema resolves");
    form.set_field("a", json!("x"));
    form.add_list_item("b");
    form.set_field("b[0].c", json!(5));
    assert_eq!(form.document(), json!({ "a": "x", "b": [{ "c": 5 }] }));
}

#[test]
fn placeholder_error_sets_and_clears_on_edit() {
    let mut form = profile_form().with_validator(PlaceholderValidator);
    form.set_field("personalDetails.firstName", json!(""));
    assert_eq!(
        form.error(),
        Some("First Name is required in Personal Details."),
    );
    form.set_field("personalDetails.firstName", json!("Jo"));
    assert_eq!(form.error(), None);
}

#[test]
fn rejected_submit_never_reaches_the_sink() {
    let received: Rc<RefCell<Vec<Value>>> = Rc::new(RefCell::new(Vec::new()));
    let captured = Rc::clone(&received);
    let mut form = profile_form()
        .with_validator(PlaceholderValidator)
        .with_on_submit(move |document: Value| captured.borrow_mut().push(document));

    let outcome = form.submit();
    assert!(matches!(outcome, SubmitOutcome::Rejected { .. }));
    assert!(received.borrow().is_empty());
    assert_eq!(
        form.error(),
        Some("First Name is required in Personal Details."),
    );

    form.set_field("personalDetails.firstName", json!("Ada"));
    let outcome = form.submit();
    assert!(outcome.is_accepted());
    assert_eq!(form.error(), None);
    assert_eq!(
        *received.borrow(),
        vec![json!({ "personalDetails": { "firstName": "Ada" } })],
    );
}

#[test]
fn submit_hands_over_the_document_but_keeps_the_store() {
    let mut form = profile_form().with_document(&json!({
        "personalDetails": { "firstName": "Ada" },
        "active": true,
    }));
    let before: Vec<String> = form.store().keys().cloned().collect();
    let outcome = form.submit();
    assert_eq!(
        outcome,
        SubmitOutcome::Accepted(json!({
            "personalDetails": { "firstName": "Ada" },
            "active": true,
        })),
    );
    let after: Vec<String> = form.store().keys().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn dismissing_the_error_keeps_the_data() {
    let mut form = profile_form().with_validator(PlaceholderValidator);
    form.set_field("personalDetails.lastName", json!("Lovelace"));
    assert!(form.error().is_some());
    form.dismiss_error();
    assert_eq!(form.error(), None);
    assert_eq!(
        form.get("personalDetails.lastName"),
        Some(&json!("Lovelace")),
    );
}

#[test]
fn multi_choice_values_live_under_one_key_until_a_rebuild() {
    let mut form = profile_form();
    form.set_field("skills", json!(["rust", "sql"]));
    assert_eq!(form.get("skills"), Some(&json!(["rust", "sql"])));
    assert_eq!(form.document()["skills"], json!(["rust", "sql"]));

    // A list operation re-flattens the document, which canonicalizes the
    // array into per-element keys without changing the document.
    form.add_list_item("employment");
    assert_eq!(form.get("skills"), None);
    assert_eq!(form.get("skills[0]"), Some(&json!("rust")));
    assert_eq!(form.get("skills[1]"), Some(&json!("sql")));
    assert_eq!(form.document()["skills"], json!(["rust", "sql"]));
}

#[test]
fn unvalidated_forms_accept_anything() {
    let mut form = profile_form();
    form.set_field("personalDetails.firstName", json!(""));
    assert_eq!(form.error(), None);
    assert!(form.submit().is_accepted());
}
