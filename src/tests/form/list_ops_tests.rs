use serde_json::{Value, json};

use crate::DynamicForm;

fn tracker_form() -> DynamicForm {
    let schema = json!({
        "type": "object",
        "properties": {
            "tasks": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "done": { "type": "boolean" },
                    },
                },
            },
            "tags": { "type": "array", "items": { "type": "string" } },
        },
    });
    DynamicForm::new("tracker", &schema).expect("tracker schema resolves")
}

#[test]
fn appended_scalar_items_show_up_as_nulls() {
    let mut form = tracker_form();
    form.add_list_item("tags");
    assert_eq!(form.get("tags[0]"), Some(&json!(null)));
    assert_eq!(form.document(), json!({ "tags": [null] }));
    form.set_field("tags[0]", json!("urgent"));
    assert_eq!(form.document(), json!({ "tags": ["urgent"] }));
}

#[test]
fn appended_object_items_stay_invisible_until_edited() {
    let mut form = tracker_form();
    form.add_list_item("tasks");
    // The blank `{}` holds no leaves, so the rebuild drops it again.
    assert!(form.store().is_empty());
    assert_eq!(form.document(), json!({}));

    form.set_field("tasks[0].name", json!("write"));
    assert_eq!(form.document(), json!({ "tasks": [{ "name": "write" }] }));
}

#[test]
fn removal_renumbers_later_siblings() {
    let mut form = tracker_form().with_document(&json!({
        "tasks": [
            { "name": "a" },
            { "name": "b" },
            { "name": "c" },
        ],
    }));
    form.remove_list_item("tasks", 1);
    assert_eq!(form.get("tasks[0].name"), Some(&json!("a")));
    assert_eq!(form.get("tasks[1].name"), Some(&json!("c")));
    assert_eq!(form.get("tasks[2].name"), None);
    assert_eq!(
        form.document(),
        json!({ "tasks": [{ "name": "a" }, { "name": "c" }] }),
    );
}

#[test]
fn removal_of_missing_targets_is_a_no_op() {
    let seed = json!({ "tasks": [{ "name": "only" }], "tags": ["x"] });
    let mut form = tracker_form().with_document(&seed);
    form.remove_list_item("ghost", 0);
    form.remove_list_item("tasks", 5);
    form.remove_list_item("tasks[0].name", 0);
    assert_eq!(form.document(), seed);
}

#[test]
fn append_creates_the_array_when_missing() {
    let mut form = tracker_form();
    form.add_list_item("ghost");
    // No schema node backs the path, so the blank element is null.
    assert_eq!(form.document(), json!({ "ghost": [null] }));
}

#[test]
fn append_respects_existing_elements() {
    let mut form = tracker_form().with_document(&json!({ "tags": ["a"] }));
    form.add_list_item("tags");
    assert_eq!(form.document(), json!({ "tags": ["a", null] }));
    form.set_field("tags[1]", json!("b"));
    assert_eq!(form.document(), json!({ "tags": ["a", "b"] }));
}

#[test]
fn removal_clears_an_error_the_edit_raised() {
    let limit_one = |_: &str, document: &Value| {
        let count = document
            .get("tasks")
            .and_then(Value::as_array)
            .map_or(0, |tasks| tasks.len());
        (count > 1).then(|| "too many tasks".to_string())
    };
    let mut form = tracker_form().with_validator(limit_one);
    form.set_field("tasks[0].name", json!("a"));
    form.set_field("tasks[1].name", json!("b"));
    assert_eq!(form.error(), Some("too many tasks"));

    form.remove_list_item("tasks", 1);
    assert_eq!(form.error(), None);
}

#[test]
fn append_surfaces_a_validation_error() {
    let no_tags = |_: &str, document: &Value| {
        document
            .get("tags")
            .map(|_| "tags are not accepted".to_string())
    };
    let mut form = tracker_form().with_validator(no_tags);
    assert_eq!(form.error(), None);
    form.add_list_item("tags");
    assert_eq!(form.error(), Some("tags are not accepted"));
}
