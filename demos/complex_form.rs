use dynaform::{DynamicForm, PlaceholderValidator, outline};
use serde_json::{Value, json};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let schema = json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "User Profile",
        "type": "object",
        "properties": {
            "personalDetails": {
                "type": "object",
                "title": "Personal Details",
                "properties": {
                    "firstName": { "type": "string", "title": "First Name" },
                    "lastName": { "type": "string", "title": "Last Name" },
                    "birthDate": { "type": "string", "format": "date", "title": "Birth Date" },
                    "gender": { "type": "string", "enum": ["female", "male", "other"] }
                }
            },
            "employment": {
                "type": "array",
                "title": "Employment History",
                "items": {
                    "type": "object",
                    "properties": {
                        "company": { "type": "string" },
                        "role": { "type": "string" },
                        "years": { "type": "number" }
                    }
                }
            },
            "skills": {
                "type": "array",
                "title": "Skills",
                "items": { "type": "string", "enum": ["rust", "sql", "design", "ops"] }
            },
            "remote": { "type": "boolean", "title": "Remote friendly" }
        }
    });

    let mut form = DynamicForm::new("profile", &schema)?
        .with_validator(PlaceholderValidator)
        .with_on_submit(|document: Value| {
            println!("submitted:\n{document:#}");
        });

    println!("field plan:");
    println!("{}", serde_json::to_string_pretty(&outline(form.fields()))?);

    form.set_field("personalDetails.lastName", json!("Lovelace"));
    form.set_field("personalDetails.birthDate", json!("1815-12-10"));
    form.set_field("personalDetails.gender", json!("female"));
    form.set_field("skills", json!(["rust", "design"]));
    form.set_field("remote", json!(true));
    form.add_list_item("employment");
    form.set_field("employment[0].company", json!("Analytical Engines"));
    form.set_field("employment[0].years", json!(9.5));

    if let Some(message) = form.error() {
        println!("validation: {message}");
    }
    println!("document so far:\n{}", form.document_json());

    // First submit fails until the required first name is filled in.
    let outcome = form.submit();
    println!("first submit accepted: {}", outcome.is_accepted());
    form.set_field("personalDetails.firstName", json!("Ada"));
    let outcome = form.submit();
    println!("second submit accepted: {}", outcome.is_accepted());

    Ok(())
}
