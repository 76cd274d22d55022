use dynaform::DynamicForm;
use schemars::JsonSchema;
use serde_json::json;

#[derive(JsonSchema)]
#[allow(dead_code)]
enum Priority {
    Low,
    Medium,
    High,
}

#[derive(JsonSchema)]
#[allow(dead_code)]
struct Task {
    name: String,
    priority: Priority,
    done: bool,
}

#[derive(JsonSchema)]
#[allow(dead_code)]
struct Board {
    owner: String,
    tasks: Vec<Task>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut form = DynamicForm::from_type::<Board>("board")?;
    for field in form.fields() {
        println!("{} ({})", field.path, field.label);
    }

    form.set_field("owner", json!("ada"));
    form.add_list_item("tasks");
    form.set_field("tasks[0].name", json!("ship the parser"));
    form.set_field("tasks[0].priority", json!("High"));
    form.set_field("tasks[0].done", json!(false));

    println!("{}", form.document_json());
    Ok(())
}
