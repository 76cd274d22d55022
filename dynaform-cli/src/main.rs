//! Command-line driver for dynaform.
//!
//! `plan` prints the resolved field outline of a schema, `flatten` and
//! `unflatten` convert between nested documents and flat path entries, and
//! `edit` applies scripted edits to a form and prints the submitted
//! document. Input specs accept a file path, inline JSON, or `-` for
//! stdin.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use serde_json::Value;

use dynaform::{
    DynamicForm, FlatStore, SchemaNode, SchemaType, SchemaValidator, SubmitOutcome, flatten,
    outline, parse_schema, parse_segments, resolve_fields, unflatten,
};

#[derive(Debug, Parser)]
#[command(
    name = "dynaform",
    version,
    about = "Drive JSON-Schema forms from the command line"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the resolved field plan of a schema as JSON
    Plan {
        /// Schema spec: file path, inline JSON, or "-" for stdin
        #[arg(short = 's', long = "schema", value_name = "SPEC")]
        schema: String,
    },
    /// Flatten a nested document into path-addressed entries
    Flatten {
        /// Document spec: file path, inline JSON, or "-" for stdin
        #[arg(short = 'd', long = "data", value_name = "SPEC")]
        data: String,
    },
    /// Rebuild a nested document from a flat JSON object
    Unflatten {
        /// Flat-entry spec: file path, inline JSON, or "-" for stdin
        #[arg(short = 'd', long = "data", value_name = "SPEC")]
        data: String,
    },
    /// Apply scripted edits to a form and print the submitted document
    Edit {
        /// Schema spec: file path, inline JSON, or "-" for stdin
        #[arg(short = 's', long = "schema", value_name = "SPEC")]
        schema: String,

        /// Document to seed the form with
        #[arg(short = 'd', long = "data", value_name = "SPEC")]
        data: Option<String>,

        /// Append a blank item to the list at PATH (applied before --set)
        #[arg(long = "add", value_name = "PATH", action = ArgAction::Append)]
        add: Vec<String>,

        /// Set one field, coercing VALUE against the schema
        #[arg(long = "set", value_name = "PATH=VALUE", action = ArgAction::Append)]
        set: Vec<String>,

        /// Remove the item at PATH[INDEX] (applied after --set)
        #[arg(long = "remove", value_name = "PATH[INDEX]", action = ArgAction::Append)]
        remove: Vec<String>,

        /// Submit without schema validation
        #[arg(long = "no-validate")]
        no_validate: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Plan { schema } => run_plan(&schema),
        Command::Flatten { data } => run_flatten(&data),
        Command::Unflatten { data } => run_unflatten(&data),
        Command::Edit {
            schema,
            data,
            add,
            set,
            remove,
            no_validate,
        } => run_edit(&schema, data.as_deref(), &add, &set, &remove, no_validate),
    }
}

fn run_plan(spec: &str) -> Result<()> {
    let schema = load_value(spec, "schema")?;
    let fields = resolve_fields(&parse_schema(&schema));
    println!("{}", serde_json::to_string_pretty(&outline(&fields))?);
    Ok(())
}

fn run_flatten(spec: &str) -> Result<()> {
    let document = load_value(spec, "document")?;
    let store = flatten(&document);
    println!("{}", serde_json::to_string_pretty(&store.to_value())?);
    Ok(())
}

fn run_unflatten(spec: &str) -> Result<()> {
    let value = load_value(spec, "entries")?;
    let Value::Object(entries) = value else {
        return Err(eyre!("flat entries must be a JSON object of path/value pairs"));
    };
    let store: FlatStore = entries.into_iter().collect();
    println!("{}", serde_json::to_string_pretty(&unflatten(&store))?);
    Ok(())
}

fn run_edit(
    schema_spec: &str,
    data_spec: Option<&str>,
    add: &[String],
    set: &[String],
    remove: &[String],
    no_validate: bool,
) -> Result<()> {
    let schema = load_value(schema_spec, "schema")?;
    let mut form = DynamicForm::new(schema_label(&schema), &schema).map_err(Report::msg)?;
    if !no_validate {
        let validator = SchemaValidator::new(&schema).map_err(Report::msg)?;
        form = form.with_validator(validator);
    }
    if let Some(spec) = data_spec {
        let document = load_value(spec, "document")?;
        form = form.with_document(&document);
    }

    for path in add {
        form.add_list_item(path);
    }
    for assignment in set {
        let (path, raw) = split_assignment(assignment)?;
        let value = coerce_value(form.schema(), path, raw);
        form.set_field(path, value);
    }
    for target in remove {
        let (path, index) = split_removal(target)?;
        form.remove_list_item(path, index);
    }

    match form.submit() {
        SubmitOutcome::Accepted(document) => {
            println!("{}", serde_json::to_string_pretty(&document)?);
            Ok(())
        }
        SubmitOutcome::Rejected { message } => Err(eyre!("validation failed: {message}")),
    }
}

fn schema_label(schema: &Value) -> String {
    schema
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or("form")
        .to_string()
}

fn split_assignment(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .filter(|(path, _)| !path.is_empty())
        .ok_or_else(|| eyre!("--set expects PATH=VALUE, got '{raw}'"))
}

fn split_removal(raw: &str) -> Result<(&str, usize)> {
    let malformed = || eyre!("--remove expects PATH[INDEX], got '{raw}'");
    let inner = raw.strip_suffix(']').ok_or_else(malformed)?;
    let (path, digits) = inner.rsplit_once('[').ok_or_else(malformed)?;
    let index = digits
        .parse::<usize>()
        .wrap_err_with(|| format!("bad index in '{raw}'"))?;
    Ok((path, index))
}

/// Turn raw flag text into the JSON value the schema expects at `path`.
/// Text that fails to parse as the declared kind, or parses to a
/// non-finite number JSON cannot carry, is kept as a string so validation
/// can report it instead of the edit being dropped.
fn coerce_value(schema: &SchemaNode, path: &str, raw: &str) -> Value {
    let declared = schema
        .descend(&parse_segments(path))
        .and_then(|node| node.schema_type);
    match declared {
        Some(SchemaType::String) => Value::String(raw.to_string()),
        Some(SchemaType::Integer) => raw
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(raw.to_string())),
        Some(SchemaType::Number) => raw
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .map(Value::from)
            .unwrap_or_else(|| Value::String(raw.to_string())),
        Some(SchemaType::Boolean) => match raw {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::String(raw.to_string()),
        },
        // Arrays, objects and undeclared paths take any JSON literal.
        Some(SchemaType::Array) | Some(SchemaType::Object) | None => {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
        }
    }
}

#[derive(Debug)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

fn load_value(spec: &str, label: &str) -> Result<Value> {
    if spec == "-" {
        let contents = read_from_source(&InputSource::Stdin)?;
        return parse_contents(&contents, label);
    }

    let path = PathBuf::from(spec);
    match read_from_source(&InputSource::File(path.clone())) {
        Ok(contents) => parse_contents(&contents, label),
        Err(err) => {
            if is_not_found(&err) {
                let inline_label = format!("inline {label}");
                return parse_contents(spec, &inline_label);
            }
            Err(err.wrap_err(format!("failed to load {label} from {}", path.display())))
        }
    }
}

fn read_from_source(source: &InputSource) -> Result<String> {
    match source {
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("failed to read from stdin")?;
            Ok(buffer)
        }
        InputSource::File(path) => fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read file {}", path.display())),
    }
}

fn is_not_found(err: &Report) -> bool {
    err.downcast_ref::<io::Error>()
        .map_or(false, |io_err| io_err.kind() == io::ErrorKind::NotFound)
}

fn parse_contents(contents: &str, label: &str) -> Result<Value> {
    serde_json::from_str(contents).wrap_err_with(|| format!("failed to parse {label} as JSON"))
}
