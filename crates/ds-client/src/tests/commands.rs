use crate::{ClientError, Command, CommandMethod, Conventions, QueryResult};

use googletest::assert_that;
use googletest::prelude::{eq, none};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
struct Greeting {
    item1: String,
    item2: String,
}

#[test]
fn given_entity_when_put_entity_then_wire_format_uses_pascal_case() {
    let conventions = Conventions::default();
    let greeting = Greeting {
        item1: "hello".to_string(),
        item2: "world".to_string(),
    };

    let command = Command::put_entity(None, &greeting, &conventions).unwrap();
    let wire = serde_json::to_value(&command).unwrap();

    assert_that!(wire["Method"], eq(&json!("PUT")));
    assert_that!(wire["Key"], eq(&json!(null)));
    assert_that!(
        wire["Document"],
        eq(&json!({"item1": "hello", "item2": "world"}))
    );
    assert_that!(wire["Metadata"]["Ds-Entity-Name"], eq(&json!("Greetings")));
}

#[test]
fn given_non_object_entity_when_put_entity_then_invalid_document() {
    let conventions = Conventions::default();

    let result = Command::put_entity(None, &42_u32, &conventions);

    assert!(matches!(result, Err(ClientError::InvalidDocument { .. })));
}

#[test]
fn given_delete_command_when_serialized_then_document_and_metadata_omitted() {
    let wire = serde_json::to_value(Command::delete("greetings/1")).unwrap();

    assert_that!(wire, eq(&json!({"Method": "DELETE", "Key": "greetings/1"})));
}

#[test]
fn given_raw_command_json_when_deserialized_then_fields_parsed() {
    let raw = r#"{"Method":"PUT","Key":null,"Document":{"item1":"hello"},"Metadata":{}}"#;

    let command: Command = serde_json::from_str(raw).unwrap();

    assert_that!(command.method, eq(CommandMethod::Put));
    assert_that!(command.key, none());
}

#[test]
fn given_query_response_when_deserialized_then_staleness_read() {
    let raw = r#"{"Results":[{"item1":"hello"}],"IsStale":true,"IndexEtag":3,"TotalResults":1}"#;

    let result: QueryResult = serde_json::from_str(raw).unwrap();

    assert!(result.is_stale);
    assert_that!(result.index_etag, eq(3));
    assert_that!(result.total_results, eq(1));
}
